//! Market data sources: one implementation per resale marketplace.

pub mod ebay;

use std::sync::Arc;

use async_trait::async_trait;
use aunz_core::{Market, SourceError, SourceId};

use crate::snapshot::SnapshotStore;
use crate::types::SourcePayload;

/// A resale marketplace that reports listing counts and prices for a keyword.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    fn id(&self) -> SourceId;

    fn supports(&self, market: Market) -> bool;

    /// Sources backed by live scraping are skipped in favour of stored
    /// snapshots when live collection is disabled.
    fn requires_live_collection(&self) -> bool {
        false
    }

    async fn search(
        &self,
        keyword: &str,
        market: Market,
        limit: u32,
    ) -> Result<SourcePayload, SourceError>;
}

/// A scraper-backed marketplace whose data is only available from snapshots.
pub struct SnapshotSource {
    id: SourceId,
    markets: Vec<Market>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl SnapshotSource {
    pub fn new(id: SourceId, markets: &[Market], snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            id,
            markets: markets.to_vec(),
            snapshots,
        }
    }

    pub fn trademe(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self::new(SourceId::TRADEME, &[Market::Nz], snapshots)
    }

    pub fn amazon(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self::new(SourceId::AMAZON, &Market::ALL, snapshots)
    }

    pub fn temu(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self::new(SourceId::TEMU, &Market::ALL, snapshots)
    }
}

#[async_trait]
impl MarketDataSource for SnapshotSource {
    fn id(&self) -> SourceId {
        self.id.clone()
    }

    fn supports(&self, market: Market) -> bool {
        self.markets.contains(&market)
    }

    fn requires_live_collection(&self) -> bool {
        true
    }

    async fn search(
        &self,
        keyword: &str,
        _market: Market,
        _limit: u32,
    ) -> Result<SourcePayload, SourceError> {
        let listing =
            self.snapshots
                .get(&self.id, keyword)
                .ok_or_else(|| SourceError::Unavailable {
                    source_id: self.id.clone(),
                    reason: format!("no snapshot for '{keyword}'"),
                })?;
        Ok(SourcePayload::SearchSummary {
            total_results: listing.total_result_count,
            price_stats: listing.price_stats,
            items: listing.sample_items,
        })
    }
}
