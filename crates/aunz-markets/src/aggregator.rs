//! Concurrent fan-out over every configured market data source.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use aunz_core::{Market, SourceError, SourceId, SourceListing};
use futures::future::join_all;

use crate::normalize::normalize_payload;
use crate::snapshot::SnapshotStore;
use crate::sources::MarketDataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorOptions {
    pub live_collection: bool,
    /// Budget for each source call, independent of the others.
    pub source_timeout: Duration,
    pub result_limit: u32,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            live_collection: true,
            source_timeout: Duration::from_secs(20),
            result_limit: 20,
        }
    }
}

/// Queries all sources for one keyword and normalizes what comes back.
///
/// Every configured source appears in the result. A source that is
/// unsupported for the market, fails, or times out maps to `None`; a search
/// that succeeds with no hits is a listing with a zero count.
pub struct MarketDataAggregator {
    sources: Vec<Arc<dyn MarketDataSource>>,
    snapshots: Arc<dyn SnapshotStore>,
    options: AggregatorOptions,
}

impl MarketDataAggregator {
    pub fn new(
        sources: Vec<Arc<dyn MarketDataSource>>,
        snapshots: Arc<dyn SnapshotStore>,
        options: AggregatorOptions,
    ) -> Self {
        Self {
            sources,
            snapshots,
            options,
        }
    }

    #[must_use]
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    pub async fn collect(
        &self,
        keyword: &str,
        market: Market,
    ) -> BTreeMap<SourceId, Option<SourceListing>> {
        self.collect_outcomes(keyword, market)
            .await
            .into_iter()
            .map(|(id, outcome)| (id, outcome.ok()))
            .collect()
    }

    /// Like [`collect`](Self::collect), keeping why each absent source
    /// produced nothing.
    pub async fn collect_outcomes(
        &self,
        keyword: &str,
        market: Market,
    ) -> BTreeMap<SourceId, Result<SourceListing, SourceError>> {
        let queries = self.sources.iter().map(|source| async move {
            let source_id = source.id();
            let outcome = self.collect_one(source.as_ref(), keyword, market).await;
            match &outcome {
                Ok(listing) => tracing::debug!(
                    source = %source_id,
                    keyword,
                    listings = listing.total_result_count,
                    "source search complete"
                ),
                Err(
                    e @ (SourceError::UnsupportedMarket { .. }
                    | SourceError::LiveCollectionDisabled { .. }),
                ) => tracing::debug!(source = %source_id, keyword, error = %e, "source skipped"),
                Err(e) => tracing::warn!(
                    source = %source_id,
                    keyword,
                    market = %market,
                    error = %e,
                    "source failed; continuing without it"
                ),
            }
            (source_id, outcome)
        });

        join_all(queries).await.into_iter().collect()
    }

    async fn collect_one(
        &self,
        source: &dyn MarketDataSource,
        keyword: &str,
        market: Market,
    ) -> Result<SourceListing, SourceError> {
        let source_id = source.id();

        if !source.supports(market) {
            return Err(SourceError::UnsupportedMarket {
                source_id,
                market: market.to_string(),
            });
        }

        if !self.options.live_collection && source.requires_live_collection() {
            tracing::debug!(source = %source_id, keyword, "live collection disabled, using snapshot");
            return self
                .snapshots
                .get(&source_id, keyword)
                .ok_or(SourceError::LiveCollectionDisabled { source_id });
        }

        let call = source.search(keyword, market, self.options.result_limit);
        let payload = match tokio::time::timeout(self.options.source_timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SourceError::Timeout {
                    source_id,
                    timeout_ms: u64::try_from(self.options.source_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                })
            }
        };
        Ok(normalize_payload(source_id, payload))
    }
}
