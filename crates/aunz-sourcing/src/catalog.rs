//! File-backed sourcing marketplace built from previously captured offers.

use std::path::Path;

use async_trait::async_trait;
use aunz_core::{SourceError, SourceId};
use serde::Deserialize;

use crate::error::SourcingError;
use crate::matching::SourcingMarketplace;
use crate::parse::number_value;
use crate::types::RawOffer;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    offers: Vec<RawOffer>,
}

/// In-memory offer table queried by localized keyword, cheapest first.
///
/// An offer matches when its `search_keyword` equals the query, or, for
/// offers captured without one, when its title contains the query.
#[derive(Debug, Clone)]
pub struct OfferCatalog {
    id: SourceId,
    offers: Vec<RawOffer>,
}

impl OfferCatalog {
    pub const DEFAULT_ID: &'static str = "1688";

    #[must_use]
    pub fn from_offers(offers: Vec<RawOffer>) -> Self {
        Self {
            id: SourceId::new(Self::DEFAULT_ID),
            offers,
        }
    }

    /// Loads `{"offers": [...]}` from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SourcingError::CatalogIo`] if the file cannot be read, or
    /// [`SourcingError::CatalogParse`] if it is not a valid catalog.
    pub fn from_json_file(path: &Path) -> Result<Self, SourcingError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| SourcingError::CatalogIo {
                path: path.display().to_string(),
                source,
            })?;
        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|source| SourcingError::CatalogParse {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(path = %path.display(), offers = file.offers.len(), "offer catalog loaded");
        Ok(Self::from_offers(file.offers))
    }

    #[must_use]
    pub fn with_id(mut self, id: SourceId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Matching offers at or below `max_price`, cheapest first.
    #[must_use]
    pub fn query(&self, localized_keyword: &str, max_price: f64, limit: usize) -> Vec<RawOffer> {
        let keyword = localized_keyword.trim();
        if keyword.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(f64, &RawOffer)> = self
            .offers
            .iter()
            .filter(|offer| match offer.search_keyword.as_deref() {
                Some(k) => k.trim() == keyword,
                None => offer
                    .title
                    .as_deref()
                    .is_some_and(|title| title.contains(keyword)),
            })
            .filter_map(|offer| {
                let price = offer.price.as_ref().and_then(number_value)?;
                (price <= max_price).then_some((price, offer))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter()
            .take(limit)
            .map(|(_, offer)| offer.clone())
            .collect()
    }
}

#[async_trait]
impl SourcingMarketplace for OfferCatalog {
    fn id(&self) -> SourceId {
        self.id.clone()
    }

    async fn search(
        &self,
        localized_keyword: &str,
        max_price: f64,
        limit: usize,
    ) -> Result<Vec<RawOffer>, SourceError> {
        Ok(self.query(localized_keyword, max_price, limit))
    }
}
