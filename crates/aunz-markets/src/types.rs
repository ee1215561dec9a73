use aunz_core::{ListingItem, PriceStats};
use serde::{Deserialize, Serialize};

/// What a market data source hands back before normalization.
///
/// API-backed sources report a server-side result count alongside a page of
/// items; scraper-backed sources only see the items they parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourcePayload {
    SearchSummary {
        total_results: u64,
        /// Band computed upstream; derived from `items` when absent.
        #[serde(default)]
        price_stats: Option<PriceStats>,
        #[serde(default)]
        items: Vec<ListingItem>,
    },
    ItemList { items: Vec<ListingItem> },
}
