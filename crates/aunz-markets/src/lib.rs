//! Market-side data collection: per-marketplace sources, the concurrent
//! aggregator that normalizes their payloads, the snapshot store used when
//! live collection is off, and search-interest trend summaries.

pub mod aggregator;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod snapshot;
pub mod sources;
pub mod trends;
pub mod types;

pub use aggregator::{AggregatorOptions, MarketDataAggregator};
pub use error::EbayError;
pub use normalize::normalize_payload;
pub use snapshot::{load_snapshots, SnapshotEntry, SnapshotStore, StaticSnapshotStore};
pub use sources::ebay::EbayBrowseSource;
pub use sources::{MarketDataSource, SnapshotSource};
pub use trends::{collect_trend_summaries, SearchInterestSource, TrendSummary};
pub use types::SourcePayload;
