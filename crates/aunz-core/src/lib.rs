//! Shared domain types and configuration for the AU/NZ opportunity scorer.
//!
//! Every other crate in the workspace depends on this one for the values that
//! cross component boundaries: normalized marketplace listings, sourcing
//! candidates, ranked category scores, and the per-source error taxonomy.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod error;
pub mod listing;
pub mod market;
pub mod ranking;
pub mod supplier;

pub use app_config::AppConfig;
pub use categories::{builtin_categories, load_categories, CategoriesFile, CategoryConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError, SourceError};
pub use listing::{ListingItem, PriceStats, SourceListing};
pub use market::{ExchangeRates, Market, SourceId};
pub use ranking::{
    CategoryDetails, CategoryScore, ComponentScores, PlatformStat, ProfitAnalysis, RankingRun,
    ScoreWeights, SupplierInfo, TrendDirection, TrendInfo,
};
pub use supplier::SupplierCandidate;
