//! Composite opportunity ranking: turns market listings, search interest and
//! supplier prices into one weighted 0–100 score per product category.

pub mod cache;
pub mod components;
pub mod engine;
pub mod service;

pub use cache::LatestRankings;
pub use engine::{RankingEngine, TrendsSettings};
pub use service::RankingService;
