//! Sourcing-side scoring: bridges English product titles to sourcing-marketplace
//! search terms, filters and scores supplier offers, and estimates landed-cost
//! profit for a resale price.

pub mod catalog;
pub mod dictionary;
pub mod dimensions;
pub mod error;
pub mod filter;
pub mod keywords;
pub mod matching;
pub mod normalize;
pub mod parse;
pub mod profit;
pub mod scorer;
pub mod types;

pub use catalog::OfferCatalog;
pub use dictionary::KeywordDictionary;
pub use dimensions::parse_dimensions;
pub use error::SourcingError;
pub use filter::{passes_price, passes_size, SizeLimits};
pub use keywords::{BridgedKeywords, KeywordBridge};
pub use matching::{MatchOptions, MatchResult, SourcingMarketplace, SupplierMatcher, TargetProduct};
pub use normalize::normalize_offer;
pub use profit::{ProfitEstimate, ProfitEstimator};
pub use scorer::{ScoreBreakdown, SupplierScorer, MATCH_RELEVANCE_SCORE};
pub use types::{NumberOrText, RawOffer};
