//! Ranked output of a composite scoring run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::listing::PriceStats;
use crate::market::{Market, SourceId};

/// Weight vector applied to the four component scores.
///
/// Construction through [`ScoreWeights::new`] guarantees the weights sum to 1.0
/// so the weighted total stays within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub demand: f64,
    pub trend: f64,
    pub profit: f64,
    pub competition: f64,
}

impl ScoreWeights {
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        demand: 0.40,
        trend: 0.20,
        profit: 0.25,
        competition: 0.15,
    };

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidWeights`] if any weight is negative or the
    /// weights do not sum to 1.0.
    pub fn new(demand: f64, trend: f64, profit: f64, competition: f64) -> Result<Self, CoreError> {
        let weights = Self {
            demand,
            trend,
            profit,
            competition,
        };
        let sum = weights.sum();
        let any_negative = [demand, trend, profit, competition]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0);
        if any_negative || (sum - 1.0).abs() > 1e-9 {
            return Err(CoreError::InvalidWeights { sum });
        }
        Ok(weights)
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.demand + self.trend + self.profit + self.competition
    }

    /// Weighted sum of `scores`.
    #[must_use]
    pub fn apply(&self, scores: &ComponentScores) -> f64 {
        scores.demand * self.demand
            + scores.trend * self.trend
            + scores.profit * self.profit
            + scores.competition * self.competition
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The four 0–100 sub-scores behind a category's total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub demand: f64,
    pub trend: f64,
    pub profit: f64,
    pub competition: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    /// Level series, or no search-interest data.
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStat {
    pub listings: u64,
    pub price_range: Option<PriceStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendInfo {
    pub direction: TrendDirection,
    pub current_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierInfo {
    /// Implied unit cost in the sourcing currency; 0 when no supplier data.
    pub cost_price_cny: f64,
    pub product_count: usize,
    /// Offer ID of the cheapest candidate, if any.
    pub top_offer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitAnalysis {
    pub cost_local: f64,
    pub market_price_local: f64,
    pub profit_margin_percent: f64,
}

/// Explanation of where a category's component scores came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetails {
    pub platform_stats: BTreeMap<SourceId, PlatformStat>,
    pub trend_info: TrendInfo,
    pub supplier_info: SupplierInfo,
    pub profit_analysis: ProfitAnalysis,
}

/// One ranked row of a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub keyword: String,
    /// Category name in the sourcing marketplace's language.
    pub localized_label: String,
    pub english_label: String,
    pub total_score: f64,
    pub component_scores: ComponentScores,
    pub weights: ScoreWeights,
    /// Dense 1-based position; 0 until the run assigns ranks.
    pub rank: usize,
    pub details: CategoryDetails,
}

/// A complete ranking run for one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRun {
    pub run_id: Uuid,
    pub market: Market,
    pub rankings: Vec<CategoryScore>,
    pub generated_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    /// Whether each configured market source contributed data to any category.
    pub data_sources: BTreeMap<SourceId, bool>,
    pub trends_available: bool,
    pub suppliers_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ScoreWeights::DEFAULT.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_weights_not_summing_to_one() {
        let err = ScoreWeights::new(0.5, 0.2, 0.2, 0.2).unwrap_err();
        assert!(matches!(err, CoreError::InvalidWeights { .. }));
    }

    #[test]
    fn new_rejects_negative_weight() {
        assert!(ScoreWeights::new(1.2, -0.2, 0.0, 0.0).is_err());
    }

    #[test]
    fn apply_is_weighted_sum() {
        let scores = ComponentScores {
            demand: 50.0,
            trend: 50.0,
            profit: 50.0,
            competition: 100.0,
        };
        let total = ScoreWeights::DEFAULT.apply(&scores);
        assert!((total - 57.5).abs() < 1e-9, "got {total}");
    }

    #[test]
    fn trend_direction_serializes_lowercase() {
        let json = serde_json::to_string(&TrendDirection::Up).unwrap();
        assert_eq!(json, "\"up\"");
    }
}
