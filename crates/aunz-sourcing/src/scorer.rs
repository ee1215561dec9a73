//! Weighted 0–100 supplier scoring against a target resale price.

use aunz_core::{ExchangeRates, SupplierCandidate};
use serde::Serialize;

use crate::error::SourcingError;

pub const PRICE_WEIGHT: f64 = 0.30;
pub const REPUTATION_WEIGHT: f64 = 0.25;
pub const SALES_WEIGHT: f64 = 0.20;
pub const LOGISTICS_WEIGHT: f64 = 0.15;
pub const RELEVANCE_WEIGHT: f64 = 0.10;

/// Relevance sub-score until real title similarity exists.
pub const MATCH_RELEVANCE_SCORE: f64 = 80.0;

/// Share of the target price (in sourcing currency) budgeted for unit cost.
const TARGET_COST_SHARE: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub price: f64,
    pub reputation: f64,
    pub sales: f64,
    pub logistics: f64,
    pub relevance: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SupplierScorer {
    rates: ExchangeRates,
}

impl SupplierScorer {
    #[must_use]
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    /// Scores a candidate against a resale price in `target_currency`.
    ///
    /// # Errors
    ///
    /// Returns [`SourcingError::InvalidInput`] if `target_price` is not a
    /// positive finite number.
    pub fn score(
        &self,
        candidate: &SupplierCandidate,
        target_price: f64,
        target_currency: &str,
    ) -> Result<f64, SourcingError> {
        self.breakdown(candidate, target_price, target_currency)
            .map(|b| b.total)
    }

    /// Same as [`Self::score`], keeping the individual sub-scores.
    ///
    /// # Errors
    ///
    /// Returns [`SourcingError::InvalidInput`] if `target_price` is not a
    /// positive finite number.
    pub fn breakdown(
        &self,
        candidate: &SupplierCandidate,
        target_price: f64,
        target_currency: &str,
    ) -> Result<ScoreBreakdown, SourcingError> {
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(SourcingError::InvalidInput(format!(
                "target price must be positive, got {target_price}"
            )));
        }

        let target_cost = target_price * self.rates.to_sourcing(target_currency) * TARGET_COST_SHARE;

        let price = price_score(candidate.price, target_cost);
        let reputation = reputation_score(candidate);
        let sales = sales_score(candidate.sold_count);
        let logistics = logistics_score(candidate);
        let relevance = MATCH_RELEVANCE_SCORE;

        let total = price * PRICE_WEIGHT
            + reputation * REPUTATION_WEIGHT
            + sales * SALES_WEIGHT
            + logistics * LOGISTICS_WEIGHT
            + relevance * RELEVANCE_WEIGHT;

        Ok(ScoreBreakdown {
            price,
            reputation,
            sales,
            logistics,
            relevance,
            total: round2(total.clamp(0.0, 100.0)),
        })
    }
}

/// 100 at or below half the target cost, falling linearly to 70 at the
/// target cost, then 40 up to 1.5x and 20 beyond.
#[must_use]
pub fn price_score(price: f64, target_cost: f64) -> f64 {
    if target_cost <= 0.0 {
        return 20.0;
    }
    if price <= target_cost * 0.5 {
        100.0
    } else if price <= target_cost {
        70.0 + 60.0 * (1.0 - price / target_cost)
    } else if price <= target_cost * 1.5 {
        40.0
    } else {
        20.0
    }
}

#[must_use]
pub fn reputation_score(candidate: &SupplierCandidate) -> f64 {
    let rating = candidate
        .rating
        .map_or(0.0, |r| (r.clamp(0.0, 5.0) * 15.0).min(75.0));
    let verified = if candidate.is_verified { 15.0 } else { 0.0 };
    let tenure = candidate
        .years_in_business
        .map_or(0.0, |years| f64::from(years.saturating_mul(2).min(10)));
    rating + verified + tenure
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sales_score(sold_count: u64) -> f64 {
    if sold_count == 0 {
        return 0.0;
    }
    ((sold_count as f64 + 1.0).log10() * 25.0).min(100.0)
}

#[must_use]
pub fn logistics_score(candidate: &SupplierCandidate) -> f64 {
    if candidate.is_small_medium {
        100.0
    } else {
        70.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
