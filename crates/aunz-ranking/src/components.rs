//! Component score functions. Each returns a value in `[0, 100]`; missing
//! inputs produce the neutral score.

use std::collections::BTreeMap;

use aunz_core::{SourceId, SourceListing, TrendDirection};
use aunz_markets::TrendSummary;

/// Score used for any component whose inputs are unavailable.
pub const NEUTRAL_SCORE: f64 = 50.0;

const RISING_TREND_BONUS: f64 = 1.2;

/// Listing count that maps to a full demand score is `divisor * 100`.
#[must_use]
pub fn demand_divisor(source_id: &SourceId) -> f64 {
    match source_id.as_str() {
        "ebay" | "temu" => 50.0,
        _ => 100.0,
    }
}

/// Mean of per-source `min(count / divisor, 100)` over present sources.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn demand_score(listings: &BTreeMap<SourceId, Option<SourceListing>>) -> f64 {
    let scores: Vec<f64> = listings
        .iter()
        .filter_map(|(id, listing)| {
            let listing = listing.as_ref()?;
            Some((listing.total_result_count as f64 / demand_divisor(id)).min(100.0))
        })
        .collect();

    if scores.is_empty() {
        NEUTRAL_SCORE
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Average interest, boosted by a fifth for a rising series.
#[must_use]
pub fn trend_score(summary: Option<&TrendSummary>) -> f64 {
    let Some(summary) = summary else {
        return NEUTRAL_SCORE;
    };
    let base = summary.average_interest.clamp(0.0, 100.0);
    if summary.direction == TrendDirection::Up {
        (base * RISING_TREND_BONUS).min(100.0)
    } else {
        base
    }
}

/// Implied unit cost from supplier prices: the mean of the positive prices,
/// or the minimum price when none is positive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn supplier_cost(prices: &[f64]) -> Option<f64> {
    let positive: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();
    if positive.is_empty() {
        prices
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .reduce(f64::min)
    } else {
        Some(positive.iter().sum::<f64>() / positive.len() as f64)
    }
}

/// Mean of the positive source averages.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn market_price(listings: &BTreeMap<SourceId, Option<SourceListing>>) -> Option<f64> {
    let averages: Vec<f64> = listings
        .values()
        .flatten()
        .filter_map(SourceListing::average_price)
        .collect();
    if averages.is_empty() {
        None
    } else {
        Some(averages.iter().sum::<f64>() / averages.len() as f64)
    }
}

/// Markup of market price over landed cost, both in market currency.
///
/// Returns `(score, margin_percent)`; the margin is 0 when either side is
/// missing or non-positive.
#[must_use]
pub fn profit_score(cost_local: Option<f64>, market_price: Option<f64>) -> (f64, f64) {
    match (cost_local, market_price) {
        (Some(cost), Some(price)) if cost > 0.0 && price > 0.0 => {
            let margin = (price - cost) / cost * 100.0;
            (margin.clamp(0.0, 100.0), margin)
        }
        _ => (NEUTRAL_SCORE, 0.0),
    }
}

/// Fewer total listings means less competition and a higher score.
#[must_use]
pub fn competition_score(total_listings: u64) -> f64 {
    match total_listings {
        n if n > 50_000 => 20.0,
        n if n > 20_000 => 40.0,
        n if n > 5_000 => 60.0,
        n if n > 1_000 => 80.0,
        _ => 100.0,
    }
}

#[must_use]
pub fn total_listings(listings: &BTreeMap<SourceId, Option<SourceListing>>) -> u64 {
    listings
        .values()
        .flatten()
        .map(|l| l.total_result_count)
        .fold(0u64, u64::saturating_add)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
