use serde::{Deserialize, Serialize};

use crate::market::SourceId;

/// Price band observed across a marketplace's search results, in the
/// market's currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl PriceStats {
    /// Computes min/max/mean over the positive, finite prices in `prices`.
    ///
    /// Returns `None` when no usable price remains.
    #[must_use]
    pub fn from_prices<I>(prices: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0u32;

        for price in prices.into_iter().filter(|p| p.is_finite() && *p > 0.0) {
            min = min.min(price);
            max = max.max(price);
            sum += price;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            min,
            max,
            avg: sum / f64::from(count),
        })
    }

    /// Derives a band from an average alone: half the average to twice it.
    #[must_use]
    pub fn around_average(avg: f64) -> Self {
        Self {
            min: avg * 0.5,
            max: avg * 2.0,
            avg,
        }
    }
}

/// One result row sampled from a marketplace search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingItem {
    pub title: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Normalized search summary from one Market Data Source.
///
/// `total_result_count == 0` is a successful empty search; a source that
/// produced no data at all is represented by the absence of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceListing {
    pub source_id: SourceId,
    pub total_result_count: u64,
    pub price_stats: Option<PriceStats>,
    #[serde(default)]
    pub sample_items: Vec<ListingItem>,
}

impl SourceListing {
    /// Average observed price, if the source reported a positive one.
    #[must_use]
    pub fn average_price(&self) -> Option<f64> {
        self.price_stats
            .map(|stats| stats.avg)
            .filter(|avg| avg.is_finite() && *avg > 0.0)
    }
}
