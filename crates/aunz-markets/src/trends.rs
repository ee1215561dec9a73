//! Search-interest trends: per-keyword series reduced to a summary.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aunz_core::{Market, SourceError, SourceId, TrendDirection};
use serde::{Deserialize, Serialize};

/// Upper bound on keywords per interest query.
pub const MAX_KEYWORDS_PER_QUERY: usize = 5;

/// A search-interest provider (0–100 relative interest over a window).
#[async_trait]
pub trait SearchInterestSource: Send + Sync {
    fn id(&self) -> SourceId;

    /// Interest series per keyword, oldest first. Callers pass at most
    /// [`MAX_KEYWORDS_PER_QUERY`] keywords; keywords without data may be
    /// missing from the map.
    async fn interest_over_time(
        &self,
        keywords: &[String],
        market: Market,
        window: &str,
    ) -> Result<HashMap<String, Vec<f64>>, SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub average_interest: f64,
    pub current_interest: f64,
    pub direction: TrendDirection,
}

impl TrendSummary {
    /// Summarizes a series: mean, last value, and whether the last value is
    /// above, below, or level with the first. `None` for an empty series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_series(values: &[f64]) -> Option<Self> {
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (first, last) = (*values.first()?, *values.last()?);
        let average_interest = values.iter().sum::<f64>() / values.len() as f64;
        let direction = if last > first {
            TrendDirection::Up
        } else if last < first {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };
        Some(Self {
            average_interest,
            current_interest: last,
            direction,
        })
    }
}

/// Queries `source` in batches of five keywords and summarizes each series.
///
/// A failed or timed-out batch is logged and its keywords are left out;
/// other batches still contribute.
pub async fn collect_trend_summaries(
    source: &dyn SearchInterestSource,
    keywords: &[String],
    market: Market,
    window: &str,
    timeout: Duration,
) -> HashMap<String, TrendSummary> {
    let mut summaries = HashMap::new();

    for batch in keywords.chunks(MAX_KEYWORDS_PER_QUERY) {
        let result =
            match tokio::time::timeout(timeout, source.interest_over_time(batch, market, window))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout {
                    source_id: source.id(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };

        let series = match result {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(
                    source = %source.id(),
                    market = %market,
                    keywords = batch.len(),
                    error = %e,
                    "search interest batch failed; continuing without it"
                );
                continue;
            }
        };

        for keyword in batch {
            if let Some(summary) = series.get(keyword).and_then(|v| TrendSummary::from_series(v)) {
                summaries.insert(keyword.clone(), summary);
            }
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FakeInterest {
        batches: Mutex<Vec<usize>>,
        fail_containing: Option<String>,
    }

    #[async_trait]
    impl SearchInterestSource for FakeInterest {
        fn id(&self) -> SourceId {
            SourceId::new("trends")
        }

        async fn interest_over_time(
            &self,
            keywords: &[String],
            _market: Market,
            _window: &str,
        ) -> Result<HashMap<String, Vec<f64>>, SourceError> {
            self.batches.lock().unwrap().push(keywords.len());
            if let Some(bad) = &self.fail_containing {
                if keywords.contains(bad) {
                    return Err(SourceError::Unavailable {
                        source_id: self.id(),
                        reason: "429".into(),
                    });
                }
            }
            Ok(keywords
                .iter()
                .enumerate()
                .map(|(i, k)| {
                    let start = 40.0;
                    #[allow(clippy::cast_precision_loss)]
                    let end = 40.0 + i as f64 * 10.0;
                    (k.clone(), vec![start, 50.0, end])
                })
                .collect())
        }
    }

    fn keywords(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("kw{i}")).collect()
    }

    #[test]
    fn summary_of_rising_series() {
        let s = TrendSummary::from_series(&[20.0, 40.0, 60.0]).unwrap();
        assert!((s.average_interest - 40.0).abs() < 1e-9);
        assert!((s.current_interest - 60.0).abs() < 1e-9);
        assert_eq!(s.direction, TrendDirection::Up);
    }

    #[test]
    fn summary_direction_down_and_flat() {
        assert_eq!(
            TrendSummary::from_series(&[60.0, 10.0]).unwrap().direction,
            TrendDirection::Down
        );
        assert_eq!(
            TrendSummary::from_series(&[30.0]).unwrap().direction,
            TrendDirection::Stable
        );
        assert!(TrendSummary::from_series(&[]).is_none());
    }

    #[tokio::test]
    async fn queries_in_batches_of_five() {
        let source = FakeInterest {
            batches: Mutex::new(Vec::new()),
            fail_containing: None,
        };
        let summaries = collect_trend_summaries(
            &source,
            &keywords(12),
            Market::Au,
            "today 3-m",
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(*source.batches.lock().unwrap(), vec![5, 5, 2]);
        assert_eq!(summaries.len(), 12);
        assert_eq!(summaries["kw0"].direction, TrendDirection::Stable);
        assert_eq!(summaries["kw1"].direction, TrendDirection::Up);
    }

    #[tokio::test]
    async fn failed_batch_only_drops_its_keywords() {
        let source = FakeInterest {
            batches: Mutex::new(Vec::new()),
            fail_containing: Some("kw7".to_string()),
        };
        let summaries = collect_trend_summaries(
            &source,
            &keywords(12),
            Market::Nz,
            "today 3-m",
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(summaries.len(), 7);
        assert!(summaries.contains_key("kw4"));
        assert!(!summaries.contains_key("kw7"));
        assert!(summaries.contains_key("kw11"));
    }
}
