use std::collections::HashMap;
use std::sync::Arc;

use aunz_core::{Market, RankingRun};
use tokio::sync::RwLock;

/// The most recent complete ranking run per market.
///
/// Runs are swapped in whole, so a reader sees either the previous run or the
/// new one.
#[derive(Debug, Default)]
pub struct LatestRankings {
    runs: RwLock<HashMap<Market, Arc<RankingRun>>>,
}

impl LatestRankings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_latest(&self, market: Market) -> Option<Arc<RankingRun>> {
        self.runs.read().await.get(&market).cloned()
    }

    /// Publishes `run` for its market, replacing any earlier run.
    pub async fn set_latest(&self, run: Arc<RankingRun>) {
        self.runs.write().await.insert(run.market, run);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn run(market: Market) -> Arc<RankingRun> {
        Arc::new(RankingRun {
            run_id: Uuid::new_v4(),
            market,
            rankings: Vec::new(),
            generated_at: Utc::now(),
            elapsed_ms: 0,
            data_sources: BTreeMap::new(),
            trends_available: false,
            suppliers_available: false,
        })
    }

    #[tokio::test]
    async fn empty_until_first_run() {
        let cache = LatestRankings::new();
        assert!(cache.get_latest(Market::Nz).await.is_none());
    }

    #[tokio::test]
    async fn newer_run_replaces_older_per_market() {
        let cache = LatestRankings::new();
        let first = run(Market::Nz);
        let second = run(Market::Nz);
        let au = run(Market::Au);

        cache.set_latest(Arc::clone(&first)).await;
        cache.set_latest(Arc::clone(&au)).await;
        cache.set_latest(Arc::clone(&second)).await;

        let nz = cache.get_latest(Market::Nz).await.unwrap();
        assert_eq!(nz.run_id, second.run_id);
        let au_latest = cache.get_latest(Market::Au).await.unwrap();
        assert_eq!(au_latest.run_id, au.run_id);
    }
}
