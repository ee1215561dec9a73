//! Ranking runs: category selection, the run envelope and publication.

use std::sync::Arc;
use std::time::Instant;

use aunz_core::{CategoriesFile, CategoryConfig, Market, RankingRun};
use aunz_sourcing::KeywordBridge;
use chrono::Utc;
use uuid::Uuid;

use crate::cache::LatestRankings;
use crate::engine::RankingEngine;

pub struct RankingService {
    engine: RankingEngine,
    categories: CategoriesFile,
    bridge: KeywordBridge,
    latest: LatestRankings,
}

impl RankingService {
    #[must_use]
    pub fn new(engine: RankingEngine, categories: CategoriesFile) -> Self {
        Self {
            engine,
            categories,
            bridge: KeywordBridge::default(),
            latest: LatestRankings::new(),
        }
    }

    #[must_use]
    pub fn categories(&self) -> &CategoriesFile {
        &self.categories
    }

    /// Resolves `keywords` to categories, or every configured category when
    /// `None`.
    ///
    /// A keyword outside the catalog becomes an ad-hoc category whose
    /// sourcing term comes from the keyword bridge.
    #[must_use]
    pub fn select(&self, keywords: Option<&[String]>) -> Vec<CategoryConfig> {
        let Some(keywords) = keywords else {
            return self.categories.categories.clone();
        };
        keywords
            .iter()
            .map(|keyword| {
                self.categories
                    .find(keyword)
                    .cloned()
                    .unwrap_or_else(|| self.ad_hoc_category(keyword))
            })
            .collect()
    }

    fn ad_hoc_category(&self, keyword: &str) -> CategoryConfig {
        let keyword = keyword.trim();
        let localized = self
            .bridge
            .bridge(keyword)
            .localized
            .into_iter()
            .next()
            .unwrap_or_else(|| keyword.to_string());
        CategoryConfig::new(keyword, &localized, keyword)
    }

    /// Ranks the selected categories for `market` and publishes the run as
    /// the market's latest.
    ///
    /// Nothing is published if the returned future is dropped before it
    /// completes.
    pub async fn refresh(&self, market: Market, keywords: Option<&[String]>) -> Arc<RankingRun> {
        let started = Instant::now();
        let categories = self.select(keywords);

        let (rankings, coverage) = self.engine.rank_with_coverage(&categories, market).await;

        let run = Arc::new(RankingRun {
            run_id: Uuid::new_v4(),
            market,
            rankings,
            generated_at: Utc::now(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            data_sources: coverage.data_sources,
            trends_available: coverage.trends_available,
            suppliers_available: coverage.suppliers_available,
        });

        tracing::info!(
            run_id = %run.run_id,
            market = %market,
            categories = run.rankings.len(),
            elapsed_ms = run.elapsed_ms,
            trends = run.trends_available,
            suppliers = run.suppliers_available,
            "ranking run complete"
        );

        self.latest.set_latest(Arc::clone(&run)).await;
        run
    }

    pub async fn latest(&self, market: Market) -> Option<Arc<RankingRun>> {
        self.latest.get_latest(market).await
    }
}
