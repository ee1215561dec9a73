//! Per-category scoring over market listings, search interest and supplier
//! prices.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use aunz_core::{
    CategoryConfig, CategoryDetails, CategoryScore, ComponentScores, CoreError, ExchangeRates, Market,
    PlatformStat, ProfitAnalysis, ScoreWeights, SourceError, SourceId, SourceListing,
    SupplierCandidate, SupplierInfo, TrendDirection, TrendInfo,
};
use aunz_markets::{
    collect_trend_summaries, MarketDataAggregator, SearchInterestSource, TrendSummary,
};
use aunz_sourcing::{normalize_offer, SourcingMarketplace};

use crate::components::{
    competition_score, demand_score, market_price, profit_score, round1, supplier_cost,
    total_listings, trend_score,
};

/// Cheapest offers considered when estimating a category's unit cost.
const SUPPLIER_SAMPLE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsSettings {
    /// Provider-specific time window, e.g. `"today 3-m"`.
    pub window: String,
    pub timeout: Duration,
}

impl Default for TrendsSettings {
    fn default() -> Self {
        Self {
            window: "today 3-m".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Which inputs contributed to a ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Coverage {
    pub data_sources: BTreeMap<SourceId, bool>,
    pub trends_available: bool,
    pub suppliers_available: bool,
}

/// Supplier-side view of one category.
#[derive(Debug, Default)]
struct SupplierSample {
    prices: Vec<f64>,
    cheapest_offer_id: Option<String>,
}

/// Scores and ranks categories for a market.
///
/// Every input is optional: a missing source, trend series or supplier sample
/// falls back to the neutral component score, so each category always yields
/// a row.
pub struct RankingEngine {
    aggregator: Arc<MarketDataAggregator>,
    trends: Option<(Arc<dyn SearchInterestSource>, TrendsSettings)>,
    sourcing: Option<Arc<dyn SourcingMarketplace>>,
    supplier_max_price: f64,
    supplier_timeout: Duration,
    rates: ExchangeRates,
    weights: ScoreWeights,
}

impl RankingEngine {
    #[must_use]
    pub fn new(aggregator: Arc<MarketDataAggregator>) -> Self {
        Self {
            aggregator,
            trends: None,
            sourcing: None,
            supplier_max_price: 500.0,
            supplier_timeout: Duration::from_secs(20),
            rates: ExchangeRates::builtin(),
            weights: ScoreWeights::DEFAULT,
        }
    }

    #[must_use]
    pub fn with_trends(
        mut self,
        source: Arc<dyn SearchInterestSource>,
        settings: TrendsSettings,
    ) -> Self {
        self.trends = Some((source, settings));
        self
    }

    /// Prices each category against `marketplace`, considering offers up to
    /// `max_price` in the sourcing currency.
    #[must_use]
    pub fn with_sourcing(
        mut self,
        marketplace: Arc<dyn SourcingMarketplace>,
        max_price: f64,
        timeout: Duration,
    ) -> Self {
        self.sourcing = Some(marketplace);
        self.supplier_max_price = max_price;
        self.supplier_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_rates(mut self, rates: ExchangeRates) -> Self {
        self.rates = rates;
        self
    }

    /// Replaces the default weights.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidWeights`] unless the weights are
    /// non-negative and sum to 1.0, whichever way they were built.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Result<Self, CoreError> {
        self.weights = ScoreWeights::new(
            weights.demand,
            weights.trend,
            weights.profit,
            weights.competition,
        )?;
        Ok(self)
    }

    #[must_use]
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.aggregator.source_ids()
    }

    /// Scores every category and returns them ranked best first.
    ///
    /// The output has one row per input category; ties keep input order.
    pub async fn rank(&self, categories: &[CategoryConfig], market: Market) -> Vec<CategoryScore> {
        self.rank_with_coverage(categories, market).await.0
    }

    pub(crate) async fn rank_with_coverage(
        &self,
        categories: &[CategoryConfig],
        market: Market,
    ) -> (Vec<CategoryScore>, Coverage) {
        let mut coverage = Coverage {
            data_sources: self
                .source_ids()
                .into_iter()
                .map(|id| (id, false))
                .collect(),
            ..Coverage::default()
        };

        let trends = self.collect_trends(categories, market).await;
        coverage.trends_available = !trends.is_empty();

        let mut scores = Vec::with_capacity(categories.len());
        for category in categories {
            let listings = self.aggregator.collect(&category.keyword, market).await;
            for (id, listing) in &listings {
                if listing.is_some() {
                    coverage.data_sources.insert(id.clone(), true);
                }
            }

            let suppliers = self.supplier_sample(category).await;
            if !suppliers.prices.is_empty() {
                coverage.suppliers_available = true;
            }

            let score = self.score_category(
                category,
                market,
                &listings,
                trends.get(&category.keyword),
                &suppliers,
            );
            tracing::debug!(
                keyword = %category.keyword,
                market = %market,
                total = score.total_score,
                "category scored"
            );
            scores.push(score);
        }

        // sort_by is stable, so ties keep input order
        scores.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        for (index, score) in scores.iter_mut().enumerate() {
            score.rank = index + 1;
        }

        (scores, coverage)
    }

    async fn collect_trends(
        &self,
        categories: &[CategoryConfig],
        market: Market,
    ) -> HashMap<String, TrendSummary> {
        let Some((source, settings)) = &self.trends else {
            return HashMap::new();
        };
        let keywords: Vec<String> = categories.iter().map(|c| c.keyword.clone()).collect();
        collect_trend_summaries(
            source.as_ref(),
            &keywords,
            market,
            &settings.window,
            settings.timeout,
        )
        .await
    }

    async fn supplier_sample(&self, category: &CategoryConfig) -> SupplierSample {
        let Some(marketplace) = &self.sourcing else {
            return SupplierSample::default();
        };

        let call =
            marketplace.search(&category.localized, self.supplier_max_price, SUPPLIER_SAMPLE);
        let outcome = match tokio::time::timeout(self.supplier_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                source_id: marketplace.id(),
                timeout_ms: u64::try_from(self.supplier_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        let raw = match outcome {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    source = %marketplace.id(),
                    keyword = %category.localized,
                    error = %e,
                    "supplier lookup failed; profit falls back to neutral"
                );
                return SupplierSample::default();
            }
        };

        let mut candidates: Vec<SupplierCandidate> = raw
            .into_iter()
            .filter_map(|offer| match normalize_offer(offer) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unusable offer");
                    None
                }
            })
            .collect();
        candidates.sort_by(|a, b| a.price.total_cmp(&b.price));
        candidates.truncate(SUPPLIER_SAMPLE);

        SupplierSample {
            cheapest_offer_id: candidates.first().map(|c| c.offer_id.clone()),
            prices: candidates.iter().map(|c| c.price).collect(),
        }
    }

    fn score_category(
        &self,
        category: &CategoryConfig,
        market: Market,
        listings: &BTreeMap<SourceId, Option<SourceListing>>,
        trend: Option<&TrendSummary>,
        suppliers: &SupplierSample,
    ) -> CategoryScore {
        let cost_cny = supplier_cost(&suppliers.prices);
        let cost_local = cost_cny.map(|cost| cost * self.rates.from_sourcing(market.currency()));
        let market_avg = market_price(listings);
        let (profit, margin) = profit_score(cost_local, market_avg);

        let components = ComponentScores {
            demand: demand_score(listings),
            trend: trend_score(trend),
            profit,
            competition: competition_score(total_listings(listings)),
        };
        let total = self.weights.apply(&components);

        let platform_stats = listings
            .iter()
            .filter_map(|(id, listing)| {
                let listing = listing.as_ref()?;
                Some((
                    id.clone(),
                    PlatformStat {
                        listings: listing.total_result_count,
                        price_range: listing.price_stats,
                    },
                ))
            })
            .collect();

        let trend_info = trend.map_or(
            TrendInfo {
                direction: TrendDirection::Stable,
                current_interest: 0.0,
            },
            |t| TrendInfo {
                direction: t.direction,
                current_interest: t.current_interest,
            },
        );

        CategoryScore {
            keyword: category.keyword.clone(),
            localized_label: category.localized.clone(),
            english_label: category.english.clone(),
            total_score: round1(total),
            component_scores: ComponentScores {
                demand: round1(components.demand),
                trend: round1(components.trend),
                profit: round1(components.profit),
                competition: round1(components.competition),
            },
            weights: self.weights,
            rank: 0,
            details: CategoryDetails {
                platform_stats,
                trend_info,
                supplier_info: SupplierInfo {
                    cost_price_cny: round2(cost_cny.unwrap_or(0.0)),
                    product_count: suppliers.prices.len(),
                    top_offer_id: suppliers.cheapest_offer_id.clone(),
                },
                profit_analysis: ProfitAnalysis {
                    cost_local: round2(cost_local.unwrap_or(0.0)),
                    market_price_local: round2(market_avg.unwrap_or(0.0)),
                    profit_margin_percent: round1(margin),
                },
            },
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
