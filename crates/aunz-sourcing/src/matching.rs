//! Supplier matching: English target products to ranked sourcing offers.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use aunz_core::{SourceError, SourceId, SupplierCandidate};
use serde::Serialize;

use crate::filter::{passes_price, SizeLimits};
use crate::keywords::KeywordBridge;
use crate::normalize::normalize_offer;
use crate::scorer::SupplierScorer;
use crate::types::RawOffer;

/// Localized terms searched per product.
const SEARCH_TERMS_PER_PRODUCT: usize = 2;

/// A wholesale marketplace searched by localized keyword.
#[async_trait]
pub trait SourcingMarketplace: Send + Sync {
    fn id(&self) -> SourceId;

    /// Offers for `localized_keyword` priced at or below `max_price` (CNY).
    async fn search(
        &self,
        localized_keyword: &str,
        max_price: f64,
        limit: usize,
    ) -> Result<Vec<RawOffer>, SourceError>;
}

/// A product already listed in the target market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProduct {
    pub id: Option<String>,
    pub title: String,
    pub price: f64,
    pub currency: String,
}

impl TargetProduct {
    pub fn new(title: impl Into<String>, price: f64, currency: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            price,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    /// CNY ceiling on supplier unit price.
    pub max_price: f64,
    pub limit_per_product: usize,
    pub include_large: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_price: 500.0,
            limit_per_product: 10,
            include_large: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub source_product_id: Option<String>,
    pub source_product_title: String,
    pub search_keywords: Vec<String>,
    pub matched_suppliers: Vec<SupplierCandidate>,
}

impl MatchResult {
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matched_suppliers.len()
    }
}

pub struct SupplierMatcher {
    marketplace: Arc<dyn SourcingMarketplace>,
    bridge: KeywordBridge,
    scorer: SupplierScorer,
    size_limits: SizeLimits,
}

impl SupplierMatcher {
    pub fn new(marketplace: Arc<dyn SourcingMarketplace>) -> Self {
        Self {
            marketplace,
            bridge: KeywordBridge::default(),
            scorer: SupplierScorer::default(),
            size_limits: SizeLimits::DEFAULT,
        }
    }

    #[must_use]
    pub fn with_bridge(mut self, bridge: KeywordBridge) -> Self {
        self.bridge = bridge;
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: SupplierScorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_size_limits(mut self, size_limits: SizeLimits) -> Self {
        self.size_limits = size_limits;
        self
    }

    /// Finds and ranks supplier offers for one target product.
    ///
    /// Search failures and unusable offers are logged and skipped; a product
    /// with nothing usable yields an empty match list.
    pub async fn match_product(
        &self,
        target: &TargetProduct,
        options: &MatchOptions,
    ) -> MatchResult {
        let bridged = self.bridge.bridge(&target.title);
        let source = self.marketplace.id();

        let mut seen: HashSet<String> = HashSet::new();
        let mut candidates: Vec<SupplierCandidate> = Vec::new();

        for term in bridged.localized.iter().take(SEARCH_TERMS_PER_PRODUCT) {
            let offers = match self
                .marketplace
                .search(term, options.max_price, options.limit_per_product * 2)
                .await
            {
                Ok(offers) => offers,
                Err(e) => {
                    tracing::warn!(
                        source = %source,
                        keyword = %term,
                        error = %e,
                        "sourcing search failed; continuing without it"
                    );
                    continue;
                }
            };

            tracing::debug!(source = %source, keyword = %term, count = offers.len(), "sourcing offers received");

            for raw in offers {
                match normalize_offer(raw) {
                    Ok(candidate) => {
                        if seen.insert(candidate.offer_id.clone()) {
                            candidates.push(candidate);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(source = %source, keyword = %term, error = %e, "skipping offer");
                    }
                }
            }
        }

        candidates.retain(|c| passes_price(c, options.max_price));
        if !options.include_large {
            candidates.retain(|c| self.size_limits.admits(c));
        }

        let mut matched: Vec<SupplierCandidate> = candidates
            .into_iter()
            .map(
                |candidate| match self.scorer.score(&candidate, target.price, &target.currency) {
                    Ok(score) => candidate.with_match_score(score),
                    Err(e) => {
                        tracing::warn!(
                            offer_id = %candidate.offer_id,
                            error = %e,
                            "offer left unscored"
                        );
                        candidate
                    }
                },
            )
            .collect();

        matched.sort_by(|a, b| {
            b.match_score
                .unwrap_or(0.0)
                .total_cmp(&a.match_score.unwrap_or(0.0))
        });
        matched.truncate(options.limit_per_product);

        MatchResult {
            source_product_id: target.id.clone(),
            source_product_title: target.title.clone(),
            search_keywords: bridged.localized,
            matched_suppliers: matched,
        }
    }

    /// Matches each target in order.
    pub async fn match_products(
        &self,
        targets: &[TargetProduct],
        options: &MatchOptions,
    ) -> Vec<MatchResult> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            results.push(self.match_product(target, options).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumberOrText;
    use std::sync::Mutex;

    struct FakeMarketplace {
        offers: Vec<(String, RawOffer)>,
        fail_on: Option<String>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeMarketplace {
        fn new(offers: Vec<(&str, RawOffer)>) -> Self {
            Self {
                offers: offers
                    .into_iter()
                    .map(|(k, o)| (k.to_string(), o))
                    .collect(),
                fail_on: None,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SourcingMarketplace for FakeMarketplace {
        fn id(&self) -> SourceId {
            SourceId::new("fake-1688")
        }

        async fn search(
            &self,
            localized_keyword: &str,
            _max_price: f64,
            limit: usize,
        ) -> Result<Vec<RawOffer>, SourceError> {
            self.queries
                .lock()
                .unwrap()
                .push(localized_keyword.to_string());
            if self.fail_on.as_deref() == Some(localized_keyword) {
                return Err(SourceError::Unavailable {
                    source_id: self.id(),
                    reason: "blocked".into(),
                });
            }
            Ok(self
                .offers
                .iter()
                .filter(|(k, _)| k == localized_keyword)
                .map(|(_, o)| o.clone())
                .take(limit)
                .collect())
        }
    }

    fn offer(id: &str, price: f64) -> RawOffer {
        RawOffer {
            offer_id: Some(NumberOrText::Text(id.to_string())),
            title: Some(format!("offer {id}")),
            price: Some(NumberOrText::Number(price)),
            ..RawOffer::default()
        }
    }

    fn earbuds() -> TargetProduct {
        TargetProduct::new("Bluetooth Earbuds Wireless Charging Case", 59.0, "AUD")
    }

    #[tokio::test]
    async fn searches_top_two_terms_and_dedupes() {
        let market = Arc::new(FakeMarketplace::new(vec![
            ("蓝牙耳机", offer("1", 20.0)),
            ("蓝牙耳机", offer("2", 30.0)),
            ("无线蓝牙耳机", offer("2", 30.0)),
            ("无线蓝牙耳机", offer("3", 45.0)),
        ]));
        let matcher = SupplierMatcher::new(market.clone());
        let result = matcher
            .match_product(&earbuds(), &MatchOptions::default())
            .await;

        assert_eq!(result.search_keywords[0], "蓝牙耳机");
        assert_eq!(market.queries.lock().unwrap().len(), 2);
        let ids: Vec<&str> = result
            .matched_suppliers
            .iter()
            .map(|c| c.offer_id.as_str())
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(result.matched_suppliers.iter().all(|c| c.match_score.is_some()));
        // cheaper offers score at least as well, everything else equal
        assert_eq!(ids[0], "1");
    }

    #[tokio::test]
    async fn price_and_size_filters_apply() {
        let mut large = offer("big", 50.0);
        large.dimensions = Some("80x50x40".to_string());
        let market = Arc::new(FakeMarketplace::new(vec![
            ("蓝牙耳机", offer("cheap", 500.0)),
            ("蓝牙耳机", offer("dear", 600.0)),
            ("蓝牙耳机", large),
        ]));
        let matcher = SupplierMatcher::new(market);

        let result = matcher
            .match_product(&earbuds(), &MatchOptions::default())
            .await;
        let ids: Vec<&str> = result
            .matched_suppliers
            .iter()
            .map(|c| c.offer_id.as_str())
            .collect();
        assert_eq!(ids, vec!["cheap"]);

        let options = MatchOptions {
            include_large: true,
            ..MatchOptions::default()
        };
        let result = matcher.match_product(&earbuds(), &options).await;
        assert_eq!(result.match_count(), 2);
    }

    #[tokio::test]
    async fn zero_target_price_leaves_scores_unset() {
        let market = Arc::new(FakeMarketplace::new(vec![("蓝牙耳机", offer("1", 20.0))]));
        let matcher = SupplierMatcher::new(market);
        let target = TargetProduct::new("Bluetooth Earbuds", 0.0, "NZD");
        let result = matcher.match_product(&target, &MatchOptions::default()).await;
        assert_eq!(result.match_count(), 1);
        assert!(result.matched_suppliers[0].match_score.is_none());
    }

    #[tokio::test]
    async fn invalid_target_prices_keep_offers_unscored() {
        let market = Arc::new(FakeMarketplace::new(vec![("蓝牙耳机", offer("1", 20.0))]));
        let matcher = SupplierMatcher::new(market);
        for price in [-5.0, f64::NAN, f64::INFINITY] {
            let target = TargetProduct::new("Bluetooth Earbuds", price, "NZD");
            let result = matcher.match_product(&target, &MatchOptions::default()).await;
            assert_eq!(result.match_count(), 1, "price {price}");
            assert!(result.matched_suppliers[0].match_score.is_none());
        }
    }

    #[tokio::test]
    async fn failed_search_term_is_skipped() {
        let mut market = FakeMarketplace::new(vec![("无线蓝牙耳机", offer("7", 25.0))]);
        market.fail_on = Some("蓝牙耳机".to_string());
        let matcher = SupplierMatcher::new(Arc::new(market));
        let result = matcher
            .match_product(&earbuds(), &MatchOptions::default())
            .await;
        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matched_suppliers[0].offer_id, "7");
    }

    #[tokio::test]
    async fn unusable_offers_are_dropped_and_limit_applies() {
        let mut broken = offer("x", 10.0);
        broken.title = None;
        let mut offers = vec![("蓝牙耳机", broken)];
        for i in 0..6 {
            offers.push(("蓝牙耳机", offer(&format!("ok{i}"), 10.0 + f64::from(i))));
        }
        let matcher = SupplierMatcher::new(Arc::new(FakeMarketplace::new(offers)));
        let options = MatchOptions {
            limit_per_product: 4,
            ..MatchOptions::default()
        };
        let result = matcher.match_product(&earbuds(), &options).await;
        assert_eq!(result.match_count(), 4);
        assert!(result.matched_suppliers.iter().all(|c| c.offer_id != "x"));
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let market = Arc::new(FakeMarketplace::new(vec![
            ("瑜伽垫", offer("mat", 15.0)),
            ("蓝牙耳机", offer("buds", 20.0)),
        ]));
        let matcher = SupplierMatcher::new(market);
        let mut first = TargetProduct::new("Yoga Mat Non Slip", 39.0, "NZD");
        first.id = Some("p1".to_string());
        let results = matcher
            .match_products(&[first, earbuds()], &MatchOptions::default())
            .await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source_product_id.as_deref(), Some("p1"));
        assert_eq!(results[0].matched_suppliers[0].offer_id, "mat");
        assert_eq!(results[1].matched_suppliers[0].offer_id, "buds");
    }
}
