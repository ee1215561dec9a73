//! Builds sources and services from [`AppConfig`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use aunz_core::{builtin_categories, load_categories, AppConfig, CategoriesFile};
use aunz_markets::{
    load_snapshots, AggregatorOptions, EbayBrowseSource, MarketDataAggregator, MarketDataSource,
    SnapshotSource, SnapshotStore, StaticSnapshotStore,
};
use aunz_ranking::{RankingEngine, RankingService};
use aunz_sourcing::{OfferCatalog, SourcingMarketplace};

pub(crate) fn categories(config: &AppConfig) -> anyhow::Result<CategoriesFile> {
    match &config.categories_path {
        Some(path) => load_categories(path)
            .with_context(|| format!("loading categories from {}", path.display())),
        None => Ok(builtin_categories()),
    }
}

pub(crate) fn snapshots(config: &AppConfig) -> anyhow::Result<Arc<dyn SnapshotStore>> {
    let store = match &config.snapshots_path {
        Some(path) => load_snapshots(path)
            .with_context(|| format!("loading snapshots from {}", path.display()))?,
        None => StaticSnapshotStore::builtin(),
    };
    let store: Arc<dyn SnapshotStore> = Arc::new(store);
    Ok(store)
}

/// Offer catalog used as the sourcing marketplace, if one is configured.
pub(crate) fn offer_catalog(
    config: &AppConfig,
) -> anyhow::Result<Option<Arc<dyn SourcingMarketplace>>> {
    let Some(path) = &config.offers_path else {
        return Ok(None);
    };
    let catalog = OfferCatalog::from_json_file(path)
        .with_context(|| format!("loading offers from {}", path.display()))?;
    let marketplace: Arc<dyn SourcingMarketplace> = Arc::new(catalog);
    Ok(Some(marketplace))
}

/// Market data sources: eBay when a token is configured, plus the
/// snapshot-backed marketplaces.
pub(crate) fn market_sources(
    config: &AppConfig,
    snapshots: &Arc<dyn SnapshotStore>,
) -> anyhow::Result<Vec<Arc<dyn MarketDataSource>>> {
    let mut sources: Vec<Arc<dyn MarketDataSource>> = vec![
        Arc::new(SnapshotSource::trademe(Arc::clone(snapshots))),
        Arc::new(SnapshotSource::amazon(Arc::clone(snapshots))),
        Arc::new(SnapshotSource::temu(Arc::clone(snapshots))),
    ];

    match &config.ebay_access_token {
        Some(token) => {
            let ebay = EbayBrowseSource::with_base_url(
                &config.ebay_base_url,
                token,
                config.http_timeout_secs,
                &config.user_agent,
            )
            .context("building eBay client")?
            .with_retry(config.http_max_retries, config.http_retry_backoff_base_ms);
            sources.push(Arc::new(ebay));
        }
        None => tracing::info!("EBAY_ACCESS_TOKEN not set; eBay source disabled"),
    }

    Ok(sources)
}

pub(crate) fn ranking_service(config: &AppConfig) -> anyhow::Result<RankingService> {
    let snapshots = snapshots(config)?;
    let sources = market_sources(config, &snapshots)?;
    let source_timeout = Duration::from_secs(config.source_timeout_secs);

    let aggregator = MarketDataAggregator::new(
        sources,
        snapshots,
        AggregatorOptions {
            live_collection: config.live_collection_enabled,
            source_timeout,
            result_limit: config.source_result_limit,
        },
    );

    let mut engine = RankingEngine::new(Arc::new(aggregator));
    if let Some(catalog) = offer_catalog(config)? {
        engine = engine.with_sourcing(catalog, config.supplier_max_price, source_timeout);
    }

    Ok(RankingService::new(engine, categories(config)?))
}

#[cfg(test)]
mod tests {
    use aunz_core::SourceId;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            log_level: "info".to_string(),
            categories_path: None,
            snapshots_path: None,
            offers_path: None,
            live_collection_enabled: false,
            source_timeout_secs: 5,
            source_result_limit: 20,
            supplier_max_price: 500.0,
            shipping_per_unit: 15.0,
            http_timeout_secs: 5,
            user_agent: "aunz-test".to_string(),
            http_max_retries: 0,
            http_retry_backoff_base_ms: 0,
            ebay_access_token: None,
            ebay_base_url: "http://127.0.0.1:9".to_string(),
        }
    }

    #[test]
    fn snapshot_sources_without_ebay_token() {
        let config = config();
        let snapshots = snapshots(&config).unwrap();
        let ids: Vec<SourceId> = market_sources(&config, &snapshots)
            .unwrap()
            .iter()
            .map(|s| s.id())
            .collect();
        assert_eq!(ids, vec![SourceId::TRADEME, SourceId::AMAZON, SourceId::TEMU]);
    }

    #[test]
    fn ebay_added_when_token_present() {
        let config = AppConfig {
            ebay_access_token: Some("token".to_string()),
            ..config()
        };
        let snapshots = snapshots(&config).unwrap();
        let sources = market_sources(&config, &snapshots).unwrap();
        assert!(sources.iter().any(|s| s.id() == SourceId::EBAY));
    }

    #[test]
    fn defaults_to_builtin_catalogs() {
        let config = config();
        assert_eq!(
            categories(&config).unwrap().categories.len(),
            builtin_categories().categories.len()
        );
        assert!(offer_catalog(&config).unwrap().is_none());
    }

    #[test]
    fn missing_offer_file_is_an_error() {
        let config = AppConfig {
            offers_path: Some("/nonexistent/offers.json".into()),
            ..config()
        };
        assert!(offer_catalog(&config).is_err());
    }

    #[tokio::test]
    async fn snapshot_only_run_ranks_every_category() {
        let service = ranking_service(&config()).unwrap();
        let run = service.refresh(aunz_core::Market::Nz, None).await;
        assert_eq!(run.rankings.len(), builtin_categories().categories.len());
        assert_eq!(run.data_sources.get(&SourceId::TRADEME), Some(&true));
        assert!(!run.suppliers_available);
    }
}
