//! Aggregator behaviour with in-process fake sources.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aunz_core::{ListingItem, Market, PriceStats, SourceError, SourceId};
use aunz_markets::{
    AggregatorOptions, MarketDataAggregator, MarketDataSource, SnapshotSource, SourcePayload,
    StaticSnapshotStore,
};

enum Behaviour {
    Summary(u64, f64),
    Items(Vec<f64>),
    Fail,
    Hang,
}

struct FakeSource {
    id: SourceId,
    behaviour: Behaviour,
    au_only: bool,
    calls: AtomicU32,
}

impl FakeSource {
    fn new(id: &str, behaviour: Behaviour) -> Self {
        Self {
            id: SourceId::new(id),
            behaviour,
            au_only: false,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl MarketDataSource for FakeSource {
    fn id(&self) -> SourceId {
        self.id.clone()
    }

    fn supports(&self, market: Market) -> bool {
        !self.au_only || market == Market::Au
    }

    async fn search(
        &self,
        keyword: &str,
        _market: Market,
        _limit: u32,
    ) -> Result<SourcePayload, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Summary(total, avg) => Ok(SourcePayload::SearchSummary {
                total_results: *total,
                price_stats: Some(PriceStats::around_average(*avg)),
                items: Vec::new(),
            }),
            Behaviour::Items(prices) => Ok(SourcePayload::ItemList {
                items: prices
                    .iter()
                    .map(|p| ListingItem {
                        title: keyword.to_owned(),
                        price: Some(*p),
                        url: None,
                    })
                    .collect(),
            }),
            Behaviour::Fail => Err(SourceError::Unavailable {
                source_id: self.id.clone(),
                reason: "blocked".to_owned(),
            }),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3_600)).await;
                unreachable!("timeout should cancel the call")
            }
        }
    }
}

fn options(timeout_ms: u64) -> AggregatorOptions {
    AggregatorOptions {
        live_collection: true,
        source_timeout: Duration::from_millis(timeout_ms),
        result_limit: 20,
    }
}

fn aggregator(sources: Vec<Arc<dyn MarketDataSource>>, opts: AggregatorOptions) -> MarketDataAggregator {
    MarketDataAggregator::new(sources, Arc::new(StaticSnapshotStore::builtin()), opts)
}

#[tokio::test]
async fn timed_out_source_is_absent_while_others_succeed() {
    let agg = aggregator(
        vec![
            Arc::new(FakeSource::new("alpha", Behaviour::Summary(1_200, 40.0))),
            Arc::new(FakeSource::new("beta", Behaviour::Items(vec![10.0, 30.0]))),
            Arc::new(FakeSource::new("slow", Behaviour::Hang)),
        ],
        options(100),
    );

    let started = std::time::Instant::now();
    let results = agg.collect("yoga mat", Market::Au).await;
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[&SourceId::new("alpha")].as_ref().unwrap().total_result_count,
        1_200
    );
    let beta = results[&SourceId::new("beta")].as_ref().unwrap();
    assert_eq!(beta.total_result_count, 2);
    assert_eq!(beta.average_price(), Some(20.0));
    assert!(results[&SourceId::new("slow")].is_none());
}

#[tokio::test]
async fn failed_source_is_none_not_zero() {
    let agg = aggregator(
        vec![
            Arc::new(FakeSource::new("ok", Behaviour::Summary(0, 0.0))),
            Arc::new(FakeSource::new("down", Behaviour::Fail)),
        ],
        options(1_000),
    );
    let results = agg.collect("kayak", Market::Nz).await;
    let ok = results[&SourceId::new("ok")].as_ref().unwrap();
    assert_eq!(ok.total_result_count, 0);
    assert!(ok.price_stats.is_none());
    assert!(results[&SourceId::new("down")].is_none());
}

#[tokio::test]
async fn unsupported_market_is_not_queried() {
    let mut au_only = FakeSource::new("au-only", Behaviour::Summary(5, 10.0));
    au_only.au_only = true;
    let au_only = Arc::new(au_only);
    let agg = aggregator(
        vec![au_only.clone() as Arc<dyn MarketDataSource>],
        options(1_000),
    );

    let results = agg.collect("backpack", Market::Nz).await;
    assert!(results[&SourceId::new("au-only")].is_none());
    assert_eq!(au_only.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn disabled_live_collection_reads_snapshots() {
    let snapshots = Arc::new(StaticSnapshotStore::builtin());
    let agg = MarketDataAggregator::new(
        vec![
            Arc::new(SnapshotSource::trademe(snapshots.clone())),
            Arc::new(SnapshotSource::temu(snapshots.clone())),
        ],
        snapshots,
        AggregatorOptions {
            live_collection: false,
            ..AggregatorOptions::default()
        },
    );

    let results = agg.collect("smart watch", Market::Nz).await;
    let trademe = results[&SourceId::TRADEME].as_ref().unwrap();
    assert_eq!(trademe.total_result_count, 17_319);
    assert_eq!(trademe.average_price(), Some(89.0));
    assert!(results[&SourceId::TEMU].is_none());

    let au = agg.collect("smart watch", Market::Au).await;
    assert!(au[&SourceId::TRADEME].is_none());
}

#[tokio::test]
async fn outcomes_explain_skipped_sources() {
    let mut au_only = FakeSource::new("au-only", Behaviour::Summary(5, 10.0));
    au_only.au_only = true;
    let snapshots = Arc::new(StaticSnapshotStore::builtin());
    let agg = MarketDataAggregator::new(
        vec![
            Arc::new(au_only),
            Arc::new(SnapshotSource::temu(snapshots.clone())),
            Arc::new(FakeSource::new("down", Behaviour::Fail)),
        ],
        snapshots,
        AggregatorOptions {
            live_collection: false,
            ..AggregatorOptions::default()
        },
    );

    let outcomes = agg.collect_outcomes("smart watch", Market::Nz).await;

    let unsupported = outcomes[&SourceId::new("au-only")].as_ref().unwrap_err();
    assert_eq!(
        unsupported,
        &SourceError::UnsupportedMarket {
            source_id: SourceId::new("au-only"),
            market: "NZ".to_owned(),
        }
    );
    assert_eq!(unsupported.to_string(), "au-only does not serve market NZ");

    let disabled = outcomes[&SourceId::TEMU].as_ref().unwrap_err();
    assert_eq!(
        disabled,
        &SourceError::LiveCollectionDisabled {
            source_id: SourceId::TEMU
        }
    );
    assert_eq!(
        disabled.to_string(),
        "temu requires live collection, which is disabled"
    );

    assert!(matches!(
        outcomes[&SourceId::new("down")],
        Err(SourceError::Unavailable { .. })
    ));
}
