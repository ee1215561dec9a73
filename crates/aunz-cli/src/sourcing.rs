//! `keywords`, `match` and `profit` command handlers.

use anyhow::Context;
use aunz_core::{AppConfig, ExchangeRates, Market};
use aunz_sourcing::{
    KeywordBridge, MatchOptions, ProfitEstimator, SupplierMatcher, SupplierScorer, TargetProduct,
};

use crate::wiring;

#[derive(Debug)]
pub(crate) struct MatchRequest {
    pub title: String,
    pub price: f64,
    pub market: Market,
    pub limit: usize,
    pub max_price: f64,
    pub include_large: bool,
}

pub(crate) fn run_keywords(title: &str) -> anyhow::Result<()> {
    let bridged = KeywordBridge::default().bridge(title);
    let output = serde_json::json!({
        "title": title,
        "keywords": bridged.english,
        "localized": bridged.localized,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) async fn run_match(config: &AppConfig, request: MatchRequest) -> anyhow::Result<()> {
    let marketplace = wiring::offer_catalog(config)?
        .context("AUNZ_OFFERS_PATH must point at an offer catalog to match suppliers")?;

    let matcher = SupplierMatcher::new(marketplace)
        .with_scorer(SupplierScorer::new(ExchangeRates::builtin()));
    let target = TargetProduct::new(request.title, request.price, request.market.currency());
    let options = MatchOptions {
        max_price: request.max_price,
        limit_per_product: request.limit,
        include_large: request.include_large,
    };

    let result = matcher.match_product(&target, &options).await;
    tracing::info!(
        title = %target.title,
        matches = result.match_count(),
        "supplier matching complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_profit(
    target_price: f64,
    supplier_price: f64,
    market: Market,
    quantity: u32,
    shipping_per_unit: f64,
) -> anyhow::Result<()> {
    let estimate = ProfitEstimator::new(ExchangeRates::builtin()).estimate(
        target_price,
        market.currency(),
        supplier_price,
        quantity,
        shipping_per_unit,
    )?;
    println!("{}", serde_json::to_string_pretty(&estimate)?);
    Ok(())
}
