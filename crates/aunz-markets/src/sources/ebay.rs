//! eBay Browse API search source.
//!
//! Authenticates with a caller-supplied OAuth application token; token
//! minting and refresh happen elsewhere. NZ buyers are served from the AU
//! marketplace with an NZ delivery context.

use std::time::Duration;

use async_trait::async_trait;
use aunz_core::{ExchangeRates, ListingItem, Market, SourceError, SourceId};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::EbayError;
use crate::retry::retry_with_backoff;
use crate::sources::MarketDataSource;
use crate::types::SourcePayload;

pub const DEFAULT_BASE_URL: &str = "https://api.ebay.com";

const SEARCH_PATH: &str = "buy/browse/v1/item_summary/search";
const MAX_PAGE_SIZE: u32 = 200;
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
/// Currency of amounts that arrive without one; both markets are served
/// from the AU marketplace.
const MARKETPLACE_CURRENCY: &str = "AUD";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbaySearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub item_summaries: Vec<EbayItemSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EbayItemSummary {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub title: String,
    pub price: Option<EbayAmount>,
    pub item_web_url: Option<String>,
}

/// eBay money amounts are decimal strings.
#[derive(Debug, Deserialize)]
pub struct EbayAmount {
    pub value: String,
    pub currency: Option<String>,
}

impl EbayItemSummary {
    /// Converts the item, expressing its price in `currency`. A price in a
    /// currency the rate table cannot convert is dropped.
    fn into_listing_item(self, currency: &str, rates: &ExchangeRates) -> ListingItem {
        let price = self.price.and_then(|amount| {
            let value = amount.value.trim().parse::<f64>().ok()?;
            let from = amount.currency.as_deref().unwrap_or(MARKETPLACE_CURRENCY);
            let converted = rates.convert(value, from, currency);
            if converted.is_none() {
                tracing::debug!(
                    item_id = %self.item_id,
                    from,
                    to = currency,
                    "no exchange rate for item price; dropping it"
                );
            }
            converted
        });
        ListingItem {
            title: self.title,
            price,
            url: self.item_web_url,
        }
    }
}

/// Client for the eBay Browse `item_summary/search` endpoint.
///
/// Use [`EbayBrowseSource::new`] for production or
/// [`EbayBrowseSource::with_base_url`] to point at a mock server in tests.
pub struct EbayBrowseSource {
    client: Client,
    base_url: Url,
    access_token: String,
    rates: ExchangeRates,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl EbayBrowseSource {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(access_token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, EbayError> {
        Self::with_base_url(DEFAULT_BASE_URL, access_token, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`EbayError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`EbayError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, EbayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // One trailing slash so `join` appends rather than replaces.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| EbayError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
            rates: ExchangeRates::builtin(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Rates used to express item prices in the searched market's currency.
    #[must_use]
    pub fn with_rates(mut self, rates: ExchangeRates) -> Self {
        self.rates = rates;
        self
    }

    fn marketplace_id(_market: Market) -> &'static str {
        "EBAY_AU"
    }

    fn search_url(&self, keyword: &str, limit: u32) -> Result<Url, EbayError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| EbayError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("limit", &limit.clamp(1, MAX_PAGE_SIZE).to_string())
            .append_pair("offset", "0");
        Ok(url)
    }

    /// Runs one search, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`EbayError::RateLimited`] for HTTP 429 after retries are exhausted.
    /// - [`EbayError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`EbayError::Http`] on network failure.
    /// - [`EbayError::Deserialize`] if the body is not a search response.
    pub async fn search_items(
        &self,
        keyword: &str,
        market: Market,
        limit: u32,
    ) -> Result<EbaySearchResponse, EbayError> {
        let url = self.search_url(keyword, limit)?;
        let marketplace_id = Self::marketplace_id(market);
        let end_user_ctx = format!("contextualLocation=country={}", market.code());

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let end_user_ctx = end_user_ctx.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .bearer_auth(&self.access_token)
                    .header("X-EBAY-C-MARKETPLACE-ID", marketplace_id)
                    .header("X-EBAY-C-ENDUSERCTX", end_user_ctx)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(EbayError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(EbayError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<EbaySearchResponse>(&body).map_err(|e| {
                    EbayError::Deserialize {
                        context: format!("item_summary/search(q={keyword})"),
                        source: e,
                    }
                })
            }
        })
        .await
    }
}

#[async_trait]
impl MarketDataSource for EbayBrowseSource {
    fn id(&self) -> SourceId {
        SourceId::EBAY
    }

    fn supports(&self, _market: Market) -> bool {
        true
    }

    async fn search(
        &self,
        keyword: &str,
        market: Market,
        limit: u32,
    ) -> Result<SourcePayload, SourceError> {
        let response = self.search_items(keyword, market, limit).await?;
        Ok(SourcePayload::SearchSummary {
            total_results: response.total,
            price_stats: None,
            items: response
                .item_summaries
                .into_iter()
                .map(|item| item.into_listing_item(market.currency(), &self.rates))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_source(base_url: &str) -> EbayBrowseSource {
        EbayBrowseSource::with_base_url(base_url, "token", 30, "aunz-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn search_url_targets_browse_endpoint() {
        let source = test_source("https://api.ebay.com/");
        let url = source.search_url("yoga mat", 20).unwrap();
        assert_eq!(url.path(), "/buy/browse/v1/item_summary/search");
        assert!(url.as_str().contains("q=yoga+mat") || url.as_str().contains("q=yoga%20mat"));
        assert!(url.as_str().contains("limit=20"));
    }

    #[test]
    fn search_url_clamps_page_size() {
        let source = test_source("https://api.ebay.com");
        let url = source.search_url("backpack", 5_000).unwrap();
        assert!(url.as_str().contains("limit=200"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = EbayBrowseSource::with_base_url("not a url", "t", 5, "ua").err();
        assert!(matches!(err, Some(EbayError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn unparseable_item_price_is_none() {
        let item = EbayItemSummary {
            item_id: "v1|1|0".to_owned(),
            title: "mat".to_owned(),
            price: Some(EbayAmount {
                value: "n/a".to_owned(),
                currency: Some("AUD".to_owned()),
            }),
            item_web_url: None,
        };
        assert_eq!(
            item.into_listing_item("AUD", &ExchangeRates::builtin()).price,
            None
        );
    }

    fn item(value: &str, currency: Option<&str>) -> EbayItemSummary {
        EbayItemSummary {
            item_id: "v1|2|0".to_owned(),
            title: "earbuds".to_owned(),
            price: Some(EbayAmount {
                value: value.to_owned(),
                currency: currency.map(str::to_owned),
            }),
            item_web_url: None,
        }
    }

    #[test]
    fn aud_price_is_converted_for_nz_market() {
        let rates = ExchangeRates::builtin();
        let price = item("100.00", Some("AUD"))
            .into_listing_item("NZD", &rates)
            .price
            .unwrap();
        assert!((price - 100.0 * 4.70 * 0.233).abs() < 1e-9, "got {price}");
    }

    #[test]
    fn missing_currency_is_treated_as_marketplace_currency() {
        let rates = ExchangeRates::builtin();
        assert_eq!(item("40", None).into_listing_item("AUD", &rates).price, Some(40.0));
    }

    #[test]
    fn unconvertible_currency_drops_price() {
        let rates = ExchangeRates::builtin();
        assert_eq!(
            item("40", Some("USD")).into_listing_item("NZD", &rates).price,
            None
        );
    }
}
