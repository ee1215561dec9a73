use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub categories_path: Option<PathBuf>,
    pub snapshots_path: Option<PathBuf>,
    pub offers_path: Option<PathBuf>,
    /// `false` under constrained deployment profiles where scraper-backed
    /// sources cannot run; those sources are then served from snapshots.
    pub live_collection_enabled: bool,
    pub source_timeout_secs: u64,
    pub source_result_limit: u32,
    /// Upper bound on sourcing-marketplace unit price, in CNY.
    pub supplier_max_price: f64,
    /// Assumed freight per unit, in CNY.
    pub shipping_per_unit: f64,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_ms: u64,
    pub ebay_access_token: Option<String>,
    pub ebay_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("categories_path", &self.categories_path)
            .field("snapshots_path", &self.snapshots_path)
            .field("offers_path", &self.offers_path)
            .field("live_collection_enabled", &self.live_collection_enabled)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("source_result_limit", &self.source_result_limit)
            .field("supplier_max_price", &self.supplier_max_price)
            .field("shipping_per_unit", &self.shipping_per_unit)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_ms",
                &self.http_retry_backoff_base_ms,
            )
            .field(
                "ebay_access_token",
                &self.ebay_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("ebay_base_url", &self.ebay_base_url)
            .finish()
    }
}
