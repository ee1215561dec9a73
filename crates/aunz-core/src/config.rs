use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable
/// config with live collection enabled and no eBay token.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_non_negative = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(var, format!("must be a non-negative number, got {value}")));
        }
        Ok(value)
    };

    let log_level = or_default("AUNZ_LOG_LEVEL", "info");

    let categories_path = optional_path("AUNZ_CATEGORIES_PATH");
    let snapshots_path = optional_path("AUNZ_SNAPSHOTS_PATH");
    let offers_path = optional_path("AUNZ_OFFERS_PATH");

    let live_flag = parse_bool("AUNZ_LIVE_COLLECTION", &or_default("AUNZ_LIVE_COLLECTION", "true"))?;
    let constrained_profile = lookup("RENDER").is_ok() || lookup("IS_SERVERLESS").is_ok();
    let live_collection_enabled = live_flag && !constrained_profile;

    let source_timeout_secs = parse_u64("AUNZ_SOURCE_TIMEOUT_SECS", "20")?;
    if source_timeout_secs == 0 {
        return Err(invalid(
            "AUNZ_SOURCE_TIMEOUT_SECS",
            "must be at least 1 second".to_string(),
        ));
    }
    let source_result_limit = parse_u32("AUNZ_SOURCE_RESULT_LIMIT", "20")?;

    let supplier_max_price = parse_non_negative("AUNZ_SUPPLIER_MAX_PRICE", "500")?;
    let shipping_per_unit = parse_non_negative("AUNZ_SHIPPING_PER_UNIT", "15")?;

    let http_timeout_secs = parse_u64("AUNZ_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("AUNZ_USER_AGENT", "aunz-finder/0.1 (opportunity-scoring)");
    let http_max_retries = parse_u32("AUNZ_HTTP_MAX_RETRIES", "3")?;
    let http_retry_backoff_base_ms = parse_u64("AUNZ_HTTP_RETRY_BACKOFF_BASE_MS", "500")?;

    let ebay_access_token = lookup("EBAY_ACCESS_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let ebay_base_url = or_default("EBAY_BASE_URL", "https://api.ebay.com");

    Ok(AppConfig {
        log_level,
        categories_path,
        snapshots_path,
        offers_path,
        live_collection_enabled,
        source_timeout_secs,
        source_result_limit,
        supplier_max_price,
        shipping_per_unit,
        http_timeout_secs,
        user_agent,
        http_max_retries,
        http_retry_backoff_base_ms,
        ebay_access_token,
        ebay_base_url,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
