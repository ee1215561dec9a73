use aunz_core::{SourceError, SourceId};
use thiserror::Error;

/// Errors returned by the eBay Browse API client.
#[derive(Debug, Error)]
pub enum EbayError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by eBay (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<EbayError> for SourceError {
    fn from(err: EbayError) -> Self {
        let source_id = SourceId::EBAY;
        match err {
            EbayError::Http(e) => SourceError::Transport {
                source_id,
                reason: e.to_string(),
            },
            EbayError::RateLimited { .. } => SourceError::Status {
                source_id,
                status: 429,
            },
            EbayError::UnexpectedStatus { status, .. } => SourceError::Status { source_id, status },
            EbayError::Deserialize { context, source } => SourceError::Decode {
                source_id,
                reason: format!("{context}: {source}"),
            },
            EbayError::InvalidBaseUrl { base_url, reason } => SourceError::Unavailable {
                source_id,
                reason: format!("invalid base URL \"{base_url}\": {reason}"),
            },
        }
    }
}
