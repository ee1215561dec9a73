use thiserror::Error;

use crate::market::SourceId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown market: {0}")]
    UnknownMarket(String),

    #[error("score weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },
}

/// Why one collaborator call produced no data.
///
/// These never escape aggregation or ranking: the caller records the source as
/// absent and carries on with the others.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("{source_id} timed out after {timeout_ms}ms")]
    Timeout { source_id: SourceId, timeout_ms: u64 },

    #[error("{source_id} does not serve market {market}")]
    UnsupportedMarket { source_id: SourceId, market: String },

    #[error("{source_id} requires live collection, which is disabled")]
    LiveCollectionDisabled { source_id: SourceId },

    #[error("{source_id} is unavailable: {reason}")]
    Unavailable { source_id: SourceId, reason: String },

    #[error("{source_id} transport error: {reason}")]
    Transport { source_id: SourceId, reason: String },

    #[error("{source_id} returned HTTP {status}")]
    Status { source_id: SourceId, status: u16 },

    #[error("{source_id} returned an undecodable payload: {reason}")]
    Decode { source_id: SourceId, reason: String },
}

impl SourceError {
    /// The collaborator this error came from.
    #[must_use]
    pub fn source_id(&self) -> &SourceId {
        match self {
            Self::Timeout { source_id, .. }
            | Self::UnsupportedMarket { source_id, .. }
            | Self::LiveCollectionDisabled { source_id }
            | Self::Unavailable { source_id, .. }
            | Self::Transport { source_id, .. }
            | Self::Status { source_id, .. }
            | Self::Decode { source_id, .. } => source_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_reports_its_source() {
        let err = SourceError::Timeout {
            source_id: SourceId::EBAY,
            timeout_ms: 250,
        };
        assert_eq!(err.source_id(), &SourceId::EBAY);
        assert_eq!(err.to_string(), "ebay timed out after 250ms");
    }

    #[test]
    fn invalid_weights_message_includes_sum() {
        let err = CoreError::InvalidWeights { sum: 0.9 };
        assert!(err.to_string().contains("0.9"));
    }
}
