use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourcingError {
    /// A caller precondition was violated (non-positive price, zero quantity).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("normalization error for offer {offer_id}: {reason}")]
    Normalization { offer_id: String, reason: String },

    #[error("failed to read offer catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse offer catalog {path}: {source}")]
    CatalogParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
