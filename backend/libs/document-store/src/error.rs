use crate::DocumentId;
use thiserror::Error;

/// Errors from document store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document {id} not found in collection '{collection}'")]
    NotFound { collection: String, id: DocumentId },

    #[error("Document in collection '{collection}' has no numeric _id")]
    MissingId { collection: String },

    #[error("Document in collection '{collection}' is not a JSON object")]
    NotAnObject { collection: String },

    #[error("Failed to decode document {id:?} in collection '{collection}': {source}")]
    Decode {
        collection: String,
        id: Option<DocumentId>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode document for collection '{collection}': {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
