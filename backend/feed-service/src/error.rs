/// Error types for the feed core
use document_store::{DocumentId, StoreError};
use thiserror::Error;

use crate::models::UserId;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Missing, malformed or tampered credential. Carries no detail.
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("User {authenticated} is not authorized to act for user {target}")]
    Unauthorized { authenticated: UserId, target: UserId },

    #[error("Not found: document {id} in '{collection}'")]
    NotFound { collection: String, id: DocumentId },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The feed item was stored but never linked into the author's feed.
    #[error("Feed item {item_id} was created but not linked into feed {feed_id}: {reason}")]
    OrphanedFeedItem {
        item_id: DocumentId,
        feed_id: DocumentId,
        reason: String,
    },

    #[error("Corrupt document in '{collection}': {reason}")]
    CorruptDocument { collection: String, reason: String },

    #[error("Document store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for FeedError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => FeedError::NotFound { collection, id },
            StoreError::Decode {
                collection, source, ..
            } => FeedError::CorruptDocument {
                collection,
                reason: source.to_string(),
            },
            StoreError::MissingId { collection } | StoreError::NotAnObject { collection } => {
                FeedError::CorruptDocument {
                    collection,
                    reason: "document is not an object with a numeric _id".to_string(),
                }
            }
            other => FeedError::Store(other),
        }
    }
}

impl FeedError {
    /// HTTP status the transport layer reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            FeedError::Unauthenticated | FeedError::Unauthorized { .. } => 401,
            FeedError::MalformedInput(_) => 400,
            FeedError::NotFound { .. } => 404,
            FeedError::OrphanedFeedItem { .. }
            | FeedError::CorruptDocument { .. }
            | FeedError::Store(_) => 500,
        }
    }
}
