//! # Document Store
//!
//! Synchronous, keyed access to named collections of JSON documents.
//!
//! Every document is a JSON object carrying its identifier in the `_id`
//! field. Identifiers are assigned by the store on [`DocumentStore::add`] and
//! never change afterwards.
//!
//! ## Modules
//! - `traits`: the `DocumentStore` contract and typed `DocumentStoreExt` helpers
//! - `memory`: `InMemoryDocumentStore`, a seedable store for services and tests
//! - `error`: `StoreError` / `StoreResult`

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
pub use traits::{document_id, DocumentStore, DocumentStoreExt};

/// Store-assigned document identifier
pub type DocumentId = u64;

/// Raw stored document (always a JSON object)
pub type Document = serde_json::Value;

/// Name of the identifier field inside every document
pub const ID_FIELD: &str = "_id";
