use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::{Document, DocumentId, ID_FIELD};

/// Keyed access to named collections.
///
/// Implementations must satisfy:
/// - `read` fails with `NotFound` when the id is absent.
/// - `write` fails with `NotFound` when the id does not exist yet; otherwise
///   the stored document is fully replaced.
/// - `add` assigns a fresh id, unique within the collection, and returns the
///   document with `_id` populated.
/// - Every call completes before returning; there is no suspension.
pub trait DocumentStore: Send + Sync {
    /// Read a document by id
    fn read(&self, collection: &str, id: DocumentId) -> StoreResult<Document>;

    /// Overwrite an existing document, keyed by its `_id`
    fn write(&self, collection: &str, doc: Document) -> StoreResult<()>;

    /// Insert a new document and return it with its assigned `_id`
    fn add(&self, collection: &str, doc: Document) -> StoreResult<Document>;
}

/// Extract the `_id` of a stored document
pub fn document_id(collection: &str, doc: &Document) -> StoreResult<DocumentId> {
    let object = doc.as_object().ok_or_else(|| StoreError::NotAnObject {
        collection: collection.to_string(),
    })?;

    object
        .get(ID_FIELD)
        .and_then(|id| id.as_u64())
        .ok_or_else(|| StoreError::MissingId {
            collection: collection.to_string(),
        })
}

/// Typed access on top of any [`DocumentStore`], through serde
pub trait DocumentStoreExt: DocumentStore {
    fn read_as<T: DeserializeOwned>(&self, collection: &str, id: DocumentId) -> StoreResult<T> {
        let doc = self.read(collection, id)?;
        serde_json::from_value(doc).map_err(|source| StoreError::Decode {
            collection: collection.to_string(),
            id: Some(id),
            source,
        })
    }

    fn write_as<T: Serialize>(&self, collection: &str, doc: &T) -> StoreResult<()> {
        let doc = serde_json::to_value(doc).map_err(|source| StoreError::Encode {
            collection: collection.to_string(),
            source,
        })?;
        self.write(collection, doc)
    }

    /// Add `draft` and decode the stored result (with its new `_id`) as `T`
    fn add_as<D: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        draft: &D,
    ) -> StoreResult<T> {
        let doc = serde_json::to_value(draft).map_err(|source| StoreError::Encode {
            collection: collection.to_string(),
            source,
        })?;
        let stored = self.add(collection, doc)?;
        let id = document_id(collection, &stored).ok();
        serde_json::from_value(stored).map_err(|source| StoreError::Decode {
            collection: collection.to_string(),
            id,
            source,
        })
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}
