use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{document_id, DocumentStore};
use crate::{Document, DocumentId, ID_FIELD};

#[derive(Debug, Default)]
struct Collection {
    /// Next id handed out by `add`; never reused
    next_id: DocumentId,
    documents: BTreeMap<DocumentId, Document>,
}

impl Collection {
    fn assign_id(&mut self) -> DocumentId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

/// In-memory document store.
///
/// Collections live behind a single `RwLock`; every call is a complete,
/// synchronous operation. Documents are cloned on read and write, so callers
/// never observe later mutations through a value they already hold.
///
/// Seed data uses the shape `{ "<collection>": { "<id>": { ...document } } }`.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store from seed data
    pub fn from_seed(seed: Value) -> StoreResult<Self> {
        let Value::Object(seed) = seed else {
            return Err(StoreError::InvalidSeed(
                "seed must be an object of collections".to_string(),
            ));
        };

        let mut collections = HashMap::with_capacity(seed.len());
        for (name, entries) in seed {
            let Value::Object(entries) = entries else {
                return Err(StoreError::InvalidSeed(format!(
                    "collection '{name}' must be an object keyed by id"
                )));
            };

            let mut collection = Collection::default();
            for (key, mut doc) in entries {
                let id: DocumentId = key.parse().map_err(|_| {
                    StoreError::InvalidSeed(format!("collection '{name}' has non-numeric key '{key}'"))
                })?;
                let object = doc.as_object_mut().ok_or_else(|| StoreError::NotAnObject {
                    collection: name.clone(),
                })?;

                let existing = object.get(ID_FIELD).map(Value::as_u64);
                match existing {
                    None => {
                        object.insert(ID_FIELD.to_string(), Value::from(id));
                    }
                    Some(Some(seeded_id)) if seeded_id == id => {}
                    Some(_) => {
                        return Err(StoreError::InvalidSeed(format!(
                            "document '{key}' in collection '{name}' has a mismatched _id"
                        )));
                    }
                }

                collection.next_id = collection.next_id.max(id + 1);
                collection.documents.insert(id, doc);
            }

            debug!(
                collection = %name,
                documents = collection.documents.len(),
                "Seeded collection"
            );
            collections.insert(name, collection);
        }

        Ok(Self {
            collections: RwLock::new(collections),
        })
    }

    /// Build a store from a JSON seed file
    pub fn from_seed_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let seed: Value = serde_json::from_str(&raw).map_err(|e| {
            StoreError::InvalidSeed(format!("{} is not valid JSON: {e}", path.display()))
        })?;
        Self::from_seed(seed)
    }

    /// Number of documents in a collection (0 for unknown collections)
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.documents.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Sorted ids of a collection
    pub fn ids(&self, collection: &str) -> Vec<DocumentId> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.documents.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read(&self, collection: &str, id: DocumentId) -> StoreResult<Document> {
        self.collections
            .read()
            .get(collection)
            .and_then(|c| c.documents.get(&id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })
    }

    fn write(&self, collection: &str, doc: Document) -> StoreResult<()> {
        let id = document_id(collection, &doc)?;
        let mut collections = self.collections.write();

        let slot = collections
            .get_mut(collection)
            .and_then(|c| c.documents.get_mut(&id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })?;
        *slot = doc;
        Ok(())
    }

    fn add(&self, collection: &str, mut doc: Document) -> StoreResult<Document> {
        let object = doc.as_object_mut().ok_or_else(|| StoreError::NotAnObject {
            collection: collection.to_string(),
        })?;

        let mut collections = self.collections.write();
        let target = collections.entry(collection.to_string()).or_default();
        let id = target.assign_id();

        object.insert(ID_FIELD.to_string(), Value::from(id));
        target.documents.insert(id, doc.clone());

        debug!(collection, id, "Added document");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStoreExt;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::io::Write;

    fn seeded() -> InMemoryDocumentStore {
        InMemoryDocumentStore::from_seed(json!({
            "users": {
                "1": { "fullName": "Someone", "feed": 1 },
                "3": { "_id": 3, "fullName": "Another Person", "feed": 3 }
            },
            "feeds": {
                "1": { "contents": [] }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_seed_populates_missing_ids() {
        let store = seeded();

        let user = store.read("users", 1).unwrap();
        assert_eq!(user["_id"], 1);
        assert_eq!(user["fullName"], "Someone");
        assert_eq!(store.ids("users"), vec![1, 3]);
    }

    #[test]
    fn test_seed_rejects_mismatched_id() {
        let result = InMemoryDocumentStore::from_seed(json!({
            "users": { "1": { "_id": 2 } }
        }));
        assert!(matches!(result, Err(StoreError::InvalidSeed(_))));
    }

    #[test]
    fn test_seed_rejects_non_numeric_key() {
        let result = InMemoryDocumentStore::from_seed(json!({
            "users": { "alice": {} }
        }));
        assert!(matches!(result, Err(StoreError::InvalidSeed(_))));
    }

    #[test]
    fn test_read_missing_document_is_not_found() {
        let store = seeded();

        match store.read("users", 99) {
            Err(StoreError::NotFound { collection, id }) => {
                assert_eq!(collection, "users");
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(matches!(
            store.read("nonexistent", 1),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_assigns_ids_after_highest_seeded_id() {
        let store = seeded();

        let first = store.add("users", json!({ "fullName": "New" })).unwrap();
        let second = store.add("users", json!({ "fullName": "Newer" })).unwrap();

        assert_eq!(first["_id"], 4);
        assert_eq!(second["_id"], 5);
        assert_eq!(store.len("users"), 4);
    }

    #[test]
    fn test_add_creates_collection_and_ignores_supplied_id() {
        let store = InMemoryDocumentStore::new();

        let doc = store.add("feedItems", json!({ "_id": 42, "type": "statusUpdate" })).unwrap();

        assert_eq!(doc["_id"], 1);
        assert!(store.read("feedItems", 42).is_err());
        assert_eq!(store.read("feedItems", 1).unwrap()["type"], "statusUpdate");
    }

    #[test]
    fn test_add_rejects_non_object() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(
            store.add("users", json!([1, 2, 3])),
            Err(StoreError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_write_overwrites_existing_document() {
        let store = seeded();

        store
            .write("feeds", json!({ "_id": 1, "contents": [7, 3] }))
            .unwrap();

        let feed = store.read("feeds", 1).unwrap();
        assert_eq!(feed["contents"], json!([7, 3]));
    }

    #[test]
    fn test_write_unknown_id_is_not_found() {
        let store = seeded();

        assert!(matches!(
            store.write("feeds", json!({ "_id": 9, "contents": [] })),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.write("feeds", json!({ "contents": [] })),
            Err(StoreError::MissingId { .. })
        ));
        assert_eq!(store.len("feeds"), 1);
    }

    #[test]
    fn test_read_returns_independent_copy() {
        let store = seeded();

        let mut user = store.read("users", 1).unwrap();
        user["fullName"] = json!("Changed");

        assert_eq!(store.read("users", 1).unwrap()["fullName"], "Someone");
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Feed {
        #[serde(rename = "_id")]
        id: DocumentId,
        contents: Vec<DocumentId>,
    }

    #[test]
    fn test_typed_helpers() {
        let store = seeded();

        let mut feed: Feed = store.read_as("feeds", 1).unwrap();
        feed.contents.insert(0, 12);
        store.write_as("feeds", &feed).unwrap();

        let reread: Feed = store.read_as("feeds", 1).unwrap();
        assert_eq!(reread.contents, vec![12]);

        let added: Feed = store
            .add_as("feeds", &json!({ "contents": [1] }))
            .unwrap();
        assert_eq!(added.id, 2);

        let decode = store.read_as::<Feed>("users", 1);
        assert!(matches!(decode, Err(StoreError::Decode { id: Some(1), .. })));
    }

    #[test]
    fn test_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "feeds": {{ "5": {{ "contents": [1, 2] }} }} }}"#).unwrap();

        let store = InMemoryDocumentStore::from_seed_file(file.path()).unwrap();
        assert_eq!(store.read("feeds", 5).unwrap()["contents"], json!([1, 2]));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "not json").unwrap();
        assert!(matches!(
            InMemoryDocumentStore::from_seed_file(broken.path()),
            Err(StoreError::InvalidSeed(_))
        ));
    }
}
