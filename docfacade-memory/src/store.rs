//! In-memory storage implementation for document stores.
//!
//! Documents are kept as JSON objects in maps keyed by collection path and document id,
//! behind async-safe read-write locks.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use docfacade_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::Credentials,
    document::{DocumentData, merge_fields},
    error::{FacadeError, FacadeResult},
    path::StorePath,
};

type CollectionMap = BTreeMap<String, DocumentData>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// Collections are keyed by their full path (`users/alice/posts`), documents by their id.
/// A collection exists as long as it holds at least one document, like in a remote
/// document database.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Example
///
/// ```ignore
/// use docfacade_memory::InMemoryStore;
/// use docfacade::{backend::StoreBackend, path::StorePath};
///
/// let store = InMemoryStore::new();
/// let path = StorePath::parse("users/alice")?;
/// store.set_document(&path, serde_json::Map::new()).await?;
/// assert!(store.get_document(&path).await?.is_some());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection path -> (document id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    ///
    /// The builder accepts any credentials and connects nowhere.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

/// Splits a document path into its collection key and document id.
fn document_key(path: &StorePath) -> FacadeResult<(String, String)> {
    if !path.is_document() {
        return Err(FacadeError::Remote(format!(
            "invalid document reference '{path}': document references must have an even number of segments"
        )));
    }

    // Even segment count guarantees a parent collection.
    let collection = path
        .parent()
        .map(|parent| parent.to_string())
        .unwrap_or_default();

    Ok((collection, path.id().to_string()))
}

fn collection_key(path: &StorePath) -> FacadeResult<String> {
    if !path.is_collection() {
        return Err(FacadeError::Remote(format!(
            "invalid collection reference '{path}': collection references must have an odd number of segments"
        )));
    }

    Ok(path.to_string())
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>> {
        let (collection, id) = document_key(path)?;

        Ok(self
            .store
            .read()
            .await
            .get(&collection)
            .and_then(|collection_map| collection_map.get(&id))
            .cloned())
    }

    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        let (collection, id) = document_key(path)?;

        self.store
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id, data);

        Ok(())
    }

    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        let (collection, id) = document_key(path)?;
        let mut store = self.store.write().await;

        match store
            .get_mut(&collection)
            .and_then(|collection_map| collection_map.get_mut(&id))
        {
            Some(stored) => {
                merge_fields(stored, data);
                Ok(())
            }
            None => Err(FacadeError::NotFound(path.to_string())),
        }
    }

    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()> {
        let (collection, id) = document_key(path)?;
        let mut store = self.store.write().await;

        let collection_map = match store.get_mut(&collection) {
            Some(col) => col,
            None => return Err(FacadeError::NotFound(path.to_string())),
        };

        if collection_map.remove(&id).is_none() {
            return Err(FacadeError::NotFound(path.to_string()));
        }

        if collection_map.is_empty() {
            store.remove(&collection);
        }

        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>> {
        let collection = collection_key(collection)?;

        Ok(self
            .store
            .read()
            .await
            .get(&collection)
            .map(|collection_map| {
                collection_map
                    .iter()
                    .map(|(id, data)| (id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use docfacade_memory::InMemoryStore;
/// use docfacade::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder().build(credentials).await?;
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    seed: StoreMap,
}

impl InMemoryStoreBuilder {
    /// Pre-populates the store with a document.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Validation`] if `path` is malformed or does not name a
    /// document.
    pub fn with_document(mut self, path: &str, data: DocumentData) -> FacadeResult<Self> {
        let path = StorePath::parse(path)?;
        let (collection, id) = document_key(&path)
            .map_err(|_| FacadeError::Validation(format!("'{path}' does not name a document")))?;

        self.seed
            .entry(collection)
            .or_default()
            .insert(id, data);

        Ok(self)
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds a fresh store holding the seeded documents. Credentials are not used.
    async fn build(self, _credentials: Credentials) -> FacadeResult<Self::Backend> {
        Ok(InMemoryStore {
            store: Arc::new(RwLock::new(self.seed)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfacade_core::config::ClientConfig;
    use serde_json::{Value, json};

    fn path(path: &str) -> StorePath {
        StorePath::parse(path).unwrap()
    }

    fn data(value: Value) -> DocumentData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = InMemoryStore::new();

        store.set_document(&path("cats/tom"), data(json!({ "lives": 9 }))).await.unwrap();

        assert_eq!(
            store.get_document(&path("cats/tom")).await.unwrap(),
            Some(data(json!({ "lives": 9 })))
        );
        assert_eq!(store.get_document(&path("cats/felix")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_whole_document() {
        let store = InMemoryStore::new();

        store.set_document(&path("cats/tom"), data(json!({ "a": 1, "b": 2 }))).await.unwrap();
        store.set_document(&path("cats/tom"), data(json!({ "c": 3 }))).await.unwrap();

        assert_eq!(
            store.get_document(&path("cats/tom")).await.unwrap(),
            Some(data(json!({ "c": 3 })))
        );
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = InMemoryStore::new();

        store.set_document(&path("cats/tom"), data(json!({ "a": 1, "b": 2 }))).await.unwrap();
        store.update_document(&path("cats/tom"), data(json!({ "b": 3 }))).await.unwrap();

        assert_eq!(
            store.get_document(&path("cats/tom")).await.unwrap(),
            Some(data(json!({ "a": 1, "b": 3 })))
        );
    }

    #[tokio::test]
    async fn update_missing_document_fails() {
        let store = InMemoryStore::new();

        let err = store
            .update_document(&path("cats/tom"), data(json!({ "b": 3 })))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.get_document(&path("cats/tom")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_document_and_empty_collection() {
        let store = InMemoryStore::new();

        store.set_document(&path("cats/tom"), data(json!({}))).await.unwrap();
        store.delete_document(&path("cats/tom")).await.unwrap();

        assert!(store.list_documents(&path("cats")).await.unwrap().is_empty());
        assert!(store.delete_document(&path("cats/tom")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_only_direct_children() {
        let store = InMemoryStore::new();

        store.set_document(&path("cats/tom"), data(json!({ "n": 1 }))).await.unwrap();
        store.set_document(&path("cats/felix"), data(json!({ "n": 2 }))).await.unwrap();
        store.set_document(&path("cats/tom/toys/ball"), data(json!({ "n": 3 }))).await.unwrap();

        let ids = store
            .list_documents(&path("cats"))
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["felix".to_string(), "tom".to_string()]);
        assert_eq!(store.list_documents(&path("cats/tom/toys")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn wrong_reference_kind_is_remote_error() {
        let store = InMemoryStore::new();

        assert!(matches!(
            store.get_document(&path("cats")).await,
            Err(FacadeError::Remote(_))
        ));
        assert!(matches!(
            store.list_documents(&path("cats/tom")).await,
            Err(FacadeError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        store.set_document(&path("cats/tom"), data(json!({}))).await.unwrap();

        assert!(clone.get_document(&path("cats/tom")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn builder_seeds_documents() {
        let store = InMemoryStore::builder()
            .with_document("cats/tom", data(json!({ "lives": 9 })))
            .unwrap()
            .build(Credentials::Client(ClientConfig::new("cats")))
            .await
            .unwrap();

        assert_eq!(
            store.get_document(&path("cats/tom")).await.unwrap(),
            Some(data(json!({ "lives": 9 })))
        );
        assert!(
            InMemoryStore::builder()
                .with_document("cats", data(json!({})))
                .is_err()
        );
    }
}
