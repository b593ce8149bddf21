//! Main document store interface for interacting with document backends.
//!
//! This module provides the facade itself. A [`DocumentStore`] owns the backend handle
//! created at initialization and exposes the create, read, update and delete helpers.
//! Every helper validates its arguments before the backend is called, so a malformed call
//! never has side effects.
//!
//! - [`DocumentStore`] - Store bound to a specific backend implementation
//! - [`DynDocumentStore`] - Store over a boxed backend selected at runtime
//!
//! # Example
//!
//! ```ignore
//! use docfacade::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! let config = FacadeConfig::builder()
//!     .client_config(ClientConfig::new("my-project"))
//!     .build();
//! let store = DocumentStore::initialize(config, InMemoryStore::builder()).await?;
//!
//! store.create(&json!({ "name": "Tom" }), "cats/tom").await?;
//! let tom = store.get_one("cats/tom").await?;
//! ```

use serde::{Serialize, de::DeserializeOwned};
use tracing::{info, instrument};

use crate::{
    backend::{self, StoreBackend, StoreBackendBuilder},
    config::FacadeConfig,
    document::{CollectionSnapshot, DocumentData, from_document_data, to_document_data},
    error::{FacadeError, FacadeResult},
    path::StorePath,
};

/// A document store facade bound to a specific backend implementation.
///
/// The backend is the long-lived connection; it is shared read-only by every operation,
/// so several operations on the same store may be in flight at once.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

/// A document store over a boxed backend.
pub type DynDocumentStore = DocumentStore<Box<dyn backend::DynStoreBackend>>;

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store over an already connected backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Connects a backend from configuration and returns the ready store.
    ///
    /// # Arguments
    ///
    /// * `config` - Credential source and logging toggle
    /// * `builder` - Builder of the backend to connect
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Configuration`] if no credential source is supplied
    /// - [`FacadeError::CredentialRead`] if the credential file is unreadable or malformed
    /// - Any error the backend builder reports while connecting
    pub async fn initialize<Builder>(config: FacadeConfig, builder: Builder) -> FacadeResult<Self>
    where
        Builder: StoreBackendBuilder<Backend = B> + Send,
    {
        let credentials = config.resolve_credentials()?;
        let project_id = credentials.project_id().to_string();
        let backend = builder.build(credentials).await?;

        if config.logging_enabled {
            info!(project_id = %project_id, "document store has been initialized");
        }

        Ok(Self::new(backend))
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates the document at `path`, or merges `data` into it if it already exists.
    ///
    /// The existence check and the write are two separate backend calls. If the document
    /// is deleted in between, the merge finds nothing and the document is created instead.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Validation`] if `data` is not an object or `path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::create_or_update", level = "trace", skip(self, data))]
    pub async fn create_or_update<T>(&self, data: &T, path: &str) -> FacadeResult<bool>
    where
        T: Serialize + ?Sized,
    {
        let data = to_document_data(data)?;
        let path = StorePath::parse(path)?;

        match self.backend.get_document(&path).await? {
            Some(_) => match self.backend.update_document(&path, data.clone()).await {
                Err(FacadeError::NotFound(_)) => self.backend.set_document(&path, data).await?,
                result => result?,
            },
            None => self.backend.set_document(&path, data).await?,
        }

        Ok(true)
    }

    /// Creates the document at `path` or replaces its whole content with `data`.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Validation`] if `data` is not an object or `path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::create", level = "trace", skip(self, data))]
    pub async fn create<T>(&self, data: &T, path: &str) -> FacadeResult<bool>
    where
        T: Serialize + ?Sized,
    {
        let data = to_document_data(data)?;
        let path = StorePath::parse(path)?;

        self.backend.set_document(&path, data).await?;

        Ok(true)
    }

    /// Merges the fields of `data` into the existing document at `path`.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::NotFound`] if no document is stored at `path`
    /// - [`FacadeError::Validation`] if `data` is not an object or `path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::update", level = "trace", skip(self, data))]
    pub async fn update<T>(&self, data: &T, path: &str) -> FacadeResult<bool>
    where
        T: Serialize + ?Sized,
    {
        let data = to_document_data(data)?;
        let path = StorePath::parse(path)?;

        self.backend.update_document(&path, data).await?;

        Ok(true)
    }

    /// Removes the document at `path`.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::NotFound`] if no document is stored at `path`
    /// - [`FacadeError::Validation`] if `path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::delete", level = "trace", skip(self))]
    pub async fn delete(&self, path: &str) -> FacadeResult<bool> {
        let path = StorePath::parse(path)?;

        self.backend.delete_document(&path).await?;

        Ok(true)
    }

    /// Fetches the document at `path`.
    ///
    /// A missing document is a normal outcome and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Validation`] if `path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::get_one", level = "trace", skip(self))]
    pub async fn get_one(&self, path: &str) -> FacadeResult<Option<DocumentData>> {
        let path = StorePath::parse(path)?;

        self.backend.get_document(&path).await
    }

    /// Fetches the document at `path` and decodes it into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get_one`](Self::get_one), plus [`FacadeError::Serialization`] if the
    /// stored data does not decode into `T`.
    pub async fn get_one_as<T>(&self, path: &str) -> FacadeResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.get_one(path)
            .await?
            .map(from_document_data)
            .transpose()
    }

    /// Fetches every document directly under the collection at `collection_path`.
    ///
    /// The whole collection is materialized in memory; callers bound its size.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Validation`] if `collection_path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::get_all", level = "trace", skip(self))]
    pub async fn get_all(&self, collection_path: &str) -> FacadeResult<CollectionSnapshot> {
        let path = StorePath::parse(collection_path)?;

        Ok(self
            .backend
            .list_documents(&path)
            .await?
            .into_iter()
            .collect())
    }

    /// Returns the document at `path`, creating it with `data` if it does not exist.
    ///
    /// # Returns
    ///
    /// The stored data when the document exists, otherwise the data just written.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Validation`] if `data` is not an object or `path` is malformed
    /// - [`FacadeError::Remote`] if the backend fails
    #[instrument(name = "store::find_or_create", level = "trace", skip(self, data))]
    pub async fn find_or_create<T>(&self, data: &T, path: &str) -> FacadeResult<DocumentData>
    where
        T: Serialize + ?Sized,
    {
        let data = to_document_data(data)?;
        let path = StorePath::parse(path)?;

        if let Some(existing) = self.backend.get_document(&path).await? {
            return Ok(existing);
        }

        self.backend.set_document(&path, data.clone()).await?;

        Ok(data)
    }

    /// Shuts down the store, consuming it and releasing backend resources.
    pub async fn shutdown(self) -> FacadeResult<()> {
        self.backend.shutdown().await
    }
}

impl<B: StoreBackend + 'static> DocumentStore<B> {
    /// Converts this store into a [`DynDocumentStore`] over a boxed backend.
    pub fn into_dyn(self) -> DynDocumentStore {
        DocumentStore::new(Box::new(self.backend) as Box<dyn backend::DynStoreBackend>)
    }
}

impl DynDocumentStore {
    /// Attempts to downcast the boxed backend to a concrete type.
    pub fn backend_as<B: StoreBackend + 'static>(&self) -> Option<&B> {
        backend::DynStoreBackend::as_any(&*self.backend).downcast_ref::<B>()
    }
}
