//! Storage backend abstraction for the document store facade.
//!
//! This module defines the traits the facade delegates every data operation to, allowing
//! the same [`DocumentStore`](crate::store::DocumentStore) to run against a remote
//! document database in production and an in-memory map in tests.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances from credentials
//!
//! # Examples
//!
//! ```ignore
//! use docfacade::backend::StoreBackend;
//! use docfacade::path::StorePath;
//!
//! let backend = MyBackendImpl::new();
//! let path = StorePath::parse("users/alice")?;
//! backend.set_document(&path, serde_json::Map::new()).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{any::Any, fmt::Debug};

use crate::{
    config::Credentials,
    document::DocumentData,
    error::FacadeResult,
    path::StorePath,
};

/// Abstract interface for document storage backends.
///
/// Paths handed to a backend are already parsed but not checked for kind: a backend must
/// fail with [`FacadeError::Remote`](crate::error::FacadeError::Remote) when a document
/// operation receives a collection path or the other way around.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Fetches the document at `path`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no document is stored at the path.
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>>;

    /// Creates the document at `path` or replaces its whole content.
    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()>;

    /// Merges the top-level fields of `data` into the existing document at `path`.
    ///
    /// Fields absent from `data` keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::NotFound`](crate::error::FacadeError::NotFound) if no document
    /// is stored at the path.
    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()>;

    /// Removes the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::NotFound`](crate::error::FacadeError::NotFound) if no document
    /// is stored at the path.
    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()>;

    /// Lists every document directly under the collection at `collection`.
    ///
    /// # Returns
    ///
    /// `(document id, data)` pairs; an empty vector for an empty or unknown collection.
    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> FacadeResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>> {
        StoreBackend::get_document(*self, path).await
    }

    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        StoreBackend::set_document(*self, path, data).await
    }

    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        StoreBackend::update_document(*self, path, data).await
    }

    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()> {
        StoreBackend::delete_document(*self, path).await
    }

    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>> {
        StoreBackend::list_documents(*self, collection).await
    }
}

/// Object-safe counterpart of [`StoreBackend`].
///
/// Every `StoreBackend + 'static` implements this trait, so a backend can be boxed and
/// selected at runtime.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>>;
    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()>;
    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()>;
    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()>;
    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>>;
    async fn shutdown_boxed(self: Box<Self>) -> FacadeResult<()>;

    fn as_any(&self) -> &dyn Any;
}

#[async_trait]
impl<B: StoreBackend + 'static> DynStoreBackend for B {
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>> {
        StoreBackend::get_document(self, path).await
    }

    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        StoreBackend::set_document(self, path, data).await
    }

    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        StoreBackend::update_document(self, path, data).await
    }

    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()> {
        StoreBackend::delete_document(self, path).await
    }

    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>> {
        StoreBackend::list_documents(self, collection).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> FacadeResult<()> {
        StoreBackend::shutdown(*self).await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[async_trait]
impl StoreBackend for Box<dyn DynStoreBackend> {
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>> {
        DynStoreBackend::get_document(&**self, path).await
    }

    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        DynStoreBackend::set_document(&**self, path, data).await
    }

    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        DynStoreBackend::update_document(&**self, path, data).await
    }

    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()> {
        DynStoreBackend::delete_document(&**self, path).await
    }

    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>> {
        DynStoreBackend::list_documents(&**self, collection).await
    }

    async fn shutdown(self) -> FacadeResult<()> {
        <dyn DynStoreBackend as DynStoreBackend>::shutdown_boxed(self).await
    }
}

/// Factory for backends that connect with resolved [`Credentials`].
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self, credentials: Credentials) -> FacadeResult<Self::Backend>;
}
