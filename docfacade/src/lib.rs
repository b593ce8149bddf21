//! Main docfacade crate providing simplified helpers over document databases.
//!
//! This crate is the primary entry point for users of docfacade. It re-exports the core
//! types from the sub-crates and provides access to the storage backends.
//!
//! # Features
//!
//! - **One-call helpers** - create, create-or-update, update, delete, get-one, get-all and find-or-create
//! - **Explicit errors** - validation, not-found and remote failures are distinct error variants
//! - **Multiple backends** - in-memory for tests, Firestore for production
//!
//! # Quick Start
//!
//! ```ignore
//! use docfacade::{prelude::*, memory::InMemoryStore, logging::Tracing};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> FacadeResult<()> {
//!     Tracing::setup()?;
//!
//!     let config = FacadeConfig::builder()
//!         .client_config(ClientConfig::new("rpg-tutorial"))
//!         .build();
//!     let store = DocumentStore::initialize(config, InMemoryStore::builder()).await?;
//!
//!     store.create(&json!({ "nuts": "nuts" }), "users/nuts").await?;
//!     store.update(&json!({ "level": 2 }), "users/nuts").await?;
//!
//!     // A missing document is not an error when reading.
//!     assert!(store.get_one("users/nobody").await?.is_none());
//!
//!     for (id, user) in store.get_all("users").await? {
//!         println!("{id}: {user:?}");
//!     }
//!
//!     store.shutdown().await
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! A store can be converted into a [`DynDocumentStore`](store::DynDocumentStore) with
//! `into_dyn` when the backend is chosen at runtime.
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - `firestore` - Firestore backend (requires the `firestore` feature)

pub mod logging;
pub mod prelude;

pub use docfacade_core::{backend, config, document, error, path, store};

/// In-memory storage backend implementations.
pub mod memory {
    pub use docfacade_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// Firestore storage backend implementations.
///
/// This module is only available when the `firestore` feature is enabled.
#[cfg(feature = "firestore")]
pub mod firestore {
    pub use docfacade_firestore::{FirestoreStore, FirestoreStoreBuilder};
}
