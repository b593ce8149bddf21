//! In-memory document storage backend for docfacade.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for development
//! and testing. Its reference rules match the remote store: document paths have an even
//! number of segments, collection paths an odd number, and anything else fails with a
//! remote error.
//!
//! # Quick Start
//!
//! ```ignore
//! use docfacade::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FacadeConfig::builder()
//!         .client_config(ClientConfig::new("local"))
//!         .build();
//!     let store = DocumentStore::initialize(config, InMemoryStore::builder()).await?;
//!
//!     store.create(&json!({ "name": "Alice" }), "users/alice").await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docfacade_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
