//! A thin facade over JSON document stores with create, read, update and delete helpers.
//!
//! This crate is the core of the docfacade project and provides:
//!
//! - **Document store facade** ([`store`]) - The create/read/update/delete helpers
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing different storage backends
//! - **Paths** ([`path`]) - Parsing of slash-delimited document and collection references
//! - **Document data** ([`document`]) - JSON document representation and conversions
//! - **Configuration** ([`config`]) - Credential sources and the logging toggle
//! - **Error handling** ([`error`]) - The error taxonomy and result type
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
//! store.create_or_update(&json!({ "lives": 9 }), "cats/tom").await?;
//! let cats = store.get_all("cats").await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docfacade_core;

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod path;
pub mod store;
