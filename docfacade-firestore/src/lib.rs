//! Firestore backend implementation for docfacade.
//!
//! This crate provides a Firestore-based implementation of the `StoreBackend` trait on top
//! of the `firestore` client crate.
//!
//! To use this backend, include the `firestore` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docfacade = { version = "x.y.z", features = ["firestore"] }
//! ```
//!
//! # Connection
//!
//! The backend connects from the credentials of a `FacadeConfig`: an inline client
//! configuration uses the environment's application default credentials for its project,
//! a service-account key file is handed to the client as-is.
//!
//! # Example
//!
//! ```ignore
//! use docfacade::{prelude::*, firestore::FirestoreStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FacadeConfig::builder()
//!         .credentials_file("service-account.json")
//!         .build();
//!     let store = DocumentStore::initialize(config, FirestoreStore::builder()).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docfacade_firestore;

pub mod field_path;
pub mod store;

pub use store::{FirestoreStore, FirestoreStoreBuilder};
