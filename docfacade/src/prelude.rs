//! Convenient re-exports of commonly used types from docfacade.
//!
//! ```ignore
//! use docfacade::prelude::*;
//! ```

pub use docfacade_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::{ClientConfig, CredentialSource, Credentials, FacadeConfig, FacadeConfigBuilder},
    document::{CollectionSnapshot, DocumentData},
    error::{FacadeError, FacadeResult},
    path::StorePath,
    store::{DocumentStore, DynDocumentStore},
};
