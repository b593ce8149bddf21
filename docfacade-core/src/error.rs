//! Error types and result types for document store operations.
//!
//! Every facade operation returns a [`FacadeResult<T>`]. Argument problems are reported as
//! [`FacadeError::Validation`] before the backend is touched, while anything the backend
//! rejects surfaces as [`FacadeError::Remote`] carrying the backend's message.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum FacadeError {
    /// Missing or unusable store configuration, such as no credential source.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The credential file could not be read or does not hold valid credential data.
    #[error("Credential read error: {0}")]
    CredentialRead(String),
    /// The caller passed an argument of the wrong shape (non-object data, malformed path).
    #[error("Validation error: {0}")]
    Validation(String),
    /// The operation requires an existing document but none is stored at the path.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// The underlying store failed the call (network, permission, quota, invalid reference).
    #[error("Remote error: {0}")]
    Remote(String),
    /// Stored data could not be decoded into the requested type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for document store operations.
pub type FacadeResult<T> = Result<T, FacadeError>;

impl From<SerdeJsonError> for FacadeError {
    fn from(err: SerdeJsonError) -> Self {
        FacadeError::Serialization(err.to_string())
    }
}

impl FacadeError {
    /// Returns `true` if this error reports a missing document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FacadeError::NotFound(_))
    }

    /// Returns `true` if this error was raised before any backend call.
    pub fn is_validation(&self) -> bool {
        matches!(self, FacadeError::Validation(_))
    }
}
