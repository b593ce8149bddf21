//! Store configuration and credential resolution.
//!
//! A [`FacadeConfig`] names where credentials come from and whether the store logs its
//! initialization. Two credential forms exist: an inline client configuration (what a web
//! console hands out for an app) and a path to a service-account key file for trusted
//! server contexts. [`FacadeConfig::resolve_credentials`] turns either into
//! [`Credentials`] a backend builder can connect with.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{FacadeError, FacadeResult};

/// Configuration accepted by [`DocumentStore::initialize`](crate::store::DocumentStore::initialize).
///
/// # Example
///
/// ```ignore
/// let config = FacadeConfig::builder()
///     .credentials_file("/etc/app/service-account.json")
///     .logging_enabled(false)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacadeConfig {
    #[serde(default)]
    pub credentials: Option<CredentialSource>,
    #[serde(default = "default_logging_enabled")]
    pub logging_enabled: bool,
}

fn default_logging_enabled() -> bool {
    true
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            logging_enabled: default_logging_enabled(),
        }
    }
}

impl FacadeConfig {
    pub fn builder() -> FacadeConfigBuilder {
        FacadeConfigBuilder::default()
    }

    /// Reads the configured credential source.
    ///
    /// # Errors
    ///
    /// - [`FacadeError::Configuration`] if no credential source is configured or the inline
    ///   configuration has no project id.
    /// - [`FacadeError::CredentialRead`] if the credential file cannot be read or parsed.
    pub fn resolve_credentials(&self) -> FacadeResult<Credentials> {
        match &self.credentials {
            None => Err(FacadeError::Configuration(
                "no credential source provided".to_string(),
            )),
            Some(CredentialSource::Inline(config)) => {
                if config.project_id.trim().is_empty() {
                    return Err(FacadeError::Configuration(
                        "inline client configuration has an empty projectId".to_string(),
                    ));
                }

                Ok(Credentials::Client(config.clone()))
            }
            Some(CredentialSource::File(path)) => Ok(Credentials::ServiceAccount {
                key: ServiceAccountKey::read(path)?,
                key_path: path.clone(),
            }),
        }
    }
}

/// Where the store credentials come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialSource {
    /// An inline client configuration object.
    Inline(ClientConfig),
    /// A filesystem path to a service-account key file.
    File(PathBuf),
}

/// Client-side app configuration as handed out by the hosting console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl ClientConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

/// The fields of a service-account key file the facade relies on.
///
/// Unknown fields are ignored; the backend re-reads the file itself when connecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
}

impl ServiceAccountKey {
    /// Reads and parses a service-account key file.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::CredentialRead`] if the file is unreadable, is not valid
    /// JSON or lacks a `project_id`.
    pub fn read(path: &Path) -> FacadeResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            FacadeError::CredentialRead(format!("cannot read '{}': {e}", path.display()))
        })?;

        let key: ServiceAccountKey = serde_json::from_str(&contents).map_err(|e| {
            FacadeError::CredentialRead(format!("cannot parse '{}': {e}", path.display()))
        })?;

        if key.project_id.trim().is_empty() {
            return Err(FacadeError::CredentialRead(format!(
                "'{}' has an empty project_id",
                path.display()
            )));
        }

        Ok(key)
    }
}

/// Credentials resolved from a [`CredentialSource`], ready for a backend builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    Client(ClientConfig),
    ServiceAccount {
        key: ServiceAccountKey,
        key_path: PathBuf,
    },
}

impl Credentials {
    /// Returns the project the credentials belong to.
    pub fn project_id(&self) -> &str {
        match self {
            Credentials::Client(config) => &config.project_id,
            Credentials::ServiceAccount { key, .. } => &key.project_id,
        }
    }
}

/// Builder for [`FacadeConfig`].
#[derive(Debug, Default)]
pub struct FacadeConfigBuilder {
    credentials: Option<CredentialSource>,
    logging_enabled: Option<bool>,
}

impl FacadeConfigBuilder {
    /// Uses an inline client configuration.
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.credentials = Some(CredentialSource::Inline(config));
        self
    }

    /// Uses a service-account key file.
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials = Some(CredentialSource::File(path.into()));
        self
    }

    pub fn logging_enabled(mut self, enabled: bool) -> Self {
        self.logging_enabled = Some(enabled);
        self
    }

    pub fn build(self) -> FacadeConfig {
        FacadeConfig {
            credentials: self.credentials,
            logging_enabled: self.logging_enabled.unwrap_or_else(default_logging_enabled),
        }
    }
}
