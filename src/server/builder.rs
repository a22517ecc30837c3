//! Repository configuration and the server builder.
//!
//! Configuration mirrors the parameters a repository operator supplies:
//! the repository name, its base URL and one or more administrator
//! addresses, plus an opaque JSON blob handed to the backend factory.
//! Everything is checked once, when the server is built.

use crate::backend::BackendModule;
use crate::error::{BuildError, BuildResult};
use crate::server::OaiPmhServer;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;

const MANDATORY_PARAMETERS: [&str; 3] = ["repositoryName", "baseURL", "adminEmail"];

/// Configuration for an OAI-PMH repository endpoint.
///
/// Deserializes from the camelCase keys repository operators are used to:
///
/// ```json
/// {
///   "repositoryName": "Example repository",
///   "baseURL": "https://example.org/oai",
///   "adminEmail": ["admin@example.org", "ops@example.org"],
///   "backendModule": { "database": "records.db" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Human-readable repository name
    #[serde(rename = "repositoryName")]
    pub repository_name: String,

    /// Base URL harvesters send requests to
    #[serde(rename = "baseURL")]
    pub base_url: String,

    /// Administrator addresses; a single string is accepted as a list of one
    #[serde(rename = "adminEmail", deserialize_with = "one_or_many")]
    pub admin_emails: Vec<String>,

    /// Parameters passed through to the backend factory
    #[serde(rename = "backendModule", default = "empty_object")]
    pub backend_parameters: Value,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            repository_name: String::new(),
            base_url: String::new(),
            admin_emails: Vec::new(),
            backend_parameters: empty_object(),
        }
    }
}

impl RepositoryConfig {
    /// Parse a JSON configuration document.
    ///
    /// All missing mandatory parameters are reported together.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingParameters`] when mandatory keys are absent,
    /// [`BuildError::Parse`] for malformed JSON or mistyped values, and the
    /// errors of [`validate`](Self::validate) otherwise.
    pub fn from_json(document: &str) -> BuildResult<Self> {
        let value: Value = serde_json::from_str(document)?;
        let object = value
            .as_object()
            .ok_or_else(|| BuildError::invalid("configuration must be a JSON object"))?;

        let missing: Vec<String> = MANDATORY_PARAMETERS
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::MissingParameters { names: missing });
        }

        let config: RepositoryConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> BuildResult<()> {
        let mut missing = Vec::new();
        if self.repository_name.trim().is_empty() {
            missing.push("repositoryName".to_string());
        }
        if self.base_url.trim().is_empty() {
            missing.push("baseURL".to_string());
        }
        if self.admin_emails.is_empty() {
            missing.push("adminEmail".to_string());
        }
        if !missing.is_empty() {
            return Err(BuildError::MissingParameters { names: missing });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(BuildError::invalid(format!(
                "baseURL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if let Some(email) = self.admin_emails.iter().find(|email| !email.contains('@')) {
            return Err(BuildError::invalid(format!(
                "adminEmail '{}' is not an e-mail address",
                email
            )));
        }

        Ok(())
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(email) => vec![email],
        OneOrMany::Many(emails) => emails,
    })
}

/// Builder for configuring and creating OAI-PMH servers.
///
/// # Examples
///
/// ```rust,no_run
/// use oai_pmh_server::OaiPmhServerBuilder;
/// # use oai_pmh_server::backend::BackendModule;
///
/// # fn example<B: BackendModule>(backend: B) -> Result<(), Box<dyn std::error::Error>> {
/// let server = OaiPmhServerBuilder::new()
///     .with_repository_name("Example repository")
///     .with_base_url("https://example.org/oai")
///     .with_admin_email("admin@example.org")
///     .build(backend)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OaiPmhServerBuilder {
    config: RepositoryConfig,
}

impl OaiPmhServerBuilder {
    /// Start from an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded with
    /// [`RepositoryConfig::from_json`].
    pub fn from_config(config: RepositoryConfig) -> Self {
        Self { config }
    }

    pub fn with_repository_name(mut self, name: impl Into<String>) -> Self {
        self.config.repository_name = name.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Add an administrator address. May be called repeatedly.
    pub fn with_admin_email(mut self, email: impl Into<String>) -> Self {
        self.config.admin_emails.push(email.into());
        self
    }

    pub fn with_backend_parameters(mut self, parameters: Value) -> Self {
        self.config.backend_parameters = parameters;
        self
    }

    /// Build the server around a ready backend.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the configuration is invalid.
    pub fn build<B: BackendModule>(self, backend: B) -> BuildResult<OaiPmhServer<B>> {
        OaiPmhServer::new(backend, self.config)
    }

    /// Build the server, creating the backend from the configured backend
    /// parameters.
    ///
    /// The configuration is validated before the factory runs.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::BackendCreation`] if the factory fails.
    pub fn build_with<B, E, F>(self, factory: F) -> BuildResult<OaiPmhServer<B>>
    where
        B: BackendModule,
        E: Display,
        F: FnOnce(&Value) -> Result<B, E>,
    {
        self.config.validate()?;
        let backend =
            factory(&self.config.backend_parameters).map_err(|e| BuildError::BackendCreation {
                message: e.to_string(),
            })?;
        OaiPmhServer::new(backend, self.config)
    }
}
