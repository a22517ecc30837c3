//! Error types for OAI-PMH server operations.
//!
//! These are system-level faults: problems with configuration, backend
//! connectivity or internal contracts. They are never rendered as OAI-PMH
//! `error` elements. Protocol-level errors live in [`crate::exception`].

/// Main error type for OAI-PMH server operations.
///
/// Any value of this type reaching the dispatcher becomes an opaque server
/// failure (HTTP 500) and is logged.
#[derive(Debug, thiserror::Error)]
pub enum OaiError {
    /// The response envelope could not be built
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Unstructured fault raised by the backend module
    #[error("Backend fault: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A code that is not part of the OAI-PMH error catalog
    #[error("Unknown OAI-PMH error code: {0}")]
    UnknownErrorCode(String),

    /// Internal server errors
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Errors raised while assembling a response envelope.
///
/// These indicate a broken contract between the HTTP layer and the core
/// (for example a request context without a host), not a harvester mistake.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The request context carries no scheme
    #[error("Request context has no scheme; cannot reconstruct the request URL")]
    MissingScheme,

    /// The request context carries no host
    #[error("Request context has no host; cannot reconstruct the request URL")]
    MissingHost,

    /// An error envelope was requested with no error codes
    #[error("An error envelope needs at least one error code")]
    EmptyErrorList,

    /// An element or attribute name that is not a valid XML name
    #[error("Invalid XML name: {name:?}")]
    InvalidName { name: String },

    /// The XML writer failed
    #[error("XML serialization failed: {message}")]
    Xml { message: String },
}

/// Errors that can occur while configuring and building a server.
///
/// These are caught at startup, before any request is served.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// One or more mandatory configuration parameters were not supplied
    #[error("Mandatory parameters missing: {}", .names.join(","))]
    MissingParameters { names: Vec<String> },

    /// A supplied configuration value is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The backend factory refused to build a backend
    #[error("Creating the backend module failed: {message}")]
    BackendCreation { message: String },

    /// The configuration document could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl OaiError {
    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wrap an unstructured backend fault
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }
}

impl EnvelopeError {
    /// Create an XML serialization error from any writer failure
    pub fn xml(error: impl std::fmt::Display) -> Self {
        Self::Xml {
            message: error.to_string(),
        }
    }
}

impl BuildError {
    /// Create an invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

// Result type aliases for convenience
pub type OaiResult<T> = Result<T, OaiError>;
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
pub type BuildResult<T> = Result<T, BuildError>;
