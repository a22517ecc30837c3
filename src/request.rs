//! Inbound request context.
//!
//! The HTTP layer decodes the query string and hands the core a
//! [`RequestContext`]: the parameter map plus the scheme, host and path needed
//! to reconstruct the canonical request URL. The context is read-only once
//! built.

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::verb::VERB_PARAMETER;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Request context for OAI-PMH operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Unique identifier for this request, used for log correlation
    pub request_id: String,
    parameters: BTreeMap<String, String>,
    scheme: Option<String>,
    host: Option<String>,
    path: String,
}

impl RequestContext {
    /// Create a context from decoded query parameters with a generated request ID.
    pub fn new<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            request_id: Uuid::new_v4().to_string(),
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            scheme: None,
            host: None,
            path: "/".to_string(),
        }
    }

    /// Set the scheme, host and path the request arrived on.
    pub fn with_origin(
        mut self,
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.scheme = Some(scheme.into());
        self.host = Some(host.into());
        let path = path.into();
        self.path = if path.is_empty() { "/".to_string() } else { path };
        self
    }

    /// Replace the generated request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// The decoded query parameters, including `verb`.
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Value of a single parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// The raw `verb` parameter, if any.
    pub fn verb(&self) -> Option<&str> {
        self.parameter(VERB_PARAMETER)
    }

    /// The absolute request URL without its query string.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingScheme`] or [`EnvelopeError::MissingHost`]
    /// when the HTTP layer did not supply the request origin.
    pub fn canonical_url(&self) -> EnvelopeResult<String> {
        let scheme = self
            .scheme
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(EnvelopeError::MissingScheme)?;
        let host = self
            .host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(EnvelopeError::MissingHost)?;

        let separator = if self.path.starts_with('/') { "" } else { "/" };
        Ok(format!("{}://{}{}{}", scheme, host, separator, self.path))
    }
}
