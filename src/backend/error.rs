//! Failure type for backend module operations.
//!
//! A backend can fail in exactly two ways. It can report one or more OAI-PMH
//! error codes, which are rendered to the harvester as `error` elements, or
//! it can fail for any other reason, which is a server fault and is never
//! rendered as protocol XML.

use crate::error::OaiError;
use crate::exception::ErrorCode;
use std::fmt;

/// Errors returned by [`BackendModule`](super::BackendModule) methods.
#[derive(Debug)]
pub enum BackendError {
    /// Structured failure carrying catalog error codes, in detection order
    Protocol(Vec<ErrorCode>),

    /// Anything else: connectivity problems, malformed data, bugs
    Fault(Box<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    /// A structured failure with a single error code.
    pub fn code(code: ErrorCode) -> Self {
        Self::Protocol(vec![code])
    }

    /// A structured failure with several independently detected codes.
    pub fn codes(codes: impl IntoIterator<Item = ErrorCode>) -> Self {
        Self::Protocol(codes.into_iter().collect())
    }

    /// Build a structured failure from wire names such as `"noRecordsMatch"`.
    ///
    /// # Errors
    ///
    /// Returns [`OaiError::UnknownErrorCode`] for a name outside the catalog.
    pub fn from_code_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, OaiError> {
        names
            .into_iter()
            .map(str::parse::<ErrorCode>)
            .collect::<Result<Vec<ErrorCode>, _>>()
            .map(Self::Protocol)
    }

    /// Wrap an unstructured failure.
    pub fn fault<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fault(Box::new(error))
    }

    /// Catalog codes carried by a structured failure, if any.
    pub fn protocol_codes(&self) -> Option<&[ErrorCode]> {
        match self {
            BackendError::Protocol(codes) if !codes.is_empty() => Some(codes.as_slice()),
            _ => None,
        }
    }

    /// Split into the catalog codes to render, or the fault to report.
    ///
    /// A structured failure with no codes cannot be rendered and counts as a
    /// fault.
    pub fn into_outcome(self) -> Result<Vec<ErrorCode>, OaiError> {
        match self {
            BackendError::Protocol(codes) if !codes.is_empty() => Ok(codes),
            BackendError::Protocol(_) => Err(OaiError::internal(
                "backend reported a protocol failure without error codes",
            )),
            BackendError::Fault(source) => Err(OaiError::Backend(source)),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Protocol(codes) => {
                let names: Vec<&str> = codes.iter().map(ErrorCode::as_str).collect();
                write!(f, "Backend reported OAI-PMH errors: [{}]", names.join(", "))
            }
            BackendError::Fault(error) => write!(f, "Backend fault: {}", error),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Protocol(_) => None,
            BackendError::Fault(error) => Some(&**error),
        }
    }
}

impl From<ErrorCode> for BackendError {
    fn from(code: ErrorCode) -> Self {
        Self::code(code)
    }
}

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
