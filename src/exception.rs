//! The OAI-PMH error catalog.
//!
//! OAI-PMH defines eight error conditions a repository may report inside a
//! successful HTTP response. Each [`ErrorCode`] maps to a fixed,
//! human-readable message; the table is static and never changes at runtime.
//!
//! The messages are not standardized by the protocol, only the codes are.

use crate::error::OaiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight canonical OAI-PMH error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// Illegal or missing argument, or an illegal argument combination
    BadArgument,
    /// The resumption token is invalid or expired
    BadResumptionToken,
    /// The verb is missing or not one of the six OAI-PMH verbs
    BadVerb,
    /// The requested metadata format is not supported
    CannotDisseminateFormat,
    /// The identifier is unknown or illegal in this repository
    IdDoesNotExist,
    /// The selective-harvesting arguments match nothing
    NoRecordsMatch,
    /// No metadata formats are available for the item
    NoMetadataFormats,
    /// The repository does not support sets
    NoSetHierarchy,
}

/// Every code of the catalog, in declaration order.
pub static ERROR_CATALOG: [ErrorCode; 8] = [
    ErrorCode::BadArgument,
    ErrorCode::BadResumptionToken,
    ErrorCode::BadVerb,
    ErrorCode::CannotDisseminateFormat,
    ErrorCode::IdDoesNotExist,
    ErrorCode::NoRecordsMatch,
    ErrorCode::NoMetadataFormats,
    ErrorCode::NoSetHierarchy,
];

impl ErrorCode {
    /// The code as it appears in the `code` attribute of an `error` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadArgument => "badArgument",
            ErrorCode::BadResumptionToken => "badResumptionToken",
            ErrorCode::BadVerb => "badVerb",
            ErrorCode::CannotDisseminateFormat => "cannotDisseminateFormat",
            ErrorCode::IdDoesNotExist => "idDoesNotExist",
            ErrorCode::NoRecordsMatch => "noRecordsMatch",
            ErrorCode::NoMetadataFormats => "noMetadataFormats",
            ErrorCode::NoSetHierarchy => "noSetHierarchy",
        }
    }

    /// The human-readable message rendered as the `error` element's text.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::BadArgument => "Illegal query parameter",
            ErrorCode::BadResumptionToken => "The resumption token is invalid",
            ErrorCode::BadVerb => "Illegal OAI verb",
            ErrorCode::CannotDisseminateFormat => {
                "The metadata format identified by the value given for the metadataPrefix argument is not supported by the item or by the repository."
            }
            ErrorCode::IdDoesNotExist => {
                "The value of the identifier argument is unknown or illegal in this repository."
            }
            ErrorCode::NoRecordsMatch => {
                "The combination of the values of the from, until, set and metadataPrefix arguments results in an empty list."
            }
            ErrorCode::NoMetadataFormats => {
                "There are no metadata formats available for the specified item."
            }
            ErrorCode::NoSetHierarchy => "The repository does not support sets.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = OaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ERROR_CATALOG
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| OaiError::UnknownErrorCode(s.to_string()))
    }
}
