//! Argument validation for OAI-PMH requests.
//!
//! Legality depends only on which argument names are present, never on their
//! values. Malformed dates or unknown metadata prefixes are the backend's
//! business and surface later as backend-reported errors.
//!
//! The reasons carried by [`ArgumentError`] are diagnostic only; on the wire
//! every violation is reported as `badArgument`.

use crate::exception::ErrorCode;
use crate::verb::{VERB_PARAMETER, Verb, VerbSpec};
use std::collections::BTreeMap;

/// Why a request's arguments were rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// An argument the verb does not recognize
    #[error("Argument '{name}' is not allowed for {verb}")]
    Illegal { verb: Verb, name: String },

    /// A required argument was not supplied
    #[error("Argument '{name}' is required for {verb}")]
    Missing { verb: Verb, name: &'static str },

    /// An exclusive argument was combined with other arguments
    #[error("Argument '{exclusive}' must be the only argument for {verb}, found '{other}'")]
    NotExclusive {
        verb: Verb,
        exclusive: &'static str,
        other: String,
    },
}

impl ArgumentError {
    /// The protocol error reported for this violation.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::BadArgument
    }
}

/// Check a decoded parameter map against the declared arguments of `verb`.
///
/// The map includes the `verb` entry itself, which is always allowed.
pub fn validate(verb: Verb, parameters: &BTreeMap<String, String>) -> Result<(), ArgumentError> {
    check_arguments(verb.spec(), parameters.keys().map(String::as_str))
}

fn check_arguments<'a>(
    spec: &VerbSpec,
    names: impl Iterator<Item = &'a str> + Clone,
) -> Result<(), ArgumentError> {
    let verb = spec.verb;

    if let Some(illegal) = names.clone().find(|name| !spec.recognizes(name)) {
        return Err(ArgumentError::Illegal {
            verb,
            name: illegal.to_string(),
        });
    }

    if let Some(exclusive) = spec.exclusive {
        if names.clone().any(|name| name == exclusive) {
            return match names.clone().find(|name| *name != exclusive && *name != VERB_PARAMETER) {
                Some(other) => Err(ArgumentError::NotExclusive {
                    verb,
                    exclusive,
                    other: other.to_string(),
                }),
                None => Ok(()),
            };
        }
    }

    match spec
        .required
        .iter()
        .find(|required| !names.clone().any(|name| name == **required))
    {
        Some(missing) => Err(ArgumentError::Missing {
            verb,
            name: *missing,
        }),
        None => Ok(()),
    }
}
