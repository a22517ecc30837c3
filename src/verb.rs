//! OAI-PMH verbs and their declared argument sets.
//!
//! Every verb has a static [`VerbSpec`] describing which query parameters it
//! recognizes. The table is defined once and shared read-only by all requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the query parameter that selects the verb.
pub const VERB_PARAMETER: &str = "verb";

/// The six OAI-PMH verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Identify,
    ListMetadataFormats,
    ListSets,
    ListIdentifiers,
    ListRecords,
    GetRecord,
}

/// Declared argument set of a verb.
///
/// `exclusive` names an argument that, when present, must be the only
/// argument besides `verb`. When it is absent every `required` argument must
/// be supplied and nothing outside `required` and `optional` may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbSpec {
    pub verb: Verb,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub exclusive: Option<&'static str>,
}

const HARVEST_OPTIONAL: &[&str] = &["from", "until", "set"];

static VERB_SPECS: [VerbSpec; 6] = [
    VerbSpec {
        verb: Verb::Identify,
        required: &[],
        optional: &[],
        exclusive: None,
    },
    VerbSpec {
        verb: Verb::ListMetadataFormats,
        required: &[],
        optional: &["identifier"],
        exclusive: None,
    },
    VerbSpec {
        verb: Verb::ListSets,
        required: &[],
        optional: &[],
        exclusive: Some("resumptionToken"),
    },
    VerbSpec {
        verb: Verb::ListIdentifiers,
        required: &["metadataPrefix"],
        optional: HARVEST_OPTIONAL,
        exclusive: Some("resumptionToken"),
    },
    VerbSpec {
        verb: Verb::ListRecords,
        required: &["metadataPrefix"],
        optional: HARVEST_OPTIONAL,
        exclusive: Some("resumptionToken"),
    },
    VerbSpec {
        verb: Verb::GetRecord,
        required: &["identifier", "metadataPrefix"],
        optional: &[],
        exclusive: None,
    },
];

impl Verb {
    /// All verbs in protocol order.
    pub const ALL: [Verb; 6] = [
        Verb::Identify,
        Verb::ListMetadataFormats,
        Verb::ListSets,
        Verb::ListIdentifiers,
        Verb::ListRecords,
        Verb::GetRecord,
    ];

    /// The verb name, which is also the name of its response element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Identify => "Identify",
            Verb::ListMetadataFormats => "ListMetadataFormats",
            Verb::ListSets => "ListSets",
            Verb::ListIdentifiers => "ListIdentifiers",
            Verb::ListRecords => "ListRecords",
            Verb::GetRecord => "GetRecord",
        }
    }

    /// The static argument declaration for this verb.
    pub fn spec(&self) -> &'static VerbSpec {
        // VERB_SPECS is laid out in the same order as Verb::ALL
        &VERB_SPECS[*self as usize]
    }
}

impl VerbSpec {
    /// Whether `name` is an argument this verb recognizes at all.
    pub fn recognizes(&self, name: &str) -> bool {
        name == VERB_PARAMETER
            || self.required.contains(&name)
            || self.optional.contains(&name)
            || self.exclusive == Some(name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verb string that is not one of the six OAI-PMH verbs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Illegal OAI verb: {0}")]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .iter()
            .copied()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}
