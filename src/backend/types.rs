//! Data shapes exchanged with the backend module.
//!
//! These are plain values. The core renders them; it never stores or
//! interprets them beyond what the response format requires.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How the repository reports deleted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedRecordsSupport {
    /// Deletions are not tracked
    No,
    /// Deletions may be tracked, without guarantees
    Transient,
    /// Deletions are tracked indefinitely
    Persistent,
}

impl DeletedRecordsSupport {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletedRecordsSupport::No => "no",
            DeletedRecordsSupport::Transient => "transient",
            DeletedRecordsSupport::Persistent => "persistent",
        }
    }
}

impl fmt::Display for DeletedRecordsSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finest datestamp granularity the repository supports for harvesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "YYYY-MM-DD")]
    Day,
    #[serde(rename = "YYYY-MM-DDThh:mm:ssZ")]
    Second,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "YYYY-MM-DD",
            Granularity::Second => "YYYY-MM-DDThh:mm:ssZ",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository capabilities reported in the `Identify` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub earliest_datestamp: String,
    pub deleted_records_support: DeletedRecordsSupport,
    pub harvesting_granularity: Granularity,
}

/// A metadata format the repository can disseminate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFormat {
    /// The `metadataPrefix` harvesters use to request it
    pub prefix: String,
    /// URL of the XML schema
    pub schema: String,
    /// XML namespace of the format
    pub namespace: String,
}

/// A set in the repository's set hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDescription {
    pub spec: String,
    pub name: String,
}

/// Header of an item: identifier, datestamp and set membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    pub identifier: String,
    pub timestamp: String,
    #[serde(default)]
    pub sets: Vec<String>,
    /// Rendered as `status="deleted"`; deleted records carry no metadata
    #[serde(default)]
    pub deleted: bool,
}

/// An item with its metadata payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub header: RecordHeader,
    /// Serialized XML inserted verbatim inside the `metadata` element
    #[serde(default)]
    pub data: String,
}

/// Pagination state of an incomplete list, issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resumption {
    /// Rendered as `completeListSize`
    pub total_length: u64,
    /// Rendered as `cursor`
    pub offset: u64,
    pub token: String,
    /// Rendered as `expirationDate` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// A page of list results plus optional pagination state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordList<T> {
    pub records: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumption: Option<Resumption>,
}

impl<T> RecordList<T> {
    /// A complete list with no further pages.
    pub fn complete(records: Vec<T>) -> Self {
        Self {
            records,
            resumption: None,
        }
    }

    /// A partial list continued by `resumption`.
    pub fn partial(records: Vec<T>, resumption: Resumption) -> Self {
        Self {
            records,
            resumption: Some(resumption),
        }
    }
}

/// Selective-harvesting arguments for `ListIdentifiers` and `ListRecords`.
///
/// Either `resumption_token` is set and everything else is empty, or
/// `metadata_prefix` is set with optional `from`, `until` and `set`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestQuery {
    pub metadata_prefix: Option<String>,
    pub from: Option<String>,
    pub until: Option<String>,
    pub set: Option<String>,
    pub resumption_token: Option<String>,
}

impl HarvestQuery {
    /// Extract the harvest arguments from an already validated parameter map.
    pub fn from_parameters(parameters: &BTreeMap<String, String>) -> Self {
        let get = |name: &str| parameters.get(name).cloned();
        Self {
            metadata_prefix: get("metadataPrefix"),
            from: get("from"),
            until: get("until"),
            set: get("set"),
            resumption_token: get("resumptionToken"),
        }
    }

    /// Whether this query continues an earlier harvest.
    pub fn is_resumption(&self) -> bool {
        self.resumption_token.is_some()
    }
}
