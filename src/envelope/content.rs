//! Verb-specific response bodies.
//!
//! Each successful request produces exactly one [`VerbResponse`], rendered as
//! a single element named after the verb.

use super::node::Element;
use crate::backend::{
    Capabilities, MetadataFormat, Record, RecordHeader, RecordList, Resumption, SetDescription,
};
use crate::verb::Verb;
use chrono::SecondsFormat;

/// OAI-PMH protocol version reported by `Identify`.
pub const PROTOCOL_VERSION: &str = "2.0";

/// Repository description answered to `Identify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub repository_name: String,
    pub base_url: String,
    pub admin_emails: Vec<String>,
    pub capabilities: Capabilities,
}

/// The result of one successfully handled verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerbResponse {
    Identify(Identification),
    ListMetadataFormats(Vec<MetadataFormat>),
    ListSets(Vec<SetDescription>),
    ListIdentifiers(RecordList<RecordHeader>),
    ListRecords(RecordList<Record>),
    GetRecord(Record),
}

impl VerbResponse {
    pub fn verb(&self) -> Verb {
        match self {
            VerbResponse::Identify(_) => Verb::Identify,
            VerbResponse::ListMetadataFormats(_) => Verb::ListMetadataFormats,
            VerbResponse::ListSets(_) => Verb::ListSets,
            VerbResponse::ListIdentifiers(_) => Verb::ListIdentifiers,
            VerbResponse::ListRecords(_) => Verb::ListRecords,
            VerbResponse::GetRecord(_) => Verb::GetRecord,
        }
    }

    /// The verb-named body element.
    pub fn to_element(&self) -> Element {
        let root = Element::new(self.verb().as_str());
        match self {
            VerbResponse::Identify(identification) => identify(root, identification),
            VerbResponse::ListMetadataFormats(formats) => {
                root.with_children(formats.iter().map(metadata_format))
            }
            VerbResponse::ListSets(sets) => root.with_children(sets.iter().map(set)),
            VerbResponse::ListIdentifiers(list) => root
                .with_children(list.records.iter().map(header))
                .with_optional_child(list.resumption.as_ref().map(resumption_token)),
            VerbResponse::ListRecords(list) => root
                .with_children(list.records.iter().map(record))
                .with_optional_child(list.resumption.as_ref().map(resumption_token)),
            VerbResponse::GetRecord(found) => root.with_child(record(found)),
        }
    }
}

fn identify(root: Element, identification: &Identification) -> Element {
    let capabilities = &identification.capabilities;
    root.with_child(Element::text(
        "repositoryName",
        &identification.repository_name,
    ))
    .with_child(Element::text("baseURL", &identification.base_url))
    .with_child(Element::text("protocolVersion", PROTOCOL_VERSION))
    .with_children(
        identification
            .admin_emails
            .iter()
            .map(|email| Element::text("adminEmail", email)),
    )
    .with_child(Element::text(
        "earliestDatestamp",
        &capabilities.earliest_datestamp,
    ))
    .with_child(Element::text(
        "deletedRecord",
        capabilities.deleted_records_support.as_str(),
    ))
    .with_child(Element::text(
        "granularity",
        capabilities.harvesting_granularity.as_str(),
    ))
}

fn metadata_format(format: &MetadataFormat) -> Element {
    Element::new("metadataFormat")
        .with_child(Element::text("metadataPrefix", &format.prefix))
        .with_child(Element::text("schema", &format.schema))
        .with_child(Element::text("metadataNamespace", &format.namespace))
}

fn set(set: &SetDescription) -> Element {
    Element::new("set")
        .with_child(Element::text("setSpec", &set.spec))
        .with_child(Element::text("setName", &set.name))
}

fn header(header: &RecordHeader) -> Element {
    let element = if header.deleted {
        Element::new("header").with_attribute("status", "deleted")
    } else {
        Element::new("header")
    };
    element
        .with_child(Element::text("identifier", &header.identifier))
        .with_child(Element::text("datestamp", &header.timestamp))
        .with_children(header.sets.iter().map(|spec| Element::text("setSpec", spec)))
}

fn record(record: &Record) -> Element {
    let element = Element::new("record").with_child(header(&record.header));
    if record.header.deleted {
        element
    } else {
        element.with_child(Element::new("metadata").with_raw(&record.data))
    }
}

fn resumption_token(resumption: &Resumption) -> Element {
    let element = Element::new("resumptionToken");
    let element = match &resumption.expiration {
        Some(expiration) => element.with_attribute(
            "expirationDate",
            expiration.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        None => element,
    };
    element
        .with_attribute("completeListSize", resumption.total_length.to_string())
        .with_attribute("cursor", resumption.offset.to_string())
        .with_text(&resumption.token)
}
