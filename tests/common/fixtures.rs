//! Repository data used across the integration tests.

use oai_pmh_server::backend::{
    Capabilities, DeletedRecordsSupport, Granularity, MetadataFormat, Record, RecordHeader,
    SetDescription,
};

pub const DC_PAYLOAD: &str = concat!(
    r#"<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" "#,
    r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
    r#"<dc:title>Rust &amp; harvesting</dc:title>"#,
    r#"</oai_dc:dc>"#
);

pub fn capabilities() -> Capabilities {
    Capabilities {
        earliest_datestamp: "2001-01-01".to_string(),
        deleted_records_support: DeletedRecordsSupport::No,
        harvesting_granularity: Granularity::Day,
    }
}

pub fn oai_dc_format() -> MetadataFormat {
    MetadataFormat {
        prefix: "oai_dc".to_string(),
        schema: "http://www.openarchives.org/OAI/2.0/oai_dc.xsd".to_string(),
        namespace: "http://www.openarchives.org/OAI/2.0/oai_dc/".to_string(),
    }
}

pub fn sets() -> Vec<SetDescription> {
    vec![
        SetDescription {
            spec: "physics".to_string(),
            name: "Physics".to_string(),
        },
        SetDescription {
            spec: "math".to_string(),
            name: "Mathematics".to_string(),
        },
    ]
}

pub fn records() -> Vec<Record> {
    vec![
        Record {
            header: RecordHeader {
                identifier: "oai:example.org:1".to_string(),
                timestamp: "2001-01-01".to_string(),
                sets: vec!["physics".to_string()],
                deleted: false,
            },
            data: DC_PAYLOAD.to_string(),
        },
        Record {
            header: RecordHeader {
                identifier: "oai:example.org:2".to_string(),
                timestamp: "2002-02-02".to_string(),
                sets: Vec::new(),
                deleted: true,
            },
            data: String::new(),
        },
    ]
}
