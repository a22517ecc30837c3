//! # Static Repository Example
//!
//! This example serves a small repository whose records live in the
//! configuration document itself. The backend is created from the
//! `backendModule` section by [`OaiPmhServerBuilder::build_with`], and a
//! handful of harvester requests are answered and printed.
//!
//! The server uses the standard `log` crate, so any logging backend works.
//! Run with `RUST_LOG=oai_pmh_server=debug` to see dispatch decisions.

use oai_pmh_server::backend::{
    BackendError, BackendModule, BackendResult, Capabilities, HarvestQuery, MetadataFormat,
    Record, RecordHeader, RecordList, Resumption, SetDescription,
};
use oai_pmh_server::{ErrorCode, OaiPmhServerBuilder, RepositoryConfig, RequestContext};
use serde::Deserialize;

const CONFIG: &str = r#"{
    "repositoryName": "Static Demo Repository",
    "baseURL": "http://localhost:8080/oai",
    "adminEmail": ["admin@example.org", "curator@example.org"],
    "backendModule": {
        "pageSize": 2,
        "capabilities": {
            "earliestDatestamp": "2001-01-01",
            "deletedRecordsSupport": "persistent",
            "harvestingGranularity": "YYYY-MM-DD"
        },
        "formats": [{
            "prefix": "oai_dc",
            "schema": "http://www.openarchives.org/OAI/2.0/oai_dc.xsd",
            "namespace": "http://www.openarchives.org/OAI/2.0/oai_dc/"
        }],
        "sets": [{ "spec": "physics", "name": "Physics" }],
        "records": [
            {
                "identifier": "oai:demo:1",
                "timestamp": "2001-01-01",
                "sets": ["physics"],
                "data": "<oai_dc:dc xmlns:oai_dc=\"http://www.openarchives.org/OAI/2.0/oai_dc/\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\"><dc:title>First</dc:title></oai_dc:dc>"
            },
            {
                "identifier": "oai:demo:2",
                "timestamp": "2002-02-02",
                "data": "<oai_dc:dc xmlns:oai_dc=\"http://www.openarchives.org/OAI/2.0/oai_dc/\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\"><dc:title>Second</dc:title></oai_dc:dc>"
            },
            { "identifier": "oai:demo:3", "timestamp": "2003-03-03", "deleted": true }
        ]
    }
}"#;

/// A read-only repository held in memory, paged by offset tokens.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaticRepository {
    page_size: usize,
    capabilities: Capabilities,
    formats: Vec<MetadataFormat>,
    #[serde(default)]
    sets: Vec<SetDescription>,
    records: Vec<Record>,
}

impl StaticRepository {
    fn check_format(&self, prefix: &str) -> BackendResult<()> {
        if self.formats.iter().any(|f| f.prefix == prefix) {
            Ok(())
        } else {
            Err(ErrorCode::CannotDisseminateFormat.into())
        }
    }

    fn page(&self, query: &HarvestQuery) -> BackendResult<RecordList<Record>> {
        let offset = match &query.resumption_token {
            Some(token) => token
                .parse::<usize>()
                .ok()
                .filter(|offset| *offset < self.records.len())
                .ok_or(BackendError::code(ErrorCode::BadResumptionToken))?,
            None => {
                self.check_format(query.metadata_prefix.as_deref().unwrap_or_default())?;
                0
            }
        };

        let matching: Vec<Record> = self
            .records
            .iter()
            .filter(|r| match &query.set {
                Some(set) => r.header.sets.contains(set),
                None => true,
            })
            .skip(offset)
            .cloned()
            .collect();
        if matching.is_empty() {
            return Err(ErrorCode::NoRecordsMatch.into());
        }

        let next = offset + self.page_size;
        let records: Vec<Record> = matching.into_iter().take(self.page_size).collect();
        if next < self.records.len() && query.set.is_none() {
            Ok(RecordList::partial(
                records,
                Resumption {
                    total_length: self.records.len() as u64,
                    offset: offset as u64,
                    token: next.to_string(),
                    expiration: None,
                },
            ))
        } else {
            Ok(RecordList::complete(records))
        }
    }
}

impl BackendModule for StaticRepository {
    async fn get_capabilities(&self) -> BackendResult<Capabilities> {
        Ok(self.capabilities.clone())
    }

    async fn get_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> BackendResult<Vec<MetadataFormat>> {
        if let Some(identifier) = identifier {
            if !self.records.iter().any(|r| r.header.identifier == identifier) {
                return Err(ErrorCode::IdDoesNotExist.into());
            }
        }
        Ok(self.formats.clone())
    }

    async fn get_sets(&self, resumption_token: Option<&str>) -> BackendResult<Vec<SetDescription>> {
        if resumption_token.is_some() {
            return Err(ErrorCode::BadResumptionToken.into());
        }
        if self.sets.is_empty() {
            return Err(ErrorCode::NoSetHierarchy.into());
        }
        Ok(self.sets.clone())
    }

    async fn get_identifiers(&self, query: &HarvestQuery) -> BackendResult<RecordList<RecordHeader>> {
        let page = self.page(query)?;
        Ok(RecordList {
            records: page.records.into_iter().map(|r| r.header).collect(),
            resumption: page.resumption,
        })
    }

    async fn get_records(&self, query: &HarvestQuery) -> BackendResult<RecordList<Record>> {
        self.page(query)
    }

    async fn get_record(&self, identifier: &str, metadata_prefix: &str) -> BackendResult<Record> {
        self.check_format(metadata_prefix)?;
        self.records
            .iter()
            .find(|r| r.header.identifier == identifier)
            .cloned()
            .ok_or_else(|| ErrorCode::IdDoesNotExist.into())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    log::info!("Starting static OAI-PMH repository example");

    let config = RepositoryConfig::from_json(CONFIG)?;
    let server = OaiPmhServerBuilder::from_config(config).build_with(|parameters| {
        serde_json::from_value::<StaticRepository>(parameters.clone())
    })?;

    let requests: [&[(&str, &str)]; 7] = [
        &[("verb", "Identify")],
        &[("verb", "ListSets")],
        &[("verb", "ListRecords"), ("metadataPrefix", "oai_dc")],
        &[("verb", "ListRecords"), ("resumptionToken", "2")],
        &[("verb", "GetRecord"), ("identifier", "oai:demo:3"), ("metadataPrefix", "oai_dc")],
        &[("verb", "GetRecord"), ("identifier", "oai:demo:1")],
        &[("verb", "Frobnicate")],
    ];

    for pairs in requests {
        let context = RequestContext::new(pairs.iter().copied()).with_origin(
            "http",
            "localhost:8080",
            "/oai",
        );
        let response = server.handle_request(&context).await;
        println!("--- {:?} -> HTTP {}", pairs, response.status);
        println!("{}\n", response.body);
    }

    log::info!("Static repository example finished");
    Ok(())
}
