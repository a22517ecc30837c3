//! Test backends.

use futures::future::{self, Either};
use oai_pmh_server::backend::{
    BackendError, BackendModule, BackendResult, Capabilities, HarvestQuery, MetadataFormat,
    Record, RecordHeader, RecordList, Resumption, SetDescription,
};
use oai_pmh_server::ErrorCode;
use std::future::Future;
use std::sync::Mutex;

use super::fixtures;

#[derive(Debug, thiserror::Error)]
#[error("backend storage unavailable")]
pub struct StorageUnavailable;

/// How a scripted backend call should fail, if at all.
#[derive(Debug, Clone)]
pub enum Failure {
    Codes(Vec<ErrorCode>),
    Fault,
}

impl Failure {
    fn to_error(&self) -> BackendError {
        match self {
            Failure::Codes(codes) => BackendError::Protocol(codes.clone()),
            Failure::Fault => BackendError::fault(StorageUnavailable),
        }
    }
}

/// Answers every call from fixed data, optionally failing all calls.
///
/// Records the arguments of the last call so tests can check what the
/// dispatcher passed through.
pub struct ScriptedBackend {
    pub capabilities: Capabilities,
    pub formats: Vec<MetadataFormat>,
    pub sets: Vec<SetDescription>,
    pub records: Vec<Record>,
    pub resumption: Option<Resumption>,
    pub failure: Option<Failure>,
    pub last_arguments: Mutex<Vec<Option<String>>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            capabilities: fixtures::capabilities(),
            formats: vec![fixtures::oai_dc_format()],
            sets: fixtures::sets(),
            records: fixtures::records(),
            resumption: None,
            failure: None,
            last_arguments: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedBackend {
    pub fn failing_with(codes: &[ErrorCode]) -> Self {
        Self {
            failure: Some(Failure::Codes(codes.to_vec())),
            ..Self::default()
        }
    }

    pub fn faulty() -> Self {
        Self {
            failure: Some(Failure::Fault),
            ..Self::default()
        }
    }

    pub fn with_resumption(mut self, resumption: Resumption) -> Self {
        self.resumption = Some(resumption);
        self
    }

    pub fn last_arguments(&self) -> Vec<Option<String>> {
        self.last_arguments.lock().unwrap().clone()
    }

    fn respond<T: Send>(
        &self,
        arguments: Vec<Option<String>>,
        value: impl FnOnce() -> T,
    ) -> impl Future<Output = BackendResult<T>> + Send {
        *self.last_arguments.lock().unwrap() = arguments;
        let result = match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(value()),
        };
        future::ready(result)
    }
}

impl BackendModule for ScriptedBackend {
    fn get_capabilities(&self) -> impl Future<Output = BackendResult<Capabilities>> + Send {
        self.respond(Vec::new(), || self.capabilities.clone())
    }

    fn get_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<MetadataFormat>>> + Send {
        self.respond(vec![identifier.map(str::to_string)], || self.formats.clone())
    }

    fn get_sets(
        &self,
        resumption_token: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<SetDescription>>> + Send {
        self.respond(vec![resumption_token.map(str::to_string)], || {
            self.sets.clone()
        })
    }

    fn get_identifiers(
        &self,
        query: &HarvestQuery,
    ) -> impl Future<Output = BackendResult<RecordList<RecordHeader>>> + Send {
        self.respond(query_arguments(query), || RecordList {
            records: self.records.iter().map(|r| r.header.clone()).collect(),
            resumption: self.resumption.clone(),
        })
    }

    fn get_records(
        &self,
        query: &HarvestQuery,
    ) -> impl Future<Output = BackendResult<RecordList<Record>>> + Send {
        self.respond(query_arguments(query), || RecordList {
            records: self.records.clone(),
            resumption: self.resumption.clone(),
        })
    }

    fn get_record(
        &self,
        identifier: &str,
        metadata_prefix: &str,
    ) -> impl Future<Output = BackendResult<Record>> + Send {
        let arguments = vec![
            Some(identifier.to_string()),
            Some(metadata_prefix.to_string()),
        ];
        let found = self
            .records
            .iter()
            .find(|r| r.header.identifier == identifier)
            .cloned();
        match found {
            Some(record) => Either::Left(self.respond(arguments, || record)),
            None => {
                *self.last_arguments.lock().unwrap() = arguments;
                Either::Right(future::ready(Err(BackendError::code(
                    ErrorCode::IdDoesNotExist,
                ))))
            }
        }
    }
}

fn query_arguments(query: &HarvestQuery) -> Vec<Option<String>> {
    vec![
        query.metadata_prefix.clone(),
        query.from.clone(),
        query.until.clone(),
        query.set.clone(),
        query.resumption_token.clone(),
    ]
}

/// Never resolves `GetRecord` for the identifier `"stuck"`; everything else
/// is delegated to a [`ScriptedBackend`].
#[derive(Default)]
pub struct StallingBackend {
    pub inner: ScriptedBackend,
}

pub const STALLING_IDENTIFIER: &str = "stuck";

impl BackendModule for StallingBackend {
    fn get_capabilities(&self) -> impl Future<Output = BackendResult<Capabilities>> + Send {
        self.inner.get_capabilities()
    }

    fn get_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<MetadataFormat>>> + Send {
        self.inner.get_metadata_formats(identifier)
    }

    fn get_sets(
        &self,
        resumption_token: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<SetDescription>>> + Send {
        self.inner.get_sets(resumption_token)
    }

    fn get_identifiers(
        &self,
        query: &HarvestQuery,
    ) -> impl Future<Output = BackendResult<RecordList<RecordHeader>>> + Send {
        self.inner.get_identifiers(query)
    }

    fn get_records(
        &self,
        query: &HarvestQuery,
    ) -> impl Future<Output = BackendResult<RecordList<Record>>> + Send {
        self.inner.get_records(query)
    }

    fn get_record(
        &self,
        identifier: &str,
        metadata_prefix: &str,
    ) -> impl Future<Output = BackendResult<Record>> + Send {
        if identifier == STALLING_IDENTIFIER {
            Either::Left(future::pending())
        } else {
            Either::Right(self.inner.get_record(identifier, metadata_prefix))
        }
    }
}
