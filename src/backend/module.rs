//! Backend module trait for supplying repository data.
//!
//! The core never stores records, sets or formats. Every verb that needs data
//! asks the backend through this trait and awaits the answer; that await is
//! the only suspension point in handling a request.

use super::error::BackendResult;
use super::types::{
    Capabilities, HarvestQuery, MetadataFormat, Record, RecordHeader, RecordList, SetDescription,
};
use std::future::Future;

/// Data access contract an OAI-PMH repository must implement.
///
/// A backend missing any of these methods does not compile, so an incomplete
/// backend is rejected before the server ever starts.
///
/// Every method may fail with [`BackendError::Protocol`](super::BackendError::Protocol)
/// to report catalog errors such as `idDoesNotExist`, or with
/// [`BackendError::Fault`](super::BackendError::Fault) for anything else.
///
/// # Example Implementation
///
/// ```rust
/// use oai_pmh_server::backend::{
///     BackendError, BackendModule, BackendResult, Capabilities, DeletedRecordsSupport,
///     Granularity, HarvestQuery, MetadataFormat, Record, RecordHeader, RecordList,
///     SetDescription,
/// };
/// use oai_pmh_server::ErrorCode;
/// use std::future::Future;
///
/// struct EmptyRepository;
///
/// impl BackendModule for EmptyRepository {
///     fn get_capabilities(&self) -> impl Future<Output = BackendResult<Capabilities>> + Send {
///         async {
///             Ok(Capabilities {
///                 earliest_datestamp: "2001-01-01".to_string(),
///                 deleted_records_support: DeletedRecordsSupport::No,
///                 harvesting_granularity: Granularity::Day,
///             })
///         }
///     }
///
///     fn get_metadata_formats(
///         &self,
///         _identifier: Option<&str>,
///     ) -> impl Future<Output = BackendResult<Vec<MetadataFormat>>> + Send {
///         async { Err(BackendError::code(ErrorCode::NoMetadataFormats)) }
///     }
///
///     fn get_sets(
///         &self,
///         _resumption_token: Option<&str>,
///     ) -> impl Future<Output = BackendResult<Vec<SetDescription>>> + Send {
///         async { Err(BackendError::code(ErrorCode::NoSetHierarchy)) }
///     }
///
///     fn get_identifiers(
///         &self,
///         _query: &HarvestQuery,
///     ) -> impl Future<Output = BackendResult<RecordList<RecordHeader>>> + Send {
///         async { Err(BackendError::code(ErrorCode::NoRecordsMatch)) }
///     }
///
///     fn get_records(
///         &self,
///         _query: &HarvestQuery,
///     ) -> impl Future<Output = BackendResult<RecordList<Record>>> + Send {
///         async { Err(BackendError::code(ErrorCode::NoRecordsMatch)) }
///     }
///
///     fn get_record(
///         &self,
///         _identifier: &str,
///         _metadata_prefix: &str,
///     ) -> impl Future<Output = BackendResult<Record>> + Send {
///         async { Err(BackendError::code(ErrorCode::IdDoesNotExist)) }
///     }
/// }
/// ```
pub trait BackendModule {
    /// Repository capabilities for `Identify`
    fn get_capabilities(&self) -> impl Future<Output = BackendResult<Capabilities>> + Send;

    /// Metadata formats, optionally restricted to those available for one item
    fn get_metadata_formats(
        &self,
        identifier: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<MetadataFormat>>> + Send;

    /// The set hierarchy, optionally continuing from a resumption token
    fn get_sets(
        &self,
        resumption_token: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<SetDescription>>> + Send;

    /// Headers matching a selective harvest
    fn get_identifiers(
        &self,
        query: &HarvestQuery,
    ) -> impl Future<Output = BackendResult<RecordList<RecordHeader>>> + Send;

    /// Full records matching a selective harvest
    fn get_records(
        &self,
        query: &HarvestQuery,
    ) -> impl Future<Output = BackendResult<RecordList<Record>>> + Send;

    /// A single record in the given format
    fn get_record(
        &self,
        identifier: &str,
        metadata_prefix: &str,
    ) -> impl Future<Output = BackendResult<Record>> + Send;
}
