//! Backend module contract.
//!
//! The backend is the external collaborator that owns all repository data.
//! This module defines what the core asks of it ([`BackendModule`]), the
//! shapes it answers with, and how it reports failure ([`BackendError`]).

pub mod error;
pub mod module;
pub mod types;

pub use error::{BackendError, BackendResult};
pub use module::BackendModule;
pub use types::{
    Capabilities, DeletedRecordsSupport, Granularity, HarvestQuery, MetadataFormat, Record,
    RecordHeader, RecordList, Resumption, SetDescription,
};
