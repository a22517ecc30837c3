//! Per-verb handlers.
//!
//! Each handler runs after argument validation has passed. It makes exactly
//! one backend call and maps the result into the verb's response body.

use crate::backend::{BackendModule, BackendResult, HarvestQuery};
use crate::envelope::VerbResponse;
use crate::request::RequestContext;
use crate::server::OaiPmhServer;

pub(super) async fn identify<B: BackendModule + Sync>(
    server: &OaiPmhServer<B>,
) -> BackendResult<VerbResponse> {
    let capabilities = server.backend.get_capabilities().await?;
    Ok(VerbResponse::Identify(server.identification(capabilities)))
}

pub(super) async fn list_metadata_formats<B: BackendModule + Sync>(
    server: &OaiPmhServer<B>,
    context: &RequestContext,
) -> BackendResult<VerbResponse> {
    let formats = server
        .backend
        .get_metadata_formats(context.parameter("identifier"))
        .await?;
    Ok(VerbResponse::ListMetadataFormats(formats))
}

pub(super) async fn list_sets<B: BackendModule + Sync>(
    server: &OaiPmhServer<B>,
    context: &RequestContext,
) -> BackendResult<VerbResponse> {
    let sets = server
        .backend
        .get_sets(context.parameter("resumptionToken"))
        .await?;
    Ok(VerbResponse::ListSets(sets))
}

pub(super) async fn list_identifiers<B: BackendModule + Sync>(
    server: &OaiPmhServer<B>,
    context: &RequestContext,
) -> BackendResult<VerbResponse> {
    let query = HarvestQuery::from_parameters(context.parameters());
    let headers = server.backend.get_identifiers(&query).await?;
    Ok(VerbResponse::ListIdentifiers(headers))
}

pub(super) async fn list_records<B: BackendModule + Sync>(
    server: &OaiPmhServer<B>,
    context: &RequestContext,
) -> BackendResult<VerbResponse> {
    let query = HarvestQuery::from_parameters(context.parameters());
    let records = server.backend.get_records(&query).await?;
    Ok(VerbResponse::ListRecords(records))
}

pub(super) async fn get_record<B: BackendModule + Sync>(
    server: &OaiPmhServer<B>,
    context: &RequestContext,
) -> BackendResult<VerbResponse> {
    // both arguments are guaranteed by validation
    let identifier = context.parameter("identifier").unwrap_or_default();
    let metadata_prefix = context.parameter("metadataPrefix").unwrap_or_default();
    let record = server
        .backend
        .get_record(identifier, metadata_prefix)
        .await?;
    Ok(VerbResponse::GetRecord(record))
}
