//! Verb dispatch.
//!
//! One pass per request, with mutually exclusive outcomes:
//!
//! 1. unknown or missing verb: `badVerb`
//! 2. arguments illegal for the verb: `badArgument`
//! 3. one backend call, awaited
//! 4. backend success: verb result envelope
//! 5. backend protocol failure: envelope with exactly the reported codes;
//!    any other backend failure: opaque HTTP 500, no protocol XML
//!
//! The backend is never called for a request that failed 1 or 2.

use super::handlers;
use crate::backend::{BackendError, BackendModule};
use crate::envelope::{VerbResponse, build_error, build_success};
use crate::error::OaiError;
use crate::exception::ErrorCode;
use crate::request::RequestContext;
use crate::server::{OaiPmhServer, OaiResponse};
use crate::validation::validate;
use crate::verb::Verb;
use log::{debug, error, info, warn};

/// Terminal outcome of a dispatch that did not produce a verb result.
#[derive(Debug)]
enum Rejection {
    /// Rendered as `error` elements with HTTP 200
    Protocol(Vec<ErrorCode>),
    /// Rendered as an opaque server failure
    Fault(OaiError),
}

impl From<BackendError> for Rejection {
    fn from(error: BackendError) -> Self {
        match error.into_outcome() {
            Ok(codes) => Rejection::Protocol(codes),
            Err(fault) => Rejection::Fault(fault),
        }
    }
}

impl<B: BackendModule + Sync> OaiPmhServer<B> {
    /// Handle one decoded OAI-PMH request.
    ///
    /// This is the entry point for the HTTP layer. Protocol errors come back
    /// as HTTP 200 with an XML error document; system faults come back as
    /// HTTP 500 and are logged.
    pub async fn handle_request(&self, context: &RequestContext) -> OaiResponse {
        info!(
            "OAI-PMH request {:?} (request: '{}')",
            context.verb().unwrap_or("<none>"),
            context.request_id
        );

        let rendered = match self.dispatch(context).await {
            Ok(content) => {
                debug!(
                    "{} completed successfully (request: '{}')",
                    content.verb(),
                    context.request_id
                );
                build_success(context, &content)
            }
            Err(Rejection::Protocol(codes)) => {
                warn!(
                    "Responding with OAI-PMH errors {:?} (request: '{}')",
                    codes, context.request_id
                );
                build_error(context, &codes)
            }
            Err(Rejection::Fault(fault)) => {
                error!(
                    "Request failed: {} (request: '{}')",
                    fault, context.request_id
                );
                return OaiResponse::server_failure();
            }
        };

        match rendered {
            Ok(body) => OaiResponse::xml(body),
            Err(envelope_error) => {
                error!(
                    "Could not render response: {} (request: '{}')",
                    envelope_error, context.request_id
                );
                OaiResponse::server_failure()
            }
        }
    }

    async fn dispatch(&self, context: &RequestContext) -> Result<VerbResponse, Rejection> {
        let verb = context
            .verb()
            .and_then(|name| name.parse::<Verb>().ok())
            .ok_or_else(|| Rejection::Protocol(vec![ErrorCode::BadVerb]))?;

        validate(verb, context.parameters()).map_err(|reason| {
            debug!("{} (request: '{}')", reason, context.request_id);
            Rejection::Protocol(vec![reason.code()])
        })?;

        let result = match verb {
            Verb::Identify => handlers::identify(self).await,
            Verb::ListMetadataFormats => handlers::list_metadata_formats(self, context).await,
            Verb::ListSets => handlers::list_sets(self, context).await,
            Verb::ListIdentifiers => handlers::list_identifiers(self, context).await,
            Verb::ListRecords => handlers::list_records(self, context).await,
            Verb::GetRecord => handlers::get_record(self, context).await,
        };

        result.map_err(Rejection::from)
    }
}
