//! OAI-PMH 2.0 repository endpoint core for Rust.
//!
//! Takes a decoded harvester request, checks its arguments against the
//! protocol grammar of its verb, asks a pluggable async backend for the data
//! and renders the OAI-PMH XML response (or protocol error document).
//! The HTTP listener and all data storage stay outside this crate.
//!
//! # Core Components
//!
//! - [`OaiPmhServer`] - Validates, dispatches and renders requests
//! - [`BackendModule`] - Trait for supplying repository data
//! - [`ErrorCode`] - The eight OAI-PMH error codes and their messages
//! - [`envelope`] - The response document builder
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use oai_pmh_server::{OaiPmhServerBuilder, RequestContext};
//! # use oai_pmh_server::BackendModule;
//!
//! # async fn example<B: BackendModule + Sync>(backend: B) -> Result<(), Box<dyn std::error::Error>> {
//! let server = OaiPmhServerBuilder::new()
//!     .with_repository_name("Example repository")
//!     .with_base_url("https://example.org/oai")
//!     .with_admin_email("admin@example.org")
//!     .build(backend)?;
//!
//! let context = RequestContext::new([("verb", "Identify")])
//!     .with_origin("https", "example.org", "/oai");
//! let response = server.handle_request(&context).await;
//! assert_eq!(response.content_type, "text/xml");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod envelope;
pub mod error;
pub mod exception;
pub mod request;
pub mod server;
pub mod validation;
pub mod verb;

// Re-export commonly used types for convenience
pub use backend::{BackendError, BackendModule, BackendResult};
pub use envelope::{ResponseEnvelope, VerbResponse, build_error, build_success};
pub use error::{BuildError, EnvelopeError, OaiError, OaiResult};
pub use exception::{ERROR_CATALOG, ErrorCode};
pub use request::RequestContext;
pub use server::{OaiPmhServer, OaiPmhServerBuilder, OaiResponse, RepositoryConfig};
pub use validation::{ArgumentError, validate};
pub use verb::{Verb, VerbSpec};
