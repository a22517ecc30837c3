//! OAI-PMH server: configuration, construction and request dispatch.
//!
//! # Module Organization
//!
//! * [`builder`] - Repository configuration and the server builder
//! * [`core`] - The `OaiPmhServer` struct and initialization
//! * `dispatch` - The per-request verb state machine
//! * `handlers` - One backend call per verb
//! * [`response`] - Status, content type and body returned to the HTTP layer

pub mod builder;
pub mod core;
mod dispatch;
mod handlers;
pub mod response;


pub use builder::{OaiPmhServerBuilder, RepositoryConfig};
pub use self::core::OaiPmhServer;
pub use response::OaiResponse;
