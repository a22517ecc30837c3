//! Core OAI-PMH server structure and initialization.

use crate::backend::{BackendModule, Capabilities};
use crate::envelope::Identification;
use crate::error::BuildResult;
use crate::server::builder::RepositoryConfig;
use log::info;

/// OAI-PMH repository endpoint.
///
/// Holds the validated repository configuration and the backend. It has no
/// mutable state, so one instance can serve any number of concurrent
/// requests through a shared reference.
///
/// # Type Parameters
///
/// * `B` - The backend module that implements [`BackendModule`]
pub struct OaiPmhServer<B> {
    pub(super) backend: B,
    pub(super) config: RepositoryConfig,
}

impl<B: BackendModule> OaiPmhServer<B> {
    /// Create a server from a backend and a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`](crate::error::BuildError) if the configuration
    /// is invalid.
    pub fn new(backend: B, config: RepositoryConfig) -> BuildResult<Self> {
        config.validate()?;
        info!(
            "OAI-PMH repository '{}' ready at {}",
            config.repository_name, config.base_url
        );
        Ok(Self { backend, config })
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Combine the configured repository identity with backend capabilities.
    pub(super) fn identification(&self, capabilities: Capabilities) -> Identification {
        Identification {
            repository_name: self.config.repository_name.clone(),
            base_url: self.config.base_url.clone(),
            admin_emails: self.config.admin_emails.clone(),
            capabilities,
        }
    }
}
