//! Alertgate HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use alertgate_core::{Credential, WorkflowRegistry};
use alertgate_delivery::{AlertClient, DispatchError};

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared per-process state handed to every request handler.
///
/// Everything here is read-only after startup: the workflow set and the
/// credential are resolved once, and the client wraps a pooled connection
/// that is cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Workflow ids this bridge accepts.
    pub registry: Arc<WorkflowRegistry>,
    /// Outbound client for the alerting API.
    pub client: AlertClient,
    /// Secret for the alerting API, injected into each dispatch call.
    pub credential: Arc<Credential>,
}

impl AppState {
    /// Bundles the resolved collaborators into shared state.
    pub fn new(registry: WorkflowRegistry, client: AlertClient, credential: Credential) -> Self {
        Self { registry: Arc::new(registry), client, credential: Arc::new(credential) }
    }

    /// Builds state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Configuration` if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &Config) -> Result<Self, DispatchError> {
        let client = AlertClient::new(config.to_client_config())?;
        Ok(Self::new(config.workflow_registry(), client, config.credential()))
    }
}
