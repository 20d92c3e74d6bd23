//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::AuthService;
use board_service_lib::{CandidateService, CompanyService, DocumentStore, JobService};

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub jobs: Arc<dyn JobService>,
    pub candidates: Arc<dyn CandidateService>,
    pub companies: Arc<dyn CompanyService>,
    /// Used directly only for health checks
    pub store: Arc<dyn DocumentStore>,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        jobs: Arc<dyn JobService>,
        candidates: Arc<dyn CandidateService>,
        companies: Arc<dyn CompanyService>,
        store: Arc<dyn DocumentStore>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth,
            jobs,
            candidates,
            companies,
            store,
            config,
        }
    }
}
