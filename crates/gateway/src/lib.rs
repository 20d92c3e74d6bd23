//! API Gateway Library
//!
//! The job board's HTTP surface: routes, bearer authentication with
//! sliding sessions, the admin guard and the listing endpoints. Services
//! are wired in-process over a shared document store.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use auth_service_lib::{AuthServiceConfig, Authenticator, LoggingMailer, Mailer};
use board_service_lib::{
    CandidateManager, CompanyManager, DocumentStore, JobManager, PrincipalStore,
};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Wire every service over one store.
pub fn build_state(
    config: GatewayConfig,
    store: Arc<dyn DocumentStore>,
    mailer: Arc<dyn Mailer>,
) -> AppState {
    let auth_config = AuthServiceConfig::from_parts(&config.jwt, &config.codes);
    let directory = Arc::new(PrincipalStore::new(store.clone()));

    AppState::new(
        Arc::new(Authenticator::new(directory, mailer, auth_config)),
        Arc::new(JobManager::new(store.clone(), config.location_schema)),
        Arc::new(CandidateManager::new(store.clone())),
        Arc::new(CompanyManager::new(store.clone())),
        store,
        config,
    )
}

/// Connect the configured store and serve HTTP until the process ends.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = board_service_lib::connect(&config.database).await?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!(
        backend = ?config.database.backend,
        location_schema = ?config.location_schema,
        "Starting gateway"
    );
    let state = build_state(config, store, Arc::new(LoggingMailer::default()));
    let app = create_router(state);

    info!("Gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
