//! # Initialization
//!
//! Controller startup: rustls, tracing, metrics, HTTP server, Kubernetes
//! client and the Parameter Store backend.

use crate::config::ControllerConfig;
use crate::controller::reconciler::Reconciler;
use crate::observability::metrics;
use crate::provider::aws::AwsParameterStore;
use crate::server::{start_server, ServerState};
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Everything the watch loop needs
pub struct InitializationResult {
    pub client: Client,
    pub reconciler: Arc<Reconciler>,
    pub server_state: Arc<ServerState>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field("reconciler", &self.reconciler)
            .field("server_state", &self.server_state)
            .finish_non_exhaustive()
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parameter_store_controller=info".into()),
        )
        .init();
}

/// Initialize the controller runtime
#[allow(
    clippy::missing_errors_doc,
    reason = "Fails when metrics cannot be registered or no Kubernetes client can be built"
)]
pub async fn initialize() -> Result<InitializationResult> {
    init_tracing();

    // rustls 0.23 needs an explicit provider when several are compiled in
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider already installed");
    }

    info!("Starting Parameter Store Controller");

    metrics::register_metrics().context("Failed to register metrics")?;

    let config = ControllerConfig::from_env();
    info!(
        "Configuration: metrics_port={}, reconcile_interval={}s, backoff={}m..{}m, local_stack={}",
        config.metrics_port,
        config.reconcile_interval_secs,
        config.backoff_min_minutes,
        config.backoff_max_minutes,
        config.local_stack_endpoint.as_deref().unwrap_or("disabled")
    );

    let server_state = Arc::new(ServerState::default());
    let server_port = config.metrics_port;
    let server_state_clone = Arc::clone(&server_state);
    tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let store = Arc::new(AwsParameterStore::new(config.local_stack_endpoint.as_deref()).await);
    let reconciler = Arc::new(Reconciler::new(client.clone(), store, config));

    Ok(InitializationResult {
        client,
        reconciler,
        server_state,
    })
}
