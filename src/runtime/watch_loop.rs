//! # Watch Loop
//!
//! Watches `ParameterStore` resources and the Secrets they own, and drives
//! reconciliation until a shutdown signal arrives.

use crate::controller::reconciler::{reconcile, Reconciler, MANAGED_BY_LABEL};
use crate::constants::FIELD_MANAGER;
use crate::crd::ParameterStore;
use crate::runtime::error_policy::{forget_deleted, handle_reconciliation_error};
use crate::server::ServerState;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::api::Api;
use kube::Client;
use kube_runtime::controller::Error as ControllerError;
use kube_runtime::{watcher, Controller};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Run the controller until SIGINT/SIGTERM
///
/// Changes to a generated Secret (including deletion) re-trigger the
/// reconciliation of its owning `ParameterStore`.
pub async fn run_watch_loop(
    client: Client,
    reconciler: Arc<Reconciler>,
    server_state: Arc<ServerState>,
) {
    let parameter_stores: Api<ParameterStore> = Api::all(client.clone());
    let secrets: Api<Secret> = Api::all(client);
    let owned_secrets =
        watcher::Config::default().labels(&format!("{MANAGED_BY_LABEL}={FIELD_MANAGER}"));

    info!("Starting controller watch loop...");
    server_state.set_ready(true);

    let context = Arc::clone(&reconciler);
    Controller::new(parameter_stores, watcher::Config::default().any_semantic())
        .owns(secrets, owned_secrets)
        .shutdown_on_signal()
        .run(reconcile, handle_reconciliation_error, reconciler)
        .for_each(|result| {
            match result {
                Ok((object, action)) => {
                    debug!("Reconciled {}: {:?}", object, action);
                }
                Err(ControllerError::ObjectNotFound(obj_ref)) => {
                    forget_deleted(&context.backoffs, &obj_ref);
                }
                Err(e) => {
                    warn!("Controller stream error: {}", e);
                }
            }
            futures::future::ready(())
        })
        .await;

    server_state.set_ready(false);
    info!("Controller stopped gracefully");
}
