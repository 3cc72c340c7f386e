//! # Reconciler
//!
//! Turns a `ParameterStore` resource into a Kubernetes Secret of the same name.
//!
//! Each reconciliation:
//! 1. Resolves the single reference and the list references against Parameter Store
//! 2. Creates or replaces the generated Secret (skipped on a terminal failure)
//! 3. Patches the resource status with the outcome
//!
//! A partial failure still publishes the Secret but returns an error, so the
//! error policy schedules a retry with backoff.

mod secret;
mod status;

pub use secret::{build_secret, MANAGED_BY_LABEL};

use crate::config::ControllerConfig;
use crate::controller::backoff::ResourceBackoffs;
use crate::crd::{ParameterStore, Phase};
use crate::observability::metrics;
use crate::provider::ParameterStoreBackend;
use crate::resolver::{synthesize, ResolutionError, Synthesis};
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use kube_runtime::controller::Action;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("ParameterStore is missing {0}")]
    MissingObjectKey(&'static str),
    #[error("failed to resolve parameters for {resource}: {source}")]
    Resolution {
        resource: String,
        #[source]
        source: ResolutionError,
    },
    #[error("secret for {resource} was written with unresolved references: {source}")]
    PartialResolution {
        resource: String,
        #[source]
        source: ResolutionError,
    },
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

/// Shared reconciliation context
pub struct Reconciler {
    pub client: Client,
    pub store: Arc<dyn ParameterStoreBackend>,
    pub config: ControllerConfig,
    pub backoffs: ResourceBackoffs,
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("config", &self.config)
            .field("backoffs", &self.backoffs)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    #[must_use]
    pub fn new(
        client: Client,
        store: Arc<dyn ParameterStoreBackend>,
        config: ControllerConfig,
    ) -> Self {
        let backoffs = ResourceBackoffs::new(config.backoff_min_minutes, config.backoff_max_minutes);
        Self {
            client,
            store,
            config,
            backoffs,
        }
    }
}

/// Key used for per-resource backoff state
#[must_use]
pub fn resource_key(cr: &ParameterStore) -> String {
    format!(
        "{}/{}",
        cr.metadata.namespace.as_deref().unwrap_or("default"),
        cr.metadata.name.as_deref().unwrap_or("unknown")
    )
}

/// Reconcile one `ParameterStore`
#[allow(
    clippy::missing_errors_doc,
    reason = "Errors are handled by the controller error policy"
)]
pub async fn reconcile(
    cr: Arc<ParameterStore>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let start = Instant::now();
    metrics::increment_reconciliations();

    let name = cr
        .metadata
        .name
        .clone()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.name"))?;
    let namespace = cr
        .metadata
        .namespace
        .clone()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.namespace"))?;

    let span = info_span!(
        "reconcile",
        resource.name = %name,
        resource.namespace = %namespace
    );

    let result = reconcile_inner(&cr, &ctx, &name, &namespace)
        .instrument(span)
        .await;

    metrics::observe_reconciliation_duration(start.elapsed().as_secs_f64());
    result
}

async fn reconcile_inner(
    cr: &ParameterStore,
    ctx: &Reconciler,
    name: &str,
    namespace: &str,
) -> Result<Action, ReconcilerError> {
    let resource = format!("{namespace}/{name}");
    info!("Reconciling ParameterStore {}", resource);

    let Synthesis { payload, partial } =
        match synthesize(ctx.store.as_ref(), &cr.spec.value_from).await {
            Ok(synthesis) => synthesis,
            Err(source) => {
                warn!("Parameter resolution failed for {}: {}", resource, source);
                status::record(ctx, cr, Phase::Failed, Some(source.to_string()), None, &[]).await;
                return Err(ReconcilerError::Resolution { resource, source });
            }
        };

    let synced = payload.data.len();
    let desired = build_secret(cr, payload)?;
    let secrets: Api<Secret> = Api::namespaced(ctx.client.clone(), namespace);
    let action = secret::apply_secret(&secrets, desired).await?;
    metrics::increment_secrets_written(action);
    info!("Secret {} {}d with {} keys", resource, action, synced);

    match partial {
        Some(source) => {
            status::record(
                ctx,
                cr,
                Phase::Degraded,
                Some(source.to_string()),
                Some(synced),
                source.failures(),
            )
            .await;
            Err(ReconcilerError::PartialResolution { resource, source })
        }
        None => {
            let message = format!("Synced {synced} parameters");
            status::record(ctx, cr, Phase::Ready, Some(message), Some(synced), &[]).await;
            ctx.backoffs.reset(&resource);
            Ok(Action::requeue(ctx.config.reconcile_interval()))
        }
    }
}
