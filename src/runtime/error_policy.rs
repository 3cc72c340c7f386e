//! # Error Policy
//!
//! Retry scheduling for failed reconciliations.

use crate::controller::backoff::ResourceBackoffs;
use crate::controller::reconciler::{resource_key, Reconciler, ReconcilerError};
use crate::crd::ParameterStore;
use crate::observability::metrics;
use kube::core::DynamicObject;
use kube_runtime::controller::Action;
use kube_runtime::reflector::ObjectRef;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Requeue a failed resource after its next Fibonacci delay
///
/// Backoff state is tracked per resource, so one failing resource never
/// delays the others.
pub fn handle_reconciliation_error(
    cr: Arc<ParameterStore>,
    error: &ReconcilerError,
    ctx: Arc<Reconciler>,
) -> Action {
    let key = resource_key(&cr);
    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.reconciliation_error",
        resource = key.as_str(),
        error = %error
    );
    let _error_guard = error_span.enter();

    error!("Reconciliation error for {}: {}", key, error);
    metrics::increment_reconciliation_errors();

    retry_action(&ctx.backoffs, &key)
}

/// Next requeue for `key`
pub(crate) fn retry_action(backoffs: &ResourceBackoffs, key: &str) -> Action {
    let delay = backoffs.next_delay(key);
    let next_trigger_time = chrono::Utc::now()
        + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());
    info!(
        "Retrying {} in {}s (next attempt at {})",
        key,
        delay.as_secs(),
        next_trigger_time.to_rfc3339()
    );
    Action::requeue(delay)
}

/// Drop the backoff state of a resource that was deleted while failing
///
/// Its pending requeue fires after deletion and surfaces as `ObjectNotFound`.
pub(crate) fn forget_deleted(
    backoffs: &ResourceBackoffs,
    obj_ref: &ObjectRef<DynamicObject>,
) {
    let key = format!(
        "{}/{}",
        obj_ref.namespace.as_deref().unwrap_or("default"),
        obj_ref.name
    );
    debug!("{} no longer exists, dropping its backoff state", key);
    backoffs.reset(&key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::ParameterStoreSpec;
    use std::time::Duration;

    #[test]
    fn test_retry_action_follows_backoff() {
        let backoffs = ResourceBackoffs::new(1, 10);
        assert_eq!(
            retry_action(&backoffs, "apps/db"),
            Action::requeue(Duration::from_secs(60))
        );
        assert_eq!(
            retry_action(&backoffs, "apps/db"),
            Action::requeue(Duration::from_secs(60))
        );
        assert_eq!(
            retry_action(&backoffs, "apps/db"),
            Action::requeue(Duration::from_secs(120))
        );
    }

    #[test]
    fn test_forget_deleted_drops_backoff_state() {
        let backoffs = ResourceBackoffs::new(1, 10);
        let mut cr = ParameterStore::new("db", ParameterStoreSpec::default());
        cr.metadata.namespace = Some("apps".to_string());

        retry_action(&backoffs, &resource_key(&cr));
        retry_action(&backoffs, "apps/other");
        assert_eq!(backoffs.len(), 2);

        forget_deleted(&backoffs, &ObjectRef::from_obj(&cr).erase());
        assert_eq!(backoffs.len(), 1);
        assert_eq!(
            retry_action(&backoffs, "apps/other"),
            Action::requeue(Duration::from_secs(60))
        );
    }
}
