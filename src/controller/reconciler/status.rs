//! # Status Management
//!
//! Patches `ParameterStore` status with reconciliation results.

use super::Reconciler;
use crate::constants::FIELD_MANAGER;
use crate::crd::{ParameterStore, ParameterStoreStatus, Phase, READY_CONDITION};
use crate::resolver::ParameterFailure;
use kube::api::{Patch, PatchParams};
use kube::Api;
use tracing::{debug, warn};

/// Compute the status to publish for a reconciliation outcome
pub(super) fn build_status(
    cr: &ParameterStore,
    phase: Phase,
    message: Option<String>,
    synced: Option<usize>,
    failures: &[ParameterFailure],
) -> ParameterStoreStatus {
    let previous = cr.status.as_ref();
    ParameterStoreStatus {
        phase: Some(phase.to_string()),
        conditions: vec![phase.ready_condition(
            message,
            previous.and_then(|s| s.conditions.iter().find(|c| c.r#type == READY_CONDITION)),
        )],
        observed_generation: cr.metadata.generation,
        last_reconcile_time: Some(chrono::Utc::now().to_rfc3339()),
        // A failed run wrote nothing, so the last synced count still describes the Secret
        parameters_synced: match synced {
            Some(count) => i32::try_from(count).ok(),
            None => previous.and_then(|s| s.parameters_synced),
        },
        failed_references: failures.iter().map(|f| f.ref_name.clone()).collect(),
    }
}

/// Whether `next` differs from the current status in anything but timestamps
fn is_unchanged(cr: &ParameterStore, next: &ParameterStoreStatus) -> bool {
    let Some(current) = cr.status.as_ref() else {
        return false;
    };
    let message = |s: &ParameterStoreStatus| {
        s.conditions
            .first()
            .and_then(|c| c.message.clone())
    };

    current.phase == next.phase
        && current.observed_generation == next.observed_generation
        && current.parameters_synced == next.parameters_synced
        && current.failed_references == next.failed_references
        && message(current) == message(next)
}

/// Record the outcome on the resource status
///
/// Status failures are logged and swallowed; the generated Secret is the
/// primary output of a reconciliation.
pub(super) async fn record(
    ctx: &Reconciler,
    cr: &ParameterStore,
    phase: Phase,
    message: Option<String>,
    synced: Option<usize>,
    failures: &[ParameterFailure],
) {
    let status = build_status(cr, phase, message, synced, failures);
    if is_unchanged(cr, &status) {
        debug!("Skipping status update - {} status unchanged", phase);
        return;
    }

    let name = cr.metadata.name.as_deref().unwrap_or("unknown");
    let api: Api<ParameterStore> = Api::namespaced(
        ctx.client.clone(),
        cr.metadata.namespace.as_deref().unwrap_or("default"),
    );
    let patch = serde_json::json!({ "status": status });

    if let Err(e) = api
        .patch_status(name, &PatchParams::apply(FIELD_MANAGER), &Patch::Merge(patch))
        .await
    {
        warn!("Failed to update status of {} to {}: {}", name, phase, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::ParameterStoreSpec;
    use crate::provider::StoreError;

    fn parameter_store() -> ParameterStore {
        let mut cr = ParameterStore::new("db", ParameterStoreSpec::default());
        cr.metadata.generation = Some(3);
        cr
    }

    #[test]
    fn test_build_status_degraded_lists_failed_references() {
        let failures = vec![ParameterFailure {
            ref_name: "DB_PASSWORD".to_string(),
            cause: StoreError::NotFound("/db/password".to_string()),
        }];
        let status = build_status(
            &parameter_store(),
            Phase::Degraded,
            Some("1 parameter reference(s) failed".to_string()),
            Some(2),
            &failures,
        );

        assert_eq!(status.phase.as_deref(), Some("Degraded"));
        assert_eq!(status.observed_generation, Some(3));
        assert_eq!(status.parameters_synced, Some(2));
        assert_eq!(status.failed_references, vec!["DB_PASSWORD".to_string()]);
        assert_eq!(status.conditions[0].status, "False");
    }

    #[test]
    fn test_build_status_failed_keeps_previous_count() {
        let mut cr = parameter_store();
        cr.status = Some(ParameterStoreStatus {
            parameters_synced: Some(4),
            ..Default::default()
        });

        let status = build_status(&cr, Phase::Failed, None, None, &[]);
        assert_eq!(status.parameters_synced, Some(4));
        assert!(status.failed_references.is_empty());
    }

    #[test]
    fn test_unchanged_status_is_detected() {
        let mut cr = parameter_store();
        let first = build_status(&cr, Phase::Ready, Some("Synced 1 parameters".into()), Some(1), &[]);
        assert!(!is_unchanged(&cr, &first));

        cr.status = Some(first);
        let second = build_status(&cr, Phase::Ready, Some("Synced 1 parameters".into()), Some(1), &[]);
        assert!(is_unchanged(&cr, &second));

        let third = build_status(&cr, Phase::Ready, Some("Synced 2 parameters".into()), Some(2), &[]);
        assert!(!is_unchanged(&cr, &third));
    }

    #[test]
    fn test_build_status_keeps_transition_time_while_phase_holds() {
        let mut cr = parameter_store();
        let mut first =
            build_status(&cr, Phase::Ready, Some("Synced 1 parameters".into()), Some(1), &[]);
        first.conditions[0].last_transition_time =
            Some("2024-01-01T00:00:00+00:00".to_string());
        cr.status = Some(first);

        let resynced =
            build_status(&cr, Phase::Ready, Some("Synced 2 parameters".into()), Some(2), &[]);
        assert_eq!(
            resynced.conditions[0].last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );

        let failed = build_status(&cr, Phase::Failed, None, None, &[]);
        assert_ne!(
            failed.conditions[0].last_transition_time.as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
    }
}
