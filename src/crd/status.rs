//! # ParameterStore Status
//!
//! Status types for tracking reconciliation state and conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the ParameterStore resource
#[derive(Debug, Clone, Deserialize, Serialize, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParameterStoreStatus {
    /// Current phase of reconciliation
    /// Values: Ready, Degraded, Failed
    #[serde(default)]
    pub phase: Option<String>,
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Observed generation
    #[serde(default)]
    pub observed_generation: Option<i64>,
    /// Last reconciliation time (RFC3339)
    #[serde(default)]
    pub last_reconcile_time: Option<String>,
    /// Number of keys written to the generated Secret
    #[serde(default)]
    pub parameters_synced: Option<i32>,
    /// Names of list references that failed during the last reconciliation
    #[serde(default)]
    pub failed_references: Vec<String>,
}

/// Condition represents a status condition for the resource
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,
    /// Status of condition (True, False, Unknown)
    pub status: String,
    /// Last transition time
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for condition
    #[serde(default)]
    pub reason: Option<String>,
    /// Message describing condition
    #[serde(default)]
    pub message: Option<String>,
}

/// Type of the condition mirroring `status.phase`
pub const READY_CONDITION: &str = "Ready";

/// Outcome of a reconciliation as reported in `status.phase`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Every reference resolved and the Secret is up to date
    Ready,
    /// The Secret was written but some list references failed
    Degraded,
    /// Nothing was written
    Failed,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Ready => "Ready",
            Phase::Degraded => "Degraded",
            Phase::Failed => "Failed",
        }
    }

    /// Build the `Ready` condition that accompanies this phase
    ///
    /// `lastTransitionTime` is carried over from `previous` unless its status
    /// or reason changed.
    #[must_use]
    pub fn ready_condition(
        self,
        message: Option<String>,
        previous: Option<&Condition>,
    ) -> Condition {
        let (status, reason) = match self {
            Phase::Ready => ("True", "ReconciliationSucceeded"),
            Phase::Degraded => ("False", "PartialResolution"),
            Phase::Failed => ("False", "ReconciliationFailed"),
        };
        let last_transition_time = previous
            .filter(|c| c.status == status && c.reason.as_deref() == Some(reason))
            .and_then(|c| c.last_transition_time.clone())
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        Condition {
            r#type: READY_CONDITION.to_string(),
            status: status.to_string(),
            last_transition_time: Some(last_transition_time),
            reason: Some(reason.to_string()),
            message,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_condition_per_phase() {
        let ready = Phase::Ready.ready_condition(None, None);
        assert_eq!(ready.r#type, "Ready");
        assert_eq!(ready.status, "True");

        let degraded =
            Phase::Degraded.ready_condition(Some("1 reference failed".to_string()), None);
        assert_eq!(degraded.status, "False");
        assert_eq!(degraded.reason.as_deref(), Some("PartialResolution"));
        assert_eq!(degraded.message.as_deref(), Some("1 reference failed"));

        let failed = Phase::Failed.ready_condition(None, None);
        assert_eq!(failed.reason.as_deref(), Some("ReconciliationFailed"));
    }

    #[test]
    fn test_ready_condition_keeps_transition_time_until_it_flips() {
        let mut previous =
            Phase::Degraded.ready_condition(Some("1 reference failed".to_string()), None);
        previous.last_transition_time = Some("2024-01-01T00:00:00+00:00".to_string());

        let same = Phase::Degraded
            .ready_condition(Some("2 references failed".to_string()), Some(&previous));
        assert_eq!(same.last_transition_time, previous.last_transition_time);

        let failed = Phase::Failed.ready_condition(None, Some(&previous));
        assert_ne!(failed.last_transition_time, previous.last_transition_time);

        let ready = Phase::Ready.ready_condition(None, Some(&previous));
        assert_ne!(ready.last_transition_time, previous.last_transition_time);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let status = ParameterStoreStatus {
            phase: Some(Phase::Degraded.to_string()),
            parameters_synced: Some(2),
            failed_references: vec!["DB_PASSWORD".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["phase"], "Degraded");
        assert_eq!(value["parametersSynced"], 2);
        assert_eq!(value["failedReferences"][0], "DB_PASSWORD");
    }
}
