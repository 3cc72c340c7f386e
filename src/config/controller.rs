//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_BACKOFF_MAX_MINUTES, DEFAULT_BACKOFF_MIN_MINUTES, DEFAULT_METRICS_PORT,
    DEFAULT_RECONCILE_INTERVAL_SECS,
};
use std::time::Duration;

/// Controller-level configuration
///
/// All settings have defaults and can be overridden via environment variables,
/// typically populated from a ConfigMap using `envFrom` in the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Endpoint override for all Parameter Store calls (LocalStack or another test backend)
    /// When set, static test credentials and region `us-east-1` are used
    pub local_stack_endpoint: Option<String>,
    /// HTTP server port for metrics and probes
    pub metrics_port: u16,
    /// Periodic resync interval after a successful reconciliation (seconds)
    pub reconcile_interval_secs: u64,
    /// Fibonacci backoff floor for reconciliation errors (minutes)
    pub backoff_min_minutes: u64,
    /// Fibonacci backoff ceiling for reconciliation errors (minutes)
    pub backoff_max_minutes: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            local_stack_endpoint: None,
            metrics_port: DEFAULT_METRICS_PORT,
            reconcile_interval_secs: DEFAULT_RECONCILE_INTERVAL_SECS,
            backoff_min_minutes: DEFAULT_BACKOFF_MIN_MINUTES,
            backoff_max_minutes: DEFAULT_BACKOFF_MAX_MINUTES,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backoff_min_minutes =
            parsed_or_default(&lookup, "BACKOFF_MIN_MINUTES", DEFAULT_BACKOFF_MIN_MINUTES).max(1);
        let backoff_max_minutes =
            parsed_or_default(&lookup, "BACKOFF_MAX_MINUTES", DEFAULT_BACKOFF_MAX_MINUTES)
                .max(backoff_min_minutes);

        Self {
            local_stack_endpoint: lookup("LOCAL_STACK_ENDPOINT").filter(|ep| !ep.is_empty()),
            metrics_port: parsed_or_default(&lookup, "METRICS_PORT", DEFAULT_METRICS_PORT),
            reconcile_interval_secs: parsed_or_default(
                &lookup,
                "RECONCILE_INTERVAL_SECS",
                DEFAULT_RECONCILE_INTERVAL_SECS,
            ),
            backoff_min_minutes,
            backoff_max_minutes,
        }
    }

    /// Get periodic resync duration
    #[must_use]
    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_secs(self.reconcile_interval_secs)
    }
}

/// Read a value through `lookup` or return the default when absent or unparsable
fn parsed_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ControllerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ControllerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        assert_eq!(config_from(&[]), ControllerConfig::default());
    }

    #[test]
    fn test_local_stack_endpoint_override() {
        let config = config_from(&[("LOCAL_STACK_ENDPOINT", "http://localhost:4566")]);
        assert_eq!(
            config.local_stack_endpoint.as_deref(),
            Some("http://localhost:4566")
        );
    }

    #[test]
    fn test_empty_local_stack_endpoint_is_ignored() {
        let config = config_from(&[("LOCAL_STACK_ENDPOINT", "")]);
        assert!(config.local_stack_endpoint.is_none());
    }

    #[test]
    fn test_unparsable_values_fall_back_to_defaults() {
        let config = config_from(&[("METRICS_PORT", "not-a-port"), ("RECONCILE_INTERVAL_SECS", "-1")]);
        assert_eq!(config.metrics_port, DEFAULT_METRICS_PORT);
        assert_eq!(config.reconcile_interval_secs, DEFAULT_RECONCILE_INTERVAL_SECS);
    }

    #[test]
    fn test_backoff_ceiling_never_below_floor() {
        let config = config_from(&[("BACKOFF_MIN_MINUTES", "5"), ("BACKOFF_MAX_MINUTES", "2")]);
        assert_eq!(config.backoff_min_minutes, 5);
        assert_eq!(config.backoff_max_minutes, 5);
    }

    #[test]
    fn test_reconcile_interval_duration() {
        let config = config_from(&[("RECONCILE_INTERVAL_SECS", "90")]);
        assert_eq!(config.reconcile_interval(), Duration::from_secs(90));
    }
}
