//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable.

/// Field manager name used for Secret writes and status patches
pub const FIELD_MANAGER: &str = "parameter-store-controller";

/// Prefix of the per-reference error annotations written onto generated Secrets
pub const ANNOTATION_PREFIX: &str = "ssm.aws";

/// Upper bound of parameters a single path lookup may return
/// Subtrees holding more parameters are rejected instead of silently truncated
pub const MAX_PATH_PARAMETERS: usize = 100;

/// Largest `MaxResults` accepted by `GetParametersByPath`
pub const PATH_PAGE_SIZE: usize = 10;

/// Region used together with the LocalStack endpoint override
pub const LOCAL_STACK_REGION: &str = "us-east-1";

/// Static credentials used together with the LocalStack endpoint override
pub const LOCAL_STACK_CREDENTIAL: &str = "test";

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 5000;

/// Default periodic resync interval after a successful reconciliation (seconds)
pub const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 300;

/// Default Fibonacci backoff floor for reconciliation errors (minutes)
pub const DEFAULT_BACKOFF_MIN_MINUTES: u64 = 1;

/// Default Fibonacci backoff ceiling for reconciliation errors (minutes)
pub const DEFAULT_BACKOFF_MAX_MINUTES: u64 = 10;
