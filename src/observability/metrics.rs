//! # Metrics
//!
//! Prometheus metrics for monitoring the controller.
//!
//! ## Metrics Exposed
//!
//! - `parameter_store_reconciliations_total` - Total number of reconciliations
//! - `parameter_store_reconciliation_errors_total` - Total number of reconciliation errors
//! - `parameter_store_reconciliation_duration_seconds` - Duration of reconciliations
//! - `parameter_store_backend_operations_total` - Parameter Store calls by operation
//! - `parameter_store_backend_operation_duration_seconds` - Duration of Parameter Store calls by operation
//! - `parameter_store_backend_operation_errors_total` - Failed Parameter Store calls by operation
//! - `parameter_store_parameter_failures_total` - List references that failed to resolve
//! - `parameter_store_secrets_written_total` - Secret writes by action (create, update)

use anyhow::Result;
use prometheus::core::Collector;
use prometheus::{Histogram, HistogramVec, IntCounter, IntCounterVec, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static RECONCILIATIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "parameter_store_reconciliations_total",
        "Total number of reconciliations",
    )
    .expect("Failed to create RECONCILIATIONS_TOTAL metric - this should never happen")
});

static RECONCILIATION_ERRORS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "parameter_store_reconciliation_errors_total",
        "Total number of reconciliation errors",
    )
    .expect("Failed to create RECONCILIATION_ERRORS_TOTAL metric - this should never happen")
});

static RECONCILIATION_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "parameter_store_reconciliation_duration_seconds",
            "Duration of reconciliation in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
    )
    .expect("Failed to create RECONCILIATION_DURATION metric - this should never happen")
});

static BACKEND_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "parameter_store_backend_operations_total",
            "Total number of Parameter Store operations by operation",
        ),
        &["operation"],
    )
    .expect("Failed to create BACKEND_OPERATIONS_TOTAL metric - this should never happen")
});

static BACKEND_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "parameter_store_backend_operation_duration_seconds",
            "Duration of Parameter Store operations in seconds by operation",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["operation"],
    )
    .expect("Failed to create BACKEND_OPERATION_DURATION metric - this should never happen")
});

static BACKEND_OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "parameter_store_backend_operation_errors_total",
            "Total number of failed Parameter Store operations by operation",
        ),
        &["operation"],
    )
    .expect("Failed to create BACKEND_OPERATION_ERRORS_TOTAL metric - this should never happen")
});

static PARAMETER_FAILURES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "parameter_store_parameter_failures_total",
        "Total number of list references that failed to resolve",
    )
    .expect("Failed to create PARAMETER_FAILURES_TOTAL metric - this should never happen")
});

static SECRETS_WRITTEN_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "parameter_store_secrets_written_total",
            "Total number of generated Secret writes by action",
        ),
        &["action"],
    )
    .expect("Failed to create SECRETS_WRITTEN_TOTAL metric - this should never happen")
});

fn register(collector: Box<dyn Collector>) -> Result<()> {
    match REGISTRY.register(collector) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Register every metric with the controller registry
///
/// Registering twice is a no-op.
#[allow(
    clippy::missing_errors_doc,
    reason = "Fails only when two metrics share a name"
)]
pub fn register_metrics() -> Result<()> {
    register(Box::new(RECONCILIATIONS_TOTAL.clone()))?;
    register(Box::new(RECONCILIATION_ERRORS_TOTAL.clone()))?;
    register(Box::new(RECONCILIATION_DURATION.clone()))?;
    register(Box::new(BACKEND_OPERATIONS_TOTAL.clone()))?;
    register(Box::new(BACKEND_OPERATION_DURATION.clone()))?;
    register(Box::new(BACKEND_OPERATION_ERRORS_TOTAL.clone()))?;
    register(Box::new(PARAMETER_FAILURES_TOTAL.clone()))?;
    register(Box::new(SECRETS_WRITTEN_TOTAL.clone()))?;

    Ok(())
}

pub fn increment_reconciliations() {
    RECONCILIATIONS_TOTAL.inc();
}

pub fn increment_reconciliation_errors() {
    RECONCILIATION_ERRORS_TOTAL.inc();
}

pub fn observe_reconciliation_duration(duration: f64) {
    RECONCILIATION_DURATION.observe(duration);
}

/// Record a successful Parameter Store call
pub fn record_backend_operation(operation: &str, duration: f64) {
    BACKEND_OPERATIONS_TOTAL
        .with_label_values(&[operation])
        .inc();
    BACKEND_OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration);
}

pub fn increment_backend_operation_errors(operation: &str) {
    BACKEND_OPERATION_ERRORS_TOTAL
        .with_label_values(&[operation])
        .inc();
}

pub fn increment_parameter_failures() {
    PARAMETER_FAILURES_TOTAL.inc();
}

pub fn increment_secrets_written(action: &str) {
    SECRETS_WRITTEN_TOTAL.with_label_values(&[action]).inc();
}
