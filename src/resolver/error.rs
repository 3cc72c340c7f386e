//! Resolution error types.

use crate::provider::StoreError;
use std::fmt;
use thiserror::Error;

/// A list reference that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterFailure {
    /// Reference name used in the failure annotation
    pub ref_name: String,
    pub cause: StoreError,
}

impl fmt::Display for ParameterFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ref_name, self.cause)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// The single reference lookup failed; nothing may be published
    #[error("failed to resolve parameter store reference: {0}")]
    Terminal(#[source] StoreError),
    /// A path lookup matched more parameters than may be synced
    #[error("path {path} holds more than {limit} parameters")]
    PathLimitExceeded { path: String, limit: usize },
    /// Some list references failed; the rest resolved
    #[error("{} parameter reference(s) failed: {}", .0.len(), join_failures(.0))]
    Partial(Vec<ParameterFailure>),
}

impl ResolutionError {
    /// Whether the whole reconciliation must be aborted
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResolutionError::Partial(_))
    }

    /// Per-reference failures, empty for terminal errors
    #[must_use]
    pub fn failures(&self) -> &[ParameterFailure] {
        match self {
            ResolutionError::Partial(failures) => failures,
            _ => &[],
        }
    }
}

fn join_failures(failures: &[ParameterFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
