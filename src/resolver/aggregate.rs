//! # Partial-Failure Aggregation
//!
//! Fold over list references producing the resolved values together with
//! every failure, so one bad reference never hides the others.

use super::error::{ParameterFailure, ResolutionError};
use super::{AnnotationSet, ResolvedValues};
use crate::constants::ANNOTATION_PREFIX;
use crate::provider::StoreError;

/// Annotation key recording the failure of a reference
///
/// Format: `ssm.aws/<ref_name>_error`
#[must_use]
pub fn error_annotation_key(ref_name: &str) -> String {
    format!("{ANNOTATION_PREFIX}/{ref_name}_error")
}

/// Accumulator for list resolution
#[derive(Debug, Default)]
pub struct FailureAggregator {
    values: ResolvedValues,
    failures: Vec<ParameterFailure>,
}

impl FailureAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved value; a later key overwrites an earlier one
    pub fn record_success(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    /// Record a failed reference and keep going
    pub fn record_failure(&mut self, ref_name: String, cause: StoreError) {
        self.failures.push(ParameterFailure { ref_name, cause });
    }

    /// Close the fold, projecting every failure into an annotation
    #[must_use]
    pub fn finish(self) -> ListResolution {
        let annotations = self
            .failures
            .iter()
            .map(|f| (error_annotation_key(&f.ref_name), f.cause.to_string()))
            .collect();

        ListResolution {
            values: self.values,
            annotations,
            failures: self.failures,
        }
    }
}

/// Outcome of resolving a list of named references
///
/// Holds whatever resolved even when some references failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResolution {
    pub values: ResolvedValues,
    pub annotations: AnnotationSet,
    pub failures: Vec<ParameterFailure>,
}

impl ListResolution {
    /// True when no reference failed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The aggregate error for this resolution, if any reference failed
    #[must_use]
    pub fn error(&self) -> Option<ResolutionError> {
        if self.is_complete() {
            None
        } else {
            Some(ResolutionError::Partial(self.failures.clone()))
        }
    }
}
