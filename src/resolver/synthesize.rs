//! # Secret Synthesis
//!
//! Combines both resolution shapes into the content of the generated Secret.

use super::aggregate::ListResolution;
use super::error::ResolutionError;
use super::resolve::{resolve_list, resolve_single};
use super::{AnnotationSet, ResolvedValues};
use crate::crd::ValueFrom;
use crate::provider::ParameterStoreBackend;

/// Desired content of the generated Secret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredSecretPayload {
    pub data: ResolvedValues,
    pub annotations: AnnotationSet,
}

/// Synthesis result
///
/// `partial` carries the aggregate error of failed list references. The payload
/// is still meant to be published; the error only signals that a retry is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub payload: DesiredSecretPayload,
    pub partial: Option<ResolutionError>,
}

/// Merge the single-reference values with the list resolution
///
/// List entries win on key collision. Annotations only ever come from the list.
#[must_use]
pub fn merge(single: ResolvedValues, list: ListResolution) -> Synthesis {
    let partial = list.error();
    let mut data = single;
    data.extend(list.values);

    Synthesis {
        payload: DesiredSecretPayload {
            data,
            annotations: list.annotations,
        },
        partial,
    }
}

/// Resolve every reference of `value_from` and synthesize the Secret payload
///
/// A terminal failure of the single reference is returned before any list
/// reference is looked up.
pub async fn synthesize(
    backend: &dyn ParameterStoreBackend,
    value_from: &ValueFrom,
) -> Result<Synthesis, ResolutionError> {
    let single = resolve_single(backend, &value_from.parameter_store_ref).await?;
    let list = resolve_list(backend, &value_from.parameters_store_ref).await;
    Ok(merge(single, list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StoreError;
    use crate::resolver::FailureAggregator;

    #[test]
    fn test_list_entries_take_precedence() {
        let single = ResolvedValues::from([
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "path".to_string()),
        ]);
        let mut aggregator = FailureAggregator::new();
        aggregator.record_success("A".to_string(), "2".to_string());

        let synthesis = merge(single, aggregator.finish());

        assert_eq!(synthesis.payload.data["A"], "2");
        assert_eq!(synthesis.payload.data["B"], "path");
        assert!(synthesis.partial.is_none());
    }

    #[test]
    fn test_partial_failure_keeps_resolved_values() {
        let mut aggregator = FailureAggregator::new();
        aggregator.record_success("OK".to_string(), "value".to_string());
        aggregator.record_failure("BROKEN".to_string(), StoreError::Backend("denied".into()));

        let synthesis = merge(ResolvedValues::new(), aggregator.finish());

        assert_eq!(synthesis.payload.data.len(), 1);
        assert_eq!(
            synthesis.payload.annotations.get("ssm.aws/BROKEN_error").map(String::as_str),
            Some("denied")
        );
        assert!(matches!(synthesis.partial, Some(ResolutionError::Partial(ref f)) if f.len() == 1));
    }
}
