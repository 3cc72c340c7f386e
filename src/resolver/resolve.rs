//! # Reference Resolution
//!
//! Resolves the two reference shapes against a [`ParameterStoreBackend`].

use super::aggregate::{FailureAggregator, ListResolution};
use super::error::ResolutionError;
use super::normalize::normalize;
use super::ResolvedValues;
use crate::constants::MAX_PATH_PARAMETERS;
use crate::crd::{NamedParameterRef, SingleParameterRef};
use crate::observability::metrics;
use crate::provider::ParameterStoreBackend;
use tracing::{debug, warn};

/// Resolve the single reference
///
/// - `name` set: one value keyed by the parameter name exactly as the store returns it
/// - `path` set: every parameter below the path, keyed by its normalized name
/// - neither set: nothing to resolve, an empty map
///
/// Any store failure is terminal.
pub async fn resolve_single(
    backend: &dyn ParameterStoreBackend,
    reference: &SingleParameterRef,
) -> Result<ResolvedValues, ResolutionError> {
    if !reference.name.is_empty() {
        let parameter = backend
            .get_parameter(&reference.name)
            .await
            .map_err(ResolutionError::Terminal)?;
        return Ok(ResolvedValues::from([(parameter.name, parameter.value)]));
    }

    if reference.path.is_empty() {
        debug!("No single parameter reference configured");
        return Ok(ResolvedValues::new());
    }

    let listing = backend
        .get_parameters_by_path(&reference.path, reference.recursive, MAX_PATH_PARAMETERS)
        .await
        .map_err(ResolutionError::Terminal)?;

    if listing.truncated || listing.parameters.len() > MAX_PATH_PARAMETERS {
        return Err(ResolutionError::PathLimitExceeded {
            path: reference.path.clone(),
            limit: MAX_PATH_PARAMETERS,
        });
    }

    Ok(listing
        .parameters
        .into_iter()
        .map(|p| (normalize(&p.name), p.value))
        .collect())
}

/// Resolve the list of named references
///
/// Each reference is looked up independently; a failing one is recorded and the
/// next one is still attempted. A reference without a name is keyed by the
/// normalized canonical name the store reports for it.
pub async fn resolve_list(
    backend: &dyn ParameterStoreBackend,
    references: &[NamedParameterRef],
) -> ListResolution {
    let mut aggregator = FailureAggregator::new();

    for reference in references {
        match backend.get_parameter(&reference.key).await {
            Ok(parameter) => {
                let key = if reference.name.is_empty() {
                    normalize(&parameter.name)
                } else {
                    reference.name.clone()
                };
                aggregator.record_success(key, parameter.value);
            }
            Err(e) => {
                warn!(
                    "Error fetching value from SSM Parameter Store (key: {}, name: {}): {}",
                    reference.key, reference.name, e
                );
                metrics::increment_parameter_failures();
                aggregator.record_failure(failure_name(reference), e);
            }
        }
    }

    aggregator.finish()
}

/// Name a failed reference is reported under
///
/// Unnamed references fall back to their normalized key so the annotation key
/// stays a valid annotation name.
fn failure_name(reference: &NamedParameterRef) -> String {
    if reference.name.is_empty() {
        normalize(&reference.key)
    } else {
        reference.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_name_prefers_reference_name() {
        let named = NamedParameterRef {
            name: "DB".to_string(),
            key: "/app/db-password".to_string(),
        };
        assert_eq!(failure_name(&named), "DB");

        let unnamed = NamedParameterRef {
            name: String::new(),
            key: "/app/db-password".to_string(),
        };
        assert_eq!(failure_name(&unnamed), "DB_PASSWORD");
    }
}
