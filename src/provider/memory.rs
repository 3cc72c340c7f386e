//! # In-Memory Parameter Store
//!
//! Process-local backend with Parameter Store path semantics.
//! Used by tests and for running the resolver without AWS access.

use crate::provider::{Parameter, ParameterStoreBackend, PathListing, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory backend
///
/// Parameters are kept ordered by name, so path listings are deterministic.
/// Failures can be injected per parameter name or per path.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    parameters: BTreeMap<String, String>,
    failures: HashMap<String, StoreError>,
    calls: AtomicUsize,
}

impl InMemoryParameterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Make every lookup of `name_or_path` fail with `error`
    #[must_use]
    pub fn with_failure(mut self, name_or_path: impl Into<String>, error: StoreError) -> Self {
        self.failures.insert(name_or_path.into(), error);
        self
    }

    /// Number of lookups served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn injected_failure(&self, key: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.failures.get(key) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Whether `name` lives under `path` (directly, or at any depth when recursive)
fn is_below(name: &str, path: &str, recursive: bool) -> bool {
    let prefix = format!("{}/", path.trim_end_matches('/'));
    match name.strip_prefix(&prefix) {
        Some(rest) if !rest.is_empty() => recursive || !rest.contains('/'),
        _ => false,
    }
}

#[async_trait]
impl ParameterStoreBackend for InMemoryParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Parameter, StoreError> {
        self.injected_failure(name)?;
        self.parameters
            .get(name)
            .map(|value| Parameter::new(name, value.clone()))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        limit: usize,
    ) -> Result<PathListing, StoreError> {
        self.injected_failure(path)?;
        let mut matching = self
            .parameters
            .iter()
            .filter(|(name, _)| is_below(name, path, recursive))
            .map(|(name, value)| Parameter::new(name.clone(), value.clone()));

        let parameters: Vec<Parameter> = matching.by_ref().take(limit).collect();
        let truncated = matching.next().is_some();
        Ok(PathListing {
            parameters,
            truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryParameterStore {
        InMemoryParameterStore::new()
            .with_parameter("/app/dev/db-host", "db.example.com")
            .with_parameter("/app/dev/nested/api-key", "secret")
            .with_parameter("/app/prod/db-host", "prod.example.com")
            .with_parameter("standalone", "value")
    }

    #[tokio::test]
    async fn test_get_parameter_not_found() {
        let err = store().get_parameter("/missing").await.unwrap_err();
        assert_eq!(err, StoreError::NotFound("/missing".to_string()));
    }

    #[tokio::test]
    async fn test_path_listing_recursive_and_flat() {
        let store = store();

        let recursive = store
            .get_parameters_by_path("/app/dev", true, 100)
            .await
            .unwrap();
        let names: Vec<_> = recursive.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["/app/dev/db-host", "/app/dev/nested/api-key"]);

        let flat = store
            .get_parameters_by_path("/app/dev/", false, 100)
            .await
            .unwrap();
        assert_eq!(flat.parameters.len(), 1);
        assert_eq!(flat.parameters[0].name, "/app/dev/db-host");
    }

    #[tokio::test]
    async fn test_path_listing_reports_truncation() {
        let listing = store().get_parameters_by_path("/app", true, 2).await.unwrap();
        assert_eq!(listing.parameters.len(), 2);
        assert!(listing.truncated);
    }

    #[tokio::test]
    async fn test_injected_failure_and_call_count() {
        let store = store().with_failure("/app/dev/db-host", StoreError::Backend("boom".into()));
        assert!(store.get_parameter("/app/dev/db-host").await.is_err());
        assert!(store.get_parameter("standalone").await.is_ok());
        assert_eq!(store.calls(), 2);
    }

    #[test]
    fn test_is_below() {
        assert!(is_below("/a/b", "/a", false));
        assert!(!is_below("/a/b/c", "/a", false));
        assert!(is_below("/a/b/c", "/a", true));
        assert!(!is_below("/ab/c", "/a", true));
        assert!(is_below("/a", "/", true));
    }
}
