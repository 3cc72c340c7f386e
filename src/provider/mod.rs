//! # Provider Modules
//!
//! Parameter store backends.
//!
//! Every backend implements [`ParameterStoreBackend`], which exposes the two
//! primitive lookups the resolver needs:
//! - get a single parameter by name
//! - list a parameter subtree by path, optionally recursively
//!
//! Implementations:
//! - [`aws::AwsParameterStore`] - AWS Systems Manager Parameter Store
//! - [`memory::InMemoryParameterStore`] - in-process store for tests and local development

use async_trait::async_trait;
use thiserror::Error;

/// A parameter as returned by the store
///
/// `name` is the canonical (fully-qualified) parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result of a path lookup
///
/// `truncated` is set when the subtree holds more parameters than the requested limit.
/// In that case `parameters` holds the first `limit` entries only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathListing {
    pub parameters: Vec<Parameter>,
    pub truncated: bool,
}

/// Errors returned by a backend
///
/// Messages are surfaced verbatim on the generated Secret's annotations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("parameter {0} not found")]
    NotFound(String),
    #[error("malformed response for {0}: parameter has no name or value")]
    MalformedResponse(String),
    #[error("{0}")]
    Backend(String),
}

/// Capability interface of a parameter store
///
/// Backends never retry on their own and always request decrypted values.
#[async_trait]
pub trait ParameterStoreBackend: Send + Sync {
    /// Get a single parameter by its full name
    async fn get_parameter(&self, name: &str) -> Result<Parameter, StoreError>;

    /// List the parameters below `path`, returning at most `limit` of them
    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        limit: usize,
    ) -> Result<PathListing, StoreError>;
}

pub mod aws;
pub mod memory;
