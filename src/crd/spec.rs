//! # ParameterStore Spec
//!
//! Main CRD specification types and default values.

use serde::{Deserialize, Serialize};

/// ParameterStore Custom Resource Definition
///
/// Declares which Parameter Store values are materialized into the Secret
/// sharing this resource's name and namespace.
///
/// # Example
///
/// ```yaml
/// apiVersion: ssm.aws/v1alpha1
/// kind: ParameterStore
/// metadata:
///   name: my-service
///   namespace: default
/// spec:
///   valueFrom:
///     parameterStoreRef:
///       path: /my-service/dev
///       recursive: true
///     parametersStoreRef:
///       - name: DATABASE_PASSWORD
///         key: /shared/dev/db-password
/// ```
#[derive(kube::CustomResource, Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "ParameterStore",
    group = "ssm.aws",
    version = "v1alpha1",
    namespaced,
    status = "crate::crd::ParameterStoreStatus",
    shortname = "ps",
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Synced", "type":"integer", "jsonPath":".status.parametersSynced"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ParameterStoreSpec {
    /// Parameter references resolved into the generated Secret
    pub value_from: ValueFrom,
}

/// Both reference shapes are optional; an empty `ValueFrom` yields an empty Secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueFrom {
    /// Single parameter by name, or a parameter subtree by path
    #[serde(default)]
    pub parameter_store_ref: SingleParameterRef,
    /// Explicit list of named parameters
    /// Entries later in the list win when two of them produce the same Secret key
    #[serde(default)]
    pub parameters_store_ref: Vec<NamedParameterRef>,
}

/// Single parameter reference
///
/// `name` takes precedence over `path` when both are set. When neither is set
/// there is nothing to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SingleParameterRef {
    /// Full parameter name; the Secret key is the parameter name as returned by the store
    #[serde(default)]
    pub name: String,
    /// Parameter hierarchy path; each Secret key is the normalized last path segment
    #[serde(default)]
    pub path: String,
    /// Descend into nested paths (path lookups only)
    #[serde(default = "default_true")]
    pub recursive: bool,
}

impl Default for SingleParameterRef {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            recursive: true,
        }
    }
}

/// Named parameter reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamedParameterRef {
    /// Secret key; defaults to the normalized name of the resolved parameter
    #[serde(default)]
    pub name: String,
    /// Parameter name in the store
    pub key: String,
}

/// Default value for boolean true
fn default_true() -> bool {
    true
}
