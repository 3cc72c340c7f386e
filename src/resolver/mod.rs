//! # Resolver
//!
//! Parameter resolution and Secret synthesis.
//!
//! Given the references declared on a `ParameterStore` resource, the resolver:
//! 1. Resolves the single reference (by name, or by path with key normalization)
//! 2. Resolves the list of named references, collecting per-reference failures
//!    instead of stopping at the first one
//! 3. Merges both results into one [`DesiredSecretPayload`], list entries winning
//!    on key collisions, with failed references recorded as annotations
//!
//! A failing single reference is terminal for the reconciliation. Failing list
//! references are partial: the payload is still produced from what resolved.

use std::collections::BTreeMap;

mod aggregate;
mod error;
mod normalize;
mod resolve;
mod synthesize;

pub use aggregate::{error_annotation_key, FailureAggregator, ListResolution};
pub use error::{ParameterFailure, ResolutionError};
pub use normalize::normalize;
pub use resolve::{resolve_list, resolve_single};
pub use synthesize::{merge, synthesize, DesiredSecretPayload, Synthesis};

/// Secret key to value, ordered for deterministic output
pub type ResolvedValues = BTreeMap<String, String>;

/// Annotation key to error message
pub type AnnotationSet = BTreeMap<String, String>;
