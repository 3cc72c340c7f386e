//! # Custom Resource Definitions
//!
//! CRD types for the Parameter Store Controller.
//!
//! ## Module Structure
//!
//! - `spec.rs` - `ParameterStore` specification and parameter reference shapes
//! - `status.rs` - Status types for tracking reconciliation state

mod spec;
mod status;

pub use spec::{
    NamedParameterRef, ParameterStore, ParameterStoreSpec, SingleParameterRef, ValueFrom,
};
pub use status::{Condition, ParameterStoreStatus, Phase, READY_CONDITION};
