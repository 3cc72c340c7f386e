//! # Controller
//!
//! - `backoff`: Fibonacci backoff for failed reconciliations
//! - `reconciler`: Reconciles a `ParameterStore` into its generated Secret

pub mod backoff;
pub mod reconciler;
