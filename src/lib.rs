//! Parameter Store Controller Library
//!
//! This library provides the core functionality for the Parameter Store Controller:
//! resolving AWS Systems Manager Parameter Store references declared on
//! `ParameterStore` resources and synthesizing the Kubernetes Secret that mirrors them.
//!
//! ## Quick Start
//!
//! ```rust
//! use parameter_store_controller::prelude::*;
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod prelude;
pub mod provider;
pub mod resolver;
pub mod runtime;
pub mod server;
