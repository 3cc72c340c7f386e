//! # Runtime
//!
//! - `initialization`: Startup of tracing, metrics, server and clients
//! - `watch_loop`: Controller watch loop
//! - `error_policy`: Backoff for failed reconciliations

pub mod error_policy;
pub mod initialization;
pub mod watch_loop;
