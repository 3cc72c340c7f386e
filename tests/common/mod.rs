//! Shared helpers for integration tests.

#![allow(dead_code, reason = "Not every test binary uses every helper")]

use parameter_store_controller::crd::{NamedParameterRef, SingleParameterRef, ValueFrom};
use std::sync::Once;

static RUSTLS_INIT: Once = Once::new();

/// Install the ring crypto provider once per test binary
///
/// Must run before the AWS SDK builds its HTTPS connector.
pub fn init_rustls() {
    RUSTLS_INIT.call_once(|| {
        // Another test in the same binary may already have installed one
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Single reference by name
pub fn by_name(name: &str) -> SingleParameterRef {
    SingleParameterRef {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Single reference by path
pub fn by_path(path: &str, recursive: bool) -> SingleParameterRef {
    SingleParameterRef {
        path: path.to_string(),
        recursive,
        ..Default::default()
    }
}

/// List reference
pub fn named(name: &str, key: &str) -> NamedParameterRef {
    NamedParameterRef {
        name: name.to_string(),
        key: key.to_string(),
    }
}

pub fn value_from(single: SingleParameterRef, list: Vec<NamedParameterRef>) -> ValueFrom {
    ValueFrom {
        parameter_store_ref: single,
        parameters_store_ref: list,
    }
}
