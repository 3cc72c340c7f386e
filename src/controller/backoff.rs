//! # Fibonacci Backoff
//!
//! Per-resource retry delays for failed reconciliations.
//!
//! Delays follow the Fibonacci sequence in minutes, capped at a maximum:
//! 1m, 1m, 2m, 3m, 5m, 8m, 10m, 10m, ...
//!
//! ```rust
//! use parameter_store_controller::controller::backoff::FibonacciBackoff;
//!
//! let mut backoff = FibonacciBackoff::new(1, 10);
//! assert_eq!(backoff.next_backoff_seconds(), 60);
//! assert_eq!(backoff.next_backoff_seconds(), 60);
//! assert_eq!(backoff.next_backoff_seconds(), 120);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::warn;

/// Fibonacci backoff calculator (minutes in, seconds out)
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    min_minutes: u64,
    prev_minutes: u64,
    current_minutes: u64,
    max_minutes: u64,
}

impl FibonacciBackoff {
    #[must_use]
    pub fn new(min_minutes: u64, max_minutes: u64) -> Self {
        Self {
            min_minutes,
            prev_minutes: 0,
            current_minutes: min_minutes,
            max_minutes,
        }
    }

    /// Current delay in seconds; advances the sequence
    pub fn next_backoff_seconds(&mut self) -> u64 {
        let seconds = self.current_minutes.saturating_mul(60);
        let next = self.prev_minutes.saturating_add(self.current_minutes);
        self.prev_minutes = self.current_minutes;
        self.current_minutes = next.min(self.max_minutes);
        seconds
    }

    pub fn next_backoff(&mut self) -> Duration {
        Duration::from_secs(self.next_backoff_seconds())
    }

    pub fn reset(&mut self) {
        self.prev_minutes = 0;
        self.current_minutes = self.min_minutes;
    }
}

/// Backoff state tracked independently per `namespace/name`
#[derive(Debug)]
pub struct ResourceBackoffs {
    min_minutes: u64,
    max_minutes: u64,
    states: Mutex<HashMap<String, FibonacciBackoff>>,
}

impl ResourceBackoffs {
    #[must_use]
    pub fn new(min_minutes: u64, max_minutes: u64) -> Self {
        Self {
            min_minutes,
            max_minutes,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Next retry delay for `resource_key`
    pub fn next_delay(&self, resource_key: &str) -> Duration {
        match self.states.lock() {
            Ok(mut states) => states
                .entry(resource_key.to_string())
                .or_insert_with(|| FibonacciBackoff::new(self.min_minutes, self.max_minutes))
                .next_backoff(),
            Err(e) => {
                warn!("Failed to lock backoff states: {}, using minimum backoff", e);
                Duration::from_secs(self.min_minutes.saturating_mul(60))
            }
        }
    }

    /// Forget the error history of `resource_key`
    ///
    /// Called after a successful reconciliation and when the resource is gone.
    pub fn reset(&self, resource_key: &str) {
        if let Ok(mut states) = self.states.lock() {
            states.remove(resource_key);
        }
    }

    /// Number of resources currently backing off
    pub fn len(&self) -> usize {
        self.states.lock().map_or(0, |states| states.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
