//! Replay protection helpers for verifiers.
//!
//! The exchange itself is stateless: a signed message carries a nonce and a
//! timestamp, and deciding whether the pair was already seen is up to the
//! verifier. This module provides a freshness check and an in-memory
//! `NonceStore` for callers that do not have their own.
//!
//! # Example
//!
//! ```rust
//! use uma_lib::replay::{is_timestamp_fresh, NonceStore};
//!
//! let store = NonceStore::new();
//! let now = 1_700_000_100;
//!
//! assert!(is_timestamp_fresh(1_700_000_000, 300, now));
//! assert!(store.check_and_mark("12345", 1_700_000_000).unwrap());
//! // Second use is a replay.
//! assert!(!store.check_and_mark("12345", 1_700_000_000).unwrap());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{Result, UmaError};

/// Returns true if `timestamp` is no older than `max_age_secs` relative to
/// `now` and not further in the future than the same window.
pub fn is_timestamp_fresh(timestamp: i64, max_age_secs: i64, now: i64) -> bool {
    max_age_secs >= 0 && now.abs_diff(timestamp) <= max_age_secs as u64
}

/// Store of nonces already accepted, used to reject replayed messages.
///
/// Nonces are kept with the timestamp of the message that carried them so
/// entries older than the freshness window can be dropped.
pub struct NonceStore {
    // nonce -> message timestamp
    seen: RwLock<HashMap<String, i64>>,
}

impl NonceStore {
    /// Create a new empty nonce store.
    pub fn new() -> Self {
        Self {
            seen: RwLock::new(HashMap::new()),
        }
    }

    /// Record `nonce` if it has not been seen.
    ///
    /// Returns `Ok(true)` for a fresh nonce and `Ok(false)` for a replay.
    pub fn check_and_mark(&self, nonce: &str, timestamp: i64) -> Result<bool> {
        let mut seen = self
            .seen
            .write()
            .map_err(|e| UmaError::Internal(format!("Lock poisoned: {}", e)))?;

        if seen.contains_key(nonce) {
            return Ok(false);
        }
        seen.insert(nonce.to_string(), timestamp);
        Ok(true)
    }

    /// Forget nonces whose messages were signed before `before`.
    ///
    /// Call this with `now - max_age_secs` after rejecting stale timestamps
    /// with [`is_timestamp_fresh`], so dropped nonces can never be replayed.
    pub fn cleanup_before(&self, before: i64) -> Result<()> {
        let mut seen = self
            .seen
            .write()
            .map_err(|e| UmaError::Internal(format!("Lock poisoned: {}", e)))?;
        seen.retain(|_, timestamp| *timestamp >= before);
        Ok(())
    }

    /// Number of tracked nonces. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.seen.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Check if no nonces are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NonceStore {
    fn default() -> Self {
        Self::new()
    }
}
