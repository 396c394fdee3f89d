//! Public key cache contract and in-memory implementation.
//!
//! The cache is a capability owned by the caller. This crate only reads from
//! it and writes fetched documents back; expiry and eviction are up to the
//! implementation.
//!
//! # Thread Safety
//!
//! Implementations must be safe for concurrent `get`/`put`. The in-memory
//! cache uses a `RwLock`; a poisoned lock is treated as a cache miss and
//! writes to it are dropped rather than panicking.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::protocol::PubKeyResponse;

/// Storage for counterparty public keys, keyed by VASP domain.
pub trait PublicKeyCache: Send + Sync {
    /// Return the cached document for `vasp_domain`, if any.
    fn fetch_public_key_for_vasp(&self, vasp_domain: &str) -> Option<PubKeyResponse>;

    /// Store the document for `vasp_domain`, replacing any previous entry.
    fn add_public_key_for_vasp(&self, vasp_domain: &str, public_key: PubKeyResponse);
}

/// In-memory public key cache with no expiry or eviction.
pub struct InMemoryPublicKeyCache {
    keys: RwLock<HashMap<String, PubKeyResponse>>,
}

impl InMemoryPublicKeyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Remove the entry for `vasp_domain`, returning it if present.
    pub fn remove_public_key_for_vasp(&self, vasp_domain: &str) -> Option<PubKeyResponse> {
        self.keys
            .write()
            .ok()
            .and_then(|mut keys| keys.remove(vasp_domain))
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        if let Ok(mut keys) = self.keys.write() {
            keys.clear();
        }
    }

    /// Get the number of cached domains.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.keys.read().map(|k| k.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.keys.read().map(|k| k.is_empty()).unwrap_or(true)
    }
}

impl Default for InMemoryPublicKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicKeyCache for InMemoryPublicKeyCache {
    fn fetch_public_key_for_vasp(&self, vasp_domain: &str) -> Option<PubKeyResponse> {
        self.keys
            .read()
            .ok()
            .and_then(|keys| keys.get(vasp_domain).cloned())
    }

    fn add_public_key_for_vasp(&self, vasp_domain: &str, public_key: PubKeyResponse) {
        if let Ok(mut keys) = self.keys.write() {
            keys.insert(vasp_domain.to_string(), public_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tag: u8) -> PubKeyResponse {
        PubKeyResponse::new(vec![0x02, tag], vec![0x03, tag])
    }

    #[test]
    fn test_add_and_fetch() {
        let cache = InMemoryPublicKeyCache::new();
        assert!(cache.fetch_public_key_for_vasp("vasp1.com").is_none());

        cache.add_public_key_for_vasp("vasp1.com", keys(1));
        assert_eq!(cache.fetch_public_key_for_vasp("vasp1.com"), Some(keys(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite() {
        let cache = InMemoryPublicKeyCache::new();
        cache.add_public_key_for_vasp("vasp1.com", keys(1));
        cache.add_public_key_for_vasp("vasp1.com", keys(2));

        assert_eq!(cache.fetch_public_key_for_vasp("vasp1.com"), Some(keys(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = InMemoryPublicKeyCache::new();
        cache.add_public_key_for_vasp("vasp1.com", keys(1));
        cache.add_public_key_for_vasp("vasp2.com", keys(2));

        assert_eq!(cache.remove_public_key_for_vasp("vasp1.com"), Some(keys(1)));
        assert!(cache.fetch_public_key_for_vasp("vasp1.com").is_none());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = std::sync::Arc::new(InMemoryPublicKeyCache::new());
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let domain = format!("vasp{}.com", i);
                    cache.add_public_key_for_vasp(&domain, keys(i));
                    cache.fetch_public_key_for_vasp(&domain)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(keys(i as u8)));
        }
        assert_eq!(cache.len(), 8);
    }
}
