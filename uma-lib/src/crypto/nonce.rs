//! Nonce and timestamp generation.
//!
//! Nonces are 64-bit values drawn from the operating system CSPRNG on every
//! call, so there is no shared generator state between concurrent callers.
//! Uniqueness is not tracked here; see [`crate::replay`] for a caller-side
//! store.

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a fresh nonce as a decimal string.
pub fn generate_nonce() -> String {
    OsRng.next_u64().to_string()
}

/// Current Unix time in seconds (UTC).
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_decimal_u64() {
        let nonce = generate_nonce();
        assert!(nonce.parse::<u64>().is_ok());
        assert!(nonce.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn nonces_differ() {
        let nonces: std::collections::HashSet<String> = (0..64).map(|_| generate_nonce()).collect();
        assert_eq!(nonces.len(), 64);
    }

    #[test]
    fn timestamp_is_recent() {
        // 2023-01-01
        assert!(current_timestamp() > 1_672_531_200);
    }
}
