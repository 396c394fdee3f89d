//! Cryptographic primitives used by the UMA exchange.
//!
//! - **Signatures**: ECDSA over secp256k1, SHA-256 digest, hex-encoded DER
//! - **Encryption**: ECIES (secp256k1, HKDF-SHA256, AES-256-GCM) for travel rule info
//! - **Nonces**: 64-bit values from the operating system CSPRNG
//!
//! All key material is supplied by the caller as raw bytes. Nothing in this
//! module stores or caches keys.

mod encryption;
mod nonce;
mod signing;

pub use encryption::encrypt_tr_info;
pub use nonce::{current_timestamp, generate_nonce};
pub use signing::{public_key_from_private, sign_payload, sign_payload_der, verify_signature};
