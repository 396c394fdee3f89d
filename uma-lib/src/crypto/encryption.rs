//! ECIES encryption of travel rule information.
//!
//! Travel rule text is encrypted to the receiving VASP's encryption public
//! key and hex-encoded. Decryption happens in the receiver's compliance
//! system, never in this crate.
//!
//! # Wire Format
//!
//! ```text
//! [65 bytes ephemeral pubkey][16 bytes nonce][16 bytes tag][N bytes ciphertext]
//! ```
//!
//! Each call uses a fresh ephemeral key, so encrypting the same text twice
//! yields different ciphertexts.

use crate::{Result, UmaError};

/// Encrypt `tr_info` to `receiver_encryption_pub_key` and hex-encode it.
///
/// # Errors
///
/// - `InvalidKey` if the public key is not a SEC1-encoded secp256k1 point
/// - `EncryptionFailed` if the underlying ECIES operation fails
pub fn encrypt_tr_info(tr_info: &str, receiver_encryption_pub_key: &[u8]) -> Result<String> {
    k256::PublicKey::from_sec1_bytes(receiver_encryption_pub_key)
        .map_err(|e| UmaError::InvalidKey(format!("encryption public key: {}", e)))?;

    let ciphertext = ecies::encrypt(receiver_encryption_pub_key, tr_info.as_bytes())
        .map_err(|e| UmaError::EncryptionFailed(format!("{:?}", e)))?;
    Ok(hex::encode(ciphertext))
}
