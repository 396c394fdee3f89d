//! # ECDSA Signatures over secp256k1
//!
//! `sign(payload, key) = hex(DER(ECDSA(SHA256(payload), key)))`
//!
//! The digest is computed here and signed as a prehash so the bytes match
//! counterparties that hash first and sign the digest directly.
//!
//! Verification distinguishes two outcomes:
//! - `Err(_)` when the signature or public key does not decode
//! - `Ok(false)` when both decode but the signature does not match

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::{Result, UmaError};

fn signing_key(private_key: &[u8]) -> Result<SigningKey> {
    SigningKey::from_slice(private_key)
        .map_err(|e| UmaError::InvalidKey(format!("private key: {}", e)))
}

fn verifying_key(public_key: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| UmaError::InvalidKey(format!("public key: {}", e)))
}

/// Sign `payload` and return the raw DER signature bytes.
pub fn sign_payload_der(payload: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
    let key = signing_key(private_key)?;
    let digest = Sha256::digest(payload);
    let signature: Signature = key
        .sign_prehash(&digest)
        .map_err(|e| UmaError::Internal(format!("ECDSA signing failed: {}", e)))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Sign `payload` and return the hex-encoded DER signature.
///
/// # Errors
///
/// `InvalidKey` if `private_key` is not a valid 32-byte secp256k1 scalar.
pub fn sign_payload(payload: &[u8], private_key: &[u8]) -> Result<String> {
    sign_payload_der(payload, private_key).map(hex::encode)
}

/// Verify a hex-encoded DER signature over `payload`.
///
/// High-S signatures are accepted; they are normalized before checking.
///
/// # Returns
///
/// `Ok(true)` if the signature matches
/// `Ok(false)` if the signature is well-formed but does not match
/// `Err(_)` if the signature or public key is malformed
pub fn verify_signature(payload: &[u8], signature_hex: &str, public_key: &[u8]) -> Result<bool> {
    let der = hex::decode(signature_hex)
        .map_err(|e| UmaError::InvalidSignatureEncoding(format!("invalid hex: {}", e)))?;
    let signature = Signature::from_der(&der)
        .map_err(|e| UmaError::InvalidSignatureEncoding(format!("invalid DER: {}", e)))?;
    let key = verifying_key(public_key)?;

    let signature = signature.normalize_s().unwrap_or(signature);
    let digest = Sha256::digest(payload);
    Ok(key.verify_prehash(&digest, &signature).is_ok())
}

/// Derive the compressed SEC1 public key for a private key.
pub fn public_key_from_private(private_key: &[u8]) -> Result<Vec<u8>> {
    let key = signing_key(private_key)?;
    Ok(key.verifying_key().to_encoded_point(true).as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn sign_then_verify() {
        let public_key = public_key_from_private(&PRIVATE_KEY).unwrap();
        let signature = sign_payload(b"$bob@vasp2.com|1|2", &PRIVATE_KEY).unwrap();

        assert!(verify_signature(b"$bob@vasp2.com|1|2", &signature, &public_key).unwrap());
    }

    #[test]
    fn wrong_payload_is_false_not_error() {
        let public_key = public_key_from_private(&PRIVATE_KEY).unwrap();
        let signature = sign_payload(b"payload", &PRIVATE_KEY).unwrap();

        assert!(!verify_signature(b"payloae", &signature, &public_key).unwrap());
    }

    #[test]
    fn wrong_key_is_false() {
        let other_public_key = public_key_from_private(&[9u8; 32]).unwrap();
        let signature = sign_payload(b"payload", &PRIVATE_KEY).unwrap();

        assert!(!verify_signature(b"payload", &signature, &other_public_key).unwrap());
    }

    #[test]
    fn zero_private_key_is_invalid() {
        let err = sign_payload(b"payload", &[0u8; 32]).unwrap_err();
        assert!(matches!(err, UmaError::InvalidKey(_)));

        let err = sign_payload(b"payload", &[1u8; 31]).unwrap_err();
        assert!(matches!(err, UmaError::InvalidKey(_)));
    }

    #[test]
    fn malformed_signature_is_an_error() {
        let public_key = public_key_from_private(&PRIVATE_KEY).unwrap();

        let err = verify_signature(b"payload", "not-hex", &public_key).unwrap_err();
        assert!(matches!(err, UmaError::InvalidSignatureEncoding(_)));

        let err = verify_signature(b"payload", "deadbeef", &public_key).unwrap_err();
        assert!(matches!(err, UmaError::InvalidSignatureEncoding(_)));
    }

    #[test]
    fn malformed_public_key_is_an_error() {
        let signature = sign_payload(b"payload", &PRIVATE_KEY).unwrap();
        let err = verify_signature(b"payload", &signature, &[0x02, 0x01]).unwrap_err();
        assert!(matches!(err, UmaError::InvalidKey(_)));
    }

    #[test]
    fn signature_is_der() {
        let signature = sign_payload_der(b"payload", &PRIVATE_KEY).unwrap();
        // SEQUENCE tag
        assert_eq!(signature[0], 0x30);
        assert_eq!(signature[1] as usize, signature.len() - 2);
    }

    #[test]
    fn public_key_is_compressed() {
        let public_key = public_key_from_private(&PRIVATE_KEY).unwrap();
        assert_eq!(public_key.len(), 33);
        assert!(public_key[0] == 0x02 || public_key[0] == 0x03);
    }
}
