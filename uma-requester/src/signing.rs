//! Request signing keys.

use uma_lib::crypto::{public_key_from_private, sign_payload_der};

use crate::{RequesterError, Result};

/// Signs GraphQL request bodies for the `X-Lightspark-Signing` header.
pub trait SigningKey: Send + Sync {
    /// Sign `payload`, returning raw signature bytes.
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>>;
}

/// secp256k1 ECDSA key producing DER signatures over SHA-256.
#[derive(Clone)]
pub struct Secp256k1SigningKey {
    private_key: Vec<u8>,
}

impl Secp256k1SigningKey {
    /// Wrap a 32-byte private key, rejecting invalid scalars.
    pub fn new(private_key: impl Into<Vec<u8>>) -> Result<Self> {
        let private_key = private_key.into();
        public_key_from_private(&private_key)
            .map_err(|e| RequesterError::Signing(e.to_string()))?;
        Ok(Self { private_key })
    }

    /// Compressed SEC1 public key.
    pub fn public_key(&self) -> Result<Vec<u8>> {
        public_key_from_private(&self.private_key).map_err(|e| RequesterError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for Secp256k1SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secp256k1SigningKey(<redacted>)")
    }
}

impl SigningKey for Secp256k1SigningKey {
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
        sign_payload_der(payload, &self.private_key).map_err(|e| RequesterError::Signing(e.to_string()))
    }
}
