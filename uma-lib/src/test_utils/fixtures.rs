//! Key fixtures.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use rand::rngs::OsRng;

use crate::protocol::PubKeyResponse;

/// Generate a random secp256k1 keypair.
///
/// Returns (private_key, compressed_public_key).
pub fn random_keypair() -> (Vec<u8>, Vec<u8>) {
    let secret = SecretKey::random(&mut OsRng);
    let public = secret.public_key().to_encoded_point(true);
    (secret.to_bytes().to_vec(), public.as_bytes().to_vec())
}

/// Signing and encryption keys for one VASP.
#[derive(Clone, Debug)]
pub struct TestVaspKeys {
    pub signing_private_key: Vec<u8>,
    pub signing_public_key: Vec<u8>,
    pub encryption_private_key: Vec<u8>,
    pub encryption_public_key: Vec<u8>,
}

impl TestVaspKeys {
    /// Generate two fresh keypairs.
    pub fn generate() -> Self {
        let (signing_private_key, signing_public_key) = random_keypair();
        let (encryption_private_key, encryption_public_key) = random_keypair();
        Self {
            signing_private_key,
            signing_public_key,
            encryption_private_key,
            encryption_public_key,
        }
    }

    /// The document this VASP would serve at `/.well-known/lnurlpubkey`.
    pub fn pubkey_response(&self) -> PubKeyResponse {
        PubKeyResponse::new(
            self.signing_public_key.clone(),
            self.encryption_public_key.clone(),
        )
    }
}
