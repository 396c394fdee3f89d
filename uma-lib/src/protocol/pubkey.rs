//! Public key document served at `/.well-known/lnurlpubkey`.

use serde::{Deserialize, Serialize};

/// A VASP's published public keys.
///
/// Both keys are SEC1-encoded secp256k1 points, hex-encoded on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubKeyResponse {
    /// Key used to verify the VASP's message signatures.
    #[serde(with = "hex_bytes")]
    pub signing_pub_key: Vec<u8>,
    /// Key counterparties use to encrypt travel rule info to this VASP.
    #[serde(with = "hex_bytes")]
    pub encryption_pub_key: Vec<u8>,
}

impl PubKeyResponse {
    /// Build the document a VASP serves for its own keys.
    pub fn new(signing_pub_key: impl Into<Vec<u8>>, encryption_pub_key: impl Into<Vec<u8>>) -> Self {
        Self {
            signing_pub_key: signing_pub_key.into(),
            encryption_pub_key: encryption_pub_key.into(),
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(&encoded).map_err(serde::de::Error::custom)
    }
}
