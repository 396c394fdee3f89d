//! Property-based tests for signing and the signed payload format.

use proptest::prelude::*;
use uma_lib::crypto::{sign_payload, verify_signature};
use uma_lib::protocol::signable_payload;
use uma_lib::test_utils::TestVaspKeys;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A signature verifies for the payload it was made over.
    #[test]
    fn sign_then_verify(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let keys = TestVaspKeys::generate();
        let signature = sign_payload(&payload, &keys.signing_private_key).unwrap();
        prop_assert!(verify_signature(&payload, &signature, &keys.signing_public_key).unwrap());
    }

    /// Flipping any bit of the payload breaks verification.
    #[test]
    fn payload_bit_flip_fails(
        payload in proptest::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let keys = TestVaspKeys::generate();
        let signature = sign_payload(&payload, &keys.signing_private_key).unwrap();

        let mut tampered = payload.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= 1 << bit;

        prop_assert!(!verify_signature(&tampered, &signature, &keys.signing_public_key).unwrap());
    }

    /// Flipping any bit of the DER signature never yields a valid signature.
    #[test]
    fn signature_bit_flip_fails(
        payload in proptest::collection::vec(any::<u8>(), 0..64),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let keys = TestVaspKeys::generate();
        let signature = sign_payload(&payload, &keys.signing_private_key).unwrap();

        let mut der = hex::decode(&signature).unwrap();
        let i = index.index(der.len());
        der[i] ^= 1 << bit;

        let result = verify_signature(&payload, &hex::encode(der), &keys.signing_public_key);
        prop_assert!(!matches!(result, Ok(true)));
    }

    /// The payload is exactly `identifier|nonce|timestamp`.
    #[test]
    fn payload_layout(
        identifier in "\\$[a-z]{1,12}@[a-z]{1,12}\\.com",
        nonce in any::<u64>(),
        timestamp in 0i64..4_000_000_000i64,
    ) {
        let payload = signable_payload(&identifier, &nonce.to_string(), timestamp);
        let expected = format!("{}|{}|{}", identifier, nonce, timestamp);
        prop_assert_eq!(payload, expected.into_bytes());
    }
}
