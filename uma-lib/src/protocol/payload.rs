//! Canonical signable payloads.
//!
//! Every signed message commits to `identifier|nonce|timestamp`, joined with
//! a literal `|` and no escaping. Field values must not contain `|`.
//!
//! | Message               | identifier                        |
//! |-----------------------|-----------------------------------|
//! | LNURLP request        | receiver address                  |
//! | LNURLP response       | `compliance.receiverIdentifier`   |
//! | Pay request           | `payerData.identifier`            |

/// Delimiter between payload fields.
pub const PAYLOAD_DELIMITER: &str = "|";

/// Build the canonical payload bytes for a signed message.
///
/// # Example
///
/// ```
/// use uma_lib::protocol::signable_payload;
///
/// let payload = signable_payload("$bob@vasp2.com", "12345", 1700000000);
/// assert_eq!(payload, b"$bob@vasp2.com|12345|1700000000".to_vec());
/// ```
pub fn signable_payload(identifier: &str, nonce: &str, timestamp: i64) -> Vec<u8> {
    [identifier, nonce, &timestamp.to_string()]
        .join(PAYLOAD_DELIMITER)
        .into_bytes()
}
