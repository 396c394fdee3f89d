//! Error types for UMA protocol operations.
//!
//! Every builder, parser and verifier in this crate reports failure through
//! [`UmaError`]. Malformed input (bad hex, bad keys, bad URLs) is kept apart
//! from a well-formed signature that simply does not verify, so callers can
//! tell a broken counterparty from a forged message.

use std::fmt;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum UmaErrorCode {
    /// Invalid hex, base64, JSON or URL
    MalformedInput = 1000,
    /// Required query parameter or field absent
    MissingParameter = 1001,
    /// LNURLP request path is not `/.well-known/lnurlp/{user}`
    InvalidRequestPath = 1002,
    /// Timestamp is not a base-10 integer
    InvalidTimestamp = 1003,
    /// Address is not `user@domain`
    InvalidAddress = 1004,
    /// Private or public key bytes do not decode
    InvalidKey = 2000,
    /// Signature is not hex-encoded DER
    InvalidSignatureEncoding = 2001,
    /// Well-formed signature that does not match
    SignatureVerificationFailed = 2002,
    /// Travel rule encryption failed
    EncryptionFailed = 2003,
    /// Counterparty public key could not be fetched
    CounterpartyFetchFailed = 3000,
    /// Invoice creator returned an error
    InvoiceCreationFailed = 4000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for UMA operations.
#[derive(Debug)]
pub enum UmaError {
    /// Input could not be decoded.
    MalformedInput {
        /// Field or input name
        field: String,
        /// Reason for the failure
        reason: String,
    },

    /// One or more required parameters are absent.
    MissingParameter(String),

    /// The request URL path is not a well-known LNURLP path.
    InvalidRequestPath(String),

    /// The timestamp could not be parsed.
    InvalidTimestamp(String),

    /// The address is not of the form `user@domain`.
    InvalidAddress(String),

    /// Private or public key bytes are invalid.
    InvalidKey(String),

    /// The signature is not valid hex or not valid DER.
    InvalidSignatureEncoding(String),

    /// The signature decoded but does not match the payload and key.
    SignatureVerificationFailed,

    /// ECIES encryption of travel rule info failed.
    EncryptionFailed(String),

    /// The counterparty's public key could not be fetched.
    CounterpartyFetchFailed {
        /// VASP domain that was queried
        domain: String,
        /// Underlying failure
        reason: String,
    },

    /// The invoice creator failed.
    InvoiceCreationFailed(String),

    /// Internal/unexpected error.
    Internal(String),
}

impl UmaError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> UmaErrorCode {
        match self {
            Self::MalformedInput { .. } => UmaErrorCode::MalformedInput,
            Self::MissingParameter(_) => UmaErrorCode::MissingParameter,
            Self::InvalidRequestPath(_) => UmaErrorCode::InvalidRequestPath,
            Self::InvalidTimestamp(_) => UmaErrorCode::InvalidTimestamp,
            Self::InvalidAddress(_) => UmaErrorCode::InvalidAddress,
            Self::InvalidKey(_) => UmaErrorCode::InvalidKey,
            Self::InvalidSignatureEncoding(_) => UmaErrorCode::InvalidSignatureEncoding,
            Self::SignatureVerificationFailed => UmaErrorCode::SignatureVerificationFailed,
            Self::EncryptionFailed(_) => UmaErrorCode::EncryptionFailed,
            Self::CounterpartyFetchFailed { .. } => UmaErrorCode::CounterpartyFetchFailed,
            Self::InvoiceCreationFailed(_) => UmaErrorCode::InvoiceCreationFailed,
            Self::Internal(_) => UmaErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the caller may reasonably retry the whole exchange.
    ///
    /// Nothing inside this crate retries; this only classifies.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CounterpartyFetchFailed { .. })
    }

    /// Returns true if the input itself was malformed, as opposed to a
    /// well-formed message that failed verification.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. }
                | Self::MissingParameter(_)
                | Self::InvalidRequestPath(_)
                | Self::InvalidTimestamp(_)
                | Self::InvalidAddress(_)
                | Self::InvalidKey(_)
                | Self::InvalidSignatureEncoding(_)
        )
    }

    /// Create a malformed input error.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a counterparty fetch error.
    pub fn fetch_failed(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CounterpartyFetchFailed {
            domain: domain.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for UmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { field, reason } => {
                write!(f, "malformed {}: {}", field, reason)
            }
            Self::MissingParameter(names) => {
                write!(f, "missing uma query parameters: {}", names)
            }
            Self::InvalidRequestPath(path) => write!(f, "invalid uma request path: {}", path),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp: {}", value),
            Self::InvalidAddress(address) => {
                write!(f, "invalid address {}: expected user@domain", address)
            }
            Self::InvalidKey(msg) => write!(f, "invalid key: {}", msg),
            Self::InvalidSignatureEncoding(msg) => {
                write!(f, "invalid signature encoding: {}", msg)
            }
            Self::SignatureVerificationFailed => write!(f, "invalid uma signature"),
            Self::EncryptionFailed(msg) => write!(f, "encryption failed: {}", msg),
            Self::CounterpartyFetchFailed { domain, reason } => {
                write!(f, "failed to fetch public key for {}: {}", domain, reason)
            }
            Self::InvoiceCreationFailed(msg) => write!(f, "invoice creation failed: {}", msg),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for UmaError {}

impl From<serde_json::Error> for UmaError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed("json", err.to_string())
    }
}

impl From<url::ParseError> for UmaError {
    fn from(err: url::ParseError) -> Self {
        Self::malformed("url", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = UmaError::fetch_failed("vasp2.com", "status 404");
        assert_eq!(err.code(), UmaErrorCode::CounterpartyFetchFailed);
        assert!(err.is_retryable());
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_verification_failure_is_not_malformed() {
        let err = UmaError::SignatureVerificationFailed;
        assert!(!err.is_malformed_input());
        assert!(!err.is_retryable());

        let err = UmaError::InvalidSignatureEncoding("odd length".into());
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_error_display() {
        let err = UmaError::MissingParameter("nonce, signature".to_string());
        assert!(err.to_string().contains("nonce, signature"));

        let err = UmaError::malformed("signingPubKey", "invalid hex");
        assert_eq!(err.to_string(), "malformed signingPubKey: invalid hex");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: UmaError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), UmaErrorCode::MalformedInput);
    }
}
