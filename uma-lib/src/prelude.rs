//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use uma_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Error types: `UmaError`, `UmaErrorCode`, `Result`
//! - Messages: the four UMA messages and their parts
//! - Operations: every builder, parser and verifier
//! - Keys: `PublicKeyCache`, `InMemoryPublicKeyCache`, `PublicKeyFetcher`

// Error handling
pub use crate::errors::{UmaError, UmaErrorCode};
pub use crate::Result;

// Addresses
pub use crate::address::UmaAddress;

// Messages
pub use crate::protocol::{
    Currency, LnurlpRequest, LnurlpResponse, PayReqResponse, PayRequest, PayerDataOptions,
    PubKeyResponse,
};

// Operations
pub use crate::exchange::*;

// Keys
pub use crate::keys::{FetcherConfig, InMemoryPublicKeyCache, PublicKeyCache, PublicKeyFetcher};

// Invoices
pub use crate::invoice::{Invoice, LnurlInvoiceCreator};

// Replay protection
pub use crate::replay::{is_timestamp_fresh, NonceStore};
