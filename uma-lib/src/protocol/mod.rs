//! UMA wire messages and canonical protocol conventions.
//!
//! This module defines the single source of truth for:
//! - Well-known URL paths (`/.well-known/lnurlp/{user}`, `/.well-known/lnurlpubkey`)
//! - Canonical signable payloads (`identifier|nonce|timestamp`)
//! - The JSON and query-string shapes of the four exchanged messages
//!
//! Any implementation that talks to a counterparty must derive identical
//! payload bytes and identical field names.
//!
//! # Message Flow
//!
//! | Step | Message            | From  | Encoding     | Signed |
//! |------|--------------------|-------|--------------|--------|
//! | 1    | `LnurlpRequest`    | VASP1 | query string | yes    |
//! | 2    | `LnurlpResponse`   | VASP2 | JSON         | yes (compliance block) |
//! | 3    | `PayRequest`       | VASP1 | JSON         | yes (payer compliance) |
//! | 4    | `PayReqResponse`   | VASP2 | JSON         | no     |

mod lnurlp;
mod paths;
mod pay_request;
mod pay_response;
mod payload;
mod pubkey;

pub use lnurlp::*;
pub use paths::*;
pub use pay_request::*;
pub use pay_response::*;
pub use payload::*;
pub use pubkey::*;

/// LNURL tag carried by every LNURLP response.
pub const PAY_REQUEST_TAG: &str = "payRequest";
