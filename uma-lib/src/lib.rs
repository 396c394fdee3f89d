//! Universal Money Address (UMA) protocol library.
//!
//! Two VASPs use UMA to exchange the compliance data needed before one of
//! their users pays another over Lightning. The exchange is four messages:
//!
//! 1. VASP1 sends a signed **LNURLP request** for `$bob@vasp2.com`.
//! 2. VASP2 answers with a signed **LNURLP response** listing currencies,
//!    limits and the payer data it requires.
//! 3. VASP1 sends a signed **pay request**, with travel rule info encrypted
//!    to VASP2.
//! 4. VASP2 answers with a **pay request response** carrying the invoice.
//!
//! Every signed message commits to `identifier|nonce|timestamp`. Counterparty
//! keys are published at `/.well-known/lnurlpubkey` and resolved through a
//! [`PublicKeyCache`].
//!
//! This crate holds no global state: key material, the cache and the invoice
//! creator are all supplied by the caller.
//!
//! # Example
//!
//! ```ignore
//! use uma_lib::prelude::*;
//!
//! // VASP1
//! let url = get_signed_lnurlp_request_url(&vasp1_key, "$bob@vasp2.com", "vasp1.com", true)?;
//!
//! // VASP2
//! let query = parse_lnurlp_request(&url)?;
//! let fetcher = PublicKeyFetcher::new(FetcherConfig::default())?;
//! verify_lnurlp_request_with_fetcher(&query, &fetcher, &cache).await?;
//! ```
//!
//! # Features
//!
//! - `tracing`: spans and debug events for key fetches and invoice creation
//! - `test-utils`: key fixtures and a recording invoice creator

pub mod address;
pub mod crypto;
pub mod errors;
pub mod exchange;
pub mod invoice;
pub mod keys;
pub mod prelude;
pub mod protocol;
pub mod replay;

/// Test utilities for UMA exchanges.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use address::UmaAddress;
pub use errors::{UmaError, UmaErrorCode};
pub use exchange::{
    get_lnurlp_response, get_pay_req_response, get_pay_request, get_signed_lnurlp_request_url,
    is_uma_lnurlp_query, parse_lnurlp_request, parse_lnurlp_response, parse_pay_req_response,
    parse_pay_request, verify_lnurlp_request_with_fetcher, verify_lnurlp_response_with_fetcher,
    verify_pay_req_signature, verify_pay_request_with_fetcher, verify_uma_lnurlp_query_signature,
    verify_uma_lnurlp_response_signature, LnurlpResponseParams, PayReqResponseParams,
    PayRequestParams,
};
pub use invoice::{Invoice, LnurlInvoiceCreator};
pub use keys::{FetcherConfig, InMemoryPublicKeyCache, PublicKeyCache, PublicKeyFetcher};
pub use protocol::{
    CompliancePayerData, Currency, LnurlComplianceResponse, LnurlpRequest, LnurlpResponse,
    PayReqResponse, PayReqResponseCompliance, PayReqResponsePaymentInfo, PayRequest, PayerData,
    PayerDataOptions, PubKeyResponse, Route, RoutePath,
};

/// Common result alias for UMA operations.
pub type Result<T> = std::result::Result<T, UmaError>;
