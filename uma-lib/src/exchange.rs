//! Builders, parsers and verifiers for the four UMA messages.
//!
//! | Operation                                  | Role  |
//! |--------------------------------------------|-------|
//! | [`get_signed_lnurlp_request_url`]          | VASP1 |
//! | [`parse_lnurlp_request`]                   | VASP2 |
//! | [`verify_uma_lnurlp_query_signature`]      | VASP2 |
//! | [`get_lnurlp_response`]                    | VASP2 |
//! | [`verify_uma_lnurlp_response_signature`]   | VASP1 |
//! | [`get_pay_request`]                        | VASP1 |
//! | [`verify_pay_req_signature`]               | VASP2 |
//! | [`get_pay_req_response`]                   | VASP2 |
//! | [`parse_pay_req_response`]                 | VASP1 |
//!
//! Every function is a pure transformation of its inputs, apart from the
//! public key cache and the invoice creator supplied by the caller. A failed
//! parse or verification ends the exchange; nothing is retried here.

use url::Url;

use crate::crypto::{
    current_timestamp, encrypt_tr_info, generate_nonce, sign_payload, verify_signature,
};
use crate::invoice::LnurlInvoiceCreator;
use crate::keys::{PublicKeyCache, PublicKeyFetcher};
use crate::protocol::{
    lnurlp_url, lnurlp_user_from_path, signable_payload, CompliancePayerData, Currency,
    LnurlComplianceResponse, LnurlpRequest, LnurlpResponse, PayReqResponse,
    PayReqResponseCompliance, PayReqResponsePaymentInfo, PayRequest, PayerData,
    PayerDataOptions, PAY_REQUEST_TAG,
};
use crate::{Result, UmaAddress, UmaError};

/// Query parameters every LNURLP request must carry.
const REQUIRED_QUERY_PARAMS: [&str; 4] = ["vaspDomain", "signature", "nonce", "timestamp"];

fn check_signature(payload: &[u8], signature: &str, public_key: &[u8]) -> Result<()> {
    if verify_signature(payload, signature, public_key)? {
        Ok(())
    } else {
        Err(UmaError::SignatureVerificationFailed)
    }
}

/// Create a signed LNURLP request URL.
///
/// # Arguments
///
/// * `signing_private_key` - VASP1's secp256k1 signing key
/// * `receiver_address` - the receiver, e.g. `$bob@vasp2.com`
/// * `sender_vasp_domain` - VASP1's domain, used by VASP2 to fetch VASP1's keys
/// * `is_subject_to_travel_rule` - whether VASP1 requires travel rule info
///
/// The signed address is the one the receiver reads back from the URL: the
/// host lowercased and the user percent-decoded.
///
/// # Errors
///
/// `InvalidAddress` if the address is not `user@domain` or its user part
/// does not fit in a single path segment.
pub fn get_signed_lnurlp_request_url(
    signing_private_key: &[u8],
    receiver_address: &str,
    sender_vasp_domain: &str,
    is_subject_to_travel_rule: bool,
) -> Result<Url> {
    let address = UmaAddress::parse(receiver_address)?;
    // Sign the address as the receiver will read it back from the URL.
    let lnurlp = lnurlp_url(address.user(), address.domain())?;
    let receiver_address = receiver_address_from_url(&lnurlp)
        .map_err(|_| UmaError::InvalidAddress(receiver_address.to_string()))?;

    let mut request = LnurlpRequest {
        receiver_address,
        vasp_domain: sender_vasp_domain.to_string(),
        is_subject_to_travel_rule,
        timestamp: current_timestamp(),
        nonce: generate_nonce(),
        signature: String::new(),
    };
    request.signature = sign_payload(&request.signable_payload(), signing_private_key)?;
    request.encode_to_url()
}

/// Returns true if `url` is a well-formed UMA LNURLP request.
///
/// Plain LNURLP requests (no UMA query parameters) return false.
pub fn is_uma_lnurlp_query(url: &Url) -> bool {
    parse_lnurlp_request(url).is_ok()
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Rebuild `{user}@{host[:port]}` from a well-known LNURLP URL, with the
/// user percent-decoded and the host as the URL stores it.
fn receiver_address_from_url(url: &Url) -> Result<String> {
    let encoded_user = lnurlp_user_from_path(url.path())
        .ok_or_else(|| UmaError::InvalidRequestPath(url.path().to_string()))?;
    let user = urlencoding::decode(encoded_user)
        .map_err(|e| UmaError::malformed("receiver user", e.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| UmaError::malformed("url", "missing host"))?;
    Ok(match url.port() {
        Some(port) => format!("{}@{}:{}", user, host, port),
        None => format!("{}@{}", user, host),
    })
}

/// Parse an LNURLP request URL received by VASP2.
///
/// # Errors
///
/// - `MissingParameter` naming every absent required parameter
/// - `InvalidTimestamp` if `timestamp` is not a base-10 integer
/// - `InvalidRequestPath` unless the path is `/.well-known/lnurlp/{user}`
pub fn parse_lnurlp_request(url: &Url) -> Result<LnurlpRequest> {
    let missing: Vec<&str> = REQUIRED_QUERY_PARAMS
        .iter()
        .copied()
        .filter(|name| query_param(url, name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(UmaError::MissingParameter(missing.join(", ")));
    }

    let raw_timestamp = query_param(url, "timestamp").unwrap_or_default();
    let timestamp = raw_timestamp
        .parse::<i64>()
        .map_err(|_| UmaError::InvalidTimestamp(raw_timestamp.clone()))?;

    let receiver_address = receiver_address_from_url(url)?;

    let is_subject_to_travel_rule = query_param(url, "trStatus")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    Ok(LnurlpRequest {
        receiver_address,
        vasp_domain: query_param(url, "vaspDomain").unwrap_or_default(),
        is_subject_to_travel_rule,
        timestamp,
        nonce: query_param(url, "nonce").unwrap_or_default(),
        signature: query_param(url, "signature").unwrap_or_default(),
    })
}

/// Verify an LNURLP request against VASP1's signing public key.
pub fn verify_uma_lnurlp_query_signature(
    query: &LnurlpRequest,
    other_vasp_signing_pub_key: &[u8],
) -> Result<()> {
    check_signature(
        &query.signable_payload(),
        &query.signature,
        other_vasp_signing_pub_key,
    )
}

/// Receiver-side settings for an LNURLP response.
#[derive(Clone, Debug)]
pub struct LnurlpResponseParams {
    /// Whether VASP2 requires travel rule information.
    pub requires_travel_rule_info: bool,
    /// URL VASP1 posts its pay request to.
    pub callback: String,
    /// LNURL metadata string.
    pub encoded_metadata: String,
    pub min_sendable_msats: i64,
    pub max_sendable_msats: i64,
    pub payer_data_options: PayerDataOptions,
    pub currency_options: Vec<Currency>,
    /// Whether the receiver is a KYC'd customer of VASP2.
    pub is_receiver_kycd: bool,
}

/// Build VASP2's signed LNURLP response to `query`.
///
/// The compliance block is signed over `receiverAddress|nonce|timestamp`
/// with a fresh nonce and the current time.
pub fn get_lnurlp_response(
    query: &LnurlpRequest,
    private_key: &[u8],
    params: LnurlpResponseParams,
) -> Result<LnurlpResponse> {
    let timestamp = current_timestamp();
    let nonce = generate_nonce();
    let payload = signable_payload(&query.receiver_address, &nonce, timestamp);
    let signature = sign_payload(&payload, private_key)?;

    Ok(LnurlpResponse {
        tag: PAY_REQUEST_TAG.to_string(),
        callback: params.callback,
        min_sendable: params.min_sendable_msats,
        max_sendable: params.max_sendable_msats,
        encoded_metadata: params.encoded_metadata,
        currencies: params.currency_options,
        required_payer_data: params.payer_data_options,
        compliance: LnurlComplianceResponse {
            is_kycd: params.is_receiver_kycd,
            signature,
            nonce,
            timestamp,
            is_subject_to_travel_rule: params.requires_travel_rule_info,
            receiver_identifier: query.receiver_address.clone(),
        },
    })
}

/// Verify an LNURLP response against VASP2's signing public key.
pub fn verify_uma_lnurlp_response_signature(
    response: &LnurlpResponse,
    other_vasp_signing_pub_key: &[u8],
) -> Result<()> {
    check_signature(
        &response.signable_payload(),
        &response.compliance.signature,
        other_vasp_signing_pub_key,
    )
}

/// Parse an LNURLP response body.
pub fn parse_lnurlp_response(bytes: &[u8]) -> Result<LnurlpResponse> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Sender-side contents of a pay request.
#[derive(Clone, Debug, Default)]
pub struct PayRequestParams {
    /// Code of the currency the receiver will receive.
    pub currency_code: String,
    /// Amount in the smallest unit of `currency_code` (cents for USD).
    pub amount: i64,
    /// Sender address, e.g. `$alice@vasp1.com`.
    pub payer_identifier: String,
    pub payer_name: Option<String>,
    pub payer_email: Option<String>,
    /// Travel rule information; encrypted before it leaves this function.
    pub tr_info: Option<String>,
    pub is_payer_kycd: bool,
    /// UTXOs of the sender's channels that might fund the payment.
    pub payer_utxos: Option<Vec<String>>,
    /// URL the receiver calls with its UTXOs once the payment completes.
    pub utxo_callback: String,
}

/// Build VASP1's signed pay request.
///
/// Non-empty travel rule info is ECIES-encrypted to
/// `receiver_encryption_pub_key`; otherwise the field is omitted.
pub fn get_pay_request(
    receiver_encryption_pub_key: &[u8],
    sending_vasp_private_key: &[u8],
    params: PayRequestParams,
) -> Result<PayRequest> {
    let compliance = get_signed_compliance_payer_data(
        receiver_encryption_pub_key,
        sending_vasp_private_key,
        &params,
    )?;

    Ok(PayRequest {
        currency_code: params.currency_code,
        amount: params.amount,
        payer_data: PayerData {
            name: params.payer_name,
            email: params.payer_email,
            identifier: params.payer_identifier,
            compliance,
        },
    })
}

fn get_signed_compliance_payer_data(
    receiver_encryption_pub_key: &[u8],
    sending_vasp_private_key: &[u8],
    params: &PayRequestParams,
) -> Result<CompliancePayerData> {
    let timestamp = current_timestamp();
    let nonce = generate_nonce();

    let tr_info = match params.tr_info.as_deref() {
        Some(text) if !text.is_empty() => {
            Some(encrypt_tr_info(text, receiver_encryption_pub_key)?)
        }
        _ => None,
    };

    let payload = signable_payload(&params.payer_identifier, &nonce, timestamp);
    let signature = sign_payload(&payload, sending_vasp_private_key)?;

    Ok(CompliancePayerData {
        utxos: params.payer_utxos.clone(),
        is_kycd: params.is_payer_kycd,
        tr_info,
        utxo_callback: params.utxo_callback.clone(),
        signature,
        signature_nonce: nonce,
        signature_timestamp: timestamp,
    })
}

/// Verify a pay request against VASP1's signing public key.
pub fn verify_pay_req_signature(query: &PayRequest, other_vasp_pub_key: &[u8]) -> Result<()> {
    check_signature(
        &query.signable_payload(),
        &query.payer_data.compliance.signature,
        other_vasp_pub_key,
    )
}

/// Parse a pay request body.
pub fn parse_pay_request(bytes: &[u8]) -> Result<PayRequest> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Receiver-side settings for a pay request response.
#[derive(Clone, Debug, Default)]
pub struct PayReqResponseParams {
    /// Receiver's node.
    pub node_id: String,
    pub node_master_seed: Option<Vec<u8>>,
    /// LNURL metadata from the LNURLP response.
    pub metadata: String,
    pub currency_code: String,
    /// Millisatoshis per smallest unit of `currency_code`. VASP2 commits to
    /// this rate until the invoice expires.
    pub conversion_rate: i64,
    pub expiry_secs: i32,
    /// UTXOs of the receiver's channels that might receive the payment.
    pub receiver_channel_utxos: Vec<String>,
    pub utxo_callback: String,
}

/// Build VASP2's response to a pay request, issuing the invoice through
/// `invoice_creator`.
///
/// The invoice amount is `amount * conversion_rate` millisatoshis, and its
/// metadata is `metadata + "{" + json(payerData) + "}"`. That exact string is
/// what the invoice description hash commits to.
///
/// # Errors
///
/// - `MalformedInput` if the millisatoshi amount overflows
/// - `InvoiceCreationFailed` if the invoice creator fails
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, fields(currency = %params.currency_code, amount = query.amount))
)]
pub async fn get_pay_req_response<C>(
    query: &PayRequest,
    invoice_creator: &C,
    params: PayReqResponseParams,
) -> Result<PayReqResponse>
where
    C: LnurlInvoiceCreator + ?Sized,
{
    let amount_msats = query
        .amount
        .checked_mul(params.conversion_rate)
        .ok_or_else(|| UmaError::malformed("amount", "millisatoshi amount overflows i64"))?;
    let encoded_payer_data = serde_json::to_string(&query.payer_data)?;
    let metadata = format!("{}{{{}}}", params.metadata, encoded_payer_data);

    let invoice = invoice_creator
        .create_lnurl_invoice(
            &params.node_id,
            params.node_master_seed.as_deref(),
            amount_msats,
            &metadata,
            Some(params.expiry_secs),
        )
        .await
        .map_err(|err| match err {
            UmaError::InvoiceCreationFailed(_) => err,
            other => UmaError::InvoiceCreationFailed(other.to_string()),
        })?;

    Ok(PayReqResponse {
        encoded_invoice: invoice.encoded_payment_request,
        routes: Vec::new(),
        compliance: PayReqResponseCompliance {
            utxos: params.receiver_channel_utxos,
            utxo_callback: params.utxo_callback,
        },
        payment_info: PayReqResponsePaymentInfo {
            currency_code: params.currency_code,
            multiplier: params.conversion_rate,
        },
    })
}

/// Parse a pay request response body. The message is not signed.
pub fn parse_pay_req_response(bytes: &[u8]) -> Result<PayReqResponse> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Resolve VASP1's keys from `query.vasp_domain` and verify the request.
pub async fn verify_lnurlp_request_with_fetcher<C>(
    query: &LnurlpRequest,
    fetcher: &PublicKeyFetcher,
    cache: &C,
) -> Result<()>
where
    C: PublicKeyCache + ?Sized,
{
    let keys = fetcher
        .fetch_public_key_for_vasp(&query.vasp_domain, cache)
        .await?;
    verify_uma_lnurlp_query_signature(query, &keys.signing_pub_key)
}

/// Resolve VASP2's keys from the receiver address domain and verify the
/// response.
pub async fn verify_lnurlp_response_with_fetcher<C>(
    response: &LnurlpResponse,
    fetcher: &PublicKeyFetcher,
    cache: &C,
) -> Result<()>
where
    C: PublicKeyCache + ?Sized,
{
    let address = UmaAddress::parse(&response.compliance.receiver_identifier)?;
    let keys = fetcher
        .fetch_public_key_for_vasp(address.domain(), cache)
        .await?;
    verify_uma_lnurlp_response_signature(response, &keys.signing_pub_key)
}

/// Resolve VASP1's keys from the payer identifier domain and verify the pay
/// request.
pub async fn verify_pay_request_with_fetcher<C>(
    query: &PayRequest,
    fetcher: &PublicKeyFetcher,
    cache: &C,
) -> Result<()>
where
    C: PublicKeyCache + ?Sized,
{
    let address = UmaAddress::parse(&query.payer_data.identifier)?;
    let keys = fetcher
        .fetch_public_key_for_vasp(address.domain(), cache)
        .await?;
    verify_pay_req_signature(query, &keys.signing_pub_key)
}
