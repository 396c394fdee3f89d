//! Pay request response returned by VASP2.

use serde::{Deserialize, Serialize};

/// One hop of a route hint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePath {
    pub pubkey: String,
    pub fee: i64,
    pub msatoshi: i64,
    pub channel: String,
}

/// Route hint. Reserved; always empty in this protocol revision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub pubkey: String,
    pub path: Vec<RoutePath>,
}

/// Receiver compliance data returned with the invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayReqResponseCompliance {
    /// UTXOs of the receiver's channels that might receive the payment.
    pub utxos: Vec<String>,
    /// URL the sender calls with its UTXOs once the payment completes.
    pub utxo_callback: String,
}

/// Conversion information the sender uses to display the payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayReqResponsePaymentInfo {
    pub currency_code: String,
    /// Millisatoshis per smallest unit of `currency_code`.
    pub multiplier: i64,
}

/// Response to a pay request, wrapping an encoded invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayReqResponse {
    /// BOLT11 payment request.
    #[serde(rename = "pr")]
    pub encoded_invoice: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    pub compliance: PayReqResponseCompliance,
    pub payment_info: PayReqResponsePaymentInfo,
}
