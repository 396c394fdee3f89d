//! Pay request sent by VASP1 to the receiver's callback.

use serde::{Deserialize, Serialize};

use super::payload::signable_payload;

/// Signed compliance data about the payer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompliancePayerData {
    /// UTXOs of the sender's channels that might fund the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utxos: Option<Vec<String>>,
    #[serde(rename = "isKYCd")]
    pub is_kycd: bool,
    /// Hex-encoded ECIES ciphertext of the travel rule information.
    #[serde(
        rename = "encryptedTravelRuleInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tr_info: Option<String>,
    /// URL the receiver calls with its UTXOs once the payment completes.
    pub utxo_callback: String,
    /// Hex-encoded DER signature over `identifier|nonce|timestamp`.
    pub signature: String,
    pub signature_nonce: String,
    pub signature_timestamp: i64,
}

/// Payer data attached to a pay request (LUD-18 plus compliance).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Payer address, e.g. `$alice@vasp1.com`.
    pub identifier: String,
    pub compliance: CompliancePayerData,
}

/// Pay request carrying the amount in the receiving currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    /// Code of the currency the receiver will receive.
    #[serde(rename = "currency")]
    pub currency_code: String,
    /// Amount in the smallest unit of `currency_code`.
    pub amount: i64,
    pub payer_data: PayerData,
}

impl PayRequest {
    /// Canonical bytes covered by the payer compliance signature.
    pub fn signable_payload(&self) -> Vec<u8> {
        let compliance = &self.payer_data.compliance;
        signable_payload(
            &self.payer_data.identifier,
            &compliance.signature_nonce,
            compliance.signature_timestamp,
        )
    }
}
