//! LNURLP request and response messages.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use super::paths::lnurlp_url;
use super::payload::signable_payload;
use crate::{Result, UmaAddress};

/// Signed LNURLP request sent by VASP1 as query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LnurlpRequest {
    /// Receiver address, e.g. `$bob@vasp2.com`.
    pub receiver_address: String,
    /// Domain of the sending VASP, used to fetch its public key.
    pub vasp_domain: String,
    /// Whether the sending VASP is subject to travel rule requirements.
    pub is_subject_to_travel_rule: bool,
    /// Unix seconds at signing time.
    pub timestamp: i64,
    /// Decimal-encoded random nonce.
    pub nonce: String,
    /// Hex-encoded DER signature over [`LnurlpRequest::signable_payload`].
    pub signature: String,
}

impl LnurlpRequest {
    /// Canonical bytes covered by the request signature.
    pub fn signable_payload(&self) -> Vec<u8> {
        signable_payload(&self.receiver_address, &self.nonce, self.timestamp)
    }

    /// Encode the request as `/.well-known/lnurlp/{user}` on the receiver's
    /// domain with every field as a query parameter.
    pub fn encode_to_url(&self) -> Result<Url> {
        let address = UmaAddress::parse(&self.receiver_address)?;
        let mut url = lnurlp_url(address.user(), address.domain())?;
        url.query_pairs_mut()
            .append_pair("signature", &self.signature)
            .append_pair("vaspDomain", &self.vasp_domain)
            .append_pair("nonce", &self.nonce)
            .append_pair(
                "trStatus",
                if self.is_subject_to_travel_rule {
                    "true"
                } else {
                    "false"
                },
            )
            .append_pair("timestamp", &self.timestamp.to_string());
        Ok(url)
    }
}

/// Currency the receiving VASP is willing to accept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 (or similar) code, e.g. `USD`.
    pub code: String,
    /// Human readable name.
    pub name: String,
    /// Display symbol, e.g. `$`.
    pub symbol: String,
    /// Millisatoshis per smallest unit of this currency.
    #[serde(rename = "multiplier")]
    pub millisatoshi_per_unit: i64,
    /// Minimum amount in the smallest unit of this currency.
    pub min_sendable: i64,
    /// Maximum amount in the smallest unit of this currency.
    pub max_sendable: i64,
}

/// Which payer data fields the receiver requires.
///
/// On the wire this is the LUD-18 `payerData` object, where `identifier` is
/// always mandatory:
///
/// ```json
/// {"identifier":{"mandatory":true},"name":{"mandatory":false},
///  "email":{"mandatory":false},"compliance":{"mandatory":true}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayerDataOptions {
    pub name_required: bool,
    pub email_required: bool,
    pub compliance_required: bool,
}

#[derive(Serialize, Deserialize)]
struct MandatoryField {
    mandatory: bool,
}

#[derive(Serialize, Deserialize)]
struct PayerDataOptionsWire {
    identifier: MandatoryField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<MandatoryField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<MandatoryField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compliance: Option<MandatoryField>,
}

fn is_mandatory(field: &Option<MandatoryField>) -> bool {
    field.as_ref().map(|f| f.mandatory).unwrap_or(false)
}

impl Serialize for PayerDataOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PayerDataOptionsWire {
            identifier: MandatoryField { mandatory: true },
            name: Some(MandatoryField {
                mandatory: self.name_required,
            }),
            email: Some(MandatoryField {
                mandatory: self.email_required,
            }),
            compliance: Some(MandatoryField {
                mandatory: self.compliance_required,
            }),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PayerDataOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let wire = PayerDataOptionsWire::deserialize(deserializer)?;
        Ok(Self {
            name_required: is_mandatory(&wire.name),
            email_required: is_mandatory(&wire.email),
            compliance_required: is_mandatory(&wire.compliance),
        })
    }
}

/// Signed compliance block of an LNURLP response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnurlComplianceResponse {
    /// Whether the receiver is a KYC'd customer of VASP2.
    #[serde(rename = "isKYCd")]
    pub is_kycd: bool,
    /// Hex-encoded DER signature.
    pub signature: String,
    #[serde(rename = "signatureNonce")]
    pub nonce: String,
    #[serde(rename = "signatureTimestamp")]
    pub timestamp: i64,
    /// Whether VASP2 requires travel rule information.
    pub is_subject_to_travel_rule: bool,
    /// Receiver address the signature commits to.
    pub receiver_identifier: String,
}

/// LNURLP response returned by VASP2.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnurlpResponse {
    /// Always `payRequest`.
    pub tag: String,
    /// URL the sender calls with its pay request.
    pub callback: String,
    /// Minimum amount in millisatoshis.
    pub min_sendable: i64,
    /// Maximum amount in millisatoshis.
    pub max_sendable: i64,
    /// LNURL metadata string committed to by the invoice.
    #[serde(rename = "metadata")]
    pub encoded_metadata: String,
    pub currencies: Vec<Currency>,
    #[serde(rename = "payerData")]
    pub required_payer_data: PayerDataOptions,
    pub compliance: LnurlComplianceResponse,
}

impl LnurlpResponse {
    /// Canonical bytes covered by the compliance signature.
    pub fn signable_payload(&self) -> Vec<u8> {
        signable_payload(
            &self.compliance.receiver_identifier,
            &self.compliance.nonce,
            self.compliance.timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> LnurlpRequest {
        LnurlpRequest {
            receiver_address: "$bob@vasp2.com".to_string(),
            vasp_domain: "vasp1.com".to_string(),
            is_subject_to_travel_rule: true,
            timestamp: 1700000000,
            nonce: "12345".to_string(),
            signature: "3045".to_string(),
        }
    }

    #[test]
    fn request_encodes_to_well_known_url() {
        let url = sample_request().encode_to_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("vasp2.com"));
        assert_eq!(url.path(), "/.well-known/lnurlp/$bob");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("vaspDomain".into(), "vasp1.com".into())));
        assert!(pairs.contains(&("trStatus".into(), "true".into())));
        assert!(pairs.contains(&("timestamp".into(), "1700000000".into())));
    }

    #[test]
    fn request_with_bad_address_fails_to_encode() {
        let mut request = sample_request();
        request.receiver_address = "bob".to_string();
        assert!(request.encode_to_url().is_err());
    }

    #[test]
    fn request_payload_covers_address_nonce_timestamp() {
        assert_eq!(
            sample_request().signable_payload(),
            b"$bob@vasp2.com|12345|1700000000"
        );
    }

    #[test]
    fn payer_data_options_wire_format() {
        let options = PayerDataOptions {
            name_required: false,
            email_required: true,
            compliance_required: true,
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "identifier": {"mandatory": true},
                "name": {"mandatory": false},
                "email": {"mandatory": true},
                "compliance": {"mandatory": true}
            })
        );
        let parsed: PayerDataOptions = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn payer_data_options_missing_fields_are_optional() {
        let parsed: PayerDataOptions =
            serde_json::from_str(r#"{"identifier":{"mandatory":true}}"#).unwrap();
        assert_eq!(parsed, PayerDataOptions::default());
    }

    #[test]
    fn compliance_response_field_names() {
        let compliance = LnurlComplianceResponse {
            is_kycd: true,
            signature: "ab".into(),
            nonce: "1".into(),
            timestamp: 2,
            is_subject_to_travel_rule: false,
            receiver_identifier: "$bob@vasp2.com".into(),
        };
        let json = serde_json::to_value(&compliance).unwrap();
        assert_eq!(json["isKYCd"], true);
        assert_eq!(json["signatureNonce"], "1");
        assert_eq!(json["signatureTimestamp"], 2);
        assert_eq!(json["isSubjectToTravelRule"], false);
        assert_eq!(json["receiverIdentifier"], "$bob@vasp2.com");
    }
}
