//! Invoice creation through the node-operator GraphQL API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use uma_lib::{Invoice, LnurlInvoiceCreator};

use crate::requester::Requester;
use crate::signing::SigningKey;
use crate::RequesterError;

/// Creates an invoice whose description hash commits to the LNURL metadata.
pub const CREATE_LNURL_INVOICE_MUTATION: &str = r#"
mutation CreateLnurlInvoice(
    $node_id: ID!
    $amount_msats: Long!
    $metadata_hash: String!
    $expiry_secs: Int
) {
    create_lnurl_invoice(input: {
        node_id: $node_id
        amount_msats: $amount_msats
        metadata_hash: $metadata_hash
        expiry_secs: $expiry_secs
    }) {
        invoice {
            id
            data {
                encoded_payment_request
            }
        }
    }
}
"#;

#[derive(Deserialize)]
struct CreateLnurlInvoiceData {
    create_lnurl_invoice: CreateLnurlInvoiceOutput,
}

#[derive(Deserialize)]
struct CreateLnurlInvoiceOutput {
    invoice: InvoiceNode,
}

#[derive(Deserialize)]
struct InvoiceNode {
    id: String,
    data: InvoiceData,
}

#[derive(Deserialize)]
struct InvoiceData {
    encoded_payment_request: String,
}

/// [`LnurlInvoiceCreator`] backed by the `CreateLnurlInvoice` mutation.
///
/// The node's master seed is not sent; hosted nodes sign on the server side.
pub struct GraphqlInvoiceCreator {
    requester: Requester,
    signing_key: Option<Box<dyn SigningKey>>,
}

impl GraphqlInvoiceCreator {
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            signing_key: None,
        }
    }

    /// Sign every request with `key`.
    pub fn with_signing_key(mut self, key: impl SigningKey + 'static) -> Self {
        self.signing_key = Some(Box::new(key));
        self
    }

    async fn create(
        &self,
        node_id: &str,
        amount_msats: i64,
        metadata: &str,
        expiry_secs: Option<i32>,
    ) -> crate::Result<Invoice> {
        let variables = json!({
            "node_id": node_id,
            "amount_msats": amount_msats,
            "metadata_hash": hex::encode(Sha256::digest(metadata.as_bytes())),
            "expiry_secs": expiry_secs,
        });

        let data = self
            .requester
            .execute_graphql(
                CREATE_LNURL_INVOICE_MUTATION,
                variables,
                self.signing_key.as_deref(),
            )
            .await?;

        let output: CreateLnurlInvoiceData = serde_json::from_value(data)
            .map_err(|e| RequesterError::MalformedResponse(e.to_string()))?;
        let invoice = output.create_lnurl_invoice.invoice;

        Ok(Invoice {
            id: invoice.id,
            encoded_payment_request: invoice.data.encoded_payment_request,
        })
    }
}

#[async_trait]
impl LnurlInvoiceCreator for GraphqlInvoiceCreator {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, _master_seed, metadata))
    )]
    async fn create_lnurl_invoice(
        &self,
        node_id: &str,
        _master_seed: Option<&[u8]>,
        amount_msats: i64,
        metadata: &str,
        expiry_secs: Option<i32>,
    ) -> uma_lib::Result<Invoice> {
        Ok(self
            .create(node_id, amount_msats, metadata, expiry_secs)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requester::operation_name;

    #[test]
    fn mutation_name() {
        assert_eq!(
            operation_name(CREATE_LNURL_INVOICE_MUTATION).unwrap(),
            "CreateLnurlInvoice"
        );
    }

    #[test]
    fn decodes_invoice_output() {
        let data = json!({
            "create_lnurl_invoice": {
                "invoice": {
                    "id": "Invoice:0187",
                    "data": { "encoded_payment_request": "lnbc1..." }
                }
            }
        });
        let output: CreateLnurlInvoiceData = serde_json::from_value(data).unwrap();
        assert_eq!(output.create_lnurl_invoice.invoice.id, "Invoice:0187");
        assert_eq!(
            output.create_lnurl_invoice.invoice.data.encoded_payment_request,
            "lnbc1..."
        );
    }
}
