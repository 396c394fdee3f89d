//! Recording invoice creator.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::invoice::{Invoice, LnurlInvoiceCreator};
use crate::{Result, UmaError};

/// Arguments of one `create_lnurl_invoice` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceCall {
    pub node_id: String,
    pub master_seed: Option<Vec<u8>>,
    pub amount_msats: i64,
    pub metadata: String,
    pub expiry_secs: Option<i32>,
}

/// Invoice creator that records its calls and returns a fixed invoice, or
/// fails with a fixed message.
pub struct MockInvoiceCreator {
    encoded_invoice: String,
    failure: Option<String>,
    calls: Mutex<Vec<InvoiceCall>>,
}

impl MockInvoiceCreator {
    /// Succeed with `encoded_invoice` on every call.
    pub fn new(encoded_invoice: impl Into<String>) -> Self {
        Self {
            encoded_invoice: encoded_invoice.into(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            encoded_invoice: String::new(),
            failure: Some(reason.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<InvoiceCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LnurlInvoiceCreator for MockInvoiceCreator {
    async fn create_lnurl_invoice(
        &self,
        node_id: &str,
        master_seed: Option<&[u8]>,
        amount_msats: i64,
        metadata: &str,
        expiry_secs: Option<i32>,
    ) -> Result<Invoice> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(InvoiceCall {
                node_id: node_id.to_string(),
                master_seed: master_seed.map(<[u8]>::to_vec),
                amount_msats,
                metadata: metadata.to_string(),
                expiry_secs,
            });

        match &self.failure {
            Some(reason) => Err(UmaError::InvoiceCreationFailed(reason.clone())),
            None => Ok(Invoice {
                id: format!("mock-invoice-{}", self.calls().len()),
                encoded_payment_request: self.encoded_invoice.clone(),
            }),
        }
    }
}
