//! Invoice creation capability.
//!
//! Receiving VASPs issue the Lightning invoice for a pay request through
//! whatever node operator they use. This crate only defines the contract and
//! passes the amount and metadata through unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// An invoice issued by the receiver's node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Identifier assigned by the issuing service.
    pub id: String,
    /// BOLT11 encoded payment request.
    pub encoded_payment_request: String,
}

/// Creates LNURL invoices whose description hash commits to `metadata`.
#[async_trait]
pub trait LnurlInvoiceCreator: Send + Sync {
    /// Create an invoice for `amount_msats` on node `node_id`.
    ///
    /// `master_seed` is only needed by nodes whose keys are held by the
    /// caller; hosted nodes ignore it.
    async fn create_lnurl_invoice(
        &self,
        node_id: &str,
        master_seed: Option<&[u8]>,
        amount_msats: i64,
        metadata: &str,
        expiry_secs: Option<i32>,
    ) -> Result<Invoice>;
}
