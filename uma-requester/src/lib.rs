//! GraphQL requester for UMA receiving VASPs.
//!
//! A receiving VASP issues invoices through its node-operator service. This
//! crate carries the authenticated GraphQL transport for that service and a
//! [`GraphqlInvoiceCreator`] that plugs into
//! [`uma_lib::get_pay_req_response`].
//!
//! # Example
//!
//! ```rust,ignore
//! use uma_requester::{GraphqlInvoiceCreator, Requester, RequesterConfig};
//!
//! let config = RequesterConfig::from_env().expect("credentials in env");
//! let creator = GraphqlInvoiceCreator::new(Requester::new(config)?);
//! let response = uma_lib::get_pay_req_response(&pay_request, &creator, params).await?;
//! ```

mod config;
mod error;
mod invoice_creator;
mod requester;
mod signing;

pub use config::{validate_base_url, RequesterConfig, DEFAULT_BASE_URL};
pub use error::RequesterError;
pub use invoice_creator::{GraphqlInvoiceCreator, CREATE_LNURL_INVOICE_MUTATION};
pub use requester::{operation_name, Requester};
pub use signing::{Secp256k1SigningKey, SigningKey};

/// Result alias for requester operations.
pub type Result<T> = std::result::Result<T, RequesterError>;
