//! Test utilities for UMA exchanges.
//!
//! - Random secp256k1 key sets for a VASP
//! - A recording invoice creator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uma_lib::test_utils::{MockInvoiceCreator, TestVaspKeys};
//!
//! let vasp2 = TestVaspKeys::generate();
//! let creator = MockInvoiceCreator::new("lnbc1...");
//! ```

mod fixtures;
mod mock_invoice;

pub use fixtures::{random_keypair, TestVaspKeys};
pub use mock_invoice::{InvoiceCall, MockInvoiceCreator};
