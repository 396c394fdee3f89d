//! UMA address parsing.
//!
//! An UMA address has the form `$user@domain`. The leading `$` is part of the
//! user component and is kept verbatim, since it appears in the LNURLP path
//! and in signed payloads.
//!
//! # Examples
//!
//! ```rust
//! use uma_lib::UmaAddress;
//!
//! let address: UmaAddress = "$bob@vasp2.com".parse()?;
//! assert_eq!(address.user(), "$bob");
//! assert_eq!(address.domain(), "vasp2.com");
//! # Ok::<(), uma_lib::UmaError>(())
//! ```

use crate::{Result, UmaError};
use std::fmt;
use std::str::FromStr;

/// A parsed `user@domain` address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UmaAddress {
    user: String,
    domain: String,
}

impl UmaAddress {
    /// Parse an address, rejecting anything that is not exactly `user@domain`.
    pub fn parse(address: &str) -> Result<Self> {
        let mut parts = address.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(domain), None) if !user.is_empty() && !domain.is_empty() => {
                Ok(Self {
                    user: user.to_string(),
                    domain: domain.to_string(),
                })
            }
            _ => Err(UmaError::InvalidAddress(address.to_string())),
        }
    }

    /// The user component, including any `$` prefix.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The VASP domain, possibly with a port (`localhost:8080`).
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl FromStr for UmaAddress {
    type Err = UmaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UmaAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = UmaAddress::parse("$alice@vasp1.com").unwrap();
        assert_eq!(address.user(), "$alice");
        assert_eq!(address.domain(), "vasp1.com");
        assert_eq!(address.to_string(), "$alice@vasp1.com");
    }

    #[test]
    fn test_parse_address_with_port() {
        let address: UmaAddress = "$bob@localhost:8080".parse().unwrap();
        assert_eq!(address.domain(), "localhost:8080");
    }

    #[test]
    fn test_reject_malformed_addresses() {
        for bad in ["alice", "@vasp.com", "alice@", "a@b@c", ""] {
            let err = UmaAddress::parse(bad).unwrap_err();
            assert!(matches!(err, UmaError::InvalidAddress(_)), "{bad}");
        }
    }
}
