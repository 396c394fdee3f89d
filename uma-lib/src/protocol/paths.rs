//! Well-known URL builders.
//!
//! Counterparties are reached at fixed paths under their domain. Domains that
//! start with `localhost:` are addressed over plain HTTP for local testing;
//! every other domain uses HTTPS.

use url::Url;

use crate::Result;

/// Path segment shared by all well-known documents.
pub const WELL_KNOWN_SEGMENT: &str = ".well-known";

/// Path segment for LNURLP requests.
pub const LNURLP_SEGMENT: &str = "lnurlp";

/// Path of the public key document.
pub const PUBKEY_PATH: &str = "/.well-known/lnurlpubkey";

/// Return the URL scheme used to reach `domain`.
///
/// # Example
///
/// ```
/// use uma_lib::protocol::scheme_for_domain;
///
/// assert_eq!(scheme_for_domain("vasp2.com"), "https");
/// assert_eq!(scheme_for_domain("localhost:8080"), "http");
/// ```
pub fn scheme_for_domain(domain: &str) -> &'static str {
    if domain.starts_with("localhost:") {
        "http"
    } else {
        "https"
    }
}

/// Build the public key document URL for a VASP domain.
///
/// Format: `{scheme}://{domain}/.well-known/lnurlpubkey`
pub fn pubkey_url(domain: &str) -> String {
    format!("{}://{}{}", scheme_for_domain(domain), domain, PUBKEY_PATH)
}

/// Build the LNURLP request URL for a receiver, without query parameters.
///
/// Format: `{scheme}://{domain}/.well-known/lnurlp/{user}`
pub fn lnurlp_url(user: &str, domain: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}://{}", scheme_for_domain(domain), domain))?;
    url.set_path(&format!("/{}/{}/{}", WELL_KNOWN_SEGMENT, LNURLP_SEGMENT, user));
    Ok(url)
}

/// Extract the receiver user from a well-known LNURLP path.
///
/// Returns `None` unless the path is exactly `/.well-known/lnurlp/{user}`
/// with a non-empty user.
pub fn lnurlp_user_from_path(path: &str) -> Option<&str> {
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() != 4
        || !parts[0].is_empty()
        || parts[1] != WELL_KNOWN_SEGMENT
        || parts[2] != LNURLP_SEGMENT
        || parts[3].is_empty()
    {
        return None;
    }
    Some(parts[3])
}
