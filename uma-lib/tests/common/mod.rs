//! Shared helpers for uma-lib integration tests.
//!
//! Key fixtures and the recording invoice creator come from
//! `uma_lib::test_utils`; this module only adds the mock VASP servers.

#![allow(dead_code)]

use uma_lib::test_utils::TestVaspKeys;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Domain of a mock server, in the `localhost:{port}` form served over http.
pub fn local_domain(server: &MockServer) -> String {
    format!("localhost:{}", server.address().port())
}

/// Serve `keys` at `/.well-known/lnurlpubkey`, expecting exactly `times` hits.
pub async fn mount_pubkey(server: &MockServer, keys: &TestVaspKeys, times: u64) {
    Mock::given(method("GET"))
        .and(path("/.well-known/lnurlpubkey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keys.pubkey_response()))
        .expect(times)
        .mount(server)
        .await;
}
