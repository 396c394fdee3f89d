//! Integration tests for counterparty public key discovery.
//!
//! A wiremock server stands in for the counterparty VASP. Its domain is
//! `localhost:{port}`, which the fetcher reaches over plain http.

mod common;

use common::{local_domain, mount_pubkey};
use uma_lib::test_utils::TestVaspKeys;
use uma_lib::{
    FetcherConfig, InMemoryPublicKeyCache, PublicKeyCache, PublicKeyFetcher, UmaError,
    UmaErrorCode,
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn fetcher() -> PublicKeyFetcher {
    PublicKeyFetcher::new(FetcherConfig::default().with_timeout(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_populates_cache_once() {
    let server = MockServer::start().await;
    let keys = TestVaspKeys::generate();
    mount_pubkey(&server, &keys, 1).await;

    let domain = local_domain(&server);
    let cache = InMemoryPublicKeyCache::new();
    let fetcher = fetcher();

    let first = fetcher
        .fetch_public_key_for_vasp(&domain, &cache)
        .await
        .unwrap();
    assert_eq!(first, keys.pubkey_response());
    assert_eq!(cache.fetch_public_key_for_vasp(&domain), Some(first.clone()));

    // Served from cache; the mock's expect(1) fails on drop otherwise.
    let second = fetcher
        .fetch_public_key_for_vasp(&domain, &cache)
        .await
        .unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_not_found_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/lnurlpubkey"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let domain = local_domain(&server);
    let cache = InMemoryPublicKeyCache::new();
    let err = fetcher()
        .fetch_public_key_for_vasp(&domain, &cache)
        .await
        .unwrap_err();

    assert_eq!(err.code(), UmaErrorCode::CounterpartyFetchFailed);
    assert!(err.is_retryable());
    assert!(err.to_string().contains("404"));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_malformed_document_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/lnurlpubkey"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"signingPubKey\":"))
        .mount(&server)
        .await;

    let domain = local_domain(&server);
    let cache = InMemoryPublicKeyCache::new();
    let err = fetcher()
        .fetch_public_key_for_vasp(&domain, &cache)
        .await
        .unwrap_err();

    match err {
        UmaError::CounterpartyFetchFailed { domain: d, .. } => assert_eq!(d, domain),
        other => panic!("unexpected error: {other}"),
    }
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_slow_counterparty_times_out() {
    let server = MockServer::start().await;
    let keys = TestVaspKeys::generate();
    Mock::given(method("GET"))
        .and(path("/.well-known/lnurlpubkey"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(keys.pubkey_response())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = PublicKeyFetcher::new(FetcherConfig::default().with_timeout(1)).unwrap();
    let cache = InMemoryPublicKeyCache::new();
    let err = fetcher
        .fetch_public_key_for_vasp(&local_domain(&server), &cache)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out after 1s"));
}

#[tokio::test]
async fn test_shared_cache_across_domains() {
    let server_a = MockServer::start().await;
    let server_b = MockServer::start().await;
    let keys_a = TestVaspKeys::generate();
    let keys_b = TestVaspKeys::generate();
    mount_pubkey(&server_a, &keys_a, 1).await;
    mount_pubkey(&server_b, &keys_b, 1).await;

    let cache = InMemoryPublicKeyCache::new();
    let fetcher = fetcher();
    let a = fetcher
        .fetch_public_key_for_vasp(&local_domain(&server_a), &cache)
        .await
        .unwrap();
    let b = fetcher
        .fetch_public_key_for_vasp(&local_domain(&server_b), &cache)
        .await
        .unwrap();

    assert_eq!(a, keys_a.pubkey_response());
    assert_eq!(b, keys_b.pubkey_response());
    assert_eq!(cache.len(), 2);
}
