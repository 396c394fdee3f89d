//! Authenticated GraphQL transport.
//!
//! Each request is a JSON `POST` of
//! `{operationName, query, variables, nonce, expires_at}` with basic-auth
//! credentials. When a [`SigningKey`] is supplied the body carries a random
//! nonce and a one-hour expiry, and its signature travels in
//! `X-Lightspark-Signing` as `{"v":1,"signature":base64(sig)}`.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{validate_base_url, RequesterConfig};
use crate::signing::SigningKey;
use crate::{RequesterError, Result};

static OPERATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:query|mutation)\s+(?P<OperationName>\w+)")
        .expect("operation name pattern compiles")
});

/// Upper bound (exclusive) for signed request nonces.
const NONCE_BOUND: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Extract the operation name from a `query Name` or `mutation Name` document.
pub fn operation_name(query: &str) -> Result<&str> {
    OPERATION_NAME
        .captures(query)
        .and_then(|caps| caps.name("OperationName"))
        .map(|m| m.as_str())
        .ok_or_else(|| RequesterError::InvalidQuery("no query or mutation name".to_string()))
}

#[derive(Serialize)]
struct GraphqlPayload<'a> {
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    query: &'a str,
    variables: &'a Value,
    nonce: u64,
    expires_at: String,
}

#[derive(Serialize)]
struct SigningHeader {
    v: u8,
    signature: String,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<GraphqlErrorExtensions>,
}

#[derive(Deserialize)]
struct GraphqlErrorExtensions {
    #[serde(default)]
    error_name: Option<String>,
}

/// GraphQL client for the node-operator service.
pub struct Requester {
    config: RequesterConfig,
    client: reqwest::Client,
}

impl Requester {
    /// Create a requester. A configured base URL is validated up front.
    pub fn new(config: RequesterConfig) -> Result<Self> {
        if let Some(base_url) = &config.base_url {
            validate_base_url(base_url)?;
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &RequesterConfig {
        &self.config
    }

    /// Product/version string sent as `User-Agent` and `X-Lightspark-SDK`.
    pub fn user_agent() -> String {
        format!("uma-requester/{} rust", env!("CARGO_PKG_VERSION"))
    }

    /// Execute `query` and return the response `data` object.
    ///
    /// # Errors
    ///
    /// - `InvalidQuery` if no operation name can be extracted
    /// - `InvalidBaseUrl` if the endpoint fails validation
    /// - `Transport` / `HttpStatus` on network failures or non-2xx status
    /// - `Graphql` for the first entry of a response `errors` array
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(operation = tracing::field::Empty))
    )]
    pub async fn execute_graphql(
        &self,
        query: &str,
        variables: Value,
        signing_key: Option<&dyn SigningKey>,
    ) -> Result<Value> {
        let operation = operation_name(query)?;

        #[cfg(feature = "tracing")]
        tracing::Span::current().record("operation", operation);

        let (nonce, expires_at) = match signing_key {
            Some(_) => (
                OsRng.gen_range(0..NONCE_BOUND),
                (Utc::now() + chrono::Duration::hours(1))
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            None => (0, String::new()),
        };

        let body = serde_json::to_vec(&GraphqlPayload {
            operation_name: operation,
            query,
            variables: &variables,
            nonce,
            expires_at,
        })
        .map_err(|e| RequesterError::InvalidQuery(format!("error when encoding payload: {}", e)))?;

        let server_url = self.config.server_url();
        validate_base_url(server_url)?;

        let user_agent = Self::user_agent();
        let mut request = self
            .client
            .post(server_url)
            .basic_auth(
                &self.config.api_token_client_id,
                Some(&self.config.api_token_client_secret),
            )
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("X-GraphQL-Operation", operation)
            .header(reqwest::header::USER_AGENT, &user_agent)
            .header("X-Lightspark-SDK", &user_agent);

        if let Some(key) = signing_key {
            let signature = key.sign(&body)?;
            let header = serde_json::to_string(&SigningHeader {
                v: 1,
                signature: BASE64.encode(signature),
            })
            .map_err(|e| RequesterError::Signing(e.to_string()))?;
            request = request.header("X-Lightspark-Signing", header);
        }

        let response = request.body(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(%status, "graphql request rejected");
            return Err(RequesterError::HttpStatus(status));
        }

        let bytes = response.bytes().await?;
        decode_response(&bytes)
    }
}

fn decode_response(bytes: &[u8]) -> Result<Value> {
    let response: GraphqlResponse = serde_json::from_slice(bytes)
        .map_err(|e| RequesterError::MalformedResponse(e.to_string()))?;

    if let Some(first) = response.errors.into_iter().next() {
        return Err(RequesterError::Graphql {
            name: first.extensions.and_then(|ext| ext.error_name),
            message: first.message,
        });
    }

    response
        .data
        .ok_or_else(|| RequesterError::MalformedResponse("missing data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_name() {
        assert_eq!(
            operation_name("mutation CreateLnurlInvoice($node_id: ID!) { x }").unwrap(),
            "CreateLnurlInvoice"
        );
        assert_eq!(operation_name("\n  QUERY CurrentAccount { id }").unwrap(), "CurrentAccount");
        assert!(matches!(
            operation_name("{ current_account { id } }"),
            Err(RequesterError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_decode_data() {
        let data = decode_response(br#"{"data":{"ok":true}}"#).unwrap();
        assert_eq!(data["ok"], Value::Bool(true));
    }

    #[test]
    fn test_decode_named_error() {
        let err = decode_response(
            br#"{"errors":[{"message":"bad node","extensions":{"error_name":"NotFound"}}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "NotFound - bad node");
    }

    #[test]
    fn test_decode_unnamed_error() {
        let err = decode_response(br#"{"errors":[{"message":"oops","extensions":{}}],"data":null}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "oops");
    }

    #[test]
    fn test_decode_missing_data() {
        assert!(matches!(
            decode_response(b"{}"),
            Err(RequesterError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_response(b"<html>"),
            Err(RequesterError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rejects_plain_http_base_url() {
        let config = RequesterConfig::new("id", "secret").with_base_url("http://example.com/graphql");
        assert!(matches!(
            Requester::new(config),
            Err(RequesterError::InvalidBaseUrl(_))
        ));
    }
}
