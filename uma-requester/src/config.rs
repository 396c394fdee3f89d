//! Requester configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{RequesterError, Result};

/// GraphQL endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.lightspark.com/graphql/server/2023-09-13";

/// API credentials and endpoint for the node-operator service.
#[derive(Clone, Serialize, Deserialize)]
pub struct RequesterConfig {
    /// API token client id, sent as the basic-auth user.
    pub api_token_client_id: String,

    /// API token client secret, sent as the basic-auth password.
    pub api_token_client_secret: String,

    /// GraphQL endpoint. `None` means [`DEFAULT_BASE_URL`].
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl std::fmt::Debug for RequesterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequesterConfig")
            .field("api_token_client_id", &self.api_token_client_id)
            .field("api_token_client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RequesterConfig {
    /// Create a configuration targeting [`DEFAULT_BASE_URL`].
    pub fn new(
        api_token_client_id: impl Into<String>,
        api_token_client_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_token_client_id: api_token_client_id.into(),
            api_token_client_secret: api_token_client_secret.into(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }

    /// Set the GraphQL endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The endpoint requests are sent to.
    pub fn server_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both credentials are set.
    ///
    /// ```bash
    /// export LIGHTSPARK_API_TOKEN_CLIENT_ID=...
    /// export LIGHTSPARK_API_TOKEN_CLIENT_SECRET=...
    /// export LIGHTSPARK_BASE_URL=https://api.lightspark.com/graphql/server/2023-09-13  # optional
    /// export LIGHTSPARK_TIMEOUT=30  # optional
    /// ```
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("LIGHTSPARK_API_TOKEN_CLIENT_ID").ok()?;
        let client_secret = std::env::var("LIGHTSPARK_API_TOKEN_CLIENT_SECRET").ok()?;

        let mut config = Self::new(client_id, client_secret);

        if let Ok(base_url) = std::env::var("LIGHTSPARK_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Ok(timeout) = std::env::var("LIGHTSPARK_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config = config.with_timeout(secs);
            }
        }

        Some(config)
    }
}

/// Check that `base_url` is a URL and uses https, unless it targets a local
/// host (`localhost`, `127.0.0.1`, or a `.local` / `.internal` name).
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)
        .map_err(|_| RequesterError::InvalidBaseUrl("not a valid URL".to_string()))?;

    let host = url.host_str().unwrap_or_default();
    let tld = host.rsplit('.').next().unwrap_or_default();
    let is_local = host == "localhost" || host == "127.0.0.1" || tld == "local" || tld == "internal";

    if url.scheme() != "https" && !is_local {
        return Err(RequesterError::InvalidBaseUrl(
            "must be https:// if not targeting localhost".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: RequesterConfig =
            serde_json::from_str(r#"{"api_token_client_id":"id","api_token_client_secret":"s"}"#)
                .unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.server_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = RequesterConfig::new("client", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("client"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url(DEFAULT_BASE_URL).is_ok());
        assert!(validate_base_url("http://localhost:5000/graphql").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("http://lightspark.local/graphql").is_ok());
        assert!(validate_base_url("http://api.svc.internal").is_ok());

        assert!(matches!(
            validate_base_url("http://api.lightspark.com/graphql"),
            Err(RequesterError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            validate_base_url("not a url"),
            Err(RequesterError::InvalidBaseUrl(_))
        ));
    }
}
