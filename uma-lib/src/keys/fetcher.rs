//! HTTP fetcher for counterparty public key documents.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cache::PublicKeyCache;
use crate::protocol::{pubkey_url, PubKeyResponse};
use crate::{Result, UmaError};

/// Configuration for [`PublicKeyFetcher`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Upper bound on a single fetch, including connect and body read.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with each fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("uma-lib/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetcherConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Resolves counterparty public keys through a cache, falling back to
/// `GET {scheme}://{domain}/.well-known/lnurlpubkey`.
///
/// The fetcher holds no per-domain state and never retries. Dropping the
/// returned future cancels the request in flight.
pub struct PublicKeyFetcher {
    config: FetcherConfig,
    client: reqwest::Client,
}

impl PublicKeyFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UmaError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Return the public keys for `vasp_domain`.
    ///
    /// A cached entry is returned unchanged, with no freshness check. On a
    /// miss the document is fetched, stored in `cache`, and returned.
    ///
    /// # Errors
    ///
    /// `CounterpartyFetchFailed` on transport errors, timeouts, any status
    /// other than 200, or a body that is not a valid key document. The cache
    /// is left untouched on failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, cache)))]
    pub async fn fetch_public_key_for_vasp<C>(
        &self,
        vasp_domain: &str,
        cache: &C,
    ) -> Result<PubKeyResponse>
    where
        C: PublicKeyCache + ?Sized,
    {
        if let Some(public_key) = cache.fetch_public_key_for_vasp(vasp_domain) {
            #[cfg(feature = "tracing")]
            tracing::debug!("public key cache hit");
            return Ok(public_key);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("public key cache miss, fetching");

        let public_key = self.fetch_uncached(vasp_domain).await?;
        cache.add_public_key_for_vasp(vasp_domain, public_key.clone());
        Ok(public_key)
    }

    async fn fetch_uncached(&self, vasp_domain: &str) -> Result<PubKeyResponse> {
        let response = self
            .client
            .get(pubkey_url(vasp_domain))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(vasp_domain, e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(UmaError::fetch_failed(
                vasp_domain,
                format!("invalid response from VASP: {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(vasp_domain, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            UmaError::fetch_failed(vasp_domain, format!("malformed public key document: {}", e))
        })
    }

    /// Map reqwest errors to `CounterpartyFetchFailed`.
    fn map_reqwest_error(&self, vasp_domain: &str, e: reqwest::Error) -> UmaError {
        if e.is_timeout() {
            UmaError::fetch_failed(
                vasp_domain,
                format!("timed out after {}s", self.config.timeout_secs),
            )
        } else {
            UmaError::fetch_failed(vasp_domain, e.to_string())
        }
    }
}
