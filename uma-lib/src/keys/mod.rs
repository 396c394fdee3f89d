//! Counterparty public key discovery.
//!
//! A VASP publishes its keys at `/.well-known/lnurlpubkey`. Lookups go
//! through a caller-supplied [`PublicKeyCache`] first and fall back to an
//! HTTP fetch, populating the cache on success.
//!
//! ```rust,ignore
//! use uma_lib::keys::{FetcherConfig, InMemoryPublicKeyCache, PublicKeyFetcher};
//!
//! let cache = InMemoryPublicKeyCache::new();
//! let fetcher = PublicKeyFetcher::new(FetcherConfig::default().with_timeout(5))?;
//!
//! let keys = fetcher.fetch_public_key_for_vasp("vasp1.com", &cache).await?;
//! ```

mod cache;
mod fetcher;

pub use cache::{InMemoryPublicKeyCache, PublicKeyCache};
pub use fetcher::{FetcherConfig, PublicKeyFetcher};
