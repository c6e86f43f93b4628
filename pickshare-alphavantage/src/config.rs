use core::fmt;
use std::time::Duration;

use pickshare_core::{PickError, RetryConfig, Symbol};
use url::Url;

/// Connection settings for the Alpha Vantage quote endpoint.
#[derive(Clone)]
pub struct AlphaVantageConfig {
    /// Endpoint the query parameters are appended to.
    pub base_url: Url,
    /// Access credential sent as `apikey`.
    pub api_key: String,
    /// Backoff-and-retry budget for rate-limit notices.
    pub retry: RetryConfig,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

impl AlphaVantageConfig {
    /// Public Alpha Vantage query endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.alphavantage.co/query";

    /// Configuration for the public endpoint with default retry settings.
    ///
    /// # Errors
    /// Returns `PickError::InvalidArg` if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PickError> {
        let base_url = Url::parse(Self::DEFAULT_BASE_URL)
            .map_err(|e| PickError::InvalidArg(format!("invalid base url: {e}")))?;
        let cfg = Self {
            base_url,
            api_key: api_key.into(),
            retry: RetryConfig::default(),
            http_timeout: Duration::from_secs(30),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants that cannot be expressed in the types.
    ///
    /// # Errors
    /// Returns `PickError::InvalidArg` for a blank api key, a base URL that
    /// cannot carry query parameters, a jitter percentage above 100, or a
    /// retry budget of `u32::MAX` (the attempt count must fit in a `u32`).
    pub fn validate(&self) -> Result<(), PickError> {
        if self.api_key.trim().is_empty() {
            return Err(PickError::InvalidArg("api key must not be empty".into()));
        }
        if self.base_url.cannot_be_a_base() {
            return Err(PickError::InvalidArg(format!(
                "base url cannot carry a query: {}",
                self.base_url
            )));
        }
        if self.retry.jitter_percent > 100 {
            return Err(PickError::InvalidArg(format!(
                "jitter_percent must be within [0, 100], got {}",
                self.retry.jitter_percent
            )));
        }
        if self.retry.max_retries == u32::MAX {
            return Err(PickError::InvalidArg(format!(
                "max_retries must be below {}",
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Full `GLOBAL_QUOTE` request URL for `symbol`.
    #[must_use]
    pub fn quote_url(&self, symbol: &Symbol) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("function", "GLOBAL_QUOTE")
            .append_pair("symbol", symbol.as_str())
            .append_pair("apikey", &self.api_key);
        url
    }
}

impl fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("retry", &self.retry)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}
