use std::sync::Arc;
use std::time::Duration;

use pickshare_core::{PickError, RetryConfig};
use url::Url;

use crate::adapter::{QuoteTransport, ReqwestTransport};
use crate::{AlphaVantageClient, AlphaVantageConfig};

/// Builder for [`AlphaVantageClient`].
pub struct AlphaVantageClientBuilder {
    api_key: String,
    base_url: Option<Url>,
    retry: RetryConfig,
    http_timeout: Duration,
    transport: Option<Arc<dyn QuoteTransport>>,
}

impl AlphaVantageClient {
    /// Start building a client for the given api key.
    ///
    /// ```rust,ignore
    /// let av = AlphaVantageClient::builder(std::env::var("ALPHAVANTAGE_API_KEY")?)
    ///     .backoff(Duration::from_secs(60))
    ///     .max_retries(5)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> AlphaVantageClientBuilder {
        AlphaVantageClientBuilder {
            api_key: api_key.into(),
            base_url: None,
            retry: RetryConfig::default(),
            http_timeout: Duration::from_secs(30),
            transport: None,
        }
    }
}

impl AlphaVantageClientBuilder {
    /// Override the endpoint (e.g. a local mock server).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Pause between rate-limited attempts.
    #[must_use]
    pub const fn backoff(mut self, backoff: Duration) -> Self {
        self.retry.backoff = backoff;
        self
    }

    /// Re-issues allowed after the first rate-limited request.
    #[must_use]
    pub const fn max_retries(mut self, n: u32) -> Self {
        self.retry.max_retries = n;
        self
    }

    /// Random jitter added to each backoff, as a percentage in [0, 100].
    #[must_use]
    pub const fn jitter_percent(mut self, pct: u8) -> Self {
        self.retry.jitter_percent = pct;
        self
    }

    /// Replace the whole retry budget.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Per-request HTTP timeout for the default transport.
    ///
    /// Ignored when a custom transport is supplied.
    #[must_use]
    pub const fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Use a custom transport instead of `reqwest`.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn QuoteTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `PickError::InvalidArg` for a blank api key or an unusable base
    /// URL, and `PickError::Other` if the HTTP client cannot be created.
    pub fn build(self) -> Result<AlphaVantageClient, PickError> {
        let mut cfg = AlphaVantageConfig::new(self.api_key)?;
        if let Some(url) = self.base_url {
            cfg.base_url = url;
        }
        cfg.retry = self.retry;
        cfg.http_timeout = self.http_timeout;

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(cfg.http_timeout)?),
        };
        AlphaVantageClient::from_parts(transport, cfg)
    }
}
