use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pickshare_core::PickError;
use url::Url;

use crate::AlphaVantageClient;

/// Status code and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl RawResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP abstraction (so we can inject scripted responses in tests).
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    /// Issue a GET request for `url` and return the raw response.
    ///
    /// Errors are transport failures only; non-2xx statuses are returned as
    /// responses.
    async fn get(&self, url: &Url) -> Result<RawResponse, PickError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the given per-request timeout.
    ///
    /// # Errors
    /// Returns `PickError::Other` if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, PickError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PickError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuoteTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, PickError> {
        // `without_url` keeps the api key out of error messages.
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                PickError::transport(AlphaVantageClient::KEY.as_str(), e.without_url().to_string())
            })?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            PickError::transport(AlphaVantageClient::KEY.as_str(), e.without_url().to_string())
        })?;
        Ok(RawResponse { status, body })
    }
}

impl dyn QuoteTransport {
    /// Build a `QuoteTransport` from a closure receiving the full request URL.
    pub fn from_fn<F>(f: F) -> Arc<dyn QuoteTransport>
    where
        F: Send + Sync + 'static + Fn(&Url) -> Result<RawResponse, PickError>,
    {
        struct FnTransport<F>(F);

        #[async_trait]
        impl<F> QuoteTransport for FnTransport<F>
        where
            F: Send + Sync + 'static + Fn(&Url) -> Result<RawResponse, PickError>,
        {
            async fn get(&self, url: &Url) -> Result<RawResponse, PickError> {
                (self.0)(url)
            }
        }

        Arc::new(FnTransport(f))
    }
}
