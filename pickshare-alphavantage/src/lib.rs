//! pickshare-alphavantage
//!
//! `QuoteProvider` implementation for the Alpha Vantage `GLOBAL_QUOTE`
//! endpoint. Rate-limit notices are absorbed by a bounded, cancellable
//! backoff-and-retry loop; every other failure is reported once as a typed
//! `PickError`.
#![warn(missing_docs)]

/// HTTP transport abstraction and the production `reqwest` transport.
pub mod adapter;
/// Jittered backoff helper.
pub mod backoff;
/// Response body classification.
pub mod parse;

mod builder;
mod config;

use std::sync::Arc;

use adapter::QuoteTransport;
use async_trait::async_trait;
use parse::Payload;
use pickshare_core::{CancellationToken, PickError, Price, ProviderKey, QuoteProvider, Symbol};

pub use builder::AlphaVantageClientBuilder;
pub use config::AlphaVantageConfig;

/// Alpha Vantage quote client.
///
/// Cheap to share behind an `Arc`; calls hold no mutable state and may run
/// concurrently.
pub struct AlphaVantageClient {
    transport: Arc<dyn QuoteTransport>,
    cfg: AlphaVantageConfig,
}

impl AlphaVantageClient {
    /// Static provider key used in logs and error payloads.
    pub const KEY: ProviderKey = ProviderKey::new("alphavantage");

    /// Build a client from an explicit transport and configuration.
    ///
    /// # Errors
    /// Returns `PickError::InvalidArg` if the configuration is invalid.
    pub fn from_parts(
        transport: Arc<dyn QuoteTransport>,
        cfg: AlphaVantageConfig,
    ) -> Result<Self, PickError> {
        cfg.validate()?;
        Ok(Self { transport, cfg })
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &AlphaVantageConfig {
        &self.cfg
    }

    fn backoff_ms(&self) -> u64 {
        u64::try_from(self.cfg.retry.backoff.as_millis()).unwrap_or(u64::MAX)
    }

    fn interpret(symbol: &Symbol, payload: Payload) -> Result<Option<Price>, PickError> {
        match payload {
            Payload::Price(p) => Ok(Some(p)),
            Payload::RateLimited(_) => Ok(None),
            Payload::NotFound => Err(PickError::not_found(format!("quote for {symbol}"))),
            Payload::ProviderError(msg) => Err(PickError::connector(Self::KEY.as_str(), msg)),
        }
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pickshare_alphavantage::price",
            skip_all,
            fields(symbol = %symbol),
        )
    )]
    async fn price(
        &self,
        symbol: &Symbol,
        cancel: &CancellationToken,
    ) -> Result<Price, PickError> {
        let url = self.cfg.quote_url(symbol);
        let retry = self.cfg.retry;
        let mut retries: u32 = 0;

        loop {
            let attempts = retries.saturating_add(1);
            let resp = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PickError::Cancelled),
                r = self.transport.get(&url) => r,
            };
            let resp = match resp {
                Ok(r) => r,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(symbol = %symbol, error = %e, "quote request failed");
                    return Err(e);
                }
            };
            if !resp.is_success() {
                let e = PickError::transport(
                    Self::KEY.as_str(),
                    format!("unexpected HTTP status {}", resp.status),
                );
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = %symbol, status = resp.status, "quote request rejected");
                return Err(e);
            }

            let payload = parse::classify(symbol, &resp.body)?;
            if let Some(price) = Self::interpret(symbol, payload)? {
                #[cfg(feature = "tracing")]
                tracing::debug!(symbol = %symbol, price = %price, attempts, "quote fetched");
                return Ok(price);
            }

            if retries >= retry.max_retries {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    symbol = %symbol,
                    attempts,
                    "rate limit persisted after every retry"
                );
                return Err(PickError::RateLimitExceeded {
                    attempts,
                    backoff_ms: self.backoff_ms(),
                });
            }

            let wait = backoff::jitter_wait(retry.backoff, retry.jitter_percent);
            #[cfg(feature = "tracing")]
            tracing::info!(
                symbol = %symbol,
                attempt = attempts,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "rate limited; backing off"
            );
            retries += 1;
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PickError::Cancelled),
                () = tokio::time::sleep(wait) => {}
            }
        }
    }
}
