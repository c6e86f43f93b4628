//! pickshare-mock
//!
//! Deterministic quote providers for tests and offline runs.
//!
//! - [`MockQuoteProvider`] answers from static fixture prices (or a caller
//!   supplied table) and never touches the network.
//! - [`DynamicMockProvider`] defers every answer to a [`DynamicMockController`]
//!   so tests can script failures, hangs and delays per symbol.
#![warn(missing_docs)]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pickshare_core::{CancellationToken, PickError, Price, ProviderKey, QuoteProvider, Symbol};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Mock provider backed by fixture prices.
///
/// Special symbols:
/// - `FAIL` fails with a `Connector` error;
/// - `TIMEOUT` answers after a short delay;
/// - `ZERO` reports a price of `0`.
#[derive(Debug, Clone, Default)]
pub struct MockQuoteProvider {
    table: Option<HashMap<Symbol, Price>>,
}

impl MockQuoteProvider {
    /// Static provider key used in logs and error payloads.
    pub const KEY: ProviderKey = ProviderKey::new("pickshare-mock");

    /// Latency applied to the `TIMEOUT` symbol.
    pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

    /// Provider answering from the built-in fixtures.
    #[must_use]
    pub const fn new() -> Self {
        Self { table: None }
    }

    /// Provider answering only from the given `(symbol, price)` table.
    #[must_use]
    pub fn with_prices<I>(prices: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, Price)>,
    {
        Self {
            table: Some(prices.into_iter().collect()),
        }
    }

    fn lookup(&self, symbol: &Symbol) -> Result<Price, PickError> {
        let not_found = || PickError::not_found(format!("quote for {symbol}"));
        match &self.table {
            Some(table) => table.get(symbol).copied().ok_or_else(not_found),
            None => fixtures::quotes::by_symbol(symbol.as_str())
                .ok_or_else(not_found)?
                .parse(),
        }
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    async fn price(&self, symbol: &Symbol, cancel: &CancellationToken) -> Result<Price, PickError> {
        match symbol.as_str() {
            "FAIL" => {
                return Err(PickError::connector(
                    Self::KEY.as_str(),
                    "forced failure: quote",
                ));
            }
            "TIMEOUT" => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(PickError::Cancelled),
                    () = tokio::time::sleep(Self::TIMEOUT_DELAY) => {}
                }
                return Ok(Price::from_units(1));
            }
            _ => {}
        }
        self.lookup(symbol)
    }
}
