#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pickshare::{CancellationToken, PickError, Price, ProviderKey, QuoteProvider, Symbol};

/// In-memory provider used by integration tests.
///
/// Prices, failures and per-symbol latency are fixed at build time.
pub struct MockProvider {
    pub prices: HashMap<Symbol, Price>,
    pub failures: HashMap<Symbol, PickError>,
    pub delays: HashMap<Symbol, Duration>,
    pub default_delay: Duration,
}

pub struct MockProviderBuilder {
    inner: MockProvider,
}

impl MockProvider {
    pub fn builder() -> MockProviderBuilder {
        MockProviderBuilder {
            inner: Self {
                prices: HashMap::new(),
                failures: HashMap::new(),
                delays: HashMap::new(),
                default_delay: Duration::ZERO,
            },
        }
    }
}

impl MockProviderBuilder {
    pub fn prices<I>(mut self, prices: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, Price)>,
    {
        self.inner.prices.extend(prices);
        self
    }

    pub fn price(mut self, symbol: &str, price: &str) -> Self {
        self.inner
            .prices
            .insert(Symbol::new(symbol).unwrap(), price.parse().unwrap());
        self
    }

    pub fn fail(mut self, symbol: &str, err: PickError) -> Self {
        self.inner.failures.insert(Symbol::new(symbol).unwrap(), err);
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.inner.default_delay = d;
        self
    }

    pub fn delay_for(mut self, symbol: &Symbol, d: Duration) -> Self {
        self.inner.delays.insert(symbol.clone(), d);
        self
    }

    pub fn build(self) -> Arc<MockProvider> {
        Arc::new(self.inner)
    }
}

#[async_trait]
impl QuoteProvider for MockProvider {
    fn key(&self) -> ProviderKey {
        ProviderKey::new("test-mock")
    }

    async fn price(&self, symbol: &Symbol, cancel: &CancellationToken) -> Result<Price, PickError> {
        let d = self
            .delays
            .get(symbol)
            .copied()
            .unwrap_or(self.default_delay);
        if !d.is_zero() {
            tokio::select! {
                () = cancel.cancelled() => return Err(PickError::Cancelled),
                () = tokio::time::sleep(d) => {}
            }
        }
        if let Some(e) = self.failures.get(symbol) {
            return Err(e.clone());
        }
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| PickError::not_found(format!("quote for {symbol}")))
    }
}
