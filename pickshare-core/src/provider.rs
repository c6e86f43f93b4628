use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use pickshare_types::{PickError, Price, ProviderKey, Quote, Symbol};

/// A source of current prices for ticker symbols.
///
/// Implementations must be safe to call from many tasks at once: every call is
/// an independent request/response cycle with no shared mutable state that
/// could leak between symbols.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable provider name used in logs and error payloads.
    fn key(&self) -> ProviderKey;

    /// Fetch the current price for `symbol`.
    ///
    /// Any error means "price unknown" to the selector unless it is
    /// `PickError::Cancelled` (see [`PickError::is_unknown_price`]).
    async fn price(&self, symbol: &Symbol, cancel: &CancellationToken)
    -> Result<Price, PickError>;

    /// Fetch the current price and pair it with its symbol.
    async fn quote(&self, symbol: &Symbol, cancel: &CancellationToken) -> Result<Quote, PickError> {
        let price = self.price(symbol, cancel).await?;
        Ok(Quote::new(symbol.clone(), price))
    }
}
