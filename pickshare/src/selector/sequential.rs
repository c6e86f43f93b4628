use pickshare_core::{CancellationToken, PickError, QuoteProvider, Symbol};

use super::Outcome;
use crate::PickShare;

impl PickShare {
    /// Fetch symbols one at a time, in input order, handing each outcome to
    /// `sink` before the next request is issued.
    pub(super) async fn fetch_in_order<F>(
        &self,
        symbols: &[Symbol],
        cancel: &CancellationToken,
        mut sink: F,
    ) -> Result<(), PickError>
    where
        F: FnMut(Outcome) -> Result<(), PickError>,
    {
        for (idx, symbol) in symbols.iter().enumerate() {
            let res = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PickError::Cancelled),
                r = self.provider.price(symbol, cancel) => r,
            };
            sink((idx, symbol.clone(), res))?;
        }
        Ok(())
    }
}
