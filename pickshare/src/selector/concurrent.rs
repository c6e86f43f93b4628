use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use pickshare_core::{CancellationToken, PickError, QuoteProvider, Symbol};
use tokio::sync::Semaphore;
use tokio::task::AbortHandle;

use super::Outcome;
use crate::PickShare;

// Spawned fetches must not outlive the selection that started them.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for h in &self.0 {
            h.abort();
        }
    }
}

impl PickShare {
    /// Spawn one fetch task per symbol and hand outcomes to `sink` in
    /// completion order.
    ///
    /// At most `in_flight_limit()` provider calls run at the same time. Tasks
    /// still pending when this future returns or is dropped are aborted.
    pub(super) async fn fan_out<F>(
        &self,
        symbols: &[Symbol],
        cancel: &CancellationToken,
        mut sink: F,
    ) -> Result<(), PickError>
    where
        F: FnMut(Outcome) -> Result<(), PickError>,
    {
        let permits = Arc::new(Semaphore::new(self.in_flight_limit()));
        let mut tasks = AbortOnDrop(Vec::with_capacity(symbols.len()));
        let mut futs = FuturesUnordered::new();

        for (idx, symbol) in symbols.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let permits = Arc::clone(&permits);
            let cancel = cancel.clone();
            let sym = symbol.clone();
            let handle = tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return Err(PickError::Other("in-flight limiter closed".into()));
                };
                provider.price(&sym, &cancel).await
            });
            tasks.0.push(handle.abort_handle());

            let symbol = symbol.clone();
            futs.push(async move {
                let res = handle
                    .await
                    .unwrap_or_else(|e| Err(PickError::Other(format!("fetch task failed: {e}"))));
                (idx, symbol, res)
            });
        }

        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(PickError::Cancelled),
                n = futs.next() => n,
            };
            let Some(outcome) = next else { break };
            sink(outcome)?;
        }
        Ok(())
    }
}
