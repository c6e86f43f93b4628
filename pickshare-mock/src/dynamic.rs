use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pickshare_core::{CancellationToken, PickError, Price, ProviderKey, QuoteProvider, Symbol};

/// Instruction for how a price request should behave for a given symbol.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided price immediately.
    Return(Price),
    /// Return the provided price after a delay.
    Delayed(Duration, Price),
    /// Fail immediately with the provided error.
    Fail(PickError),
    /// Never answer; only cancellation ends the call.
    Hang,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<Symbol, MockBehavior>,
    requests: Vec<Symbol>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockController {
    /// Set the behavior for price requests for a specific symbol.
    pub async fn set_behavior(&self, symbol: Symbol, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(symbol, behavior);
    }

    /// Set the same behavior for several symbols at once.
    pub async fn set_all<I>(&self, rules: I)
    where
        I: IntoIterator<Item = (Symbol, MockBehavior)>,
    {
        let mut guard = self.state.lock().await;
        guard.rules.extend(rules);
    }

    /// Symbols requested so far, in call order.
    pub async fn requests(&self) -> Vec<Symbol> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Total number of price calls received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.counters.calls.load(Ordering::SeqCst)
    }

    /// Calls currently executing.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were executing at the same time.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors, request logs and counters.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
        self.counters.calls.store(0, Ordering::SeqCst);
        self.counters.peak_in_flight.store(0, Ordering::SeqCst);
    }
}

// Decrements on drop so aborted calls are accounted for.
struct InFlight<'a>(&'a Counters);

impl<'a> InFlight<'a> {
    fn enter(c: &'a Counters) -> Self {
        let now = c.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        c.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(c)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A provider that defers all behavior to an external controller.
pub struct DynamicMockProvider {
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockProvider {
    /// Static provider key used in logs and error payloads.
    pub const KEY: ProviderKey = ProviderKey::new("pickshare-dynamic-mock");

    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<dyn QuoteProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let counters = Arc::new(Counters::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            counters: Arc::clone(&counters),
        };
        let me = Arc::new(Self { state, counters });
        (me as Arc<dyn QuoteProvider>, controller)
    }
}

#[async_trait]
impl QuoteProvider for DynamicMockProvider {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    async fn price(&self, symbol: &Symbol, cancel: &CancellationToken) -> Result<Price, PickError> {
        let _guard = InFlight::enter(&self.counters);
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        // Snapshot the rule without holding the lock across await points.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(symbol.clone());
            guard.rules.get(symbol).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(p)) => Ok(p),
            Some(MockBehavior::Delayed(d, p)) => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(PickError::Cancelled),
                    () = tokio::time::sleep(d) => Ok(p),
                }
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                cancel.cancelled().await;
                Err(PickError::Cancelled)
            }
            None => Err(PickError::not_found(format!("quote for {symbol}"))),
        }
    }
}
