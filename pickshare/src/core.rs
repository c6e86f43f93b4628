use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use pickshare_core::{ExecutionMode, PickConfig, PickError, Price, QuoteProvider, TieBreak};
use tokio::sync::Semaphore;

/// Selector that fetches quotes through one provider and picks the
/// highest-priced symbol below a ceiling.
pub struct PickShare {
    pub(crate) provider: Arc<dyn QuoteProvider>,
    pub(crate) cfg: PickConfig,
}

/// Builder for constructing a `PickShare` selector with custom configuration.
pub struct PickShareBuilder {
    provider: Option<Arc<dyn QuoteProvider>>,
    cfg: PickConfig,
}

impl Default for PickShareBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PickShareBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: ceiling `500`, concurrent execution, arbitrary tie-break, one
    /// in-flight request per available CPU, no overall deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: PickConfig::default(),
        }
    }

    /// Register the quote provider. A later call replaces an earlier one.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn QuoteProvider>) -> Self {
        self.provider = Some(p);
        self
    }

    /// Replace the whole configuration record.
    #[must_use]
    pub fn config(mut self, cfg: PickConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Exclusive upper bound for eligible prices.
    #[must_use]
    pub const fn ceiling(mut self, ceiling: Price) -> Self {
        self.cfg.ceiling = ceiling;
        self
    }

    /// Sequential or concurrent fan-out.
    #[must_use]
    pub const fn mode(mut self, mode: ExecutionMode) -> Self {
        self.cfg.mode = mode;
        self
    }

    /// Tie-break among equally priced eligible quotes.
    ///
    /// `TieBreak::LowestSymbol` makes results reproducible across runs and
    /// modes; `TieBreak::Arbitrary` lets the first-combined quote win.
    #[must_use]
    pub const fn tie_break(mut self, tie: TieBreak) -> Self {
        self.cfg.tie_break = tie;
        self
    }

    /// Cap on fetches running at the same time in concurrent mode.
    #[must_use]
    pub const fn max_in_flight(mut self, n: usize) -> Self {
        self.cfg.max_in_flight = Some(n);
        self
    }

    /// Overall deadline for one selection run.
    ///
    /// When exceeded, pending fetches are aborted and the call returns
    /// `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `PickShare` selector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider has been registered via
    /// [`with_provider`](Self::with_provider) or if `max_in_flight` is zero.
    pub fn build(self) -> Result<PickShare, PickError> {
        let Some(provider) = self.provider else {
            return Err(PickError::InvalidArg(
                "no provider registered; add one via with_provider(...)".to_string(),
            ));
        };
        if self.cfg.max_in_flight == Some(0) {
            return Err(PickError::InvalidArg(
                "max_in_flight must be at least 1".to_string(),
            ));
        }
        Ok(PickShare {
            provider,
            cfg: self.cfg,
        })
    }
}

impl PickShare {
    /// Start building a new `PickShare` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use pickshare::{PickShare, TieBreak};
    ///
    /// let av = Arc::new(AlphaVantageClient::builder(api_key).build()?);
    /// let picker = PickShare::builder()
    ///     .with_provider(av)
    ///     .tie_break(TieBreak::LowestSymbol)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PickShareBuilder {
        PickShareBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PickConfig {
        &self.cfg
    }

    /// The registered provider.
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn QuoteProvider> {
        &self.provider
    }

    /// Permits for the concurrent fan-out, capped at what a semaphore can hold.
    pub(crate) fn in_flight_limit(&self) -> usize {
        self.cfg
            .max_in_flight
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, NonZeroUsize::get))
            .min(Semaphore::MAX_PERMITS)
    }
}

/// Apply an optional overall deadline to a selection future.
///
/// On expiry the future is dropped and `RequestTimeout(capability)` is returned.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "pickshare::core::with_request_deadline",
        skip(fut),
        fields(
            timeout_ms = deadline.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        ),
    )
)]
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    capability: &'static str,
    fut: Fut,
) -> Result<T, PickError>
where
    Fut: core::future::Future<Output = Result<T, PickError>>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .unwrap_or_else(|_| Err(PickError::request_timeout(capability))),
        None => fut.await,
    }
}
