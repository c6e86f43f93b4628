//! Configuration types shared by the selector and quote clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::quote::Price;

/// How the selector fans out price requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExecutionMode {
    /// Fetch, filter and fold one symbol at a time, in input order.
    Sequential,
    /// Spawn one task per symbol on the runtime's worker pool and fold results
    /// in completion order. In-flight requests are bounded by
    /// [`PickConfig::max_in_flight`].
    #[default]
    Concurrent,
}

/// Policy applied when two eligible quotes carry the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TieBreak {
    /// Either of the tied quotes may win. Under concurrent execution the result
    /// can differ between runs.
    #[default]
    Arbitrary,
    /// The lexicographically smallest symbol wins. Reproducible across runs and
    /// execution modes.
    LowestSymbol,
}

/// Backoff-and-retry budget for provider rate-limit notices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Pause before re-issuing a rate-limited request.
    pub backoff: Duration,
    /// Number of re-issues allowed after the first request. `0` disables retrying.
    pub max_retries: u32,
    /// Random jitter percentage [0, 100] added to each backoff.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(60),
            max_retries: 5,
            jitter_percent: 0,
        }
    }
}

/// Global configuration for the `PickShare` selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickConfig {
    /// Exclusive upper bound for eligible prices.
    pub ceiling: Price,
    /// Sequential or concurrent fan-out.
    pub mode: ExecutionMode,
    /// Tie-break among equally priced eligible quotes.
    pub tie_break: TieBreak,
    /// Upper bound on concurrently running fetches. `None` uses the available
    /// hardware parallelism.
    pub max_in_flight: Option<usize>,
    /// Optional deadline for a whole selection run.
    pub request_timeout: Option<Duration>,
}

impl PickConfig {
    /// Default price ceiling.
    pub const DEFAULT_CEILING: Price = Price::from_units(500);
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            ceiling: Self::DEFAULT_CEILING,
            mode: ExecutionMode::default(),
            tie_break: TieBreak::default(),
            max_in_flight: None,
            request_timeout: None,
        }
    }
}
