use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the pickshare workspace.
///
/// Per-symbol fetch failures (transport, rate limiting, unparseable payloads,
/// provider-reported errors) and selection-level aborts (cancellation, overall
/// deadline) share this type. Use [`PickError::is_unknown_price`] to tell the
/// two groups apart.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PickError {
    /// The provider could not be reached or answered with a non-success status.
    #[error("transport failure via {connector}: {msg}")]
    Transport {
        /// Provider name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The provider kept signalling quota exhaustion after every retry.
    #[error("rate limit exceeded after {attempts} attempts (backoff_ms={backoff_ms})")]
    RateLimitExceeded {
        /// Number of requests issued before giving up.
        attempts: u32,
        /// Backoff interval applied between attempts, in milliseconds.
        backoff_ms: u64,
    },

    /// A response arrived but carried no recognizable price.
    #[error("unparseable price for {symbol}: {detail}")]
    UnparseablePrice {
        /// Symbol the request was issued for.
        symbol: String,
        /// What was wrong with the payload.
        detail: String,
    },

    /// The provider has no data for the requested symbol.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "quote for IBM".
        what: String,
    },

    /// The provider returned an explicit error payload.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Provider name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Operation label for which the request timed out.
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PickError {
    /// Helper: build a `Transport` error with the provider name and message.
    pub fn transport(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Connector` error with the provider name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `UnparseablePrice` error.
    pub fn unparseable(symbol: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnparseablePrice {
            symbol: symbol.into(),
            detail: detail.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Returns true if this error only means "price unknown" for one symbol.
    ///
    /// Such errors drop the symbol from selection. `Cancelled`, `RequestTimeout`
    /// and `InvalidArg` abort the whole selection instead.
    #[must_use]
    pub const fn is_unknown_price(&self) -> bool {
        !matches!(
            self,
            Self::Cancelled | Self::RequestTimeout { .. } | Self::InvalidArg(_)
        )
    }
}
