//! pickshare-core
//!
//! Core traits and pure logic shared across the pickshare crates.
//!
//! - `provider`: the `QuoteProvider` trait implemented by price sources.
//! - `selection`: ceiling filter and max-by-price reduction over quotes.
//!
//! Cancellation
//! ------------
//! Every provider call receives a `tokio_util::sync::CancellationToken`.
//! Providers are expected to stop waiting (backoff sleeps, pending I/O) once the
//! token fires and report `PickError::Cancelled`.
#![warn(missing_docs)]

/// The `QuoteProvider` trait implemented by price sources.
pub mod provider;
/// Pure filter/combine/reduce functions used by both execution modes.
pub mod selection;

pub use provider::QuoteProvider;
pub use selection::{SelectionAccumulator, combine, is_eligible, reduce};
pub use tokio_util::sync::CancellationToken;

pub use pickshare_types::{
    Decimal, ExecutionMode, PickConfig, PickError, Price, ProviderKey, Quote, QuotesReport,
    RetryConfig, Selection, Symbol, TieBreak,
};
