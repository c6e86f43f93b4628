//! pickshare picks the highest-priced share strictly below a price ceiling.
//!
//! Overview
//! - Fetches one quote per symbol through a single `QuoteProvider`.
//! - Drops symbols whose price is unknown (fetch failure or a reported `0`)
//!   and prices at or above the ceiling.
//! - Reduces what is left to the highest price with a configurable tie-break.
//!
//! Execution modes
//! - `Sequential`: one request at a time, folded in input order.
//! - `Concurrent`: one Tokio task per symbol, bounded by `max_in_flight`, folded
//!   in completion order. The fold is associative and commutative, so both
//!   modes agree on the winner; with `TieBreak::LowestSymbol` they agree on
//!   ties too.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use pickshare::{PickShare, Selection, Symbol};
//! use pickshare_alphavantage::AlphaVantageClient;
//!
//! let av = Arc::new(AlphaVantageClient::builder(api_key).build()?);
//! let picker = PickShare::builder().with_provider(av).build()?;
//! let symbols = ["IBM", "AAPL", "MSFT"]
//!     .into_iter()
//!     .map(Symbol::new)
//!     .collect::<Result<Vec<_>, _>>()?;
//! match picker.select_best(&symbols).await? {
//!     Selection::Winner(q) => println!("{} at {}", q.symbol, q.price),
//!     Selection::NoEligibleQuotes => println!("no symbol qualified"),
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod selector;

pub use core::{PickShare, PickShareBuilder};

// Re-export core types for convenience
pub use pickshare_core::{
    CancellationToken, Decimal, ExecutionMode, PickConfig, PickError, Price, ProviderKey,
    Quote, QuoteProvider, QuotesReport, RetryConfig, Selection, SelectionAccumulator, Symbol,
    TieBreak, combine, is_eligible, reduce,
};
