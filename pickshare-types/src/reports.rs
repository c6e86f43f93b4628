//! Report envelopes produced by the selector.

use serde::{Deserialize, Serialize};

use crate::error::PickError;
use crate::quote::{Quote, Symbol};

/// Every fetch outcome of a multi-symbol price request.
///
/// `quotes` keeps successful observations in the order they were produced;
/// `failures` carries the per-symbol errors that made a price unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuotesReport {
    /// Successfully fetched quotes.
    pub quotes: Vec<Quote>,
    /// Symbols whose price could not be determined, with the reason.
    pub failures: Vec<(Symbol, PickError)>,
}

impl QuotesReport {
    /// Total number of symbols covered by this report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len() + self.failures.len()
    }

    /// True when the report covers no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty() && self.failures.is_empty()
    }
}
