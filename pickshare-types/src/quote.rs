//! Market data primitives: symbols, decimal prices, quotes and selection outcomes.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PickError;

/// Opaque ticker identifier such as `IBM` or `AAPL`.
///
/// The only validation performed is that the trimmed value is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Build a symbol from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns `PickError::InvalidArg` when the trimmed input is empty.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PickError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(PickError::InvalidArg("symbol must not be empty".into()));
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = PickError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(s: Symbol) -> Self {
        s.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Non-negative decimal price.
///
/// Zero is reserved for "unknown" and is never eligible for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// The "unknown" sentinel.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Whole-unit price, usable in constants.
    #[must_use]
    pub const fn from_units(units: u32) -> Self {
        Self(Decimal::from_parts(units, 0, 0, false, 0))
    }

    /// Wrap a decimal amount.
    ///
    /// # Errors
    /// Returns `PickError::InvalidArg` for negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, PickError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PickError::InvalidArg(format!(
                "price must be non-negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// True when this is the "unknown" sentinel.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Price {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| PickError::InvalidArg(format!("invalid price '{s}': {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PickError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(p: Price) -> Self {
        p.0
    }
}

/// A `(symbol, price)` observation taken at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker the price belongs to.
    pub symbol: Symbol,
    /// Last traded price reported by the provider.
    pub price: Price,
}

impl Quote {
    /// Construct a quote.
    #[must_use]
    pub const fn new(symbol: Symbol, price: Price) -> Self {
        Self { symbol, price }
    }
}

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Highest-priced quote strictly below the ceiling.
    Winner(Quote),
    /// Every quote was unknown or at/above the ceiling.
    NoEligibleQuotes,
}

impl Selection {
    /// Borrow the winning quote, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<&Quote> {
        match self {
            Self::Winner(q) => Some(q),
            Self::NoEligibleQuotes => None,
        }
    }

    /// Consume the selection and return the winning quote, if any.
    #[must_use]
    pub fn into_winner(self) -> Option<Quote> {
        match self {
            Self::Winner(q) => Some(q),
            Self::NoEligibleQuotes => None,
        }
    }

    /// Symbol of the winning quote, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&Symbol> {
        self.winner().map(|q| &q.symbol)
    }
}

impl From<Option<Quote>> for Selection {
    fn from(q: Option<Quote>) -> Self {
        q.map_or(Self::NoEligibleQuotes, Self::Winner)
    }
}
