//! Pickshare data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod provider;
mod quote;
mod reports;

pub use config::{ExecutionMode, PickConfig, RetryConfig, TieBreak};
pub use error::PickError;
pub use provider::ProviderKey;
pub use quote::{Price, Quote, Selection, Symbol};
pub use reports::QuotesReport;

pub use rust_decimal::Decimal;
