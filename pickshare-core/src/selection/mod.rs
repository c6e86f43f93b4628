//! Ceiling filter and max-by-price reduction.
//!
//! Modules include:
//! - `filter`: eligibility of a single quote against the ceiling
//! - `reduce`: the associative combine step and sequence reduction helpers
/// Eligibility predicate for individual quotes.
pub mod filter;
/// Combine/reduce helpers shared by sequential and concurrent selection.
pub mod reduce;

pub use filter::is_eligible;
pub use reduce::{SelectionAccumulator, combine, reduce};
