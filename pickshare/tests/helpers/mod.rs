#![allow(dead_code)]

// Re-export helpers so tests can `use helpers::*;`
pub mod mock_provider;

pub use mock_provider::MockProvider;

use std::sync::Arc;

use pickshare::{ExecutionMode, PickShare, Price, QuoteProvider, Symbol, TieBreak};

/// Prices for `S0..S9` with a unique maximum below 500 (`S8` at 499).
pub const SCENARIO_A: [u32; 10] = [500, 1000, 400, 200, 350, 100, 250, 150, 499, 10];
/// Prices for `S0..S9` with a tie at 499 between `S7` and `S8`.
pub const SCENARIO_B: [u32; 10] = [500, 1000, 400, 200, 350, 100, 250, 499, 499, 10];

pub const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Concurrent];

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).unwrap()
}

pub fn px(s: &str) -> Price {
    s.parse().unwrap()
}

/// `S0..S{n-1}`.
pub fn numbered(n: usize) -> Vec<Symbol> {
    (0..n).map(|i| sym(&format!("S{i}"))).collect()
}

/// Pair `S0..` with whole-unit prices.
pub fn table(prices: &[u32]) -> Vec<(Symbol, Price)> {
    numbered(prices.len())
        .into_iter()
        .zip(prices.iter().map(|p| Price::from_units(*p)))
        .collect()
}

pub fn picker(provider: Arc<dyn QuoteProvider>, mode: ExecutionMode, tie: TieBreak) -> PickShare {
    PickShare::builder()
        .with_provider(provider)
        .mode(mode)
        .tie_break(tie)
        .build()
        .unwrap()
}
