use core::cmp::Ordering;

use pickshare_types::{Price, Quote, Selection, TieBreak};

use super::filter::is_eligible;

/// Pick the higher-priced of two quotes.
///
/// This is the combine step of the selection reduction and must stay
/// associative and commutative so that folding in any order (input order,
/// task completion order, or a tree of partial results) yields a maximum:
///
/// - different prices: the higher price wins regardless of argument order;
/// - equal prices with `TieBreak::Arbitrary`: `a` is returned, so the winner
///   depends on evaluation order but is always one of the tied maxima;
/// - equal prices with `TieBreak::LowestSymbol`: the smaller symbol wins, which
///   makes the operation fully order-independent.
#[must_use]
pub fn combine(a: Quote, b: Quote, tie: TieBreak) -> Quote {
    match a.price.cmp(&b.price) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal => match tie {
            TieBreak::LowestSymbol if b.symbol < a.symbol => b,
            _ => a,
        },
    }
}

/// Filter `quotes` by `ceiling` and reduce them to the highest-priced entry.
pub fn reduce<I>(quotes: I, ceiling: Price, tie: TieBreak) -> Selection
where
    I: IntoIterator<Item = Quote>,
{
    let mut acc = SelectionAccumulator::new(ceiling, tie);
    for q in quotes {
        acc.push(q);
    }
    acc.finish()
}

/// Running state of a selection: the best eligible quote seen so far.
///
/// Accumulators can be merged, which lets callers reduce partitions
/// independently and combine the partial results afterwards.
#[derive(Debug, Clone)]
pub struct SelectionAccumulator {
    ceiling: Price,
    tie: TieBreak,
    best: Option<Quote>,
    seen: usize,
    eligible: usize,
}

impl SelectionAccumulator {
    /// Start an empty accumulator.
    #[must_use]
    pub const fn new(ceiling: Price, tie: TieBreak) -> Self {
        Self {
            ceiling,
            tie,
            best: None,
            seen: 0,
            eligible: 0,
        }
    }

    /// Offer a quote; ineligible quotes are counted and dropped.
    ///
    /// Returns `true` if the quote passed the ceiling filter.
    pub fn push(&mut self, quote: Quote) -> bool {
        self.seen += 1;
        if !is_eligible(quote.price, self.ceiling) {
            return false;
        }
        self.eligible += 1;
        self.best = Some(match self.best.take() {
            Some(best) => combine(best, quote, self.tie),
            None => quote,
        });
        true
    }

    /// Record a symbol whose price could not be determined.
    pub const fn skip(&mut self) {
        self.seen += 1;
    }

    /// Fold another accumulator into this one.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.seen += other.seen;
        self.eligible += other.eligible;
        self.best = match (self.best.take(), other.best) {
            (Some(a), Some(b)) => Some(combine(a, b, self.tie)),
            (a, b) => a.or(b),
        };
        self
    }

    /// Best eligible quote so far.
    #[must_use]
    pub const fn best(&self) -> Option<&Quote> {
        self.best.as_ref()
    }

    /// Number of symbols offered, eligible or not.
    #[must_use]
    pub const fn seen(&self) -> usize {
        self.seen
    }

    /// Number of quotes that passed the ceiling filter.
    #[must_use]
    pub const fn eligible(&self) -> usize {
        self.eligible
    }

    /// Finish the reduction.
    #[must_use]
    pub fn finish(self) -> Selection {
        Selection::from(self.best)
    }
}
