//! Selection entry points and the two execution strategies.

mod concurrent;
mod sequential;

use pickshare_core::{
    CancellationToken, ExecutionMode, PickError, Price, Quote, QuotesReport, Selection,
    SelectionAccumulator, Symbol,
};

use crate::PickShare;
use crate::core::with_request_deadline;

/// One symbol's fetch result, tagged with its input position.
pub(crate) type Outcome = (usize, Symbol, Result<Price, PickError>);

impl PickShare {
    /// Pick the highest-priced symbol strictly below the configured ceiling.
    ///
    /// Uses the configured execution mode. Symbols whose price cannot be
    /// determined are skipped; if nothing qualifies the result is
    /// `Selection::NoEligibleQuotes`.
    ///
    /// # Errors
    /// Returns `RequestTimeout` if the configured deadline expires.
    pub async fn select_best(&self, symbols: &[Symbol]) -> Result<Selection, PickError> {
        self.select_best_with(
            symbols,
            self.cfg.mode,
            self.cfg.ceiling,
            &CancellationToken::new(),
        )
        .await
    }

    /// Like [`select_best`](Self::select_best) with an explicit ceiling.
    ///
    /// # Errors
    /// Returns `RequestTimeout` if the configured deadline expires.
    pub async fn select_best_under(
        &self,
        symbols: &[Symbol],
        ceiling: Price,
    ) -> Result<Selection, PickError> {
        self.select_best_with(symbols, self.cfg.mode, ceiling, &CancellationToken::new())
            .await
    }

    /// Full-control selection.
    ///
    /// Behavior:
    /// - `Sequential` fetches and folds one symbol at a time in input order.
    /// - `Concurrent` spawns one task per symbol, at most `max_in_flight` running
    ///   at once, and folds results in completion order.
    /// - Both modes agree on the winner up to the tie-break; with
    ///   `TieBreak::LowestSymbol` they agree exactly.
    /// - Firing `cancel` aborts pending fetches.
    ///
    /// # Errors
    /// Returns `Cancelled` when `cancel` fires and `RequestTimeout` when the
    /// configured deadline expires. Per-symbol fetch failures are never
    /// returned; they only drop the symbol.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pickshare::select_best",
            skip_all,
            fields(symbols = symbols.len(), mode = ?mode, ceiling = %ceiling),
        )
    )]
    pub async fn select_best_with(
        &self,
        symbols: &[Symbol],
        mode: ExecutionMode,
        ceiling: Price,
        cancel: &CancellationToken,
    ) -> Result<Selection, PickError> {
        if cancel.is_cancelled() {
            return Err(PickError::Cancelled);
        }
        let mut acc = SelectionAccumulator::new(ceiling, self.cfg.tie_break);
        let run = async {
            match mode {
                ExecutionMode::Concurrent => {
                    self.fan_out(symbols, cancel, |o| fold(&mut acc, o)).await?;
                }
                _ => {
                    self.fetch_in_order(symbols, cancel, |o| fold(&mut acc, o))
                        .await?;
                }
            }
            Ok::<(), PickError>(())
        };
        with_request_deadline(self.cfg.request_timeout, "select_best", run).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            seen = acc.seen(),
            eligible = acc.eligible(),
            winner = acc.best().map(|q| q.symbol.as_str()),
            "selection finished"
        );
        Ok(acc.finish())
    }

    /// Fetch every symbol and report successes and failures separately.
    ///
    /// Both lists keep input order. Uses the configured execution mode and
    /// deadline; no ceiling filter is applied.
    ///
    /// # Errors
    /// Returns `RequestTimeout` if the configured deadline expires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pickshare::quotes",
            skip(self, symbols),
            fields(symbols = symbols.len()),
        )
    )]
    pub async fn quotes(&self, symbols: &[Symbol]) -> Result<QuotesReport, PickError> {
        if symbols.is_empty() {
            return Ok(QuotesReport::default());
        }
        let cancel = CancellationToken::new();
        let mut outcomes: Vec<Outcome> = Vec::with_capacity(symbols.len());
        let run = async {
            let collect = |o: Outcome| -> Result<(), PickError> {
                outcomes.push(o);
                Ok(())
            };
            match self.cfg.mode {
                ExecutionMode::Concurrent => self.fan_out(symbols, &cancel, collect).await,
                _ => self.fetch_in_order(symbols, &cancel, collect).await,
            }
        };
        with_request_deadline(self.cfg.request_timeout, "quotes", run).await?;

        outcomes.sort_by_key(|(idx, _, _)| *idx);
        let mut report = QuotesReport::default();
        for (_, symbol, res) in outcomes {
            match res {
                Ok(price) => report.quotes.push(Quote::new(symbol, price)),
                Err(e) => report.failures.push((symbol, e)),
            }
        }
        Ok(report)
    }
}

/// Fold one fetch outcome into the running selection.
///
/// Failures that only mean "price unknown" are logged and skipped; anything
/// else aborts the selection.
fn fold(acc: &mut SelectionAccumulator, outcome: Outcome) -> Result<(), PickError> {
    let (_, symbol, res) = outcome;
    match res {
        Ok(price) => {
            #[cfg(feature = "tracing")]
            let label = symbol.clone();
            if !acc.push(Quote::new(symbol, price)) {
                #[cfg(feature = "tracing")]
                tracing::debug!(symbol = %label, price = %price, "quote filtered out");
            }
            Ok(())
        }
        Err(e) if e.is_unknown_price() => {
            #[cfg(feature = "tracing")]
            tracing::warn!(symbol = %symbol, error = %e, "price unknown; skipping symbol");
            acc.skip();
            Ok(())
        }
        Err(e) => Err(e),
    }
}
