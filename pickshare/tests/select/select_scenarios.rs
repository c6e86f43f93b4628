use pickshare::{PickError, Price, Selection, TieBreak};

use crate::helpers::{MODES, MockProvider, SCENARIO_A, SCENARIO_B, numbered, picker, px, sym, table};

#[tokio::test]
async fn unique_maximum_below_ceiling_wins_in_both_modes() {
    let provider = MockProvider::builder().prices(table(&SCENARIO_A)).build();
    let symbols = numbered(10);

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let sel = p.select_best(&symbols).await.unwrap();
        let q = sel.winner().expect("winner");
        assert_eq!(q.symbol, sym("S8"), "mode {mode:?}");
        assert_eq!(q.price, Price::from_units(499));
    }
}

#[tokio::test]
async fn tied_maximum_returns_one_of_the_tied_quotes() {
    let provider = MockProvider::builder().prices(table(&SCENARIO_B)).build();
    let symbols = numbered(10);

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let q = p
            .select_best(&symbols)
            .await
            .unwrap()
            .into_winner()
            .expect("winner");
        assert_eq!(q.price, Price::from_units(499), "mode {mode:?}");
        assert!(q.symbol == sym("S7") || q.symbol == sym("S8"), "got {}", q.symbol);
    }
}

#[tokio::test]
async fn lowest_symbol_tie_break_is_deterministic() {
    let provider = MockProvider::builder().prices(table(&SCENARIO_B)).build();
    let symbols = numbered(10);

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::LowestSymbol);
        for _ in 0..5 {
            let sel = p.select_best(&symbols).await.unwrap();
            assert_eq!(sel.symbol(), Some(&sym("S7")), "mode {mode:?}");
        }
    }
}

#[tokio::test]
async fn unknown_price_never_wins_and_all_filtered_is_no_eligible() {
    // S0 reports zero, S1 fails; everything else is at or above the ceiling.
    let provider = MockProvider::builder()
        .price("S0", "0")
        .fail("S1", PickError::transport("test-mock", "connection refused"))
        .price("S2", "500")
        .price("S3", "1000.01")
        .build();
    let symbols = numbered(4);

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        assert_eq!(
            p.select_best(&symbols).await.unwrap(),
            Selection::NoEligibleQuotes,
            "mode {mode:?}"
        );
    }
}

#[tokio::test]
async fn failed_fetches_are_skipped_not_fatal() {
    let provider = MockProvider::builder()
        .price("IBM", "140.12")
        .fail(
            "AAPL",
            PickError::RateLimitExceeded {
                attempts: 6,
                backoff_ms: 60_000,
            },
        )
        .fail("MSFT", PickError::unparseable("MSFT", "no price field"))
        .price("KO", "60")
        .build();
    let symbols = [sym("IBM"), sym("AAPL"), sym("MSFT"), sym("KO"), sym("MISSING")];

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let sel = p.select_best(&symbols).await.unwrap();
        assert_eq!(sel.symbol(), Some(&sym("IBM")), "mode {mode:?}");
    }
}

#[tokio::test]
async fn empty_input_yields_no_eligible_quotes() {
    let provider = MockProvider::builder().build();
    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        assert_eq!(
            p.select_best(&[]).await.unwrap(),
            Selection::NoEligibleQuotes
        );
    }
}

#[tokio::test]
async fn explicit_ceiling_overrides_configured_one() {
    let provider = MockProvider::builder().prices(table(&SCENARIO_A)).build();
    let symbols = numbered(10);

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let sel = p.select_best_under(&symbols, px("400")).await.unwrap();
        assert_eq!(sel.symbol(), Some(&sym("S4")), "mode {mode:?}");

        let sel = p.select_best_under(&symbols, px("2000")).await.unwrap();
        assert_eq!(sel.symbol(), Some(&sym("S1")), "mode {mode:?}");

        let sel = p.select_best_under(&symbols, px("10")).await.unwrap();
        assert_eq!(sel, Selection::NoEligibleQuotes);
    }
}

#[tokio::test]
async fn fractional_prices_compare_exactly() {
    let provider = MockProvider::builder()
        .price("A", "499.9999")
        .price("B", "499.99989")
        .price("C", "500.0000")
        .build();
    let symbols = [sym("A"), sym("B"), sym("C")];
    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let sel = p.select_best(&symbols).await.unwrap();
        assert_eq!(sel.symbol(), Some(&sym("A")), "mode {mode:?}");
    }
}
