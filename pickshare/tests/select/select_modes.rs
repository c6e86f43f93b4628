use std::time::Duration;

use pickshare::{ExecutionMode, Price, TieBreak};

use crate::helpers::{MockProvider, SCENARIO_B, numbered, picker, sym, table};

#[tokio::test(start_paused = true)]
async fn completion_order_does_not_change_lowest_symbol_winner() {
    // Later symbols answer first, so concurrent folding sees S8 before S7.
    let symbols = numbered(10);
    let mut builder = MockProvider::builder().prices(table(&SCENARIO_B));
    for (i, s) in symbols.iter().enumerate() {
        let ms = u64::try_from(10 - i).unwrap() * 10;
        builder = builder.delay_for(s, Duration::from_millis(ms));
    }
    let provider = builder.build();

    let seq = picker(provider.clone(), ExecutionMode::Sequential, TieBreak::LowestSymbol)
        .select_best(&symbols)
        .await
        .unwrap();
    let conc = picker(provider, ExecutionMode::Concurrent, TieBreak::LowestSymbol)
        .select_best(&symbols)
        .await
        .unwrap();

    assert_eq!(seq, conc);
    assert_eq!(conc.symbol(), Some(&sym("S7")));
}

#[tokio::test(start_paused = true)]
async fn arbitrary_tie_break_picks_a_tied_maximum_when_order_flips() {
    // S8 answers before S7; both sit at 499.
    let symbols = numbered(10);
    let provider = MockProvider::builder()
        .prices(table(&SCENARIO_B))
        .delay_for(&sym("S7"), Duration::from_millis(50))
        .delay_for(&sym("S8"), Duration::from_millis(10))
        .build();

    let sel = picker(provider, ExecutionMode::Concurrent, TieBreak::Arbitrary)
        .select_best(&symbols)
        .await
        .unwrap();

    let winner = sel.winner().unwrap();
    assert!(winner.symbol == sym("S7") || winner.symbol == sym("S8"));
    assert_eq!(winner.price, Price::from_units(499));
}

#[tokio::test(start_paused = true)]
async fn concurrent_mode_overlaps_requests() {
    let provider = MockProvider::builder()
        .prices(table(&[1, 2, 3, 4, 5, 6, 7, 8]))
        .delay(Duration::from_secs(1))
        .build();
    let symbols = numbered(8);

    let seq = picker(provider.clone(), ExecutionMode::Sequential, TieBreak::Arbitrary);
    let start = tokio::time::Instant::now();
    seq.select_best(&symbols).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(8));

    let conc = pickshare::PickShare::builder()
        .with_provider(provider)
        .mode(ExecutionMode::Concurrent)
        .max_in_flight(8)
        .build()
        .unwrap();
    let start = tokio::time::Instant::now();
    let sel = conc.select_best(&symbols).await.unwrap();
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(sel.symbol(), Some(&sym("S7")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn multi_thread_runtime_agrees_with_sequential() {
    let provider = MockProvider::builder()
        .prices(table(&[12, 480, 499, 7, 0, 501, 499, 250, 33, 499, 1000, 1]))
        .build();
    let symbols = numbered(12);

    let seq = picker(provider.clone(), ExecutionMode::Sequential, TieBreak::LowestSymbol);
    let conc = picker(provider, ExecutionMode::Concurrent, TieBreak::LowestSymbol);
    for _ in 0..20 {
        let a = seq.select_best(&symbols).await.unwrap();
        let b = conc.select_best(&symbols).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(b.symbol(), Some(&sym("S2")));
    }
}
