use std::time::Duration;

use pickshare::{PickError, TieBreak};

use crate::helpers::{MODES, MockProvider, numbered, picker, px, sym};

#[tokio::test(start_paused = true)]
async fn quotes_reports_successes_and_failures_in_input_order() {
    let symbols = numbered(4);
    let provider = MockProvider::builder()
        .price("S0", "10")
        .fail("S1", PickError::connector("test-mock", "Invalid API call"))
        .price("S2", "1000")
        .price("S3", "0")
        .delay_for(&symbols[0], Duration::from_millis(30))
        .delay_for(&symbols[2], Duration::from_millis(10))
        .build();

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let report = p.quotes(&symbols).await.unwrap();

        assert_eq!(report.len(), 4);
        let got: Vec<_> = report
            .quotes
            .iter()
            .map(|q| (q.symbol.as_str(), q.price))
            .collect();
        assert_eq!(got, vec![("S0", px("10")), ("S2", px("1000")), ("S3", px("0"))]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, sym("S1"));
        assert!(matches!(report.failures[0].1, PickError::Connector { .. }));
    }
}

#[tokio::test]
async fn quotes_of_nothing_is_empty() {
    let provider = MockProvider::builder().build();
    let p = picker(provider, pickshare::ExecutionMode::Concurrent, TieBreak::Arbitrary);
    assert!(p.quotes(&[]).await.unwrap().is_empty());
}
