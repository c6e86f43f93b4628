use std::time::Duration;

use pickshare::{CancellationToken, ExecutionMode, PickError, PickShare, Price, TieBreak};
use pickshare_mock::{DynamicMockProvider, MockBehavior};

use crate::helpers::{MODES, MockProvider, numbered, picker, sym};

#[tokio::test(start_paused = true)]
async fn cancellation_aborts_selection_in_both_modes() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    controller
        .set_all([
            (sym("S0"), MockBehavior::Return(Price::from_units(10))),
            (sym("S1"), MockBehavior::Hang),
            (sym("S2"), MockBehavior::Return(Price::from_units(20))),
        ])
        .await;
    let symbols = numbered(3);

    for mode in MODES {
        let p = picker(provider.clone(), mode, TieBreak::Arbitrary);
        let cancel = CancellationToken::new();
        let ceiling = p.config().ceiling;
        let started = tokio::time::Instant::now();
        let (res, ()) = tokio::join!(p.select_best_with(&symbols, mode, ceiling, &cancel), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        });
        assert_eq!(res, Err(PickError::Cancelled), "mode {mode:?}");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    // Give aborted tasks a chance to unwind.
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(controller.in_flight(), 0);
}

#[tokio::test]
async fn already_cancelled_token_issues_no_requests() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    let p = picker(provider, ExecutionMode::Concurrent, TieBreak::Arbitrary);
    let cancel = CancellationToken::new();
    cancel.cancel();

    for mode in MODES {
        let res = p
            .select_best_with(&numbered(5), mode, Price::from_units(500), &cancel)
            .await;
        assert_eq!(res, Err(PickError::Cancelled));
    }
    assert_eq!(controller.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn request_timeout_bounds_whole_selection() {
    let provider = MockProvider::builder()
        .price("S0", "10")
        .price("S1", "20")
        .delay(Duration::from_secs(60))
        .build();

    for mode in MODES {
        let p = PickShare::builder()
            .with_provider(provider.clone())
            .mode(mode)
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let started = tokio::time::Instant::now();
        let err = p.select_best(&numbered(2)).await.unwrap_err();
        assert!(matches!(err, PickError::RequestTimeout { .. }), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(60));
    }
}
