use std::time::Duration;

use pickshare::{ExecutionMode, PickError, PickShare, Price};
use pickshare_mock::{DynamicMockProvider, MockBehavior};

use crate::helpers::{numbered, sym};

#[tokio::test(start_paused = true)]
async fn concurrent_mode_respects_in_flight_cap() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    let symbols = numbered(12);
    controller
        .set_all(symbols.iter().enumerate().map(|(i, s)| {
            let units = u32::try_from(i).unwrap() * 10;
            (
                s.clone(),
                MockBehavior::Delayed(Duration::from_millis(100), Price::from_units(units)),
            )
        }))
        .await;

    let p = PickShare::builder()
        .with_provider(provider)
        .mode(ExecutionMode::Concurrent)
        .max_in_flight(3)
        .build()
        .unwrap();
    let sel = p.select_best(&symbols).await.unwrap();

    assert_eq!(sel.symbol(), Some(&sym("S11")));
    assert_eq!(controller.calls(), 12);
    assert_eq!(controller.peak_in_flight(), 3);
}

#[tokio::test(start_paused = true)]
async fn sequential_mode_never_overlaps() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    let symbols = numbered(5);
    controller
        .set_all(symbols.iter().map(|s| {
            (
                s.clone(),
                MockBehavior::Delayed(Duration::from_millis(10), Price::from_units(1)),
            )
        }))
        .await;

    let p = PickShare::builder()
        .with_provider(provider)
        .mode(ExecutionMode::Sequential)
        .build()
        .unwrap();
    p.select_best(&symbols).await.unwrap();

    assert_eq!(controller.peak_in_flight(), 1);
    assert_eq!(controller.requests().await, symbols);
}

#[test]
fn zero_in_flight_cap_is_rejected() {
    let (provider, _controller) = DynamicMockProvider::new_with_controller();
    let res = PickShare::builder()
        .with_provider(provider)
        .max_in_flight(0)
        .build();
    assert!(matches!(res, Err(PickError::InvalidArg(_))));
}

#[tokio::test]
async fn oversized_in_flight_cap_still_selects() {
    let (provider, controller) = DynamicMockProvider::new_with_controller();
    let symbols = numbered(10);
    controller
        .set_all(symbols.iter().enumerate().map(|(i, s)| {
            let units = u32::try_from(i).unwrap() + 1;
            (s.clone(), MockBehavior::Return(Price::from_units(units)))
        }))
        .await;

    let p = PickShare::builder()
        .with_provider(provider)
        .mode(ExecutionMode::Concurrent)
        .max_in_flight(usize::MAX)
        .build()
        .unwrap();
    let sel = p.select_best(&symbols).await.unwrap();

    assert_eq!(sel.symbol(), Some(&sym("S9")));
    assert_eq!(controller.calls(), 10);
}
