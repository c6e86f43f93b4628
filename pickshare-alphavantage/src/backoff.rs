use std::time::Duration;

use rand::Rng;

/// Extend `base` by a random amount of up to `jitter_percent` percent.
///
/// Spreads out retries from concurrent workers that were rate limited at the
/// same moment. `jitter_percent == 0` returns `base` unchanged.
#[must_use]
pub fn jitter_wait(base: Duration, jitter_percent: u8) -> Duration {
    if jitter_percent == 0 {
        return base;
    }
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let jitter_range = std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100);
    let mut rng = rand::rng();
    base.saturating_add(Duration::from_millis(rng.random_range(0..jitter_range)))
}
