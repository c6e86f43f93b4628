use pickshare_types::Price;

/// True when `price` may take part in selection under `ceiling`.
///
/// - Zero is the "unknown" sentinel and never qualifies, even if `0 < ceiling`.
/// - The ceiling is exclusive: `price == ceiling` does not qualify.
#[must_use]
pub fn is_eligible(price: Price, ceiling: Price) -> bool {
    !price.is_zero() && price < ceiling
}
