//! Money calculation utilities using rust_decimal for precision
//!
//! Totals are computed with `Decimal`, then converted to `f64` for storage
//! and serialization. Wallet amounts are kept as whole cents.

use rust_decimal::prelude::*;
use shared::models::OrderItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 amount into a Decimal; `None` for NaN or infinity
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> Option<f64> {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .filter(|v| v.is_finite())
}

/// Convert an amount to whole cents
///
/// `None` when the amount is not finite, has more than 2 decimal places, or
/// does not fit in an `i64`.
pub fn to_cents(value: f64) -> Option<i64> {
    // from_f64 keeps ~15 significant digits; trim that noise before the check
    let scaled = to_decimal(value)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp(6);
    if !scaled.fract().is_zero() {
        return None;
    }
    scaled.to_i64()
}

/// Sum of `quantity × unit_price` over the lines
///
/// `None` when any price is not finite or the sum overflows.
pub fn order_total(items: &[OrderItem]) -> Option<f64> {
    let mut total = Decimal::ZERO;
    for item in items {
        let line = to_decimal(item.unit_price)?.checked_mul(Decimal::from(item.quantity))?;
        total = total.checked_add(line)?;
    }
    to_f64(total)
}
