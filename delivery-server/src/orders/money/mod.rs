//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done using `Decimal` internally, then
//! converted to `f64` only at the storage/serialization boundary.

use rust_decimal::prelude::*;

#[cfg(test)]
mod tests;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price per item
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i32 = 9999;

/// Convert an `f64` into a `Decimal` for calculation
///
/// Non-finite inputs are rejected upstream by the engine's validation;
/// defaulting to zero here keeps the conversion total.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert a `Decimal` back to `f64`, rounded to 2 decimal places half-up
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with inputs capped at MAX_PRICE × MAX_QUANTITY
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Monetary equality within MONEY_TOLERANCE
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
