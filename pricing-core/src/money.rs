//! Money conversion helpers
//!
//! Boundary conversions between `f64` (UI inputs, JSON ingress) and
//! `Decimal` (all internal arithmetic). Resolution itself never rounds;
//! rounding to the currency minor unit happens here and in the formatter.

use rust_decimal::prelude::*;

/// Rounding for monetary display (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal. Non-finite input (NaN, infinity) converts to
/// zero, which downstream code treats as "no price".
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places half-up
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to the currency minor unit (2 decimals, half-up)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
