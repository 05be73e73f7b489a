//! Price formatting
//!
//! Rendering rules for displayed prices. Per-level rates can be fractions
//! of a cent (a 1-99 skill grind quotes a price per level), so PER_LEVEL
//! prices below one currency unit keep up to 8 decimal places; everything
//! else renders with exactly 2.

use crate::money::to_decimal;
use rust_decimal::prelude::*;
use shared::models::PricingUnit;

/// Currency symbol for displayed prices
pub const CURRENCY_SYMBOL: &str = "$";

/// Max precision for sub-unit per-level rates
const PER_LEVEL_MAX_DP: u32 = 8;

/// Format a price for display.
///
/// Zero and negative prices render as `"-"` (no price to show). PER_LEVEL
/// prices below 1 render with up to 8 decimals, trailing zeros stripped;
/// otherwise exactly 2 decimals. Always prefixed with the currency symbol.
pub fn format_price(price: Decimal, unit: PricingUnit) -> String {
    if price <= Decimal::ZERO {
        return "-".to_string();
    }

    if unit == PricingUnit::PerLevel && price < Decimal::ONE {
        let rounded = price
            .round_dp_with_strategy(PER_LEVEL_MAX_DP, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        return format!("{CURRENCY_SYMBOL}{rounded}");
    }

    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{CURRENCY_SYMBOL}{rounded:.2}")
}

/// Format a price arriving as `f64` from the UI layer. Non-finite values
/// render as `"-"`.
pub fn format_price_f64(price: f64, unit: PricingUnit) -> String {
    format_price(to_decimal(price), unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_price_two_decimals() {
        assert_eq!(
            format_price(Decimal::from(45), PricingUnit::Fixed),
            "$45.00"
        );
        assert_eq!(
            format_price(Decimal::new(1999, 2), PricingUnit::PerKill),
            "$19.99"
        );
    }

    #[test]
    fn test_zero_and_negative_render_dash() {
        assert_eq!(format_price(Decimal::ZERO, PricingUnit::Fixed), "-");
        assert_eq!(format_price(Decimal::from(-3), PricingUnit::PerHour), "-");
    }

    #[test]
    fn test_non_finite_renders_dash() {
        assert_eq!(format_price_f64(f64::NAN, PricingUnit::Fixed), "-");
        assert_eq!(format_price_f64(f64::INFINITY, PricingUnit::PerLevel), "-");
    }

    #[test]
    fn test_per_level_sub_unit_keeps_precision() {
        // 0.000054 would display as $0.00 with 2-decimal truncation
        let price = Decimal::new(54, 6); // 0.000054
        assert_eq!(format_price(price, PricingUnit::PerLevel), "$0.000054");
    }

    #[test]
    fn test_per_level_strips_trailing_zeros() {
        let price = Decimal::new(2500, 4); // 0.2500
        assert_eq!(format_price(price, PricingUnit::PerLevel), "$0.25");
    }

    #[test]
    fn test_per_level_caps_at_eight_decimals() {
        let price = Decimal::from_str_exact("0.0000000123").unwrap();
        // Rounds half-up at the 8th decimal place
        assert_eq!(format_price(price, PricingUnit::PerLevel), "$0.00000001");
    }

    #[test]
    fn test_per_level_at_or_above_one_uses_two_decimals() {
        assert_eq!(
            format_price(Decimal::ONE, PricingUnit::PerLevel),
            "$1.00"
        );
        assert_eq!(
            format_price(Decimal::new(125, 2), PricingUnit::PerLevel),
            "$1.25"
        );
    }

    #[test]
    fn test_other_units_ignore_sub_unit_rule() {
        // Only PER_LEVEL gets variable precision
        assert_eq!(
            format_price(Decimal::new(54, 6), PricingUnit::PerItem),
            "$0.00"
        );
    }
}
