//! # Discount Calculation
//!
//! Turns a calculation method and value into a discount amount against a
//! base price.
//!
//! ## Examples
//! ```rust
//! use pricing_core::discount::DiscountCalculator;
//! use pricing_core::money::Money;
//! use pricing_core::types::CalculationMethod;
//!
//! let base = Money::from_cents(8100);
//! assert_eq!(DiscountCalculator::amount(base, CalculationMethod::Amount, 1500).cents(), 1500);
//! assert_eq!(DiscountCalculator::amount(base, CalculationMethod::Percentage, 1000).cents(), 810);
//! assert_eq!(DiscountCalculator::amount(base, CalculationMethod::Free, 0).cents(), 8100);
//! ```

use tracing::warn;

use crate::money::Money;
use crate::types::CalculationMethod;

/// Stateless discount arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Computes the discount for `base_price`.
    ///
    /// - `Amount`: `min(value, base)`, so one line never goes negative
    /// - `Percentage`: `base × value / 10000`, not clamped to base
    /// - `Free`: exactly `base`
    /// - `Unknown`: zero
    ///
    /// Results are floored at zero.
    pub fn amount(base_price: Money, method: CalculationMethod, value: i64) -> Money {
        let amount = match method {
            CalculationMethod::Amount => Money::from_cents(value).min(base_price),
            CalculationMethod::Percentage => base_price.percentage_bps(value),
            CalculationMethod::Free => base_price,
            CalculationMethod::Unknown => {
                warn!(value, "Unknown calculation method, discount is zero");
                Money::zero()
            }
        };
        amount.non_negative()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_amount() {
        let amount = DiscountCalculator::amount(
            Money::from_cents(10000),
            CalculationMethod::Amount,
            1500,
        );
        assert_eq!(amount.cents(), 1500);
    }

    #[test]
    fn test_fixed_amount_capped_at_base() {
        let amount =
            DiscountCalculator::amount(Money::from_cents(1000), CalculationMethod::Amount, 2000);
        assert_eq!(amount.cents(), 1000);
    }

    #[test]
    fn test_percentage() {
        let amount = DiscountCalculator::amount(
            Money::from_cents(10000),
            CalculationMethod::Percentage,
            5000,
        );
        assert_eq!(amount.cents(), 5000);
    }

    #[test]
    fn test_percentage_over_hundred_exceeds_base() {
        let amount = DiscountCalculator::amount(
            Money::from_cents(10000),
            CalculationMethod::Percentage,
            12000,
        );
        assert_eq!(amount.cents(), 12000);
    }

    #[test]
    fn test_free() {
        let amount =
            DiscountCalculator::amount(Money::from_cents(10000), CalculationMethod::Free, 0);
        assert_eq!(amount.cents(), 10000);
    }

    #[test]
    fn test_unknown_method_is_zero() {
        let amount =
            DiscountCalculator::amount(Money::from_cents(10000), CalculationMethod::Unknown, 500);
        assert!(amount.is_zero());
    }

    #[test]
    fn test_negative_values_never_surcharge() {
        let amount =
            DiscountCalculator::amount(Money::from_cents(10000), CalculationMethod::Amount, -500);
        assert!(amount.is_zero());

        let amount = DiscountCalculator::amount(
            Money::from_cents(10000),
            CalculationMethod::Percentage,
            -1000,
        );
        assert!(amount.is_zero());
    }
}
