//! # Timeline Projection
//!
//! Projects the base price and resolved discounts over the requested number
//! of months.
//!
//! ## Month Layout
//! ```text
//! month:        1        2 ... D        D+1 ... N
//!             ┌────────┬──────────────┬──────────────┐
//! base        │  base  │     base     │     base     │
//! permanent   │  -P    │     -P       │     -P       │
//! temporary   │  -T    │     -T       │      0       │  (promo of D months)
//! fees        │  +F    │      0       │      0       │
//!             └────────┴──────────────┴──────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::eligibility::DiscountApplication;
use crate::money::Money;

/// Costs for one billing month.
///
/// `total_monthly = base_price - permanent_discounts - temporary_discounts`
/// and `total_due = total_monthly + one_time_fees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyBreakdown {
    /// 1-based month number.
    pub month: u32,
    pub base_price: Money,
    pub permanent_discounts: Money,
    pub temporary_discounts: Money,
    pub total_monthly: Money,
    /// Activation and installation fees; only nonzero in month 1.
    pub one_time_fees: Money,
    pub total_due: Money,
}

/// Builds the month-by-month projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineBuilder;

impl TimelineBuilder {
    /// Produces exactly `months` entries numbered `1..=months`.
    ///
    /// Discount amounts are reused as computed; nothing is re-derived per
    /// month. Temporary applications without a duration apply every month.
    pub fn build(
        base_price: Money,
        permanent: &[DiscountApplication],
        temporary: &[DiscountApplication],
        one_time_fees: Money,
        months: u32,
    ) -> Vec<MonthlyBreakdown> {
        let permanent_discounts: Money = permanent.iter().map(|d| d.amount).sum();

        (1..=months)
            .map(|month| {
                let temporary_discounts: Money = temporary
                    .iter()
                    .filter(|d| d.applies_in_month(month))
                    .map(|d| d.amount)
                    .sum();

                let total_monthly = base_price - permanent_discounts - temporary_discounts;
                let fees = if month == 1 { one_time_fees } else { Money::zero() };

                MonthlyBreakdown {
                    month,
                    base_price,
                    permanent_discounts,
                    temporary_discounts,
                    total_monthly,
                    one_time_fees: fees,
                    total_due: total_monthly + fees,
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::DiscountKind;

    fn discount(id: &str, cents: i64, duration: Option<u32>) -> DiscountApplication {
        DiscountApplication {
            source_id: id.to_string(),
            name: id.to_string(),
            kind: if duration.is_some() {
                DiscountKind::Promotion
            } else {
                DiscountKind::PriceRule
            },
            amount: Money::from_cents(cents),
            duration_months: duration,
            calculation_order: 0,
            applies_to_product: None,
        }
    }

    #[test]
    fn test_length_matches_duration() {
        for months in 1..=60 {
            let timeline =
                TimelineBuilder::build(Money::from_cents(8100), &[], &[], Money::zero(), months);
            assert_eq!(timeline.len(), months as usize);
            for (index, entry) in timeline.iter().enumerate() {
                assert_eq!(entry.month, index as u32 + 1);
            }
        }
    }

    #[test]
    fn test_zero_months_is_empty() {
        let timeline = TimelineBuilder::build(Money::from_cents(8100), &[], &[], Money::zero(), 0);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_fees_only_in_first_month() {
        let timeline = TimelineBuilder::build(
            Money::from_cents(8100),
            &[],
            &[],
            Money::from_cents(3900),
            12,
        );
        assert_eq!(timeline[0].one_time_fees.cents(), 3900);
        assert_eq!(timeline[0].total_due.cents(), 12000);
        assert!(timeline[1..].iter().all(|m| m.one_time_fees.is_zero()));
        assert!(timeline[1..].iter().all(|m| m.total_due == m.total_monthly));
    }

    #[test]
    fn test_temporary_discount_cutoff() {
        let permanent = [discount("PR", 900, None)];
        let temporary = [discount("PROMO", 1500, Some(6))];
        let timeline = TimelineBuilder::build(
            Money::from_cents(8100),
            &permanent,
            &temporary,
            Money::zero(),
            12,
        );

        assert_eq!(timeline[5].temporary_discounts.cents(), 1500);
        assert_eq!(timeline[5].total_monthly.cents(), 5700);
        assert!(timeline[6].temporary_discounts.is_zero());
        assert_eq!(timeline[6].total_monthly.cents(), 7200);
        assert!(timeline.iter().all(|m| m.permanent_discounts.cents() == 900));
    }

    #[test]
    fn test_open_ended_temporary_discount() {
        let temporary = [discount("FOREVER", 500, None)];
        let timeline =
            TimelineBuilder::build(Money::from_cents(2000), &[], &temporary, Money::zero(), 24);
        assert!(timeline.iter().all(|m| m.temporary_discounts.cents() == 500));
    }

    #[test]
    fn test_staggered_promotions() {
        let temporary = [discount("SHORT", 300, Some(3)), discount("LONG", 200, Some(12))];
        let timeline =
            TimelineBuilder::build(Money::from_cents(5000), &[], &temporary, Money::zero(), 13);

        assert_eq!(timeline[2].temporary_discounts.cents(), 500);
        assert_eq!(timeline[3].temporary_discounts.cents(), 200);
        assert_eq!(timeline[11].temporary_discounts.cents(), 200);
        assert!(timeline[12].temporary_discounts.is_zero());
    }

    #[test]
    fn test_row_invariants() {
        let permanent = [discount("PR", 400, None)];
        let temporary = [discount("PROMO", 1000, Some(2))];
        let timeline = TimelineBuilder::build(
            Money::from_cents(6000),
            &permanent,
            &temporary,
            Money::from_cents(2500),
            5,
        );
        for m in &timeline {
            assert_eq!(
                m.total_monthly,
                m.base_price - m.permanent_discounts - m.temporary_discounts
            );
            assert_eq!(m.total_due, m.total_monthly + m.one_time_fees);
        }
    }
}
