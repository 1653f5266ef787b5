//! # Pricing Summary
//!
//! Customer-facing aggregates derived from a timeline.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::timeline::MonthlyBreakdown;

const MONTHS_PER_YEAR: usize = 12;

/// Headline figures for a bundle quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingSummary {
    /// Month 1 total, fees included.
    pub first_month_total: Money,
    /// Monthly price while promotions run.
    pub promotional_period_monthly: Money,
    /// Last month carrying a temporary discount (0 when none does).
    pub promotional_period_months: u32,
    /// Monthly price in the last projected month.
    pub permanent_monthly: Money,
    pub first_year_total: Money,
    /// Months 13..=24; zero when the projection stops at 12 months or less.
    pub second_year_total: Money,
}

/// Derives a [`PricingSummary`] from a timeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryBuilder;

impl SummaryBuilder {
    /// Builds the summary. An empty timeline yields an all-zero summary.
    ///
    /// `permanent_monthly` is read from the last month, so it is only the
    /// steady-state price when the projection outlasts every promotion.
    pub fn build(timeline: &[MonthlyBreakdown]) -> PricingSummary {
        let (first, last) = match (timeline.first(), timeline.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return PricingSummary::default(),
        };

        let promo_end_month = timeline
            .iter()
            .filter(|m| m.temporary_discounts.is_positive())
            .map(|m| m.month)
            .max()
            .unwrap_or(0);

        // Month 2 carries no one-time fees.
        let promotional_period_monthly = if promo_end_month > 1 {
            timeline[1].total_monthly
        } else {
            first.total_monthly
        };

        let first_year_total = timeline
            .iter()
            .take(MONTHS_PER_YEAR)
            .map(|m| m.total_due)
            .sum();

        let second_year_total = timeline
            .iter()
            .skip(MONTHS_PER_YEAR)
            .take(MONTHS_PER_YEAR)
            .map(|m| m.total_due)
            .sum();

        PricingSummary {
            first_month_total: first.total_due,
            promotional_period_monthly,
            promotional_period_months: promo_end_month,
            permanent_monthly: last.total_monthly,
            first_year_total,
            second_year_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{DiscountApplication, DiscountKind};
    use crate::timeline::TimelineBuilder;

    fn promo(cents: i64, months: u32) -> DiscountApplication {
        DiscountApplication {
            source_id: "PROMO".to_string(),
            name: "Promo".to_string(),
            kind: DiscountKind::Promotion,
            amount: Money::from_cents(cents),
            duration_months: Some(months),
            calculation_order: 0,
            applies_to_product: None,
        }
    }

    #[test]
    fn test_empty_timeline() {
        assert_eq!(SummaryBuilder::build(&[]), PricingSummary::default());
    }

    #[test]
    fn test_no_promotions() {
        let timeline =
            TimelineBuilder::build(Money::from_cents(7200), &[], &[], Money::from_cents(3900), 12);
        let summary = SummaryBuilder::build(&timeline);

        assert_eq!(summary.first_month_total.cents(), 11100);
        assert_eq!(summary.promotional_period_months, 0);
        assert_eq!(summary.promotional_period_monthly.cents(), 7200);
        assert_eq!(summary.permanent_monthly.cents(), 7200);
        assert_eq!(summary.first_year_total.cents(), 7200 * 12 + 3900);
        assert!(summary.second_year_total.is_zero());
    }

    #[test]
    fn test_one_month_promotion_uses_first_month_rate() {
        let timeline = TimelineBuilder::build(
            Money::from_cents(5000),
            &[],
            &[promo(1000, 1)],
            Money::from_cents(2000),
            6,
        );
        let summary = SummaryBuilder::build(&timeline);

        assert_eq!(summary.promotional_period_months, 1);
        assert_eq!(summary.promotional_period_monthly.cents(), 4000);
        assert_eq!(summary.permanent_monthly.cents(), 5000);
    }

    #[test]
    fn test_second_year_total() {
        let timeline = TimelineBuilder::build(
            Money::from_cents(5000),
            &[],
            &[promo(1000, 6)],
            Money::zero(),
            30,
        );
        let summary = SummaryBuilder::build(&timeline);

        assert_eq!(summary.first_year_total.cents(), 4000 * 6 + 5000 * 6);
        assert_eq!(summary.second_year_total.cents(), 5000 * 12);
    }

    #[test]
    fn test_partial_second_year() {
        let timeline =
            TimelineBuilder::build(Money::from_cents(1000), &[], &[], Money::zero(), 15);
        let summary = SummaryBuilder::build(&timeline);
        assert_eq!(summary.second_year_total.cents(), 3000);
    }

    #[test]
    fn test_promotion_outlasting_projection() {
        let timeline = TimelineBuilder::build(
            Money::from_cents(5000),
            &[],
            &[promo(1000, 24)],
            Money::zero(),
            12,
        );
        let summary = SummaryBuilder::build(&timeline);

        assert_eq!(summary.promotional_period_months, 12);
        // Still discounted: the projection never reached the steady state.
        assert_eq!(summary.permanent_monthly.cents(), 4000);
    }
}
