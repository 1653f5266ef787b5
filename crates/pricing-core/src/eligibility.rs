//! # Eligibility Resolution
//!
//! Selects which price rules and promotions apply to a bundle and turns
//! them into [`DiscountApplication`]s.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price rules ──► rules pass? ─────────────────────────────┐            │
//! │                                                             ▼            │
//! │  Promotions ──► in validity window? ──► rules pass? ──► exclusions     │
//! │                                                             │            │
//! │                                                             ▼            │
//! │              DiscountCalculator(base price) ──► DiscountApplication    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every amount is computed against the same pre-discount base price, so
//! stacking is additive and the application order never changes totals.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::context::BundleContext;
use crate::discount::DiscountCalculator;
use crate::money::Money;
use crate::rules::RuleEvaluator;
use crate::types::{DiscountSource, PriceRule, Promotion};

// =============================================================================
// Discount Application
// =============================================================================

/// Where a discount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Permanent bundle discount.
    PriceRule,
    /// Time-limited promotion.
    Promotion,
}

/// A resolved discount, ready for the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountApplication {
    pub source_id: String,
    pub name: String,
    pub kind: DiscountKind,
    /// Monthly amount, computed once against the base price.
    pub amount: Money,
    /// Months 1..=D carry the discount; `None` means every month.
    pub duration_months: Option<u32>,
    pub calculation_order: i32,
    pub applies_to_product: Option<String>,
}

impl DiscountApplication {
    /// Whether this discount is charged in the given 1-based month.
    pub fn applies_in_month(&self, month: u32) -> bool {
        self.duration_months.map_or(true, |duration| month <= duration)
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Stateless eligibility and exclusion logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityResolver;

impl EligibilityResolver {
    /// Price rules whose rule set the bundle satisfies. No date filtering.
    pub fn eligible_price_rules<'a>(
        price_rules: &'a [PriceRule],
        context: &BundleContext,
    ) -> Vec<&'a PriceRule> {
        price_rules
            .iter()
            .filter(|rule| {
                let eligible = RuleEvaluator::evaluate_all(&rule.rules, context);
                if !eligible {
                    debug!(price_rule = %rule.id, "Price rule conditions not met");
                }
                eligible
            })
            .collect()
    }

    /// Promotions valid on the calculation date whose rules pass, after
    /// exclusion resolution.
    pub fn eligible_promotions<'a>(
        promotions: &'a [Promotion],
        context: &BundleContext,
    ) -> Vec<&'a Promotion> {
        let date = context.calculation_date();

        let candidates = promotions
            .iter()
            .filter(|promo| {
                if !promo.is_valid_on(date) {
                    debug!(promotion = %promo.id, %date, "Promotion outside validity window");
                    return false;
                }
                if !RuleEvaluator::evaluate_all(&promo.rules, context) {
                    debug!(promotion = %promo.id, "Promotion conditions not met");
                    return false;
                }
                true
            })
            .collect();

        Self::resolve_exclusions(candidates)
    }

    /// Drops promotions that lose a mutual-exclusion conflict.
    ///
    /// For each promotion P named in some eligible promotion's exclusion
    /// list, P is dropped when any promotion excluding it has a strictly
    /// lower calculation order. The check is pairwise against the input
    /// set, not transitive: a dropped promotion still counts as an
    /// excluder for the others. Input order is preserved.
    pub fn resolve_exclusions(promotions: Vec<&Promotion>) -> Vec<&Promotion> {
        let excluded_ids: BTreeSet<&str> = promotions
            .iter()
            .copied()
            .flat_map(|promo| promo.excluded_promos.iter().map(String::as_str))
            .collect();

        if excluded_ids.is_empty() {
            return promotions;
        }

        promotions
            .iter()
            .filter(|promo| {
                if !excluded_ids.contains(promo.id.as_str()) {
                    return true;
                }

                let winner = promotions
                    .iter()
                    .filter(|other| other.excludes(&promo.id))
                    .min_by_key(|other| other.calculation_order);

                match winner {
                    Some(winner) if winner.calculation_order < promo.calculation_order => {
                        debug!(
                            promotion = %promo.id,
                            excluded_by = %winner.id,
                            "Promotion dropped by exclusion"
                        );
                        false
                    }
                    _ => true,
                }
            })
            .copied()
            .collect()
    }

    /// Computes permanent discount applications, sorted by calculation order.
    pub fn apply_price_rules(rules: &[&PriceRule], base_price: Money) -> Vec<DiscountApplication> {
        let applications = rules
            .iter()
            .map(|rule| application(*rule, DiscountKind::PriceRule, None, base_price))
            .collect();
        sorted_by_order(applications)
    }

    /// Computes promotional discount applications, sorted by calculation order.
    pub fn apply_promotions(
        promotions: &[&Promotion],
        base_price: Money,
    ) -> Vec<DiscountApplication> {
        let applications = promotions
            .iter()
            .map(|promo| {
                application(
                    *promo,
                    DiscountKind::Promotion,
                    promo.duration_months,
                    base_price,
                )
            })
            .collect();
        sorted_by_order(applications)
    }
}

fn application<S: DiscountSource>(
    source: &S,
    kind: DiscountKind,
    duration_months: Option<u32>,
    base_price: Money,
) -> DiscountApplication {
    DiscountApplication {
        source_id: source.id().to_string(),
        name: source.name().to_string(),
        kind,
        amount: DiscountCalculator::amount(
            base_price,
            source.calculation_method(),
            source.calculation_value(),
        ),
        duration_months,
        calculation_order: source.calculation_order(),
        applies_to_product: None,
    }
}

// Stable: equal orders keep catalog order.
fn sorted_by_order(mut applications: Vec<DiscountApplication>) -> Vec<DiscountApplication> {
    applications.sort_by_key(|a| a.calculation_order);
    applications
}

// =============================================================================
// Unit Tests
// =============================================================================
