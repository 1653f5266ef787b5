//! # Pricing Calculator
//!
//! Runs the whole engine for one bundle and assembles the result.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BundleContext + PriceRules + Promotions                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  1. base price (products + options)                                    │
//! │  2. eligible price rules          ─┐                                   │
//! │  3. eligible promotions (window,   ├─► DiscountApplications            │
//! │     rules, exclusions)            ─┘                                   │
//! │  4. timeline (N months)                                                │
//! │  5. summary                                                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  BundleCalculation                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pricing_core::{calculate_bundle_pricing, BundleContext, Product};
//!
//! let context = BundleContext::new(
//!     vec![Product {
//!         id: "54801".into(),
//!         name: "Internet 500".into(),
//!         group_id: "54776".into(),
//!         monthly_price_cents: 5900,
//!         activation_fee_cents: 3900,
//!         installation_fee_cents: 0,
//!     }],
//!     vec![],
//!     Utc.with_ymd_and_hms(2025, 10, 27, 0, 0, 0).unwrap(),
//!     12,
//! );
//!
//! let result = calculate_bundle_pricing(&context, &[], &[]);
//! assert_eq!(result.summary.first_month_total.cents(), 9800);
//! assert_eq!(result.monthly_breakdown.len(), 12);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::context::BundleContext;
use crate::eligibility::{DiscountApplication, DiscountKind, EligibilityResolver};
use crate::money::Money;
use crate::summary::{PricingSummary, SummaryBuilder};
use crate::timeline::{MonthlyBreakdown, TimelineBuilder};
use crate::types::{BundleOption, PriceRule, Product, Promotion};

// =============================================================================
// Result Types
// =============================================================================

/// A discount as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedDiscount {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub discount_amount: Money,
    /// `None` for permanent discounts.
    pub duration_months: Option<u32>,
    pub applies_to_product: Option<String>,
}

impl From<&DiscountApplication> for AppliedDiscount {
    fn from(application: &DiscountApplication) -> Self {
        AppliedDiscount {
            id: application.source_id.clone(),
            name: application.name.clone(),
            kind: application.kind,
            discount_amount: application.amount,
            duration_months: application.duration_months,
            applies_to_product: application.applies_to_product.clone(),
        }
    }
}

/// Complete pricing for one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BundleCalculation {
    pub products: Vec<Product>,
    pub options: Vec<BundleOption>,
    pub base_monthly_total: Money,
    pub permanent_discount_total: Money,
    /// Sum of every applied promotion, regardless of duration.
    pub promotion_discount_total: Money,
    pub applied_price_rules: Vec<AppliedDiscount>,
    pub applied_promotions: Vec<AppliedDiscount>,
    pub monthly_breakdown: Vec<MonthlyBreakdown>,
    pub summary: PricingSummary,
    pub is_valid_bundle: bool,
    pub validation_message: Option<String>,
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices one bundle against the available price rules and promotions.
#[derive(Debug, Clone, Copy)]
pub struct PricingCalculator<'a> {
    context: &'a BundleContext,
    price_rules: &'a [PriceRule],
    promotions: &'a [Promotion],
}

impl<'a> PricingCalculator<'a> {
    pub fn new(
        context: &'a BundleContext,
        price_rules: &'a [PriceRule],
        promotions: &'a [Promotion],
    ) -> Self {
        PricingCalculator {
            context,
            price_rules,
            promotions,
        }
    }

    /// Runs the engine. Never fails: bad catalog entries just do not apply.
    pub fn calculate(&self) -> BundleCalculation {
        let base_price = self.context.base_price();

        let eligible_rules =
            EligibilityResolver::eligible_price_rules(self.price_rules, self.context);
        let eligible_promotions =
            EligibilityResolver::eligible_promotions(self.promotions, self.context);

        let permanent = EligibilityResolver::apply_price_rules(&eligible_rules, base_price);
        let temporary = EligibilityResolver::apply_promotions(&eligible_promotions, base_price);

        let permanent_discount_total: Money = permanent.iter().map(|d| d.amount).sum();
        let promotion_discount_total: Money = temporary.iter().map(|d| d.amount).sum();

        debug!(
            base = %base_price,
            price_rules = permanent.len(),
            promotions = temporary.len(),
            permanent = %permanent_discount_total,
            promotional = %promotion_discount_total,
            "Resolved bundle discounts"
        );

        let monthly_breakdown = TimelineBuilder::build(
            base_price,
            &permanent,
            &temporary,
            self.context.one_time_fees(),
            self.context.duration_months(),
        );
        let summary = SummaryBuilder::build(&monthly_breakdown);

        BundleCalculation {
            products: self.context.products().to_vec(),
            options: self.context.options().to_vec(),
            base_monthly_total: base_price,
            permanent_discount_total,
            promotion_discount_total,
            applied_price_rules: permanent.iter().map(AppliedDiscount::from).collect(),
            applied_promotions: temporary.iter().map(AppliedDiscount::from).collect(),
            monthly_breakdown,
            summary,
            is_valid_bundle: true,
            validation_message: None,
        }
    }
}

/// Convenience wrapper around [`PricingCalculator`].
pub fn calculate_bundle_pricing(
    context: &BundleContext,
    price_rules: &[PriceRule],
    promotions: &[Promotion],
) -> BundleCalculation {
    PricingCalculator::new(context, price_rules, promotions).calculate()
}

// =============================================================================
// Unit Tests
// =============================================================================
