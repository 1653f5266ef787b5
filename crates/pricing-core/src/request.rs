//! # Bundle Requests
//!
//! The boundary between a caller's raw request and the engine.
//!
//! ## Resolution
//! ```text
//! BundleRequest ──validate──► ids looked up in Catalog ──► BundleContext
//!      │                                                       ▲
//!      └── calculation_date: None ──► caller-supplied `now` ───┘
//! ```
//!
//! The engine never reads the clock. Whoever calls [`BundleRequest::resolve`]
//! decides what "now" is, which keeps calculations reproducible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::BundleContext;
use crate::error::{PricingError, PricingResult};
use crate::types::{BundleOption, PriceRule, Product, Promotion};
use crate::validation::{
    validate_duration_months, validate_ids, validate_product_ids, validate_promotion,
    ValidationResult,
};
use crate::DEFAULT_DURATION_MONTHS;

/// A request to price a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRequest {
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub option_ids: Vec<String>,
    /// Anchors promotion validity; `None` means "now" at resolution time.
    #[serde(default)]
    pub calculation_date: Option<DateTime<Utc>>,
    /// Projection length; `None` means [`DEFAULT_DURATION_MONTHS`].
    #[serde(default)]
    pub duration_months: Option<u32>,
}

impl BundleRequest {
    /// Validates the request shape without looking anything up.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_ids(&self.product_ids)?;
        validate_ids("option_ids", &self.option_ids)?;
        validate_duration_months(self.duration_months.unwrap_or(DEFAULT_DURATION_MONTHS))?;
        Ok(())
    }

    /// Validates the request and builds the engine context.
    ///
    /// Products and options keep the order they were requested in.
    pub fn resolve(&self, catalog: &Catalog, now: DateTime<Utc>) -> PricingResult<BundleContext> {
        self.validate()?;

        let products = self
            .product_ids
            .iter()
            .map(|id| {
                catalog
                    .product(id)
                    .cloned()
                    .ok_or_else(|| PricingError::ProductNotFound(id.clone()))
            })
            .collect::<PricingResult<Vec<_>>>()?;

        let options = self
            .option_ids
            .iter()
            .map(|id| {
                catalog
                    .option(id)
                    .cloned()
                    .ok_or_else(|| PricingError::OptionNotFound(id.clone()))
            })
            .collect::<PricingResult<Vec<_>>>()?;

        let calculation_date = self.calculation_date.unwrap_or(now);
        let duration_months = self.duration_months.unwrap_or(DEFAULT_DURATION_MONTHS);

        debug!(
            products = products.len(),
            options = options.len(),
            %calculation_date,
            duration_months,
            "Resolved bundle request"
        );

        Ok(BundleContext::new(
            products,
            options,
            calculation_date,
            duration_months,
        ))
    }
}

/// Everything loaded from the catalog for one pricing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub options: Vec<BundleOption>,
    #[serde(default)]
    pub price_rules: Vec<PriceRule>,
    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

impl Catalog {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn option(&self, id: &str) -> Option<&BundleOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Promotions whose validity window contains `date`.
    pub fn active_promotions(&self, date: DateTime<Utc>) -> Vec<&Promotion> {
        self.promotions
            .iter()
            .filter(|p| p.is_valid_on(date))
            .collect()
    }

    /// Checks catalog-level consistency (currently promotion windows).
    pub fn validate(&self) -> ValidationResult<()> {
        self.promotions.iter().try_for_each(validate_promotion)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
