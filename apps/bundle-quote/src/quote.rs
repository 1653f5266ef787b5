//! # Quote Documents
//!
//! A quote file carries the catalog snapshot and the bundle request together:
//!
//! ```json
//! {
//!   "catalog": { "products": [...], "options": [...], "price_rules": [...], "promotions": [...] },
//!   "request": { "product_ids": ["54801", "54831"], "option_ids": [] }
//! }
//! ```
//!
//! The request may be left out when the file is only used to list active
//! promotions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use pricing_core::{
    calculate_bundle_pricing, BundleCalculation, BundleRequest, Catalog, Promotion,
};

use crate::args::Args;
use crate::config::QuoteConfig;
use crate::error::{QuoteError, QuoteResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDocument {
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub request: Option<BundleRequest>,
}

impl QuoteDocument {
    pub fn from_file(path: &Path) -> QuoteResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let document: QuoteDocument = serde_json::from_str(&contents)?;

        debug!(
            ?path,
            products = document.catalog.products.len(),
            price_rules = document.catalog.price_rules.len(),
            promotions = document.catalog.promotions.len(),
            "Loaded quote document"
        );

        Ok(document)
    }

    /// Applies flag and config defaults to the request.
    ///
    /// Flags beat the document; the document beats the config default.
    pub fn effective_request(
        &self,
        args: &Args,
        config: &QuoteConfig,
    ) -> QuoteResult<BundleRequest> {
        let mut request = self.request.clone().ok_or_else(|| {
            QuoteError::InvalidArgs("Quote document has no request to price".to_string())
        })?;

        if args.date.is_some() {
            request.calculation_date = args.date;
        }

        request.duration_months = args
            .months
            .or(request.duration_months)
            .or(Some(config.quote.default_duration_months));

        Ok(request)
    }

    /// Promotions valid on the flag date, else the request date, else `now`.
    pub fn active_promotions(&self, args: &Args, now: DateTime<Utc>) -> Vec<&Promotion> {
        let date = args
            .date
            .or_else(|| self.request.as_ref().and_then(|r| r.calculation_date))
            .unwrap_or(now);

        let active = self.catalog.active_promotions(date);
        info!(%date, active = active.len(), "Listed active promotions");
        active
    }

    /// Validates the catalog, resolves the request and prices it.
    pub fn price(
        &self,
        args: &Args,
        config: &QuoteConfig,
        now: DateTime<Utc>,
    ) -> QuoteResult<BundleCalculation> {
        self.catalog.validate()?;

        let request = self.effective_request(args, config)?;
        let context = request.resolve(&self.catalog, now)?;

        let calculation = calculate_bundle_pricing(
            &context,
            &self.catalog.price_rules,
            &self.catalog.promotions,
        );

        info!(
            products = calculation.products.len(),
            months = calculation.monthly_breakdown.len(),
            first_month = %calculation.summary.first_month_total,
            "Bundle priced"
        );

        Ok(calculation)
    }
}
