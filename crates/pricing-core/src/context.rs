//! # Bundle Context
//!
//! The read-only view of one pricing request: what was selected, when the
//! calculation happens and how far ahead to project.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{BundleOption, Product};

/// Selected products and options plus derived id sets.
///
/// Built once per calculation through [`BundleContext::new`]; the id sets
/// are always consistent with the product and option lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleContext {
    products: Vec<Product>,
    options: Vec<BundleOption>,
    product_ids: BTreeSet<String>,
    option_ids: BTreeSet<String>,
    group_ids: BTreeSet<String>,
    calculation_date: DateTime<Utc>,
    duration_months: u32,
}

impl BundleContext {
    /// Creates a context. The calculation date is always explicit; callers
    /// resolve "now" before getting here.
    pub fn new(
        products: Vec<Product>,
        options: Vec<BundleOption>,
        calculation_date: DateTime<Utc>,
        duration_months: u32,
    ) -> Self {
        let product_ids = products.iter().map(|p| p.id.clone()).collect();
        let option_ids = options.iter().map(|o| o.id.clone()).collect();
        let group_ids = products.iter().map(|p| p.group_id.clone()).collect();

        BundleContext {
            products,
            options,
            product_ids,
            option_ids,
            group_ids,
            calculation_date,
            duration_months,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn options(&self) -> &[BundleOption] {
        &self.options
    }

    pub fn product_ids(&self) -> &BTreeSet<String> {
        &self.product_ids
    }

    pub fn option_ids(&self) -> &BTreeSet<String> {
        &self.option_ids
    }

    /// Groups represented in the bundle.
    pub fn group_ids(&self) -> &BTreeSet<String> {
        &self.group_ids
    }

    pub fn calculation_date(&self) -> DateTime<Utc> {
        self.calculation_date
    }

    /// Number of months to project.
    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    pub fn has_product(&self, id: &str) -> bool {
        self.product_ids.contains(id)
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.option_ids.contains(id)
    }

    /// Sum of every product's and option's monthly price.
    pub fn base_price(&self) -> Money {
        let products: Money = self.products.iter().map(Product::monthly_price).sum();
        let options: Money = self.options.iter().map(BundleOption::monthly_price).sum();
        products + options
    }

    /// Activation and installation fees of every selected product.
    pub fn one_time_fees(&self) -> Money {
        self.products.iter().map(Product::one_time_fees).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: &str, group: &str, price: i64, fee: i64) -> Product {
        Product {
            id: id.to_string(),
            name: String::new(),
            group_id: group.to_string(),
            monthly_price_cents: price,
            activation_fee_cents: fee,
            installation_fee_cents: 0,
        }
    }

    #[test]
    fn test_derived_sets_and_totals() {
        let context = BundleContext::new(
            vec![
                product("54801", "54776", 5900, 3900),
                product("54831", "54781", 2200, 0),
            ],
            vec![BundleOption {
                id: "54891".to_string(),
                name: "Netflix".to_string(),
                monthly_price_cents: 1499,
            }],
            Utc.with_ymd_and_hms(2025, 10, 27, 0, 0, 0).unwrap(),
            12,
        );

        assert!(context.has_product("54801"));
        assert!(!context.has_product("99999"));
        assert!(context.has_option("54891"));
        assert_eq!(context.group_ids().len(), 2);
        assert_eq!(context.base_price().cents(), 9599);
        assert_eq!(context.one_time_fees().cents(), 3900);
        assert_eq!(context.duration_months(), 12);
    }

    #[test]
    fn test_empty_bundle() {
        let context = BundleContext::new(
            vec![],
            vec![],
            Utc.with_ymd_and_hms(2025, 10, 27, 0, 0, 0).unwrap(),
            3,
        );
        assert!(context.base_price().is_zero());
        assert!(context.one_time_fees().is_zero());
        assert!(context.group_ids().is_empty());
    }
}
