//! # Catalog Types
//!
//! Products, options and the discount definitions the engine prices with.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  BundleOption   │   │      Rule       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, group_id   │   │  id, name       │   │  kind           │       │
//! │  │  monthly price  │   │  monthly price  │   │  parameters     │       │
//! │  │  one-time fees  │   └─────────────────┘   └────────┬────────┘       │
//! │  └─────────────────┘                                  │ AND            │
//! │                          ┌────────────────────────────┴──────┐         │
//! │                          ▼                                   ▼         │
//! │                 ┌─────────────────┐               ┌─────────────────┐  │
//! │                 │   PriceRule     │               │   Promotion     │  │
//! │                 │  (permanent)    │               │ (time-limited)  │  │
//! │                 └────────┬────────┘               └────────┬────────┘  │
//! │                          └──────── DiscountSource ─────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All catalog values are supplied by the caller already loaded; nothing here
//! talks to a database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A subscribable product (internet, mobile, TV line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Product group (Internet, Mobile, TV, ...).
    pub group_id: String,

    /// Monthly recurring price in cents.
    pub monthly_price_cents: i64,

    /// One-time activation fee in cents.
    #[serde(default)]
    pub activation_fee_cents: i64,

    /// One-time installation fee in cents.
    #[serde(default)]
    pub installation_fee_cents: i64,
}

impl Product {
    /// Returns the monthly price as Money.
    #[inline]
    pub fn monthly_price(&self) -> Money {
        Money::from_cents(self.monthly_price_cents)
    }

    /// Activation plus installation fee, charged once in month 1.
    #[inline]
    pub fn one_time_fees(&self) -> Money {
        Money::from_cents(self.activation_fee_cents + self.installation_fee_cents)
    }
}

// =============================================================================
// Bundle Option
// =============================================================================

/// An add-on option (streaming, WiFi comfort, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BundleOption {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub monthly_price_cents: i64,
}

impl BundleOption {
    /// Returns the monthly price as Money.
    #[inline]
    pub fn monthly_price(&self) -> Money {
        Money::from_cents(self.monthly_price_cents)
    }
}

// =============================================================================
// Calculation Method
// =============================================================================

/// How a discount value turns into an amount.
///
/// | Method       | `calculation_value` unit | Amount                    |
/// |--------------|--------------------------|---------------------------|
/// | `amount`     | cents                    | `min(value, base)`        |
/// | `percentage` | basis points             | `base × value / 10000`    |
/// | `free`       | ignored                  | `base`                    |
/// | unknown      | ignored                  | zero                      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    Amount,
    Percentage,
    Free,
    /// Any method name this engine does not know.
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Promotion Type
// =============================================================================

/// Marketing category of a promotion. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromoType {
    #[default]
    Discount,
    ActivationFee,
    Data,
    #[serde(other)]
    Other,
}

// =============================================================================
// Rules
// =============================================================================

/// The closed set of eligibility predicates.
///
/// Wire names follow the catalog feed (`hasProduct`, `itemNumber`, ...).
/// Unrecognised names deserialize to [`RuleKind::Unknown`], which never
/// passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Any of the listed product ids is selected.
    #[serde(rename = "hasProduct")]
    HasProduct,
    /// Some selected product belongs to group `parameters[0]`.
    #[serde(rename = "hasProductInGroup")]
    HasProductInGroup,
    /// Every selected product belongs to group `parameters[0]`.
    #[serde(rename = "hasOnlyProductInGroup")]
    HasOnlyProductInGroup,
    /// Any of the listed option ids is selected.
    #[serde(rename = "hasOption")]
    HasOption,
    /// Number of selected products equals `parameters[0]`.
    #[serde(rename = "itemNumber", alias = "itemCountEquals")]
    ItemCountEquals,
    /// At least `parameters[0]` selected products are listed in `parameters[1]`
    /// when that is a nested list, otherwise in `parameters[1..]`.
    #[serde(rename = "itemMin", alias = "itemCountAtLeast")]
    ItemCountAtLeast,
    #[serde(other)]
    Unknown,
}

impl RuleKind {
    /// Minimum number of parameters a well-formed rule of this kind carries.
    pub const fn min_parameters(&self) -> usize {
        match self {
            RuleKind::HasProduct
            | RuleKind::HasProductInGroup
            | RuleKind::HasOnlyProductInGroup
            | RuleKind::HasOption
            | RuleKind::ItemCountEquals => 1,
            RuleKind::ItemCountAtLeast => 2,
            RuleKind::Unknown => 0,
        }
    }
}

/// A single eligibility predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Ordered parameters, as they appear in the feed.
    #[serde(default)]
    pub parameters: Vec<RuleParameter>,
}

impl Rule {
    /// Creates a rule from a kind and parameters.
    pub fn new<I, P>(kind: RuleKind, parameters: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RuleParameter>,
    {
        Rule {
            kind,
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

/// One rule parameter: a scalar id or count, or a nested id list
/// (`["2", ["54801", "54831"]]`).
///
/// Numbers in the feed become text. Lists nested deeper than one level are
/// flattened into their enclosing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawParameter")]
pub enum RuleParameter {
    Text(String),
    List(Vec<String>),
}

impl RuleParameter {
    /// Builds a nested list parameter.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleParameter::List(items.into_iter().map(Into::into).collect())
    }

    /// The scalar value, or `None` for a nested list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleParameter::Text(text) => Some(text),
            RuleParameter::List(_) => None,
        }
    }
}

impl From<&str> for RuleParameter {
    fn from(text: &str) -> Self {
        RuleParameter::Text(text.to_string())
    }
}

impl From<String> for RuleParameter {
    fn from(text: String) -> Self {
        RuleParameter::Text(text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawParameter {
    Text(String),
    Integer(i64),
    List(Vec<RawParameter>),
}

impl RawParameter {
    fn flatten_into(self, out: &mut Vec<String>) {
        match self {
            RawParameter::Text(text) => out.push(text),
            RawParameter::Integer(n) => out.push(n.to_string()),
            RawParameter::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<RawParameter> for RuleParameter {
    fn from(raw: RawParameter) -> Self {
        match raw {
            RawParameter::Text(text) => RuleParameter::Text(text),
            RawParameter::Integer(n) => RuleParameter::Text(n.to_string()),
            RawParameter::List(items) => {
                let mut flat = Vec::with_capacity(items.len());
                for item in items {
                    item.flatten_into(&mut flat);
                }
                RuleParameter::List(flat)
            }
        }
    }
}

// =============================================================================
// Discount Sources
// =============================================================================

/// What price rules and promotions have in common.
pub trait DiscountSource {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn calculation_method(&self) -> CalculationMethod;
    fn calculation_value(&self) -> i64;
    /// Lower values are applied and win exclusion conflicts first.
    fn calculation_order(&self) -> i32;
    /// Conjunction of eligibility rules; empty means always eligible.
    fn rules(&self) -> &[Rule];
}

/// A permanent bundle discount ("lifetime advantage").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRule {
    pub id: String,
    pub name: String,
    pub calculation_method: CalculationMethod,
    pub calculation_value: i64,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub calculation_order: i32,
}

impl DiscountSource for PriceRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn calculation_method(&self) -> CalculationMethod {
        self.calculation_method
    }

    fn calculation_value(&self) -> i64 {
        self.calculation_value
    }

    fn calculation_order(&self) -> i32 {
        self.calculation_order
    }

    fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// A time-limited promotional offer.
///
/// Two different time spans are involved:
/// - `start_date..=end_date`: when the offer can be subscribed to
/// - `duration_months`: how many billing months the discount lasts once
///   subscribed (`None` keeps it for the whole projection)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub promo_type: PromoType,
    pub calculation_method: CalculationMethod,
    pub calculation_value: i64,
    #[serde(default)]
    pub duration_months: Option<u32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Ids of promotions this one cannot be combined with.
    #[serde(default)]
    pub excluded_promos: Vec<String>,
    #[serde(default)]
    pub calculation_order: i32,
    #[serde(default)]
    pub legal_summary: Option<String>,
}

impl Promotion {
    /// Whether `date` falls inside the validity window (inclusive).
    pub fn is_valid_on(&self, date: DateTime<Utc>) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this promotion names `other_id` as non-combinable.
    pub fn excludes(&self, other_id: &str) -> bool {
        self.excluded_promos.iter().any(|id| id == other_id)
    }
}

impl DiscountSource for Promotion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn calculation_method(&self) -> CalculationMethod {
        self.calculation_method
    }

    fn calculation_value(&self) -> i64 {
        self.calculation_value
    }

    fn calculation_order(&self) -> i32 {
        self.calculation_order
    }

    fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
