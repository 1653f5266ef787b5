//! # pricing-core: Telecom Bundle Pricing Engine
//!
//! Prices a bundle of telecom products and options: eligibility rules,
//! permanent bundle discounts, time-limited promotions with mutual
//! exclusions, and a month-by-month cost projection with a summary.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bundle Pricing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Caller (bundle-quote CLI, services, ...)              │   │
//! │  │   loads catalog ──► BundleRequest ──► resolves "now"            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ BundleContext                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌─────────────┐  ┌──────────┐   │   │
//! │  │   │  rules   │─►│ discount │─►│ eligibility │─►│ timeline │   │   │
//! │  │   └──────────┘  └──────────┘  └─────────────┘  └────┬─────┘   │   │
//! │  │                                                      ▼         │   │
//! │  │                   calculator ◄──────────────────  summary      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO SHARED STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Products, options, rules, price rules, promotions
//! - [`money`] - Money type with integer cents
//! - [`context`] - The per-request [`BundleContext`]
//! - [`rules`] - Fail-closed rule evaluation
//! - [`discount`] - Discount amount arithmetic
//! - [`eligibility`] - Price rule / promotion selection and exclusions
//! - [`timeline`] - Month-by-month projection
//! - [`summary`] - Headline figures from a timeline
//! - [`calculator`] - End-to-end orchestration
//! - [`request`] - Request validation and resolution against a catalog
//! - [`validation`] - Boundary validators
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same inputs, byte-identical output
//! 2. **Fail-closed**: a malformed rule or method means "does not apply"
//! 3. **Additive stacking**: every discount is computed against the base price
//! 4. **Integer Money**: all monetary values are cents

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod context;
pub mod discount;
pub mod eligibility;
pub mod error;
pub mod money;
pub mod request;
pub mod rules;
pub mod summary;
pub mod timeline;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{
    calculate_bundle_pricing, AppliedDiscount, BundleCalculation, PricingCalculator,
};
pub use context::BundleContext;
pub use eligibility::{DiscountApplication, DiscountKind};
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use request::{BundleRequest, Catalog};
pub use summary::PricingSummary;
pub use timeline::MonthlyBreakdown;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Projection length used when a request does not name one.
pub const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Shortest projection a request may ask for.
pub const MIN_DURATION_MONTHS: u32 = 1;

/// Longest projection a request may ask for (five years).
pub const MAX_DURATION_MONTHS: u32 = 60;
