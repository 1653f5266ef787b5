//! # Error Types
//!
//! Errors raised at the request boundary of the pricing engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricing-core errors (this file)                                       │
//! │  ├── PricingError     - Unknown catalog ids, wrapped validation        │
//! │  └── ValidationError  - Malformed bundle requests / catalog entries    │
//! │                                                                         │
//! │  bundle-quote errors (separate crate)                                  │
//! │  └── QuoteError       - I/O, JSON, TOML, arguments                     │
//! │                                                                         │
//! │  The engine itself (rules, discounts, timeline, summary) never fails:  │
//! │  a malformed rule or method degrades to "does not apply".              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors resolving a bundle request against the catalog.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A requested product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A requested option id is not in the catalog.
    #[error("Option not found: {0}")]
    OptionNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., blank identifier).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same product requested twice).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// A promotion validity window ends before it starts.
    #[error("Promotion {promotion_id} has a validity window ending before it starts")]
    InvalidWindow { promotion_id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
