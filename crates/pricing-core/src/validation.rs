//! # Validation Module
//!
//! Checks applied at the request boundary, before the engine runs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Types, required fields                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty, non-blank, unique ids                                  │
//! │  ├── Projection length within 1..=60 months                            │
//! │  └── Promotion windows that start before they end                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (fail-closed)                                         │
//! │  └── Malformed rules / methods simply do not apply                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::validation::validate_duration_months;
//!
//! assert!(validate_duration_months(12).is_ok());
//! assert!(validate_duration_months(0).is_err());
//! assert!(validate_duration_months(61).is_err());
//! ```

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::types::Promotion;
use crate::{MAX_DURATION_MONTHS, MIN_DURATION_MONTHS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates the projection length.
pub fn validate_duration_months(months: u32) -> ValidationResult<u32> {
    if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&months) {
        return Err(ValidationError::OutOfRange {
            field: "duration_months".to_string(),
            min: MIN_DURATION_MONTHS as i64,
            max: MAX_DURATION_MONTHS as i64,
        });
    }
    Ok(months)
}

/// Validates a list of catalog ids.
///
/// ## Rules
/// - No blank ids
/// - No duplicates
pub fn validate_ids(field: &str, ids: &[String]) -> ValidationResult<()> {
    let mut seen = BTreeSet::new();

    for id in ids {
        if id.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "identifiers must not be blank".to_string(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates the product selection: at least one product, valid ids.
pub fn validate_product_ids(ids: &[String]) -> ValidationResult<()> {
    if ids.is_empty() {
        return Err(ValidationError::Required {
            field: "product_ids".to_string(),
        });
    }
    validate_ids("product_ids", ids)
}

/// Validates a promotion's validity window.
pub fn validate_promotion(promotion: &Promotion) -> ValidationResult<()> {
    if promotion.end_date < promotion.start_date {
        return Err(ValidationError::InvalidWindow {
            promotion_id: promotion.id.clone(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
