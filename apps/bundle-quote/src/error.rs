//! # Quote Error Types
//!
//! Everything that can go wrong around the engine: reading files, parsing
//! documents and arguments, resolving the request.

use thiserror::Error;

use pricing_core::{PricingError, ValidationError};

/// Result type alias for the CLI.
pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Bad command-line usage.
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// Configuration file is readable but inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid quote document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<ValidationError> for QuoteError {
    fn from(err: ValidationError) -> Self {
        QuoteError::Pricing(PricingError::Validation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_errors_are_transparent() {
        let err: QuoteError = PricingError::ProductNotFound("54801".to_string()).into();
        assert_eq!(err.to_string(), "Product not found: 54801");
    }

    #[test]
    fn test_validation_errors_convert() {
        let err: QuoteError = ValidationError::Required {
            field: "product_ids".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            QuoteError::Pricing(PricingError::Validation(_))
        ));
    }
}
