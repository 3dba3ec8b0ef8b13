//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Scan/unit-type rule violations                 │
//! │  └── ValidationError  - Field-level construction failures              │
//! │                                                                         │
//! │  till-catalog errors (separate crate)                                  │
//! │  └── CatalogError     - Missing ids, malformed prices, I/O             │
//! │                                                                         │
//! │  till-cli errors (in app)                                              │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → CliError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error in this crate is raised at construction time. Once a
//! `Product`, `Promotion` or `ScannedItem` exists it is valid, so the
//! checkout engine itself has no error path.

use thiserror::Error;

use crate::types::UnitType;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A scan used the wrong kind of amount for the product.
    ///
    /// ## When This Occurs
    /// - Scanning a piece count for a product sold by weight
    /// - Scanning a weight for a product sold by the piece
    ///
    /// ## User Workflow
    /// ```text
    /// Scan RICE x 2 (pieces)
    ///      │
    ///      ▼
    /// RICE is sold by WEIGHT
    ///      │
    ///      ▼
    /// UnitTypeMismatch { product_id: "RICE", sold_by: WEIGHT, scanned_by: PIECE }
    ///      │
    ///      ▼
    /// Till shows: "Product RICE is sold by WEIGHT, cannot scan by PIECE"
    /// ```
    #[error("Product {product_id} is sold by {sold_by}, cannot scan by {scanned_by}")]
    UnitTypeMismatch {
        product_id: String,
        sold_by: UnitType,
        scanned_by: UnitType,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when constructor input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is above the largest amount a till accepts.
    ///
    /// ## When This Occurs
    /// - A catalog price above `MAX_PRICE`
    /// - A single scan above `MAX_QUANTITY` pieces or `MAX_WEIGHT` kg
    ///
    /// The caps keep every sum the checkout engine forms inside the range
    /// of `Decimal`.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: String },

    /// Invalid format (e.g., unparsable decimal, unknown unit type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_mismatch_message() {
        let err = CoreError::UnitTypeMismatch {
            product_id: "RICE".to_string(),
            sold_by: UnitType::Weight,
            scanned_by: UnitType::Piece,
        };
        assert_eq!(
            err.to_string(),
            "Product RICE is sold by WEIGHT, cannot scan by PIECE"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product id".to_string(),
        };
        assert_eq!(err.to_string(), "product id is required");

        let err = ValidationError::MustBePositive {
            field: "weight".to_string(),
        };
        assert_eq!(err.to_string(), "weight must be positive");

        let err = ValidationError::TooLarge {
            field: "price".to_string(),
            max: "1000000000".to_string(),
        };
        assert_eq!(err.to_string(), "price must not exceed 1000000000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: price must not be negative"
        );
    }
}
