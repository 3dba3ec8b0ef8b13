//! # Validation Module
//!
//! Construction-time checks for Till's data records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Text input (CLI args, catalog rows)                          │
//! │  ├── Shape checks: column count, unit type spelling                    │
//! │  └── Decimal / integer parsing                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Record constructors (Product, Promotion, ScannedItem)        │
//! │  └── THIS MODULE: value rules (sign, upper limits, non-empty)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Checkout engine                                                       │
//! │  └── No checks at all: it can only receive valid records              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use till_core::validation::{validate_product_id, validate_weight};
//!
//! assert!(validate_product_id("CHIPS").is_ok());
//! assert!(validate_weight(Decimal::new(12, 1)).is_ok());
//! assert!(validate_weight(Decimal::ZERO).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::{Money, Weight};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// Any other text is accepted; ids come from catalog files we don't control.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Limits
// =============================================================================
//
// One scan is worth at most MAX_PRICE x MAX_QUANTITY (or MAX_PRICE x
// MAX_WEIGHT) = 10^15. Decimal::MAX is about 7.9 x 10^28, so totals, savings
// and summed weights stay in range for well over ten trillion scans.

/// Largest accepted price per unit.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest piece count accepted in one scan.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Largest weight in kilograms accepted in one scan.
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price per unit.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed [`MAX_PRICE`]
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if Money::from_decimal(price).is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_PRICE.to_string(),
        });
    }

    Ok(())
}

/// Validates a scanned piece count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_QUANTITY`]
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Till: Scan Pieces                                                      │
/// │                                                                         │
/// │  Cashier enters: CHIPS x 0                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty == 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → ScannedItem is built and handed to the checkout         │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a scanned weight.
///
/// ## Rules
/// - Must be strictly positive (> 0)
/// - Must not exceed [`MAX_WEIGHT`]
pub fn validate_weight(weight: Decimal) -> ValidationResult<()> {
    if !Weight::from_decimal(weight).is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }

    if weight > MAX_WEIGHT {
        return Err(ValidationError::TooLarge {
            field: "weight".to_string(),
            max: MAX_WEIGHT.to_string(),
        });
    }

    Ok(())
}

/// Validates the `buy` side of a "buy X get Y free" promotion.
///
/// ## Rules
/// - Must be positive (> 0); `free` is unsigned and may be zero
pub fn validate_promotion_buy(buy: u32) -> ValidationResult<()> {
    if buy == 0 {
        return Err(ValidationError::MustBePositive {
            field: "promotion buy".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
