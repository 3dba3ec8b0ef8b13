//! # Domain Types
//!
//! Catalog-level domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Promotion     │   │  ScannedItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id     │   │  product (Arc)  │       │
//! │  │  name           │   │  buy            │   │  quantity       │       │
//! │  │  unit_type      │   │  free           │   │  (pieces XOR    │       │
//! │  │  price_per_unit │   └─────────────────┘   │   weight)       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    UnitType     │   PIECE  → priced per item, integer counts        │
//! │  │  ─────────────  │   WEIGHT → priced per kg, decimal weights         │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable once built. The catalog replaces the record bound
//! to an id instead of editing it, and scans share the record through an
//! `Arc<Product>`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_id};

// =============================================================================
// Unit Type
// =============================================================================

/// How a product is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    /// Sold in discrete integer units (bags, bars).
    Piece,
    /// Sold by measured weight (kilograms).
    Weight,
}

impl UnitType {
    /// Upper-case name used in catalog files and on screen.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UnitType::Piece => "PIECE",
            UnitType::Weight => "WEIGHT",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse: `piece`, `Piece` and `PIECE` are all accepted.
impl FromStr for UnitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PIECE" => Ok(UnitType::Piece),
            "WEIGHT" => Ok(UnitType::Weight),
            other => Err(ValidationError::InvalidFormat {
                field: "unit type".to_string(),
                reason: format!("expected PIECE or WEIGHT, got '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: String,
    name: String,
    unit_type: UnitType,
    price_per_unit: Money,
}

impl Product {
    /// Creates a product.
    ///
    /// ## Errors
    /// - `Required` if the id is empty
    /// - `MustNotBeNegative` if the price is below zero
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{Money, Product, UnitType};
    ///
    /// let chips = Product::new("CHIPS", "Bag of Chips", UnitType::Piece, Money::from_cents(3500))?;
    /// assert_eq!(chips.price_per_unit().to_string(), "35.00");
    /// # Ok::<(), till_core::CoreError>(())
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_type: UnitType,
        price_per_unit: Money,
    ) -> CoreResult<Self> {
        let id = id.into();
        validate_product_id(&id)?;
        validate_price(price_per_unit.amount())?;

        Ok(Product {
            id,
            name: name.into(),
            unit_type,
            price_per_unit,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name shown on the receipt.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    /// Price per piece, or per kilogram for weighed products.
    #[inline]
    pub fn price_per_unit(&self) -> Money {
        self.price_per_unit
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
