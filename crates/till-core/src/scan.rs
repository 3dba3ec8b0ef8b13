//! # Scanned Items
//!
//! One `ScannedItem` per scan event. A scan carries a piece count or a
//! weight, never both, and which one is fixed by the product's unit type.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::money::Weight;
use crate::types::{Product, UnitType};
use crate::validation::{validate_quantity, validate_weight};

/// The amount recorded by a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanQuantity {
    /// Number of pieces, always > 0.
    Pieces(u32),
    /// Measured weight, always > 0.
    Weight(Weight),
}

impl ScanQuantity {
    /// Unit type this amount belongs to.
    pub fn unit_type(&self) -> UnitType {
        match self {
            ScanQuantity::Pieces(_) => UnitType::Piece,
            ScanQuantity::Weight(_) => UnitType::Weight,
        }
    }
}

/// A single scanned item bound to a shared product record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedItem {
    product: Arc<Product>,
    quantity: ScanQuantity,
}

impl ScannedItem {
    /// Scans `quantity` pieces of a product sold by the piece.
    ///
    /// ## Errors
    /// - `UnitTypeMismatch` if the product is sold by weight
    /// - `MustBePositive` if `quantity` is zero
    /// - `TooLarge` if `quantity` is above `MAX_QUANTITY`
    pub fn pieces(product: impl Into<Arc<Product>>, quantity: u32) -> CoreResult<Self> {
        let product = product.into();
        ensure_unit_type(&product, UnitType::Piece)?;
        validate_quantity(quantity)?;

        Ok(ScannedItem {
            product,
            quantity: ScanQuantity::Pieces(quantity),
        })
    }

    /// Scans a weighed amount of a product sold by weight.
    ///
    /// ## Errors
    /// - `UnitTypeMismatch` if the product is sold by the piece
    /// - `MustBePositive` if `weight` is zero or negative
    /// - `TooLarge` if `weight` is above `MAX_WEIGHT`
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::{Money, Product, ScannedItem, UnitType, Weight};
    ///
    /// let rice = Product::new("RICE", "Rice (kg)", UnitType::Weight, Money::from_cents(4500))?;
    /// let scan = ScannedItem::weighed(rice, Weight::from_decimal(Decimal::new(25, 1)))?;
    /// assert_eq!(scan.product().id(), "RICE");
    /// # Ok::<(), till_core::CoreError>(())
    /// ```
    pub fn weighed(product: impl Into<Arc<Product>>, weight: Weight) -> CoreResult<Self> {
        let product = product.into();
        ensure_unit_type(&product, UnitType::Weight)?;
        validate_weight(weight.kilograms())?;

        Ok(ScannedItem {
            product,
            quantity: ScanQuantity::Weight(weight),
        })
    }

    #[inline]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    #[inline]
    pub fn quantity(&self) -> ScanQuantity {
        self.quantity
    }

    /// Piece count, `None` for weighed scans.
    pub fn pieces_count(&self) -> Option<u32> {
        match self.quantity {
            ScanQuantity::Pieces(count) => Some(count),
            ScanQuantity::Weight(_) => None,
        }
    }

    /// Weight, `None` for piece scans.
    pub fn weight(&self) -> Option<Weight> {
        match self.quantity {
            ScanQuantity::Weight(weight) => Some(weight),
            ScanQuantity::Pieces(_) => None,
        }
    }
}

fn ensure_unit_type(product: &Product, scanned_by: UnitType) -> CoreResult<()> {
    if product.unit_type() != scanned_by {
        return Err(CoreError::UnitTypeMismatch {
            product_id: product.id().to_string(),
            sold_by: product.unit_type(),
            scanned_by,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::ValidationError;
    use rust_decimal_macros::dec;

    fn chips() -> Arc<Product> {
        Arc::new(Product::new("CHIPS", "Bag of Chips", UnitType::Piece, Money::from_cents(3500)).unwrap())
    }

    fn rice() -> Arc<Product> {
        Arc::new(Product::new("RICE", "Rice (kg)", UnitType::Weight, Money::from_cents(4500)).unwrap())
    }

    #[test]
    fn test_piece_scan() {
        let scan = ScannedItem::pieces(chips(), 3).unwrap();
        assert_eq!(scan.pieces_count(), Some(3));
        assert_eq!(scan.weight(), None);
        assert_eq!(scan.quantity().unit_type(), UnitType::Piece);
    }

    #[test]
    fn test_weight_scan() {
        let scan = ScannedItem::weighed(rice(), Weight::from_decimal(dec!(1.2))).unwrap();
        assert_eq!(scan.weight(), Some(Weight::from_decimal(dec!(1.2))));
        assert_eq!(scan.pieces_count(), None);
    }

    #[test]
    fn test_scan_shares_product() {
        let product = chips();
        let scan = ScannedItem::pieces(Arc::clone(&product), 1).unwrap();
        assert!(Arc::ptr_eq(scan.product(), &product));
    }

    #[test]
    fn test_piece_scan_of_weight_product_fails() {
        let err = ScannedItem::pieces(rice(), 2).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnitTypeMismatch {
                sold_by: UnitType::Weight,
                scanned_by: UnitType::Piece,
                ..
            }
        ));
    }

    #[test]
    fn test_weight_scan_of_piece_product_fails() {
        let err = ScannedItem::weighed(chips(), Weight::from_decimal(dec!(1))).unwrap_err();
        assert!(matches!(err, CoreError::UnitTypeMismatch { .. }));
    }

    #[test]
    fn test_non_positive_amounts_fail() {
        let err = ScannedItem::pieces(chips(), 0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        assert!(ScannedItem::weighed(rice(), Weight::zero()).is_err());
        assert!(ScannedItem::weighed(rice(), Weight::from_decimal(dec!(-0.5))).is_err());
    }
}
