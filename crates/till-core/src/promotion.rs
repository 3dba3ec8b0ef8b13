//! # Promotions
//!
//! "Buy B get F free" promotions and the math that turns a scanned quantity
//! into the number of units actually charged.
//!
//! ## Promotion Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Buy 2 get 1 free, 7 units scanned                                      │
//! │                                                                         │
//! │  group size = B + F = 3                                                 │
//! │                                                                         │
//! │  [■ ■ □] [■ ■ □] [■]                                                    │
//! │   group    group   remainder                                            │
//! │                                                                         │
//! │  ■ = charged   □ = free                                                 │
//! │                                                                         │
//! │  charged = groups × B + min(remainder, B)                               │
//! │          = 2 × 2      + min(1, 2)         = 5                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A partial group never gets a discount until it holds more than `B` items;
//! past that point the surplus (at most `F - 1` units) rides free.

use serde::Serialize;

use crate::error::CoreResult;
use crate::validation::{validate_product_id, validate_promotion_buy};

/// A "buy B get F free" promotion bound to one product id.
///
/// The product id is a plain foreign key: nothing checks that a product with
/// that id exists, the promotion simply never matches if it doesn't.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    product_id: String,
    buy: u32,
    free: u32,
}

impl Promotion {
    /// Creates a promotion.
    ///
    /// ## Errors
    /// - `MustBePositive` if `buy` is zero
    /// - `Required` if the product id is empty
    ///
    /// ## Example
    /// ```rust
    /// use till_core::Promotion;
    ///
    /// let b1g1 = Promotion::new("CHIPS", 1, 1)?;
    /// assert_eq!(b1g1.chargeable_units(3), 2);
    /// assert!(Promotion::new("CHIPS", 0, 1).is_err());
    /// # Ok::<(), till_core::CoreError>(())
    /// ```
    pub fn new(product_id: impl Into<String>, buy: u32, free: u32) -> CoreResult<Self> {
        let product_id = product_id.into();
        validate_product_id(&product_id)?;
        validate_promotion_buy(buy)?;

        Ok(Promotion {
            product_id,
            buy,
            free,
        })
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[inline]
    pub fn buy(&self) -> u32 {
        self.buy
    }

    #[inline]
    pub fn free(&self) -> u32 {
        self.free
    }

    /// Units in one full promotion group, never less than one.
    #[inline]
    pub fn group_size(&self) -> u64 {
        (u64::from(self.buy) + u64::from(self.free)).max(1)
    }

    /// Number of units charged when `quantity` units are bought.
    pub fn chargeable_units(&self, quantity: u64) -> u64 {
        let buy = u64::from(self.buy);
        let group_size = self.group_size();
        let groups = quantity / group_size;
        let remainder = quantity % group_size;

        groups * buy + remainder.min(buy)
    }
}

/// Chargeable units for `quantity`, with or without a promotion.
pub fn chargeable_units(quantity: u64, promotion: Option<&Promotion>) -> u64 {
    match promotion {
        Some(promotion) => promotion.chargeable_units(quantity),
        None => quantity,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
