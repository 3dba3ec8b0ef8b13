//! # Money Module
//!
//! Provides the `Money` and `Weight` types and the single rounding helper
//! every pricing boundary goes through.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Weighed goods make it worse: 0.4 kg + 0.8 kg scanned separately        │
//! │  drifts away from a single 1.2 kg scan.                                 │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    0.4 + 0.8 = 1.2 exactly, 1.2 × 45.00 = 54.000 exactly               │
//! │    Rounding happens only where we say so (2 dp money, 3 dp weight)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Points
//! | Value                    | Scale | Strategy  |
//! |--------------------------|-------|-----------|
//! | Line total               | 2     | half-up   |
//! | Aggregated weight        | 3     | half-up   |
//! | Grand total / savings    | 2     | half-up   |
//!
//! Half-up here means midpoint away from zero: `0.125 → 0.13`, `-0.125 → -0.13`.
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use till_core::money::{Money, Weight};
//!
//! let price = Money::from_cents(4500); // 45.00 per kg
//! let weight = Weight::from_decimal(Decimal::new(12, 1)); // 1.2 kg
//!
//! let line = price.multiply_weight(weight).round();
//! assert_eq!(line.to_string(), "54.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::error::ValidationError;

/// Decimal places kept on monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Decimal places kept on aggregated weights.
pub const WEIGHT_SCALE: u32 = 3;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds `value` to `scale` decimal places, midpoint away from zero, and pads
/// the result so it always carries exactly `scale` digits.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use till_core::money::round_half_up;
///
/// assert_eq!(round_half_up(Decimal::new(125, 3), 2).to_string(), "0.13");
/// assert_eq!(round_half_up(Decimal::new(70, 0), 2).to_string(), "70.00");
/// ```
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    // -0.00 prints with a sign; a zero amount is always positive
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value held as an exact decimal.
///
/// ## Design Decisions
/// - **Unscaled until rounded**: unit prices may carry more than two decimals,
///   and the full-price baseline used for savings is deliberately kept
///   unrounded. [`Money::round`] is the only way to land on two decimals.
/// - **Signed**: savings can be computed as a difference of two amounts.
/// - **Transparent serde**: serializes as the decimal string, e.g. `"70.00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to two decimal places, half-up.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::money::Money;
    ///
    /// let raw = Money::from_decimal(Decimal::new(12345, 3)); // 12.345
    /// assert_eq!(raw.round().to_string(), "12.35");
    /// ```
    #[inline]
    pub fn round(&self) -> Self {
        Money(round_half_up(self.0, MONEY_SCALE))
    }

    /// Multiplies a unit price by a piece count. Not rounded.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).to_string(), "8.97");
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, quantity: u64) -> Self {
        Money(self.0 * Decimal::from(quantity))
    }

    /// Multiplies a per-unit price by a weight. Not rounded.
    #[inline]
    pub fn multiply_weight(&self, weight: Weight) -> Self {
        Money(self.0 * weight.kilograms())
    }
}

/// Parses a plain decimal string such as `"35.00"`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Shows the amount exactly as held, e.g. `70.00` or `2.995`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Weight Type
// =============================================================================

/// A measured weight in the product's pricing unit (kilograms for loose goods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    /// Wraps an exact decimal weight.
    #[inline]
    pub const fn from_decimal(kilograms: Decimal) -> Self {
        Weight(kilograms)
    }

    /// Returns the underlying decimal weight.
    #[inline]
    pub const fn kilograms(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Weight(Decimal::ZERO)
    }

    /// Checks if the weight is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to three decimal places, half-up.
    #[inline]
    pub fn round(&self) -> Self {
        Weight(round_half_up(self.0, WEIGHT_SCALE))
    }
}

impl FromStr for Weight {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Weight)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "weight".to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
