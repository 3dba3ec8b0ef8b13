//! # till-core: Pure Checkout Logic for Till
//!
//! This crate is the **heart** of Till. It prices a basket of scanned items,
//! applies "buy X get Y free" promotions and renders the receipt, all as pure
//! functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till CLI (apps/till-cli)                     │   │
//! │  │    catalog list ──► checkout ──► session (interactive till)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-catalog                                 │   │
//! │  │        ProductCatalog, CSV import / export                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Arc<Product>                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  receipt  │  │   │
//! │  │   │  Product  │  │   Money   │  │ Checkout  │  │  render   │  │   │
//! │  │   │ Promotion │  │  Weight   │  │ PriceLine │  │           │  │   │
//! │  │   │   Scan    │  │ rounding  │  │  Result   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO LOGGING SUBSCRIBERS • PURE FUNCTIONS   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and UnitType
//! - [`promotion`] - "Buy X get Y free" promotions and chargeable-unit math
//! - [`scan`] - Scanned items (pieces XOR weight)
//! - [`checkout`] - The checkout engine and its result types
//! - [`money`] - Exact decimal Money/Weight and the shared rounding helper
//! - [`receipt`] - Plain-text receipt rendering
//! - [`validation`] - Construction-time value rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Validate at construction**: invalid records can't be built, so the
//!    checkout engine never fails
//! 2. **Exact decimals**: no floating point anywhere near a price
//! 3. **Explicit rounding**: 2 dp for money, 3 dp for weight, half-up, one helper
//! 4. **Shared products**: scans and price lines hold `Arc<Product>`
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use till_core::{Checkout, Money, Product, Promotion, ScannedItem, UnitType, Weight};
//!
//! let chips = Product::new("CHIPS", "Bag of Chips", UnitType::Piece, Money::from_cents(3500))?;
//! let rice = Product::new("RICE", "Rice (kg)", UnitType::Weight, Money::from_cents(4500))?;
//!
//! let mut checkout = Checkout::with_promotions([Promotion::new("CHIPS", 1, 1)?]);
//! checkout.scan(ScannedItem::pieces(chips, 3)?);
//! checkout.scan(ScannedItem::weighed(rice, Weight::from_decimal(Decimal::new(25, 1)))?);
//!
//! let result = checkout.calculate_totals();
//! assert_eq!(result.total().to_string(), "182.50");
//! assert_eq!(result.savings().to_string(), "35.00");
//! # Ok::<(), till_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod promotion;
pub mod receipt;
pub mod scan;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{Checkout, CheckoutResult, LineQuantity, PriceLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Weight};
pub use promotion::Promotion;
pub use receipt::{render, ReceiptOptions};
pub use scan::{ScanQuantity, ScannedItem};
pub use types::{Product, UnitType};
