//! # Product Catalog
//!
//! In-memory mapping from product id to the shared product record.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ProductCatalog                                       │
//! │                                                                         │
//! │  products: Vec<Arc<Product>>        index: HashMap<String, usize>       │
//! │  ┌───┬───────┬───────────────┐      ┌────────┬───┐                      │
//! │  │ 0 │ CHIPS │ Bag of Chips  │ ◄─── │ CHIPS  │ 0 │                      │
//! │  │ 1 │ RICE  │ Rice (kg)     │ ◄─── │ RICE   │ 1 │                      │
//! │  │ 2 │ CHOC  │ Chocolate Bar │ ◄─── │ CHOC   │ 2 │                      │
//! │  └───┴───────┴───────────────┘      └────────┴───┘                      │
//! │                                                                         │
//! │  • list() walks the Vec, so it is always in insertion order            │
//! │  • Re-adding an id swaps the record in place (position kept)           │
//! │  • remove() shifts the tail and fixes their index entries              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are handed out as `Arc<Product>`. Replacing a record never
//! touches scans that already hold the old one.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use till_core::Product;

use crate::error::{CatalogError, CatalogResult};

/// Insertion-ordered product catalog.
///
/// ## Usage
/// ```rust
/// use till_catalog::ProductCatalog;
/// use till_core::{Money, Product, UnitType};
///
/// let mut catalog = ProductCatalog::new();
/// catalog.add(Product::new("CHIPS", "Bag of Chips", UnitType::Piece, Money::from_cents(3500))?);
///
/// assert!(catalog.get("CHIPS").is_some());
/// assert!(catalog.get("NOPE").is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Arc<Product>>,
    index: HashMap<String, usize>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        ProductCatalog::default()
    }

    /// Looks up a product. A miss is `None`, not an error.
    pub fn get(&self, id: &str) -> Option<Arc<Product>> {
        self.index.get(id).map(|&i| Arc::clone(&self.products[i]))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Adds a product, replacing any record with the same id.
    ///
    /// Returns the replaced record. A replaced id keeps its listing position.
    pub fn add(&mut self, product: impl Into<Arc<Product>>) -> Option<Arc<Product>> {
        let product = product.into();

        match self.index.get(product.id()) {
            Some(&i) => {
                debug!(id = %product.id(), "Replacing catalog product");
                Some(std::mem::replace(&mut self.products[i], product))
            }
            None => {
                debug!(id = %product.id(), "Adding catalog product");
                self.index.insert(product.id().to_string(), self.products.len());
                self.products.push(product);
                None
            }
        }
    }

    /// Replaces the record for an id that must already exist.
    ///
    /// ## Errors
    /// - `NotFound` if no product with that id is in the catalog
    pub fn update(&mut self, product: impl Into<Arc<Product>>) -> CatalogResult<Arc<Product>> {
        let product = product.into();
        let i = *self
            .index
            .get(product.id())
            .ok_or_else(|| CatalogError::not_found(product.id()))?;

        debug!(id = %product.id(), "Updating catalog product");
        Ok(std::mem::replace(&mut self.products[i], product))
    }

    /// Removes a product, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Arc<Product>> {
        let i = self.index.remove(id)?;
        let removed = self.products.remove(i);

        for product in &self.products[i..] {
            if let Some(position) = self.index.get_mut(product.id()) {
                *position -= 1;
            }
        }

        debug!(id = %id, "Removed catalog product");
        Some(removed)
    }

    /// All products in insertion order.
    #[inline]
    pub fn list(&self) -> &[Arc<Product>] {
        &self.products
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
