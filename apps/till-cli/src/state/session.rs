//! # Session State
//!
//! One till: the loaded catalog plus the checkout engine scanning against it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SessionState                                     │
//! │                                                                         │
//! │   scan("CHIPS", "3")                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   catalog.get("CHIPS") ── None ──► CliError::UnknownProduct             │
//! │        │ Some(Arc<Product>)                                             │
//! │        ▼                                                                │
//! │   PIECE  → amount as whole count  → ScannedItem::pieces                 │
//! │   WEIGHT → amount as decimal kg   → ScannedItem::weighed                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   checkout.scan(item)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The unit type comes from the catalog record, so a scan can't pick the
//! wrong quantity kind for a product.

use chrono::Utc;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use till_catalog::ProductCatalog;
use till_core::{
    render, Checkout, CheckoutResult, Promotion, ReceiptOptions, ScannedItem, UnitType, Weight,
};

use crate::error::{CliError, CliResult};
use crate::state::TillConfig;

/// A catalog and the checkout being rung up against it.
#[derive(Debug)]
pub struct SessionState {
    catalog: ProductCatalog,
    checkout: Checkout,
    store_name: String,
    print_timestamp: bool,
}

impl SessionState {
    /// Creates a session with the config's store settings and promotions.
    pub fn new(catalog: ProductCatalog, config: &TillConfig) -> CliResult<Self> {
        let checkout = Checkout::with_promotions(config.promotions()?);
        info!(
            session_id = %checkout.session_id(),
            products = catalog.len(),
            "Session started"
        );

        Ok(SessionState {
            catalog,
            checkout,
            store_name: config.store_name.clone(),
            print_timestamp: config.print_timestamp,
        })
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn session_id(&self) -> Uuid {
        self.checkout.session_id()
    }

    /// Looks up `id` and scans `amount` of it.
    ///
    /// `amount` is a whole count for PIECE products and decimal kilograms
    /// for WEIGHT products.
    ///
    /// ## Errors
    /// - `UnknownProduct` if the id isn't in the catalog
    /// - `InvalidArgument` if a piece count isn't a whole number
    /// - `Core` if the quantity fails validation
    pub fn scan(&mut self, id: &str, amount: &str) -> CliResult<ScannedItem> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| CliError::unknown_product(id))?;

        let item = match product.unit_type() {
            UnitType::Piece => {
                let count = amount.trim().parse::<u32>().map_err(|_| {
                    CliError::invalid_argument(format!(
                        "{} is sold by piece, expected a whole count but got '{}'",
                        id, amount
                    ))
                })?;
                ScannedItem::pieces(product, count)?
            }
            UnitType::Weight => {
                let weight = Weight::from_str(amount).map_err(till_core::CoreError::from)?;
                ScannedItem::weighed(product, weight)?
            }
        };

        debug!(session_id = %self.session_id(), id, amount, "Item scanned");
        self.checkout.scan(item.clone());
        Ok(item)
    }

    /// Registers a promotion, returning the one it replaced.
    pub fn add_promotion(&mut self, promotion: Promotion) -> Option<Promotion> {
        debug!(
            product_id = promotion.product_id(),
            buy = promotion.buy(),
            free = promotion.free(),
            "Promotion registered"
        );
        self.checkout.add_promotion(promotion)
    }

    pub fn totals(&self) -> CheckoutResult {
        self.checkout.calculate_totals()
    }

    /// Renders a receipt with the configured store name.
    pub fn receipt(&self, result: &CheckoutResult) -> String {
        let options = ReceiptOptions {
            store_name: self.store_name.clone(),
            issued_at: self.print_timestamp.then(Utc::now),
        };
        render(result, &options)
    }

    /// Clears the scans and starts a new session id. Promotions stay.
    pub fn reset(&mut self) {
        let previous = self.session_id();
        self.checkout.reset();
        info!(%previous, session_id = %self.session_id(), "Session reset");
    }
}
