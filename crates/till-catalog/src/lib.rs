//! # till-catalog: Product Catalog for Till
//!
//! Holds the products a till can sell and moves them in and out of the
//! delimited text format `id,name,unitType,price`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till Data Flow                                   │
//! │                                                                         │
//! │  catalog.csv                                                            │
//! │       │  load_from_path                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  till-catalog (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    import     │    │    catalog    │    │    export    │  │   │
//! │  │   │               │───►│ ProductCatalog│───►│              │  │   │
//! │  │   │ ImportSummary │    │ Arc<Product>  │    │  CSV_HEADER  │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   │ get(id)                             │
//! │                                   ▼                                     │
//! │                    ScannedItem::pieces / ::weighed (till-core)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - The insertion-ordered product store
//! - [`import`] - Bulk load from delimited text
//! - [`export`] - Write the catalog back out
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust
//! use till_catalog::ProductCatalog;
//!
//! let mut catalog = ProductCatalog::new();
//! let summary = catalog.load_from_str("CHIPS,Bag of Chips,PIECE,35.00\nBAD,Row\n")?;
//!
//! assert_eq!(summary.imported, 1);
//! assert_eq!(summary.skipped, 1);
//! assert_eq!(catalog.get("CHIPS").unwrap().name(), "Bag of Chips");
//! # Ok::<(), till_catalog::CatalogError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod import;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::ProductCatalog;
pub use error::{CatalogError, CatalogResult};
pub use export::CSV_HEADER;
pub use import::ImportSummary;
