//! # Catalog Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / CoreError                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds id / line-number context            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in till-cli) ← Error code + exit status                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Errors
//! - `get` on a missing id returns `None`
//! - Import rows with too few columns, an empty id or an unknown unit type
//!   are skipped and counted in the `ImportSummary`

use thiserror::Error;
use till_core::CoreError;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Update targeted an id that isn't in the catalog.
    ///
    /// ## When This Occurs
    /// - `update` on an id that was never added
    /// - `update` after the id was removed
    #[error("Product not found: {id}")]
    NotFound { id: String },

    /// A price column could not be used. Aborts the whole import.
    ///
    /// ## When This Occurs
    /// - Price text isn't a decimal number (`"abc"`, `"1,50"`)
    /// - Price is negative
    ///
    /// Rows imported before the bad line stay in the catalog.
    #[error("Invalid price '{value}' on line {line}: {reason}")]
    InvalidPrice {
        line: usize,
        value: String,
        reason: String,
    },

    /// A product can't be written in the delimited format.
    ///
    /// ## When This Occurs
    /// - id or name contains a comma or a line break
    /// - id starts with `#` (would read back as a comment)
    #[error("Product {id} cannot be exported: {reason}")]
    Unexportable { id: String, reason: String },

    /// Reading or writing a catalog file failed.
    #[error("Catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Product construction failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CatalogError {
    /// Creates a NotFound error for a product id.
    pub fn not_found(id: impl Into<String>) -> Self {
        CatalogError::NotFound { id: id.into() }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
