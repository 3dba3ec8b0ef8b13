//! # CLI Error Type
//!
//! Unified error type for `till` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in till                                   │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  CliResult<T>                                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Config problem?   ─── ConfigError ───────┐                             │
//! │  Catalog problem?  ─── CatalogError ──────┤                             │
//! │  Bad scan/promo?   ─── CoreError ─────────┼──► CliError                 │
//! │  Unknown id?       ─── UnknownProduct ────┘        │                    │
//! │                                                    ▼                    │
//! │                              stderr: error[NOT_FOUND]: Unknown product  │
//! │                              exit status: ErrorCode::exit_code()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inside an interactive session the same errors are printed and the
//! session keeps going.

use serde::Serialize;
use thiserror::Error;
use till_catalog::CatalogError;
use till_core::CoreError;

use crate::state::ConfigError;

/// Error returned from `till` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// A scan named an id that isn't in the catalog.
    #[error("Unknown product: {id}")]
    UnknownProduct { id: String },

    /// An argument or session command couldn't be understood.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad flag, bad session command
    InvalidArgument,

    /// Rejected by a domain rule (unit mismatch, non-positive quantity)
    ValidationError,

    /// Product id not in the catalog
    NotFound,

    /// Catalog file unusable (bad price, unexportable row)
    CatalogError,

    /// Config file missing or malformed
    ConfigError,

    /// File or terminal I/O failed
    IoError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::InvalidArgument => 2,
            ErrorCode::ValidationError => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::CatalogError => 5,
            ErrorCode::ConfigError => 6,
            ErrorCode::IoError => 7,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    pub fn unknown_product(id: impl Into<String>) -> Self {
        CliError::UnknownProduct { id: id.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument(message.into())
    }

    /// Maps the error to its code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Catalog(err) => match err {
                CatalogError::NotFound { .. } => ErrorCode::NotFound,
                CatalogError::InvalidPrice { .. } | CatalogError::Unexportable { .. } => {
                    ErrorCode::CatalogError
                }
                CatalogError::Io(_) => ErrorCode::IoError,
                CatalogError::Core(_) => ErrorCode::ValidationError,
            },
            CliError::Core(_) => ErrorCode::ValidationError,
            CliError::UnknownProduct { .. } => ErrorCode::NotFound,
            CliError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            CliError::Io(_) => ErrorCode::IoError,
            CliError::Json(_) => ErrorCode::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.code().exit_code()
    }
}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Money, Product, ScannedItem, UnitType};

    #[test]
    fn test_error_codes() {
        assert_eq!(CliError::unknown_product("X").code(), ErrorCode::NotFound);
        assert_eq!(
            CliError::invalid_argument("bad").code(),
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            CliError::from(CatalogError::not_found("X")).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            CliError::from(ConfigError::Invalid("x".into())).exit_code(),
            6
        );
    }

    #[test]
    fn test_unit_mismatch_is_validation_error() {
        let rice = Product::new("RICE", "Rice", UnitType::Weight, Money::from_cents(4500)).unwrap();
        let err: CliError = ScannedItem::pieces(rice, 2).unwrap_err().into();

        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(err.to_string().contains("RICE"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
    }
}
