//! # Commands Module
//!
//! Every `till` subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared catalog loading)
//! ├── catalog.rs   ◄─── till catalog list / export
//! ├── checkout.rs  ◄─── till checkout (one-shot)
//! └── session.rs   ◄─── till session (interactive)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  till checkout --catalog products.csv --scan CHIPS=3                    │
//! │         │                                                               │
//! │         │ (clap derive)                                                 │
//! │         ▼                                                               │
//! │  fn run(args: &CheckoutArgs,                                            │
//! │         config: &TillConfig,   ◄── Loaded once in lib.rs                │
//! │         out: &mut impl Write)  ◄── stdout in production, Vec in tests   │
//! │      -> CliResult<()>                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Receipt text (or JSON) on stdout, errors on stderr                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod checkout;
pub mod session;

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use till_catalog::ProductCatalog;

use crate::error::{CliError, CliResult};
use crate::state::TillConfig;

/// Where to load the catalog from.
#[derive(Debug, Clone, Default, Args)]
pub struct CatalogSource {
    /// Catalog file (`id,name,unitType,price` rows). Falls back to the
    /// configured `catalog_path`.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

impl CatalogSource {
    /// The flag wins over the config.
    pub fn resolve(&self, config: &TillConfig) -> CliResult<PathBuf> {
        self.catalog
            .clone()
            .or_else(|| config.catalog_path.clone())
            .ok_or_else(|| {
                CliError::invalid_argument(
                    "no catalog given: pass --catalog FILE or set catalog_path / TILL_CATALOG",
                )
            })
    }

    /// Resolves the path and bulk-loads it.
    pub fn load(&self, config: &TillConfig) -> CliResult<ProductCatalog> {
        let path = self.resolve(config)?;
        let mut catalog = ProductCatalog::new();
        let summary = catalog.load_from_path(&path)?;

        info!(
            path = %path.display(),
            imported = summary.imported,
            skipped = summary.skipped,
            "Catalog loaded"
        );
        Ok(catalog)
    }
}
