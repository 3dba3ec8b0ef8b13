//! # Catalog Commands
//!
//! `till catalog list` and `till catalog export`.

use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use super::CatalogSource;
use crate::error::CliResult;
use crate::state::TillConfig;

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Load a catalog file and list its products
    List {
        #[command(flatten)]
        source: CatalogSource,

        /// Print the products as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a catalog file and write it back out in canonical form
    Export {
        #[command(flatten)]
        source: CatalogSource,

        /// Output file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

pub fn run(command: &CatalogCommand, config: &TillConfig, out: &mut impl Write) -> CliResult<()> {
    match command {
        CatalogCommand::List { source, json } => {
            let catalog = source.load(config)?;

            if *json {
                serde_json::to_writer_pretty(&mut *out, catalog.list())?;
                writeln!(out)?;
                return Ok(());
            }

            writeln!(out, "Catalog contains {} products:", catalog.len())?;
            for product in catalog.list() {
                writeln!(
                    out,
                    " - {}: {} ({}) {}",
                    product.id(),
                    product.name(),
                    product.unit_type(),
                    product.price_per_unit()
                )?;
            }
            Ok(())
        }
        CatalogCommand::Export { source, out: path } => {
            let catalog = source.load(config)?;
            catalog.save_to_path(path)?;
            writeln!(
                out,
                "Exported {} products to {}",
                catalog.len(),
                path.display()
            )?;
            Ok(())
        }
    }
}
