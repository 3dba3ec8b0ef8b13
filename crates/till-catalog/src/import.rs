//! # Catalog Bulk Load
//!
//! Reads product rows in the delimited format `id,name,unitType,price`.
//!
//! ## Row Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line ──► trim ──┬── blank / "# ..."          ──► ignored              │
//! │                  ├── fewer than 4 columns     ──► skipped              │
//! │                  ├── empty id                 ──► skipped              │
//! │                  ├── unit not PIECE / WEIGHT  ──► skipped              │
//! │                  ├── price not a decimal / <0 ──► InvalidPrice (abort) │
//! │                  └── otherwise                ──► catalog.add()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Columns past the fourth are ignored. A fatal row stops the load but
//! rows already inserted stay in the catalog.

use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use till_core::validation::validate_price;
use till_core::{Money, Product, UnitType};

use crate::catalog::ProductCatalog;
use crate::error::{CatalogError, CatalogResult};

/// Counts from one bulk load.
///
/// Blank and comment lines are in neither count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Outcome of parsing a single line.
#[derive(Debug)]
enum Row {
    Ignored,
    Skipped(&'static str),
    Product(Product),
}

fn parse_row(line_no: usize, raw: &str) -> CatalogResult<Row> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Row::Ignored);
    }

    let cols: Vec<&str> = line.split(',').map(str::trim).collect();
    if cols.len() < 4 {
        return Ok(Row::Skipped("fewer than 4 columns"));
    }

    let (id, name, unit, price) = (cols[0], cols[1], cols[2], cols[3]);
    if id.is_empty() {
        return Ok(Row::Skipped("empty id"));
    }

    let unit_type = match UnitType::from_str(unit) {
        Ok(unit_type) => unit_type,
        Err(_) => return Ok(Row::Skipped("unknown unit type")),
    };

    let amount = Decimal::from_str(price).map_err(|e| CatalogError::InvalidPrice {
        line: line_no,
        value: price.to_string(),
        reason: e.to_string(),
    })?;
    validate_price(amount).map_err(|e| CatalogError::InvalidPrice {
        line: line_no,
        value: price.to_string(),
        reason: e.to_string(),
    })?;

    let product = Product::new(id, name, unit_type, Money::from_decimal(amount))?;
    Ok(Row::Product(product))
}

impl ProductCatalog {
    /// Loads rows from in-memory text.
    ///
    /// ## Errors
    /// - `InvalidPrice` on the first row whose price can't be used
    pub fn load_from_str(&mut self, text: &str) -> CatalogResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (i, line) in text.lines().enumerate() {
            self.apply_row(i + 1, line, &mut summary)?;
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Catalog rows loaded"
        );
        Ok(summary)
    }

    /// Loads rows from any buffered reader, line by line.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> CatalogResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            self.apply_row(i + 1, &line, &mut summary)?;
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Catalog rows loaded"
        );
        Ok(summary)
    }

    /// Loads rows from a UTF-8 file.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> CatalogResult<ImportSummary> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading catalog file");

        let file = File::open(path)?;
        self.load_from_reader(BufReader::new(file))
    }

    fn apply_row(
        &mut self,
        line_no: usize,
        line: &str,
        summary: &mut ImportSummary,
    ) -> CatalogResult<()> {
        match parse_row(line_no, line)? {
            Row::Ignored => {}
            Row::Skipped(reason) => {
                debug!(line = line_no, reason, "Skipping catalog row");
                summary.skipped += 1;
            }
            Row::Product(product) => {
                self.add(product);
                summary.imported += 1;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
