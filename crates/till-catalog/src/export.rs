//! # Catalog Export
//!
//! Writes the catalog back out in the same delimited format the bulk load
//! reads, so an exported file loads into an equal catalog.
//!
//! Prices are written with their exact decimal text (`3.50`, not `3.5`).
//! Values the loader would read back differently are rejected up front
//! with `CatalogError::Unexportable`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use till_core::Product;

use crate::catalog::ProductCatalog;
use crate::error::{CatalogError, CatalogResult};

/// Comment line written at the top of every export.
pub const CSV_HEADER: &str = "# id,name,unitType,price";

fn check_field(product: &Product, field: &str, value: &str) -> CatalogResult<()> {
    let reason = if value.contains(',') {
        Some(format!("{} contains a comma", field))
    } else if value.contains(['\n', '\r']) {
        Some(format!("{} contains a line break", field))
    } else if value.trim() != value {
        Some(format!("{} has leading or trailing whitespace", field))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::Unexportable {
            id: product.id().to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn format_row(product: &Product) -> CatalogResult<String> {
    check_field(product, "id", product.id())?;
    check_field(product, "name", product.name())?;
    if product.id().starts_with('#') {
        return Err(CatalogError::Unexportable {
            id: product.id().to_string(),
            reason: "id starts with '#'".to_string(),
        });
    }

    Ok(format!(
        "{},{},{},{}",
        product.id(),
        product.name(),
        product.unit_type(),
        product.price_per_unit()
    ))
}

impl ProductCatalog {
    /// Writes the header and one row per product in listing order.
    ///
    /// Every row is checked before anything is written.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> CatalogResult<()> {
        let rows = self
            .list()
            .iter()
            .map(|product| format_row(product))
            .collect::<CatalogResult<Vec<_>>>()?;

        writeln!(writer, "{}", CSV_HEADER)?;
        for row in &rows {
            writeln!(writer, "{}", row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> CatalogResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        // Rows are built from Strings, so the buffer is valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Writes the catalog to a file, replacing it if it exists.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> CatalogResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))?;

        info!(path = %path.display(), products = self.len(), "Catalog exported");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Money, UnitType};

    fn sample_catalog() -> ProductCatalog {
        let mut catalog = ProductCatalog::new();
        catalog
            .load_from_str(
                "CHIPS,Bag of Chips,PIECE,35.00\nRICE,Rice (kg),WEIGHT,45.00\nCHOC,Chocolate Bar,PIECE,4.5\n",
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_export_format() {
        let text = sample_catalog().to_csv_string().unwrap();
        assert_eq!(
            text,
            "# id,name,unitType,price\n\
             CHIPS,Bag of Chips,PIECE,35.00\n\
             RICE,Rice (kg),WEIGHT,45.00\n\
             CHOC,Chocolate Bar,PIECE,4.5\n"
        );
    }

    #[test]
    fn test_export_reimports_to_equal_catalog() {
        let original = sample_catalog();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        original.save_to_path(&path).unwrap();

        let mut reloaded = ProductCatalog::new();
        let summary = reloaded.load_from_path(&path).unwrap();

        assert_eq!(summary.imported, original.len());
        assert_eq!(summary.skipped, 0);
        for (a, b) in original.list().iter().zip(reloaded.list()) {
            assert_eq!(**a, **b);
        }
    }

    #[test]
    fn test_empty_catalog_exports_header_only() {
        let text = ProductCatalog::new().to_csv_string().unwrap();
        assert_eq!(text, "# id,name,unitType,price\n");
    }

    #[test]
    fn test_rejects_unexportable_values() {
        let mut catalog = ProductCatalog::new();
        catalog.add(
            Product::new("P1", "Salt, fine", UnitType::Piece, Money::from_cents(100)).unwrap(),
        );
        let err = catalog.to_csv_string().unwrap_err();
        assert!(matches!(err, CatalogError::Unexportable { ref id, .. } if id == "P1"));

        let mut catalog = ProductCatalog::new();
        catalog.add(Product::new("#P2", "Pepper", UnitType::Piece, Money::from_cents(100)).unwrap());
        assert!(catalog.to_csv_string().is_err());
    }
}
