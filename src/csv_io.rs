// CSV import/export for the inventory
//
// Header: name,price

use crate::error::{InputError, InventoryError, Result};
use crate::input::parse_item_input;
use crate::inventory::Inventory;
use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Raw CSV row; fields are validated by the caller before they become items
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CsvRow {
    pub name: String,
    pub price: String,
}

pub fn read_csv(csv_path: &Path) -> Result<Vec<CsvRow>> {
    let mut rdr = csv::Reader::from_path(csv_path)?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// A CSV row that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line in the CSV file (line 1 is the header)
    pub line: usize,
    pub error: InputError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportReport {
    pub added: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Validate rows the same way the add form does
pub fn rows_to_items(rows: &[CsvRow]) -> (Vec<Item>, Vec<RejectedRow>) {
    let mut items = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match parse_item_input(&row.name, &row.price) {
            Ok(item) => items.push(item),
            Err(error) => {
                let line = i + 2;
                warn!(line, error = %error, "skipping CSV row");
                rejected.push(RejectedRow { line, error });
            }
        }
    }

    (items, rejected)
}

/// Append the valid rows of a CSV file to the inventory in one write
///
/// Invalid rows are skipped and reported. A file where every row is invalid
/// is an error and leaves the inventory untouched.
pub fn import_csv(inventory: &mut Inventory, csv_path: &Path) -> Result<ImportReport> {
    let rows = read_csv(csv_path)?;
    let (items, rejected) = rows_to_items(&rows);

    if items.is_empty() && !rejected.is_empty() {
        return Err(InventoryError::NoValidRows {
            path: csv_path.to_path_buf(),
            rejected: rejected.len(),
        });
    }

    let added = inventory.add_all(items)?;
    Ok(ImportReport { added, rejected })
}

pub fn export_csv(csv_path: &Path, items: &[Item]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(csv_path)?;

    for item in items {
        wtr.serialize(item)?;
    }
    wtr.flush().map_err(|e| InventoryError::io(csv_path, e))?;

    Ok(items.len())
}
