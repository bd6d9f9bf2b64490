// 📂 Catalog Loader - CSV record source → Catalog Index
// Boundary module: only ISBN and title survive the crossing

use crate::catalog::CatalogIndex;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a catalog CSV file into the index.
///
/// The first record is a header and is discarded. Each following record
/// contributes its first field as ISBN and its second as title; extra
/// fields are ignored. Quoted fields may contain commas and arbitrary
/// characters. Rows with a missing or empty ISBN or title are skipped
/// without aborting the load.
///
/// Returns the number of entries inserted. Failure to open the file is
/// an error for this load step only; the caller is expected to report it
/// and continue with an empty catalog.
pub fn load_catalog(path: &Path, index: &mut CatalogIndex) -> Result<usize> {
    let file = File::open(path)
        .with_context(|| format!("failed to open catalog file: {}", path.display()))?;
    load_catalog_from(file, index)
}

/// Same as [`load_catalog`], over any reader
pub fn load_catalog_from<R: Read>(reader: R, index: &mut CatalogIndex) -> Result<usize> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut inserted = 0;
    for result in csv_reader.records() {
        // Rows the CSV reader rejects are malformed rows; skip them
        let record = match result {
            Ok(record) => record,
            Err(_) => continue,
        };

        let isbn = record.get(0).unwrap_or("").trim();
        let title = record.get(1).unwrap_or("");
        if isbn.is_empty() || title.is_empty() {
            continue;
        }

        if index.insert(isbn, title) {
            inserted += 1;
        }
    }

    Ok(inserted)
}
