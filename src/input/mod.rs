//! Storefront list reader
//!
//! Reads the input CSV. A header row is required and must contain a `url`
//! column; any other column is ignored. Rows may be ragged: extra cells are
//! ignored and a row too short to reach the `url` cell counts as blank.

use crate::HarvestError;
use std::io::Read;
use std::path::Path;

const URL_COLUMN: &str = "url";

/// Reads storefront addresses from a CSV source, in row order
///
/// Rows whose `url` is blank are skipped with a warning.
pub fn read_storefronts_from<R: Read>(reader: R) -> Result<Vec<String>, HarvestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = rdr
        .headers()?
        .iter()
        .position(|header| header == URL_COLUMN)
        .ok_or_else(|| HarvestError::MissingColumn(URL_COLUMN.to_string()))?;

    let mut storefronts = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        match record.get(column) {
            Some(url) if !url.is_empty() => storefronts.push(url.to_string()),
            _ => tracing::warn!("Skipping row {}: empty url", line + 2),
        }
    }

    Ok(storefronts)
}

/// Reads storefront addresses from a CSV file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use shop_harvest::input::read_storefronts;
///
/// let storefronts = read_storefronts(Path::new("stores.csv")).unwrap();
/// println!("{} storefronts to harvest", storefronts.len());
/// ```
pub fn read_storefronts(path: &Path) -> Result<Vec<String>, HarvestError> {
    let file = std::fs::File::open(path)?;
    read_storefronts_from(file)
}
