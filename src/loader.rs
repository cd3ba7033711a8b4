//! CSV dataset loading.
//!
//! The input is a flat table: one header row, one row per tract, a numeric
//! `tract` identifier column and one numeric column per indicator. Loading
//! is idempotent; the same file yields value-equal datasets. A small cache
//! keyed by path and modification time avoids re-reading an unchanged file
//! between requests.

use crate::error::DataError;
use crate::model::{Dataset, Tract, TRACT_ID_WIDTH};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::info;

/// Name of the tract identifier column; every other column is an indicator.
pub const IDENTIFIER_COLUMN: &str = "tract";

/// Cell contents treated as a missing measurement rather than a parse error.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null"];

pub struct DatasetLoader;

impl DatasetLoader {
    /// Reads the table at `path` into a [`Dataset`].
    ///
    /// Fails with [`DataError::DataUnavailable`] when the file is missing,
    /// is not well-formed CSV, lacks the identifier column, or has no data
    /// rows. Indicator keys are exactly the non-identifier columns, in
    /// header order.
    pub fn load(path: &Path) -> Result<Dataset, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::unavailable(path, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::unavailable(path, e.to_string()))?
            .clone();

        let id_col = headers
            .iter()
            .position(|h| h == IDENTIFIER_COLUMN)
            .ok_or_else(|| {
                DataError::unavailable(path, format!("missing `{IDENTIFIER_COLUMN}` column"))
            })?;

        let schema: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != id_col)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut tracts = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| DataError::unavailable(path, e.to_string()))?;
            let id = normalize_tract_id(record.get(id_col).unwrap_or("")).ok_or_else(|| {
                DataError::unavailable(
                    path,
                    format!("row {}: tract code is not numeric", row + 1),
                )
            })?;

            let mut values = Vec::with_capacity(schema.len());
            for (col, cell) in record.iter().enumerate() {
                if col == id_col {
                    continue;
                }
                values.push(parse_cell(cell).map_err(|_| {
                    DataError::unavailable(
                        path,
                        format!(
                            "row {}: `{}` is not numeric in column `{}`",
                            row + 1,
                            cell,
                            headers.get(col).unwrap_or("?")
                        ),
                    )
                })?);
            }
            if values.len() != schema.len() {
                return Err(DataError::unavailable(
                    path,
                    format!("row {}: expected {} columns", row + 1, headers.len()),
                ));
            }
            tracts.push(Tract::new(id, values));
        }

        if tracts.is_empty() {
            return Err(DataError::unavailable(path, "table has no data rows"));
        }

        info!(
            "Loaded dataset: {} tracts x {} indicators from {}",
            tracts.len(),
            schema.len(),
            path.display()
        );
        Ok(Dataset::new(schema, tracts))
    }
}

/// Zero-pads a numeric tract code for stable identity and display.
fn normalize_tract_id(raw: &str) -> Option<String> {
    let code: u64 = raw.trim().parse().ok()?;
    Some(format!("{code:0width$}", width = TRACT_ID_WIDTH))
}

fn parse_cell(cell: &str) -> Result<Option<f64>, ()> {
    if MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some).map_err(|_| ())
}

/// Session-level dataset cache keyed by source path and modification time.
///
/// Replaces ad-hoc memoization: a dataset is loaded once and handed out as
/// a shared snapshot until the underlying file changes on disk.
pub struct DatasetCache {
    entries: HashMap<PathBuf, (SystemTime, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached dataset for `path`, reloading when the file's
    /// modification time no longer matches the cached snapshot.
    pub fn get(&mut self, path: &Path) -> Result<Arc<Dataset>, DataError> {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| DataError::unavailable(path, e.to_string()))?;

        if let Some((cached_mtime, dataset)) = self.entries.get(path) {
            if *cached_mtime == modified {
                return Ok(Arc::clone(dataset));
            }
            info!("Dataset changed on disk, reloading: {}", path.display());
        }

        let dataset = Arc::new(DatasetLoader::load(path)?);
        self.entries
            .insert(path.to_path_buf(), (modified, Arc::clone(&dataset)));
        Ok(dataset)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}
