//! Delimited-text datasets with a case-insensitive key column.
//!
//! Files are read on every call; nothing is cached between lookups.

use crate::error::{AdvisorError, Result};
use crate::types::Record;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A comma-separated file with a header row and one designated key column.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    key_column: String,
}

impl Dataset {
    pub fn new(path: impl Into<PathBuf>, key_column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key_column: key_column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Every row, in file order.
    pub fn all(&self) -> Result<Vec<Record>> {
        let rows = self.read()?;
        Ok(rows.into_iter().map(|(_, record)| record).collect())
    }

    /// First row whose key column matches `key` ignoring case, or an empty record.
    pub fn find(&self, key: &str) -> Result<Record> {
        let wanted = normalize_key(key);
        let rows = self.read()?;

        let found = rows
            .into_iter()
            .find(|(row_key, _)| normalize_key(row_key) == wanted)
            .map(|(_, record)| record);

        debug!(
            "Lookup '{}' in {}: {}",
            wanted,
            self.path.display(),
            if found.is_some() { "hit" } else { "miss" }
        );
        Ok(found.unwrap_or_default())
    }

    /// Read the file into (raw key cell, typed record) pairs.
    fn read(&self) -> Result<Vec<(String, Record)>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            AdvisorError::Data(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AdvisorError::Data(format!("Bad header in {}: {}", self.path.display(), e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let key_idx = headers
            .iter()
            .position(|h| h == &self.key_column)
            .ok_or_else(|| {
                AdvisorError::Data(format!(
                    "Column {} not found in {}",
                    self.key_column,
                    self.path.display()
                ))
            })?;

        let mut rows = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                AdvisorError::Data(format!(
                    "Bad row {} in {}: {}",
                    line + 2,
                    self.path.display(),
                    e
                ))
            })?;

            let key = row.get(key_idx).unwrap_or_default().to_string();
            let record: Record = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), typed_cell(row.get(i).unwrap_or_default())))
                .collect();
            rows.push((key, record));
        }

        Ok(rows)
    }
}

/// Lookup key normalization: surrounding whitespace dropped, lower-cased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Empty cells become null, numeric cells numbers, everything else a string.
fn typed_cell(raw: &str) -> Value {
    let cell = raw.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = cell.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::String(cell.to_string())
}
