//! Tabular row source for the task builder.
//!
//! Rows are read from CSV with a header line; which header feeds which field
//! is decided by [`ColumnBindings`], so sheets with different column names
//! can share one builder.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::error::TableError;

/// Header names feeding each task field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnBindings {
    pub amount: String,
    pub transfer_type: String,
    pub registry_info: String,
    pub date: Option<String>,
    pub company_name: Option<String>,
}

impl Default for ColumnBindings {
    fn default() -> Self {
        Self {
            amount: "amount".to_string(),
            transfer_type: "transfer_type".to_string(),
            registry_info: "dbd_info".to_string(),
            date: None,
            company_name: None,
        }
    }
}

impl ColumnBindings {
    fn required(&self) -> [(&str, &'static str); 3] {
        [
            (self.amount.as_str(), "amount"),
            (self.transfer_type.as_str(), "transfer type"),
            (self.registry_info.as_str(), "registry info"),
        ]
    }
}

/// One input row. `row_number` is 1-based over data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub row_number: usize,
    pub cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style cell setter
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowTable {
    /// Read a CSV table. Short rows are padded with empty cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let mut row = Row::new(i + 1);
            for (idx, header) in headers.iter().enumerate() {
                let value = record.get(idx).unwrap_or("").to_string();
                row.cells.insert(header.clone(), value);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("reading {}", path.display()))
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Fail if a required binding names a missing header.
    /// Optional bindings (date, company name) may be absent.
    pub fn check_bindings(&self, bindings: &ColumnBindings) -> Result<(), TableError> {
        for (column, role) in bindings.required() {
            if !self.has_column(column) {
                return Err(TableError::MissingColumn {
                    column: column.to_string(),
                    role,
                });
            }
        }
        Ok(())
    }
}
