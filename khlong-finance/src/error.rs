//! Errors raised while loading a row table and binding its columns.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// A required column binding names a header the table does not have.
    #[error("column '{column}' ({role}) not found in table header")]
    MissingColumn { column: String, role: &'static str },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}
