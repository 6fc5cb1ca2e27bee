use core_types::TableKind;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop the source tables from loading.
///
/// Any of these is fatal for the current render: nothing is shown from partial data.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Could not find the {table} data file at '{}'", path.display())]
    NotFound { table: TableKind, path: PathBuf },

    #[error("Failed to read the {table} data file at '{}': {source}", path.display())]
    Io {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in the {table} data: {source}")]
    Csv {
        table: TableKind,
        #[source]
        source: csv::Error,
    },

    #[error("The {table} data is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: String },

    #[error("Invalid date '{value}' in column '{column}' of the {table} data (line {line})")]
    InvalidDate {
        table: TableKind,
        column: String,
        value: String,
        line: u64,
    },

    #[error("Invalid number '{value}' in column '{column}' of the {table} data (line {line})")]
    InvalidNumber {
        table: TableKind,
        column: String,
        value: String,
        line: u64,
    },
}

/// Failures while serializing a filtered table back to CSV.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
