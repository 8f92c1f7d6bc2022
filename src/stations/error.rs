use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationTableError {
    #[error("Failed to read station CSV '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to create output file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write station CSV '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found in station table")]
    MissingColumn {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Column '{column}' cannot be read as numeric coordinates")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing or non-numeric coordinate in column '{column}' at row {row}")]
    NullCoordinate { column: String, row: usize },

    #[error("Postal code count ({codes}) does not match station table height ({rows})")]
    LengthMismatch { codes: usize, rows: usize },

    #[error("Failed to append column '{column}' to station table")]
    ColumnAppend {
        column: String,
        #[source]
        source: PolarsError,
    },

    // Covers errors joining tokio blocking tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
