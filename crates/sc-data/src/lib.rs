//! Survey data loading and report assembly

pub mod config;
pub mod report;
pub mod schema;
pub mod sources;
pub mod table;

use arrow::error::ArrowError;
use sc_core::ConfigError;
use thiserror::Error;

// Re-exports
pub use config::{FileConfig, NullConfig};
pub use report::{Notice, ReportBody, SurveyReport};
pub use sources::{open_survey, sample_table, CsvSource, ExcelSource};
pub use table::SurveyTable;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Spreadsheet error: {0}")]
    Excel(String),

    #[error("The file has no header row")]
    MissingHeader,

    #[error("No survey is loaded")]
    NoTable,

    #[error("Column '{0}' not found in the dataset")]
    ColumnNotFound(String),

    #[error("Invalid request: {0}")]
    Config(#[from] ConfigError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
