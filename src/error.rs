use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Statement extract contained no data tables")]
    EmptyStatement,

    #[error("Page {page}: expected {expected} columns after pruning, found {found}")]
    ColumnCountMismatch {
        page: usize,
        expected: usize,
        found: usize,
    },

    #[error("Required column '{0}' not found in statement")]
    MissingColumn(&'static str),

    #[error("Row {row}: cannot parse amount '{value}' in column '{column}'")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: unrecognized timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
