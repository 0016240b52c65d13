use std::path::PathBuf;
use thiserror::Error;

/// Failures while bringing up the database. None of these are recoverable:
/// the application cannot do anything useful without storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open database at '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database connection check failed: {0}")]
    Verify(#[source] rusqlite::Error),

    #[error("failed to read schema script '{path}': {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to execute schema script: {0}")]
    SchemaExec(#[source] rusqlite::Error),
}

/// Rejected caller input. Nothing is written when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be greater than 0, got {0}")]
    InvalidAmount(f64),

    #[error("description cannot be empty")]
    EmptyDescription,

    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("invalid date '{0}'. Please use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },
}

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("expense with ID {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to open file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error on line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("invalid number of columns on line {line}: expected 4, got {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid amount '{value}'")]
    InvalidAmount { line: usize, value: String },

    #[error("line {line}: {source}")]
    InvalidRow {
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Expense(#[from] ExpenseError),
}
