//! Core error types for the stock journal.
//!
//! Validation errors describe a single proposed transaction that cannot be
//! applied. Import errors describe a structurally broken CSV file and always
//! reject the whole file.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the journal.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Import rejected: {0}")]
    Import(#[from] ImportError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// A proposed transaction that fails the accounting invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ticker symbol is required.")]
    EmptyTicker,

    #[error("Quantity must be greater than zero.")]
    NonPositiveQuantity,

    #[error("Price must be greater than zero.")]
    NonPositivePrice,

    #[error("Quantity must not exceed {max} shares.")]
    QuantityOutOfRange { max: u64 },

    #[error("Price must not exceed {max}.")]
    PriceOutOfRange { max: u64 },

    #[error("Transaction amounts are too large to record.")]
    AmountOutOfRange,

    #[error("{field} must not be negative.")]
    NegativeRate { field: String },

    #[error("Unknown transaction type '{0}'. Must be 'Buy' or 'Sell'.")]
    UnknownTransactionType(String),

    #[error("Cannot sell {ticker}. You don't own any shares of this stock.")]
    NoPosition { ticker: String },

    #[error(
        "Insufficient shares: cannot sell {requested} shares of {ticker}. You only own {owned} shares."
    )]
    InsufficientShares {
        ticker: String,
        requested: i64,
        owned: i64,
    },
}

/// Structural problems in an imported CSV file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV file is empty or contains no data rows")]
    EmptyFile,

    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Could not parse date '{value}' on row {row}. Make sure dates are in YYYY-MM-DD format.")]
    InvalidDate { row: usize, value: String },

    #[error("Invalid transaction types found: {}. Must be 'Buy' or 'Sell'.", .0.join(", "))]
    InvalidTransactionType(Vec<String>),

    #[error("Invalid value '{value}' in column '{column}' on row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row} is not a valid transaction: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Malformed CSV: {0}")]
    Csv(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Import(ImportError::Csv(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
