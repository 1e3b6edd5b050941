//! Core error types for the ledger engine.
//!
//! This module defines store-agnostic error types. Storage-specific errors
//! are converted to these types by whatever crate implements the repository
//! traits.

use chrono::NaiveDate;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// Repository failures are wrapped in string form to keep this type
/// independent of any particular store.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Market data unavailable: {0}")]
    MarketData(String),

    #[error("Failed to load settings: {0}")]
    Settings(String),
}

/// Errors that occur while folding a ledger.
///
/// The replay engine never returns these to its caller; they are turned into
/// warnings attached to the replay result so one bad row cannot poison a
/// whole portfolio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Unsupported transaction type: {0}")]
    UnsupportedTransactionType(String),

    #[error("Transaction {transaction_id} on {date} has no symbol")]
    MissingSymbol {
        transaction_id: String,
        date: NaiveDate,
    },

    #[error("Negative {field} ({value}) on transaction {transaction_id}")]
    NegativeValue {
        transaction_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Amounts on transaction {transaction_id} overflow the ledger")]
    Overflow { transaction_id: String },
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
