//! Core error types for the studybudget engine.
//!
//! This module defines storage-agnostic error types. Collaborator-specific
//! failures (database, sync backend) are converted to these types by the
//! storage layer before they reach a service.
//!
//! Two situations are deliberately *not* errors: a missing budget yields the
//! empty overview, and an unreachable rate source degrades to a cached or
//! fallback rate with a warning attached to the result.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine and its services.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("No active session")]
    NoSession,

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}

/// Storage-agnostic error type for collaborator operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A query against the collaborator failed.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g. two budgets for one user).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// An atomic ledger write was rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Another device changed the same rows between read and write.
    /// The caller reloads the snapshot and retries.
    #[error("Concurrent write conflict: {0}")]
    ConcurrentWriteConflict(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("'{field}' must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: String },

    #[error("End date {end} is before start date {start}")]
    DateRange { start: NaiveDate, end: NaiveDate },

    #[error("Week start {0} is not a Monday")]
    NotAMonday(NaiveDate),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidConfigValue(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
