//! Error types for the employee management console.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a console operation can report. A failing operation
//! is reported to the user and aborted; the surrounding menu loop continues.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::StoreError;

/// The main error type for the employee management console.
///
/// # Example
///
/// ```
/// use ems_console::error::EmsError;
///
/// let error = EmsError::Validation {
///     field: "contact_number".to_string(),
///     message: "must be exactly 10 digits".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid contact_number: must be exactly 10 digits");
/// ```
#[derive(Debug, Error)]
pub enum EmsError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A field failed local format validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record looked up.
        entity: &'static str,
        /// The id that was requested.
        id: String,
    },

    /// An insert or update violated a uniqueness constraint.
    #[error("Duplicate record: {message}")]
    Duplicate {
        /// Which constraint was violated.
        message: String,
    },

    /// A request was asked to change status after it was already decided.
    #[error("{entity} {id} is already {status} and cannot be changed")]
    InvalidTransition {
        /// The kind of request.
        entity: &'static str,
        /// The request id.
        id: i64,
        /// The status the request already holds.
        status: String,
    },

    /// Check-out attempted with no check-in recorded for the day.
    #[error("You must check-in first!")]
    MustCheckInFirst,

    /// A check-in already exists for the day.
    #[error("Already checked in on {date}")]
    AlreadyCheckedIn {
        /// The attendance date.
        date: NaiveDate,
    },

    /// The day's attendance record is already complete.
    #[error("Already checked out on {date}")]
    AlreadyCheckedOut {
        /// The attendance date.
        date: NaiveDate,
    },

    /// Attendance times are inconsistent.
    #[error("Invalid attendance: {message}")]
    InvalidAttendance {
        /// A description of the inconsistency.
        message: String,
    },

    /// A promotion did not raise the salary.
    #[error("Promotion salary {proposed} must be greater than current salary {current}")]
    SalaryNotIncreased {
        /// The salary currently on record.
        current: Decimal,
        /// The rejected proposal.
        proposed: Decimal,
    },

    /// Login failed.
    #[error("Invalid {role} ID or Password")]
    InvalidCredentials {
        /// The role that attempted to log in.
        role: &'static str,
    },

    /// The persistent store failed.
    #[error("Store error: {message}")]
    Store {
        /// The underlying failure.
        message: String,
    },

    /// Terminal I/O failed.
    #[error("I/O error: {message}")]
    Io {
        /// The underlying failure.
        message: String,
    },

    /// The input stream ended.
    #[error("Input closed")]
    InputClosed,
}

impl EmsError {
    /// Shorthand for a [`EmsError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EmsError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`EmsError::NotFound`] error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EmsError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for EmsError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate(message) => EmsError::Duplicate { message },
            other => EmsError::Store {
                message: other.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for EmsError {
    fn from(error: std::io::Error) -> Self {
        EmsError::Io {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EmsError.
pub type EmsResult<T> = Result<T, EmsError>;
