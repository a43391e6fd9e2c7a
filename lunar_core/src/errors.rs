//! # Error Types
//!
//! Structured error types for lunar_core. Every failure is an input problem:
//! a date outside the supported window, a lunar date that does not exist, or
//! a settings file that cannot be read. Each variant carries enough context
//! for a front end to tell the user what to correct.
//!
//! ## Example
//!
//! ```rust
//! use lunar_core::errors::{CalendarError, CalendarResult};
//!
//! fn validate_month(month: u32) -> CalendarResult<()> {
//!     if !(1..=12).contains(&month) {
//!         return Err(CalendarError::invalid_lunar_date(
//!             "month",
//!             month.to_string(),
//!             "Lunar month must be between 1 and 12",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for lunar_core operations
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Structured error type for calendar operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalendarError {
    /// Solar date outside the supported conversion window
    #[error("Date out of range: {date} is outside {min} to {max}")]
    OutOfRange {
        date: String,
        min: String,
        max: String,
    },

    /// Lunar (year, month, leap flag, day) combination does not exist
    #[error("Invalid lunar date for '{field}': {value} - {reason}")]
    InvalidLunarDate {
        field: String,
        value: String,
        reason: String,
    },

    /// An input value is malformed (unparseable, impossible Gregorian date, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalendarError {
    /// Create an OutOfRange error
    pub fn out_of_range(date: impl Into<String>, min: impl Into<String>, max: impl Into<String>) -> Self {
        CalendarError::OutOfRange {
            date: date.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// Create an InvalidLunarDate error
    pub fn invalid_lunar_date(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::InvalidLunarDate {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalendarError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalendarError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the requested date rather than the environment
    pub fn is_date_error(&self) -> bool {
        matches!(
            self,
            CalendarError::OutOfRange { .. } | CalendarError::InvalidLunarDate { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalendarError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalendarError::InvalidLunarDate { .. } => "INVALID_LUNAR_DATE",
            CalendarError::InvalidInput { .. } => "INVALID_INPUT",
            CalendarError::FileError { .. } => "FILE_ERROR",
            CalendarError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalendarError {
    fn from(e: serde_json::Error) -> Self {
        CalendarError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalendarError::invalid_lunar_date("is_leap_month", "true", "2024 has no leap month");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidLunarDate\""));
        let roundtrip: CalendarError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalendarError::out_of_range("1899-12-31", "a", "b").error_code(), "OUT_OF_RANGE");
        assert_eq!(CalendarError::invalid_input("date", "x", "y").error_code(), "INVALID_INPUT");
        assert_eq!(CalendarError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_date_errors() {
        assert!(CalendarError::out_of_range("d", "a", "b").is_date_error());
        assert!(CalendarError::invalid_lunar_date("day", "31", "too long").is_date_error());
        assert!(!CalendarError::file_error("read", "x.json", "missing").is_date_error());
    }

    #[test]
    fn test_error_display() {
        let error = CalendarError::out_of_range("2101-01-01", "1900-01-31", "2100-12-31");
        assert_eq!(
            error.to_string(),
            "Date out of range: 2101-01-01 is outside 1900-01-31 to 2100-12-31"
        );
    }
}
