//! Structured errors
//!
//! Field access and arithmetic never fail. Only construction with strict
//! validation, text parsing, calendar building and the host-native boundary
//! return errors, and they do so as values.

use crate::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const RANGE: &str = "RANGE";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const CONVERSION_OVERFLOW: &str = "CONVERSION_OVERFLOW";
    pub const INVALID_CALENDAR: &str = "INVALID_CALENDAR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const SCALE_OVERFLOW: &str = "SCALE_OVERFLOW";
}

/// Error type for date/time operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    /// A field was outside its valid range under strict construction
    #[error("{field} {value} out of range {expected}")]
    Range {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Malformed text input
    #[error("DateTime parse error: {0}")]
    Parse(String),

    /// The value cannot be represented by the host-native date/time type
    #[error("Conversion overflow: {0}")]
    ConversionOverflow(String),

    /// A calendar model failed validation when it was built
    #[error("Invalid calendar: {0}")]
    InvalidCalendar(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}

impl DateTimeError {
    pub(crate) fn range(field: &'static str, value: impl ToString, expected: impl Into<String>) -> Self {
        Self::Range {
            field,
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Range { .. } => codes::RANGE,
            Self::Parse(_) => codes::PARSE_ERROR,
            Self::ConversionOverflow(_) => codes::CONVERSION_OVERFLOW,
            Self::InvalidCalendar(_) => codes::INVALID_CALENDAR,
            Self::Number(NumberError::ParseError(_)) => codes::PARSE_ERROR,
            Self::Number(NumberError::DivisionByZero) => codes::DIV_ZERO,
            Self::Number(NumberError::ScaleOverflow(_)) => codes::SCALE_OVERFLOW,
        }
    }
}
