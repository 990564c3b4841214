//! Structured errors
//!
//! Configuration problems are reported before any arithmetic runs, with a
//! machine-readable code and a hint on how to fix the input.

use crate::{NumberError, MAX_DIGITS};
use serde::Serialize;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_DIGITS: &str = "INVALID_DIGITS";
    pub const INVALID_RADIUS: &str = "INVALID_RADIUS";
    pub const INVALID_REFERENCE: &str = "INVALID_REFERENCE";
    pub const INVALID_PRECISION: &str = "INVALID_PRECISION";
    pub const INSUFFICIENT_PRECISION: &str = "INSUFFICIENT_PRECISION";
    pub const PRECISION_LOSS: &str = "PRECISION_LOSS";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Structured error for the experiment pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecisError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl PrecisError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Use a plain decimal literal such as 100 or 2.5")
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
            .with_suggestion("Ensure divisor is not zero")
    }

    pub fn invalid_digits(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_DIGITS, format!("Invalid digit counts: {}", details.into()))
            .with_suggestion("Use ascending counts no larger than the reference's fractional digits")
    }

    pub fn digits_out_of_range(requested: usize, available: usize) -> Self {
        Self::invalid_digits(format!(
            "{} fractional digits requested, reference has {}",
            requested, available
        ))
    }

    pub fn invalid_radius(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_RADIUS, format!("Invalid radius: {}", details.into()))
            .with_suggestion("Radius must be a strictly positive decimal")
    }

    pub fn invalid_reference(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_REFERENCE, format!("Invalid reference constant: {}", details.into()))
            .with_suggestion("Reference must look like <digits>.<digits>")
    }

    pub fn insufficient_precision(required: usize, available: usize) -> Self {
        Self::new(codes::INSUFFICIENT_PRECISION,
            format!("Precision budget of {} digits is below the {} this run needs", available, required))
            .with_suggestion(format!("Raise the precision to at least {}", required))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
    }
}

impl std::fmt::Display for PrecisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for PrecisError {}

impl From<NumberError> for PrecisError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse_error(s),
            NumberError::DivisionByZero => Self::div_zero(),
            NumberError::InvalidPrecision(d) => Self::new(codes::INVALID_PRECISION,
                format!("Precision must be between 1 and {} digits, got {}", MAX_DIGITS, d))
                .with_suggestion(format!("Use a precision of at most {} digits", MAX_DIGITS)),
            NumberError::PrecisionLoss { literal, digits } => Self::new(codes::PRECISION_LOSS,
                format!("'{}' has more than {} significant digits", literal, digits))
                .with_suggestion("Raise the precision or shorten the literal"),
            NumberError::InsufficientPrecision { required, available } =>
                Self::insufficient_precision(required, available),
        }
    }
}
