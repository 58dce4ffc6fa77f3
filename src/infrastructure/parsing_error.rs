//! Parsing error types
//!
//! Only construction problems (bad selectors, bad patterns, bad config) and
//! a missing document surface as errors. Field-level extraction failures are
//! encoded in the returned data instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector for {field}: {selector} - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("Invalid pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No document supplied to {operation}")]
    MissingDocument { operation: String },

    #[error("Declared total {declared} does not match item sum {items_sum}")]
    TotalMismatch { items_sum: i64, declared: i64 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, field: String },
}

impl ParsingError {
    pub fn invalid_selector(field: &str, selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_pattern(pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing_document(operation: &str) -> Self {
        Self::MissingDocument {
            operation: operation.to_string(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// A total mismatch still leaves a usable cart; the others mean the
    /// parser (or its input) is unusable.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::TotalMismatch { .. } => true,
            Self::InvalidSelector { .. }
            | Self::InvalidPattern { .. }
            | Self::MissingDocument { .. }
            | Self::ConfigurationError { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
