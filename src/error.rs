//! Error types for sanitization operations

use std::fmt;

/// Errors that can occur while preparing or reducing markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// Byte input could not be decoded into a parseable string
    ParseError(String),
    /// A caller-supplied argument was out of range (e.g., a zero excerpt length)
    InvalidArgument(String),
}

impl fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizeError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            SanitizeError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for SanitizeError {}
