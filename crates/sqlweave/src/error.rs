//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for sqlweave operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for statement building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// A required part of the statement is missing (no table, no columns, ...)
    #[error("Structural error: {0}")]
    Structural(String),

    /// Wrong number of arguments (empty IN list, BETWEEN bounds, INSERT row length)
    #[error("Arity error: {0}")]
    Arity(String),

    /// A helper refused input that looks like injected SQL
    #[error("Unsafe input: {0}")]
    UnsafeInput(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl QbError {
    /// Create a structural error
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    /// Create an arity error
    pub fn arity(message: impl Into<String>) -> Self {
        Self::Arity(message.into())
    }

    /// Create an unsafe input error
    pub fn unsafe_input(message: impl Into<String>) -> Self {
        Self::UnsafeInput(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a structural error
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }

    /// Check if this is an arity error
    pub fn is_arity(&self) -> bool {
        matches!(self, Self::Arity(_))
    }

    /// Check if this is an unsafe input error
    pub fn is_unsafe_input(&self) -> bool {
        matches!(self, Self::UnsafeInput(_))
    }
}

impl From<toml::de::Error> for QbError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
