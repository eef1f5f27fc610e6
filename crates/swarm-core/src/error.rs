//! Error types for Swarm

use thiserror::Error;

/// The main error type for Swarm operations
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid field type for {field}: expected {expected}, got {got}")]
    InvalidFieldType {
        field: String,
        expected: String,
        got: String,
    },

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Allocation failed: could not reserve {requested} particles")]
    AllocationFailed { requested: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Swarm operations
pub type Result<T> = std::result::Result<T, SwarmError>;

impl From<toml::de::Error> for SwarmError {
    fn from(err: toml::de::Error) -> Self {
        SwarmError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for SwarmError {
    fn from(err: toml::ser::Error) -> Self {
        SwarmError::TomlSerError(err.to_string())
    }
}
