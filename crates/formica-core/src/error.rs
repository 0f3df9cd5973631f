//! Error types for Formica.
//!
//! Decisions never fail: absent data is an explicit "no decision" and the
//! codec is total. Errors exist for the surfaces around the core, namely
//! configuration, parsing user input and I/O.

use thiserror::Error;

/// Result type for Formica operations.
pub type Result<T> = std::result::Result<T, FormicaError>;

/// Errors that can occur outside the per-tick decision path.
#[derive(Debug, Error)]
pub enum FormicaError {
    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A signal kind name or value that does not exist.
    #[error("Unknown signal kind: {0}")]
    UnknownSignalKind(String),

    /// A role name that does not exist.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Out of range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl FormicaError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FormicaError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        FormicaError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }
}
