//! Error types for Physarum operations.
//!
//! The error surface is narrow: configuration is validated before the first
//! step, and the only thing that can fail mid-run is an external snapshot
//! sink. Out-of-grid probes and deposits are not errors.

use thiserror::Error;

/// Result type for Physarum operations.
pub type Result<T> = std::result::Result<T, PhysarumError>;

/// Errors that can occur while building or running a simulation.
#[derive(Debug, Error)]
pub enum PhysarumError {
    /// Configuration rejected at construction time.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// A snapshot sink failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
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
    #[error("{field} out of range: {value} (must be in [{min}, {max}))")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Errors raised by snapshot sinks.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O failure while writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The sink refused the snapshot.
    #[error("Snapshot rejected: {0}")]
    Rejected(String),
}

// Convenience constructors
impl PhysarumError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PhysarumError::Config(ConfigError::invalid(field, value, reason))
    }

    /// The configuration error, if this is one.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            PhysarumError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl ConfigError {
    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ConfigError::InvalidValue { field, .. } => field,
            ConfigError::OutOfRange { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = PhysarumError::invalid_config("agent_count", "0", "at least one agent is required");
        assert_eq!(
            err.to_string(),
            "Config error: Invalid value for agent_count: 0 (at least one agent is required)"
        );
        assert_eq!(err.as_config().map(|e| e.field()), Some("agent_count"));
    }

    #[test]
    fn out_of_range_display() {
        let err = ConfigError::out_of_range("decay", 0.0, 1.0, 1.5);
        assert_eq!(err.to_string(), "decay out of range: 1.5 (must be in [0, 1))");
    }

    #[test]
    fn export_errors_wrap_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PhysarumError = ExportError::from(io).into();
        assert!(err.to_string().starts_with("Export error: I/O error"));
        assert!(err.as_config().is_none());
    }
}
