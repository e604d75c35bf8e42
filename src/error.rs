//! Error types for lockin.

use thiserror::Error;

/// Errors surfaced by lockin.
///
/// The timer core itself never fails: stale or corrupt persisted state falls
/// back to defaults and invalid transitions are ignored. These variants cover
/// the outer layers (storage, configuration, CLI input).
#[derive(Debug, Error)]
pub enum LockinError {
    /// Configuration could not be resolved, read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `SQLite` failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Key/value storage failure outside of `SQLite` (e.g. a poisoned lock).
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON (de)serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The user supplied something we cannot act on.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl LockinError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::NotFound(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LockinError::Database("disk full".to_string());
        assert_eq!(err.to_string(), "Database error: disk full");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(LockinError::InvalidInput("x".into()).exit_code(), 2);
        assert_eq!(LockinError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(LockinError::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: LockinError = err.into();
        assert!(matches!(err, LockinError::Parse(_)));
    }
}
