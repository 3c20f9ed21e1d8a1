//! Error types for PitchDesk.

use thiserror::Error;

/// Common error type for PitchDesk.
#[derive(Error, Debug)]
pub enum PitchdeskError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the
    /// underlying store. Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for PitchdeskError {
    fn from(e: sqlx::Error) -> Self {
        PitchdeskError::Database(e.to_string())
    }
}

/// Result type alias for PitchDesk operations.
pub type Result<T> = std::result::Result<T, PitchdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_error_display() {
        let err = PitchdeskError::Permission("not a participant".to_string());
        assert_eq!(err.to_string(), "permission denied: not a participant");
    }

    #[test]
    fn test_validation_error_display() {
        let err = PitchdeskError::Validation("message body is required".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: message body is required"
        );
    }

    #[test]
    fn test_not_found_error_display() {
        let err = PitchdeskError::NotFound("message".to_string());
        assert_eq!(err.to_string(), "message not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PitchdeskError = io_err.into();
        assert!(matches!(err, PitchdeskError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(PitchdeskError::Validation("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
