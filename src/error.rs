//! Error types for connection setup and lifecycle operations.

use thiserror::Error;

/// Result type for connection setup and lifecycle operations.
pub type SqliteResult<T> = Result<T, SqliteError>;

/// Errors that can occur while building a configuration or talking to the
/// database access layer.
#[derive(Error, Debug)]
pub enum SqliteError {
    /// The database path is neither `":memory"` nor a `file:` URI with a
    /// dot-suffixed name.
    #[error("invalid path provided: '{0}'")]
    InvalidPath(String),

    /// No driver was selected and none of the known registration names was
    /// found in the driver registry.
    #[error("cannot detect the correct driver")]
    DriverDetection,

    /// Opening or verifying a connection failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Executing a statement failed.
    #[error("query error: {0}")]
    Query(String),

    /// Error surfaced by the bundled rusqlite backend.
    #[error("sqlite error: {0}")]
    Backend(#[from] tokio_rusqlite::Error),
}

impl SqliteError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }
}

impl From<rusqlite::Error> for SqliteError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Backend(tokio_rusqlite::Error::Rusqlite(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = SqliteError::InvalidPath("oops".into());
        assert_eq!(err.to_string(), "invalid path provided: 'oops'");
    }

    #[test]
    fn test_driver_detection_display() {
        let err = SqliteError::DriverDetection;
        assert_eq!(err.to_string(), "cannot detect the correct driver");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            SqliteError::connection("test"),
            SqliteError::Connection(_)
        ));
        assert!(matches!(SqliteError::query("test"), SqliteError::Query(_)));
    }
}
