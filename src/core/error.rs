//! Error types for the logging engine

pub type Result<T> = std::result::Result<T, FlogError>;

#[derive(Debug, thiserror::Error)]
pub enum FlogError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The process-wide engine was installed twice
    #[error("Global logger already initialized")]
    AlreadyInitialized,

    /// The log store was already drained to the sink
    #[error("Log store already flushed")]
    AlreadyFlushed,

    /// Release of a reentrancy guard that was not held
    #[error("Reentrancy guard released while not held")]
    GuardNotHeld,

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },
}

impl FlogError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        FlogError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        FlogError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        FlogError::FileLockError { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FlogError::file_sink("/var/log/app.log", "Permission denied");
        assert!(matches!(err, FlogError::FileSinkError { .. }));

        let err = FlogError::file_lock("/var/log/app.log");
        assert!(matches!(err, FlogError::FileLockError { .. }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            FlogError::AlreadyFlushed.to_string(),
            "Log store already flushed"
        );

        let err = FlogError::file_sink("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File sink error for '/var/log/app.log': Disk full"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = FlogError::io_operation("flushing log store", "cannot write to sink", io_err);

        assert!(matches!(err, FlogError::IoOperation { .. }));
        assert!(err.to_string().contains("flushing log store"));
        assert!(err.to_string().contains("cannot write to sink"));
    }
}
