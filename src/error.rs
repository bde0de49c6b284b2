//! Error types for the claimform library.
//!
//! Malformed or noisy OCR text is never an error: extraction misses are
//! reported as absent values and structural anomalies as degraded output.
//! Only boundary contract violations and I/O failures surface here.

use std::io;
use thiserror::Error;

/// Result type alias for claimform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the library boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input text or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A caller-supplied argument violates a documented precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error while rendering a record (JSON, summary).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an [`Error::InvalidInput`] naming the violated precondition.
    pub fn invalid_input(precondition: impl Into<String>) -> Self {
        Error::InvalidInput(precondition.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("page_count must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid input: page_count must be at least 1"
        );

        let err = Error::Render("bad".to_string());
        assert_eq!(err.to_string(), "Rendering error: bad");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
