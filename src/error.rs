//! Error types for tarkv
//!
//! Provides a unified error type for all store operations.

use std::io;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for tarkv operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Archive Errors
    // -------------------------------------------------------------------------
    /// A record header could not be parsed, or a record is truncated
    #[error("Archive format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },
}

impl StoreError {
    /// Classify an error coming out of the tar header parser.
    ///
    /// The `tar` crate reports malformed headers and short blocks as plain
    /// `io::Error`s built from a message. Errors carrying an OS error code
    /// came from the disk and stay `Io` whatever their kind.
    pub(crate) fn from_archive(err: io::Error) -> Self {
        if err.raw_os_error().is_some() {
            return StoreError::Io(err);
        }
        match err.kind() {
            io::ErrorKind::Other
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => StoreError::Format(err.to_string()),
            _ => StoreError::Io(err),
        }
    }

    /// True if this is a lookup miss rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_messages_are_format_errors() {
        let err = io::Error::new(io::ErrorKind::Other, "archive header checksum mismatch");
        assert!(matches!(StoreError::from_archive(err), StoreError::Format(_)));

        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "failed to read entire block");
        assert!(matches!(StoreError::from_archive(err), StoreError::Format(_)));
    }

    #[test]
    fn test_os_errors_stay_io() {
        // EIO: a failing disk, not a damaged archive
        let err = io::Error::from_raw_os_error(5);
        assert!(matches!(StoreError::from_archive(err), StoreError::Io(_)));

        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(StoreError::from_archive(err), StoreError::Io(_)));
    }
}
