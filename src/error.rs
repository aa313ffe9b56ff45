//! Error types for txtml library.

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result type alias for txtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling a document.
///
/// Recoverable markup problems (unknown tags, bad attributes, missing insert
/// files) are reported as [`crate::render::Warning`]s instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A paired tag has no closing tag (strict mode only).
    #[error("No closing tag found for \"{name}\"")]
    UnterminatedTag {
        /// Name of the unterminated tag
        name: String,
    },

    /// Tags are nested deeper than the configured limit.
    #[error("Tags nested too deep (limit is {limit})")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
    },

    /// Growing the document buffer failed.
    #[error("Memory allocation error: {0}")]
    Allocation(#[from] TryReserveError),

    /// Caller supplied an input that cannot be processed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnterminatedTag {
            name: "center".to_string(),
        };
        assert_eq!(err.to_string(), "No closing tag found for \"center\"");

        let err = Error::NestingTooDeep { limit: 1000 };
        assert_eq!(err.to_string(), "Tags nested too deep (limit is 1000)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_allocation_error_conversion() {
        let mut buf: Vec<u8> = Vec::new();
        let reserve_err = buf.try_reserve(usize::MAX).unwrap_err();
        let err: Error = reserve_err.into();
        assert!(matches!(err, Error::Allocation(_)));
    }
}
