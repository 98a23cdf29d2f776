//! Error types for byte stream operations.

use thiserror::Error;

/// Result type for byte stream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing at a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ByteError {
    /// The requested range does not fit in the buffer.
    #[error("range {offset}..{} is out of bounds for a buffer of {available} bytes", offset.saturating_add(*requested))]
    OutOfBounds {
        /// Offset of the first byte accessed.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Length of the underlying buffer.
        available: usize,
    },
}

impl ByteError {
    /// Returns the end offset the access needed (`offset + requested`).
    #[must_use]
    pub const fn needed(&self) -> usize {
        match self {
            Self::OutOfBounds {
                offset, requested, ..
            } => (*offset).saturating_add(*requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_out_of_bounds() {
        let err = ByteError::OutOfBounds {
            offset: 358,
            requested: 4,
            available: 300,
        };
        let msg = err.to_string();
        assert!(msg.contains("358..362"), "should mention the range");
        assert!(msg.contains("300 bytes"), "should mention buffer length");
    }

    #[test]
    fn needed_saturates() {
        let err = ByteError::OutOfBounds {
            offset: usize::MAX,
            requested: 2,
            available: 0,
        };
        assert_eq!(err.needed(), usize::MAX);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ByteError>();
    }
}
