//! Field table validation errors.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when validating a field table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two descriptors share a name.
    #[error("duplicate field name `{name}`")]
    DuplicateName { name: &'static str },

    /// Declared length does not match the field kind.
    #[error("field `{name}` declares {length} bytes, not a whole number of {width}-byte elements")]
    LengthMismatch {
        name: &'static str,
        length: u32,
        width: u32,
    },

    /// Field extends past the fixed header block.
    #[error("field `{name}` ends at byte {end}, past the {header_size}-byte header")]
    OutOfHeader {
        name: &'static str,
        end: u32,
        header_size: usize,
    },

    /// Two non-padding descriptors share bytes.
    #[error("field `{first}` overlaps field `{second}`")]
    Overlap {
        first: &'static str,
        second: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_field() {
        let err = SchemaError::Overlap {
            first: "Comment",
            second: "File Name",
        };
        let msg = err.to_string();
        assert!(msg.contains("Comment"));
        assert!(msg.contains("File Name"));
    }

    #[test]
    fn display_out_of_header() {
        let err = SchemaError::OutOfHeader {
            name: "reserved 4",
            end: 520,
            header_size: 512,
        };
        assert!(err.to_string().contains("520"));
    }
}
