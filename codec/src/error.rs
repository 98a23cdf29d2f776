//! Error types for codec operations.

use std::io;
use std::path::PathBuf;

use bytestream::ByteError;
use schema::FieldKind;
use thiserror::Error;

/// Result type for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for file-level operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A field could not be decoded; the whole decode is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot decode `{field}` at byte {offset}: {cause}")]
pub struct DecodeError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Byte offset where the field starts.
    pub offset: usize,
    pub cause: DecodeCause,
}

impl DecodeError {
    pub(crate) const fn new(field: &'static str, offset: usize, cause: DecodeCause) -> Self {
        Self {
            field,
            offset,
            cause,
        }
    }
}

/// Why a field could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeCause {
    /// The buffer ends before the field does.
    #[error("buffer too short: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The declared sample count is negative.
    #[error("negative sample count {count}")]
    NegativeCount { count: i64 },

    /// The declared sample count is above the configured limit.
    #[error("sample count {actual} exceeds limit {limit}")]
    LimitExceeded { limit: usize, actual: usize },
}

impl From<ByteError> for DecodeCause {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::OutOfBounds { available, .. } => Self::Truncated {
                needed: err.needed(),
                available,
            },
        }
    }
}

/// A field could not be encoded; no bytes are produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot encode `{field}`: {cause}")]
pub struct EncodeError {
    /// Name of the offending field.
    pub field: &'static str,
    pub cause: EncodeCause,
}

impl EncodeError {
    pub(crate) const fn new(field: &'static str, cause: EncodeCause) -> Self {
        Self { field, cause }
    }
}

/// Why a field could not be encoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeCause {
    /// The header has no value for the field.
    #[error("no value set")]
    Missing,

    /// The value has the wrong shape for the field kind.
    #[error("expected a {expected} value, found {found}")]
    KindMismatch {
        expected: FieldKind,
        found: &'static str,
    },

    /// An integer does not fit the declared width.
    #[error("{value} does not fit {kind}")]
    IntOutOfRange { value: i64, kind: FieldKind },

    /// A float magnitude is beyond the declared type.
    #[error("{value} exceeds the range of {kind}")]
    FloatOutOfRange { value: f64, kind: FieldKind },

    /// A byte string is longer than its slot.
    #[error("{len} bytes exceed the {max}-byte slot")]
    TooLong { len: usize, max: usize },

    /// An array value has the wrong number of elements.
    #[error("expected {expected} elements, found {actual}")]
    ArrayLength { expected: usize, actual: usize },

    /// The force conversion factor cannot be divided by.
    #[error("force scale {scale} cannot convert samples")]
    InvalidScale { scale: f64 },

    /// A sample does not quantize into a signed 16-bit reading.
    #[error("sample {index} ({force_n} N) quantizes to {raw}, outside int16")]
    SampleOutOfRange { index: usize, force_n: f64, raw: f64 },

    /// More samples than the 32-bit sample counter can declare.
    #[error("{count} samples exceed the int32 sample counter")]
    CountOverflow { count: usize },

    /// The field lies outside the header buffer.
    #[error(transparent)]
    Layout(#[from] ByteError),
}

/// Errors from header edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// No field carries this name.
    #[error("unknown header field `{name}`")]
    UnknownField { name: String },

    /// Reserved regions hold no value.
    #[error("field `{field}` is reserved and holds no value")]
    Reserved { field: &'static str },

    /// The value has the wrong shape for the field kind.
    #[error("field `{field}` expects a {expected} value, found {found}")]
    KindMismatch {
        field: &'static str,
        expected: FieldKind,
        found: &'static str,
    },
}

/// Errors from reading or writing measurement files.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
