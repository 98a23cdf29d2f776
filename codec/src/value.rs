//! Decoded header values.

use std::borrow::Cow;
use std::fmt;

use schema::{FieldDescriptor, FieldKind};

/// A decoded header field value.
///
/// Integer kinds of every width decode to `Int` (or `Ints` for arrays); the
/// declared width is only enforced again on encode. Byte strings keep their raw bytes so that files
/// with non-UTF-8 text still round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Int(i64),
    Float(f64),
    Ints(Vec<i64>),
    Text(Vec<u8>),
}

impl HeaderValue {
    /// Returns the integer if this is a scalar integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float if this is a scalar float.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Self::Ints(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the raw bytes of a text value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns a text value as a string, replacing invalid UTF-8.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(String::from_utf8_lossy)
    }

    /// Short name of the value shape, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Ints(_) => "int array",
            Self::Text(_) => "text",
        }
    }

    /// Zero value for a field; `None` for padding.
    pub(crate) fn zero_for(descriptor: &FieldDescriptor) -> Option<Self> {
        let count = descriptor.count();
        let value = match descriptor.kind {
            FieldKind::Padding(_) => return None,
            FieldKind::FixedBytes(_) | FieldKind::Char => Self::Text(Vec::new()),
            FieldKind::UInt16 | FieldKind::Int16 | FieldKind::Int32 if count > 1 => {
                Self::Ints(vec![0; count])
            }
            FieldKind::UInt16 | FieldKind::Int16 | FieldKind::Int32 => Self::Int(0),
            FieldKind::Float32 | FieldKind::Float64 => Self::Float(0.0),
        };
        Some(value)
    }

    /// Returns `true` if the value has the shape the field expects.
    ///
    /// Widths and lengths are not checked here; encode enforces them.
    pub(crate) fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        let array = descriptor.is_array();
        match self {
            Self::Int(_) => descriptor.kind.is_integer() && !array,
            Self::Ints(_) => descriptor.kind.is_integer() && array,
            Self::Float(_) => is_float(descriptor.kind) && !array,
            Self::Text(_) => matches!(descriptor.kind, FieldKind::FixedBytes(_) | FieldKind::Char),
        }
    }
}

const fn is_float(kind: FieldKind) -> bool {
    matches!(kind, FieldKind::Float32 | FieldKind::Float64)
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Ints(values) => write_list(f, values),
            Self::Text(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[i64]) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str(")")
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for HeaderValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, i16, u32, i32, i64);

impl From<f32> for HeaderValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self::Text(value.as_bytes().to_vec())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        Self::Text(value.into_bytes())
    }
}

impl From<&[u8]> for HeaderValue {
    fn from(value: &[u8]) -> Self {
        Self::Text(value.to_vec())
    }
}

impl From<Vec<u8>> for HeaderValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<i64>> for HeaderValue {
    fn from(values: Vec<i64>) -> Self {
        Self::Ints(values)
    }
}
