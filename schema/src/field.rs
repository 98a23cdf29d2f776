//! Field kinds and descriptors.

use std::fmt;
use std::ops::Range;

/// The binary representation of a header field (representation only).
///
/// Multi-byte kinds are always big-endian on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldKind {
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// IEEE 754 single precision.
    Float32,
    /// IEEE 754 double precision.
    Float64,
    /// Raw byte string of fixed length, possibly NUL-terminated.
    FixedBytes(u32),
    /// A single byte character.
    Char,
    /// Reserved bytes with no meaning.
    Padding(u32),
}

impl FieldKind {
    /// Width of one element in bytes.
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::UInt16 | Self::Int16 => 2,
            Self::Int32 | Self::Float32 => 4,
            Self::Float64 => 8,
            Self::FixedBytes(n) | Self::Padding(n) => n,
            Self::Char => 1,
        }
    }

    /// Returns `true` for reserved regions.
    #[must_use]
    pub const fn is_padding(self) -> bool {
        matches!(self, Self::Padding(_))
    }

    /// Returns `true` for integer and float kinds.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::UInt16 | Self::Int16 | Self::Int32 | Self::Float32 | Self::Float64
        )
    }

    /// Returns `true` for integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::UInt16 | Self::Int16 | Self::Int32)
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UInt16 => "uint16",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::FixedBytes(_) => "bytes",
            Self::Char => "char",
            Self::Padding(_) => "padding",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedBytes(n) => write!(f, "bytes[{n}]"),
            Self::Padding(n) => write!(f, "padding[{n}]"),
            other => f.write_str(other.name()),
        }
    }
}

/// A single entry of the header layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Bytes from the start of the file.
    pub offset: u32,
    /// Total bytes occupied; a multiple of `kind.width()` for array fields.
    pub length: u32,
    pub unit: Option<&'static str>,
}

impl FieldDescriptor {
    /// Creates a descriptor without a physical unit.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, offset: u32, length: u32) -> Self {
        Self {
            name,
            kind,
            offset,
            length,
            unit: None,
        }
    }

    /// Sets the physical unit.
    #[must_use]
    pub const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Number of elements stored in the field.
    ///
    /// Scalars, byte strings, and padding count as one element.
    #[must_use]
    pub const fn count(&self) -> usize {
        let width = self.kind.width();
        if width == 0 {
            0
        } else {
            (self.length / width) as usize
        }
    }

    /// Returns `true` if the field holds more than one numeric element.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.kind.is_numeric() && self.count() > 1
    }

    /// First byte of the field.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.offset as usize
    }

    /// One past the last byte of the field.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset as usize + self.length as usize
    }

    /// Byte range occupied by the field.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}
