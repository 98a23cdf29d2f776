//! Offset-addressed reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// A reader for fixed-width big-endian values at absolute offsets.
///
/// The reader holds no cursor: every call names the offset it reads from,
/// so the same reader can serve a layout table in any order.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Returns the length of the underlying buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> ByteResult<&'a [u8]> {
        let end = offset.checked_add(len).ok_or(ByteError::OutOfBounds {
            offset,
            requested: len,
            available: self.data.len(),
        })?;
        self.data.get(offset..end).ok_or(ByteError::OutOfBounds {
            offset,
            requested: len,
            available: self.data.len(),
        })
    }

    /// Reads a single byte.
    pub fn read_u8(&self, offset: usize) -> ByteResult<u8> {
        Ok(self.read_array::<1>(offset)?[0])
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&self, offset: usize) -> ByteResult<u16> {
        self.read_array(offset).map(u16::from_be_bytes)
    }

    /// Reads a big-endian `i16`.
    pub fn read_i16(&self, offset: usize) -> ByteResult<i16> {
        self.read_array(offset).map(i16::from_be_bytes)
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&self, offset: usize) -> ByteResult<i32> {
        self.read_array(offset).map(i32::from_be_bytes)
    }

    /// Reads a big-endian IEEE `f32`.
    pub fn read_f32(&self, offset: usize) -> ByteResult<f32> {
        self.read_array(offset).map(f32::from_be_bytes)
    }

    /// Reads a big-endian IEEE `f64`.
    pub fn read_f64(&self, offset: usize) -> ByteResult<f64> {
        self.read_array(offset).map(f64::from_be_bytes)
    }

    fn read_array<const N: usize>(&self, offset: usize) -> ByteResult<[u8; N]> {
        let bytes = self.slice(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}
