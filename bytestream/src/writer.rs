//! Offset-addressed writer for fixed-capacity buffers.

use crate::error::{ByteError, ByteResult};

/// A writer for fixed-width big-endian values at absolute offsets.
///
/// The writer never grows its buffer. Writes outside the buffer fail with
/// [`ByteError::OutOfBounds`] and leave the buffer unchanged.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
}

impl<'a> ByteWriter<'a> {
    /// Creates a new `ByteWriter` over a mutable byte slice.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    /// Returns the buffer capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Copies `bytes` into the buffer starting at `offset`.
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> ByteResult<()> {
        self.slot(offset, bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, offset: usize, value: u8) -> ByteResult<()> {
        self.write_bytes(offset, &[value])
    }

    /// Writes a big-endian `u16`.
    pub fn write_u16(&mut self, offset: usize, value: u16) -> ByteResult<()> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    /// Writes a big-endian `i16`.
    pub fn write_i16(&mut self, offset: usize, value: i16) -> ByteResult<()> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    /// Writes a big-endian `i32`.
    pub fn write_i32(&mut self, offset: usize, value: i32) -> ByteResult<()> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    /// Writes a big-endian IEEE `f32`.
    pub fn write_f32(&mut self, offset: usize, value: f32) -> ByteResult<()> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    /// Writes a big-endian IEEE `f64`.
    pub fn write_f64(&mut self, offset: usize, value: f64) -> ByteResult<()> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    fn slot(&mut self, offset: usize, len: usize) -> ByteResult<&mut [u8]> {
        let available = self.buf.len();
        let err = ByteError::OutOfBounds {
            offset,
            requested: len,
            available,
        };
        let end = offset.checked_add(len).ok_or(err)?;
        self.buf.get_mut(offset..end).ok_or(err)
    }
}
