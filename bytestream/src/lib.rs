//! Bounds-checked big-endian byte access for the PNT codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for reading and writing
//! fixed-width values at absolute byte offsets.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about headers, fields, or samples.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut buf = [0u8; 8];
//! let mut writer = ByteWriter::new(&mut buf);
//! writer.write_u16(0, 0xBEEF).unwrap();
//! writer.write_f32(2, 0.5).unwrap();
//!
//! let reader = ByteReader::new(&buf);
//! assert_eq!(reader.read_u16(0).unwrap(), 0xBEEF);
//! assert_eq!(reader.read_f32(2).unwrap(), 0.5);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert!(reader.read_u8(0).is_err());
    }

    #[test]
    fn scalar_roundtrip_at_offsets() {
        let mut buf = [0u8; 32];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u8(0, 0xAB).unwrap();
        writer.write_i16(1, -2).unwrap();
        writer.write_i32(3, -100_000).unwrap();
        writer.write_f64(7, 46.5).unwrap();

        let reader = ByteReader::new(&buf);
        assert_eq!(reader.read_u8(0).unwrap(), 0xAB);
        assert_eq!(reader.read_i16(1).unwrap(), -2);
        assert_eq!(reader.read_i32(3).unwrap(), -100_000);
        assert_eq!(reader.read_f64(7).unwrap(), 46.5);
    }

    #[test]
    fn values_are_big_endian() {
        let mut buf = [0u8; 4];
        ByteWriter::new(&mut buf).write_i32(0, 0x0102_0304).unwrap();
        assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn doctest_example() {
        let mut buf = [0u8; 8];
        let mut writer = ByteWriter::new(&mut buf);
        writer.write_u16(0, 0xBEEF).unwrap();
        writer.write_f32(2, 0.5).unwrap();

        let reader = ByteReader::new(&buf);
        assert_eq!(reader.read_u16(0).unwrap(), 0xBEEF);
        assert!((reader.read_f32(2).unwrap() - 0.5).abs() < f32::EPSILON);
    }
}
