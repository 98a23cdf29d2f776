//! Static field table for the PNT measurement file header.
//!
//! This crate declares the fixed 512-byte header layout once, so decoding and
//! encoding consult the same list of descriptors:
//! - Field kinds (fixed-width integers, IEEE floats, byte strings, padding)
//! - Field descriptors (name, kind, offset, length, unit)
//! - The ordered [`FIELD_TABLE`] and its validation rules
//!
//! # Design Principles
//!
//! - **One table** - Decode and encode never carry their own offsets.
//! - **Pure data** - The table is a single `static`; there is no runtime construction.
//! - **Firmware layout wins** - The table mirrors the device layout even where
//!   it is internally odd (see the `reserved 1` entry).

mod error;
mod field;
mod table;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDescriptor, FieldKind};
pub use table::{describe, find, validate, FIELD_TABLE};

/// Size of the fixed header block in bytes.
pub const HEADER_SIZE: usize = 512;

/// Byte offset at which the sample section starts.
pub const SAMPLE_OFFSET: usize = HEADER_SIZE;

/// Width of one raw force sample in bytes.
pub const SAMPLE_WIDTH: usize = 2;

/// Names of the fields the codec treats specially.
pub mod names {
    pub const VERSION: &str = "Version";
    pub const SAMPLES_DIST: &str = "Samples Dist [mm]";
    pub const CNV_FORCE: &str = "CNV Force [N/mV]";
    pub const LENGTH_COMMENT: &str = "Length Comment";
    pub const COMMENT: &str = "Comment";
    pub const FILE_NAME: &str = "File Name";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const NORTHING: &str = "Northing";
    pub const EASTING: &str = "Easting";
    pub const FORCE_SAMPLES: &str = "Force Samples";
}
