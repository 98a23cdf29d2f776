//! Decoding and encoding of PNT measurement files.
//!
//! This is the main codec crate that ties together bytestream and schema to
//! turn a PNT byte buffer into a typed [`Header`] and a [`SampleSeries`] of
//! depth and force pairs, and back.
//!
//! # Features
//!
//! - Full decode with bounded sample counts ([`Limits`])
//! - Header-only decode and encode
//! - Comment truncation and hemisphere sign handling
//! - Re-quantization of edited force profiles
//! - Derived queries: maximum force, surface position, penetration depth
//!
//! # Design Principles
//!
//! - **One layout** - Decode and encode walk the same field table.
//! - **No silent coercion** - Values that do not fit their slot fail encoding.
//! - **Stateless** - Every call works on caller-owned buffers and values.
//!
//! # Example
//!
//! ```
//! use codec::{decode, encode, Header, Measurement, Sample, SampleSeries};
//!
//! let mut header = Header::new();
//! header.set("CNV Force [N/mV]", 0.5f32).unwrap();
//! header.set("Samples Dist [mm]", 1.0f32).unwrap();
//! let samples: SampleSeries = vec![Sample::new(0.0, 1.0), Sample::new(1.0, 2.5)].into();
//!
//! let mut measurement = Measurement::new(header, samples);
//! let bytes = encode(&mut measurement).unwrap();
//! assert_eq!(bytes.len(), 512 + 4);
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded.sample_count(), 2);
//! assert_eq!(decoded.samples.as_slice()[1].force_n, 2.5);
//! ```

mod decode;
mod encode;
mod error;
mod header;
mod limits;
mod measurement;
mod samples;
mod value;

pub use decode::{decode, decode_header, decode_with_limits};
pub use encode::{encode, encode_header};
pub use error::{
    CodecError, CodecResult, DecodeCause, DecodeError, DecodeResult, EncodeCause, EncodeError,
    EncodeResult, HeaderError,
};
pub use header::Header;
pub use limits::Limits;
pub use measurement::Measurement;
pub use samples::{MaxForce, Sample, SampleSeries};
pub use value::HeaderValue;
