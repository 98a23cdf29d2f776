//! A decoded measurement and file helpers.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::decode::decode_with_limits;
use crate::encode::encode;
use crate::error::{CodecError, CodecResult};
use crate::header::Header;
use crate::limits::Limits;
use crate::samples::{MaxForce, SampleSeries};
use crate::value::HeaderValue;

/// Header and force profile of one PNT file.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub header: Header,
    pub samples: SampleSeries,
    /// File the measurement was read from, if any.
    pub source: Option<PathBuf>,
}

impl Measurement {
    #[must_use]
    pub const fn new(header: Header, samples: SampleSeries) -> Self {
        Self {
            header,
            samples,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Reads and decodes a file with default limits.
    pub fn from_file(path: impl AsRef<Path>) -> CodecResult<Self> {
        Self::from_file_with_limits(path, &Limits::default())
    }

    pub fn from_file_with_limits(path: impl AsRef<Path>, limits: &Limits) -> CodecResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| CodecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read measurement file");
        let measurement = decode_with_limits(&bytes, limits)?;
        Ok(measurement.with_source(path))
    }

    /// Encodes the measurement and writes it to `path`.
    ///
    /// The header bookkeeping fields are normalized as by [`encode`].
    pub fn write_file(&mut self, path: impl AsRef<Path>) -> CodecResult<()> {
        let path = path.as_ref();
        let bytes = encode(self)?;
        fs::write(path, &bytes).map_err(|source| CodecError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote measurement file");
        Ok(())
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Returns a header field by exact name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&HeaderValue> {
        self.header.get(name)
    }

    #[must_use]
    pub fn max_force(&self) -> Option<MaxForce> {
        self.samples.max_force()
    }

    /// Depth at which the force first reaches `threshold_n`.
    #[must_use]
    pub fn surface_position(&self, threshold_n: f64) -> Option<f64> {
        self.samples.surface_position(threshold_n)
    }

    /// Distance from the surface to the depth of maximum force.
    #[must_use]
    pub fn penetration_depth(&self, threshold_n: f64) -> Option<f64> {
        let surface = self.surface_position(threshold_n)?;
        let max = self.max_force()?;
        Some(max.depth_mm - surface)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = |name: &str| self.field(name).and_then(HeaderValue::as_int).unwrap_or(0);
        let name = self.header.file_name();
        let name = if name.is_empty() {
            self.source
                .as_deref()
                .and_then(Path::file_name)
                .map_or_else(|| "-".to_string(), |n| n.to_string_lossy().into_owned())
        } else {
            name.into_owned()
        };
        write!(
            f,
            "{name} | {:04}-{:02}-{:02} {:02}:{:02}:{:02} | {} samples | {} mm",
            int("Year"),
            int("Month"),
            int("Day"),
            int("Hour"),
            int("Min"),
            int("Sec"),
            self.sample_count(),
            self.header.samples_dist().unwrap_or(0.0),
        )
    }
}
