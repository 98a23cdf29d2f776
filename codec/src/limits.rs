//! Limits for bounded decoding.

/// Codec limits enforced while decoding the sample section.
///
/// The sample count comes straight from the file header, so it is checked
/// against these limits before any sample memory is allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of force samples accepted from one file.
    pub max_samples: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // A 2.5 m profile at 4 um resolution is ~625k samples
            max_samples: 4 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self { max_samples: 4096 }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_samples: usize::MAX,
        }
    }
}
