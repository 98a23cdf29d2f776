//! The decoded header block.

use std::borrow::Cow;

use schema::{find, names, FieldDescriptor, FIELD_TABLE};

use crate::error::HeaderError;
use crate::value::HeaderValue;

/// Header values keyed by the field table.
///
/// One slot per descriptor, in table order. Padding slots are always `None`;
/// every other slot holds a value once the header is built by [`Header::new`]
/// or by decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    values: Vec<Option<HeaderValue>>,
}

impl Header {
    /// Creates a header with every field zero or empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: FIELD_TABLE.iter().map(HeaderValue::zero_for).collect(),
        }
    }

    /// Creates a header with no values set.
    pub(crate) fn empty() -> Self {
        Self {
            values: vec![None; FIELD_TABLE.len()],
        }
    }

    /// Returns the value of a field by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        let (index, _) = find(name)?;
        self.values.get(index)?.as_ref()
    }

    /// Sets a field, returning the previous value.
    ///
    /// Only the value shape is checked here; widths and lengths are enforced
    /// by encode.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<HeaderValue>,
    ) -> Result<Option<HeaderValue>, HeaderError> {
        let (index, descriptor) = find(name).ok_or_else(|| HeaderError::UnknownField {
            name: name.to_owned(),
        })?;
        if descriptor.kind.is_padding() {
            return Err(HeaderError::Reserved {
                field: descriptor.name,
            });
        }
        let value = value.into();
        if !value.matches(descriptor) {
            return Err(HeaderError::KindMismatch {
                field: descriptor.name,
                expected: descriptor.kind,
                found: value.kind_name(),
            });
        }
        Ok(self.replace(index, value))
    }

    /// Iterates over set fields in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &HeaderValue)> + '_ {
        FIELD_TABLE
            .iter()
            .zip(&self.values)
            .filter_map(|(descriptor, value)| value.as_ref().map(|value| (descriptor, value)))
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&HeaderValue> {
        self.values.get(index)?.as_ref()
    }

    pub(crate) fn replace(&mut self, index: usize, value: HeaderValue) -> Option<HeaderValue> {
        self.values.get_mut(index)?.replace(value)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut HeaderValue> {
        self.values.get_mut(index)?.as_mut()
    }

    /// The comment text, lossily decoded.
    #[must_use]
    pub fn comment(&self) -> Cow<'_, str> {
        self.text(names::COMMENT)
    }

    /// Replaces the comment. `Length Comment` is updated on encode.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        if let Some((index, _)) = find(names::COMMENT) {
            self.replace(index, HeaderValue::from(comment.into()));
        }
    }

    /// The file name stored in the header.
    #[must_use]
    pub fn file_name(&self) -> Cow<'_, str> {
        self.text(names::FILE_NAME)
    }

    /// Declared number of force samples.
    #[must_use]
    pub fn force_samples(&self) -> Option<i64> {
        self.get(names::FORCE_SAMPLES)?.as_int()
    }

    /// Depth step between samples in millimetres.
    #[must_use]
    pub fn samples_dist(&self) -> Option<f64> {
        self.get(names::SAMPLES_DIST)?.as_float()
    }

    /// Force conversion factor in newtons per raw unit.
    #[must_use]
    pub fn force_scale(&self) -> Option<f64> {
        self.get(names::CNV_FORCE)?.as_float()
    }

    /// Signed latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.get(names::LATITUDE)?.as_float()
    }

    /// Signed longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.get(names::LONGITUDE)?.as_float()
    }

    fn text(&self, name: &str) -> Cow<'_, str> {
        self.get(name)
            .and_then(HeaderValue::as_text)
            .unwrap_or(Cow::Borrowed(""))
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
