//! Encoding of measurements into PNT byte buffers.

use bytestream::ByteWriter;
use schema::{find, names, FieldDescriptor, FieldKind, FIELD_TABLE, HEADER_SIZE, SAMPLE_WIDTH};

use crate::error::{EncodeCause, EncodeError, EncodeResult};
use crate::header::Header;
use crate::measurement::Measurement;
use crate::samples::SampleSeries;
use crate::value::HeaderValue;

/// Encodes a measurement into header and sample bytes.
///
/// `Force Samples` and `Length Comment` in `measurement.header` are first
/// overwritten from the sample series and the comment. A sample count or
/// comment that cannot be declared leaves the header untouched; later field
/// errors keep the updated values.
pub fn encode(measurement: &mut Measurement) -> EncodeResult<Vec<u8>> {
    normalize(measurement)?;
    let mut out = encode_header(&measurement.header)?;
    encode_samples(&measurement.header, &measurement.samples, &mut out)?;
    tracing::debug!(
        bytes = out.len(),
        samples = measurement.samples.len(),
        "encoded measurement"
    );
    Ok(out)
}

/// Packs the 512-byte header block as the header currently stands.
///
/// Padding is never written; reserved bytes are zero.
pub fn encode_header(header: &Header) -> EncodeResult<Vec<u8>> {
    let mut buf = vec![0u8; HEADER_SIZE];
    let mut writer = ByteWriter::new(&mut buf);
    for (index, descriptor) in FIELD_TABLE.iter().enumerate() {
        if descriptor.kind.is_padding() {
            continue;
        }
        let value = header
            .slot(index)
            .ok_or_else(|| EncodeError::new(descriptor.name, EncodeCause::Missing))?;
        let value = stored_form(header, descriptor, value);
        encode_field(&mut writer, descriptor, &value)
            .map_err(|cause| EncodeError::new(descriptor.name, cause))?;
    }
    Ok(buf)
}

fn normalize(measurement: &mut Measurement) -> EncodeResult<()> {
    let count = measurement.samples.len();
    let declared = i32::try_from(count).map_err(|_| {
        EncodeError::new(names::FORCE_SAMPLES, EncodeCause::CountOverflow { count })
    })?;

    let comment_len = measurement
        .header
        .get(names::COMMENT)
        .and_then(HeaderValue::as_bytes)
        .map_or(0, <[u8]>::len);
    if let Some((_, descriptor)) = find(names::COMMENT) {
        let max = descriptor.length as usize;
        if comment_len > max {
            return Err(EncodeError::new(
                descriptor.name,
                EncodeCause::TooLong {
                    len: comment_len,
                    max,
                },
            ));
        }
    }
    set_bookkeeping(&mut measurement.header, names::FORCE_SAMPLES, declared.into());
    set_bookkeeping(&mut measurement.header, names::LENGTH_COMMENT, comment_len as i64);
    Ok(())
}

fn set_bookkeeping(header: &mut Header, name: &str, value: i64) {
    if let Some((index, _)) = find(name) {
        header.replace(index, HeaderValue::Int(value));
    }
}

/// Undoes the hemisphere sign so the stored magnitude decodes back to `value`.
fn stored_form(header: &Header, descriptor: &FieldDescriptor, value: &HeaderValue) -> HeaderValue {
    let letter = match descriptor.name {
        names::LATITUDE => (names::NORTHING, b"S"),
        names::LONGITUDE => (names::EASTING, b"W"),
        _ => return value.clone(),
    };
    let flip = header
        .get(letter.0)
        .and_then(HeaderValue::as_bytes)
        .is_some_and(|stored| stored == letter.1);
    match value {
        HeaderValue::Float(v) if flip => HeaderValue::Float(-v),
        other => other.clone(),
    }
}

fn encode_field(
    writer: &mut ByteWriter<'_>,
    descriptor: &FieldDescriptor,
    value: &HeaderValue,
) -> Result<(), EncodeCause> {
    if !value.matches(descriptor) {
        return Err(EncodeCause::KindMismatch {
            expected: descriptor.kind,
            found: value.kind_name(),
        });
    }
    let start = descriptor.start();
    match (descriptor.kind, value) {
        (FieldKind::FixedBytes(_) | FieldKind::Char, HeaderValue::Text(bytes)) => {
            let max = descriptor.length as usize;
            if bytes.len() > max {
                return Err(EncodeCause::TooLong {
                    len: bytes.len(),
                    max,
                });
            }
            writer.write_bytes(start, bytes)?;
        }
        (kind, HeaderValue::Float(v)) => write_float(writer, kind, start, *v)?,
        (kind, HeaderValue::Int(v)) => write_int(writer, kind, start, *v)?,
        (kind, HeaderValue::Ints(values)) => {
            let expected = descriptor.count();
            if values.len() != expected {
                return Err(EncodeCause::ArrayLength {
                    expected,
                    actual: values.len(),
                });
            }
            let width = kind.width() as usize;
            for (i, &v) in values.iter().enumerate() {
                write_int(writer, kind, start + i * width, v)?;
            }
        }
        (kind, other) => {
            return Err(EncodeCause::KindMismatch {
                expected: kind,
                found: other.kind_name(),
            })
        }
    }
    Ok(())
}

fn write_int(
    writer: &mut ByteWriter<'_>,
    kind: FieldKind,
    offset: usize,
    value: i64,
) -> Result<(), EncodeCause> {
    let out_of_range = |_| EncodeCause::IntOutOfRange { value, kind };
    match kind {
        FieldKind::UInt16 => writer.write_u16(offset, u16::try_from(value).map_err(out_of_range)?)?,
        FieldKind::Int16 => writer.write_i16(offset, i16::try_from(value).map_err(out_of_range)?)?,
        FieldKind::Int32 => writer.write_i32(offset, i32::try_from(value).map_err(out_of_range)?)?,
        other => {
            return Err(EncodeCause::KindMismatch {
                expected: other,
                found: "int",
            })
        }
    }
    Ok(())
}

fn write_float(
    writer: &mut ByteWriter<'_>,
    kind: FieldKind,
    offset: usize,
    value: f64,
) -> Result<(), EncodeCause> {
    match kind {
        FieldKind::Float32 => {
            // Finite values must stay finite; NaN and infinities pass through
            if value.is_finite() && value.abs() > f64::from(f32::MAX) {
                return Err(EncodeCause::FloatOutOfRange { value, kind });
            }
            writer.write_f32(offset, value as f32)?;
        }
        FieldKind::Float64 => writer.write_f64(offset, value)?,
        other => {
            return Err(EncodeCause::KindMismatch {
                expected: other,
                found: "float",
            })
        }
    }
    Ok(())
}

fn encode_samples(header: &Header, samples: &SampleSeries, out: &mut Vec<u8>) -> EncodeResult<()> {
    if samples.is_empty() {
        return Ok(());
    }
    // Decode multiplies by the stored single-precision factor
    let scale = header.force_scale().unwrap_or(0.0);
    let stored = f64::from(scale as f32);
    if stored == 0.0 || !stored.is_finite() {
        return Err(EncodeError::new(
            names::CNV_FORCE,
            EncodeCause::InvalidScale { scale },
        ));
    }

    out.reserve(samples.len() * SAMPLE_WIDTH);
    let range = f64::from(i16::MIN)..=f64::from(i16::MAX);
    for (index, sample) in samples.iter().enumerate() {
        let raw = (sample.force_n / stored).round();
        if !range.contains(&raw) {
            return Err(EncodeError::new(
                names::FORCE_SAMPLES,
                EncodeCause::SampleOutOfRange {
                    index,
                    force_n: sample.force_n,
                    raw,
                },
            ));
        }
        out.extend_from_slice(&(raw as i16).to_be_bytes());
    }
    Ok(())
}
