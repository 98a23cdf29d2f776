//! Decoding of PNT byte buffers.

use bytestream::{ByteReader, ByteResult};
use schema::{find, names, FieldDescriptor, FieldKind, FIELD_TABLE, SAMPLE_OFFSET, SAMPLE_WIDTH};

use crate::error::{DecodeCause, DecodeError, DecodeResult};
use crate::header::Header;
use crate::limits::Limits;
use crate::measurement::Measurement;
use crate::samples::SampleSeries;
use crate::value::HeaderValue;

/// Decodes a complete measurement with default limits.
///
/// Bytes past the declared sample section are ignored.
pub fn decode(bytes: &[u8]) -> DecodeResult<Measurement> {
    decode_with_limits(bytes, &Limits::default())
}

/// Decodes a complete measurement, bounding the sample count by `limits`.
pub fn decode_with_limits(bytes: &[u8], limits: &Limits) -> DecodeResult<Measurement> {
    let reader = ByteReader::new(bytes);
    let header = read_header(reader)?;
    let raw = read_samples(reader, &header, limits)?;
    let samples = SampleSeries::from_raw(
        &raw,
        header.samples_dist().unwrap_or(0.0),
        header.force_scale().unwrap_or(0.0),
    );
    tracing::debug!(
        samples = samples.len(),
        consumed = SAMPLE_OFFSET + raw.len() * SAMPLE_WIDTH,
        available = bytes.len(),
        "decoded samples"
    );
    Ok(Measurement::new(header, samples))
}

/// Decodes only the 512-byte header block.
pub fn decode_header(bytes: &[u8]) -> DecodeResult<Header> {
    read_header(ByteReader::new(bytes))
}

fn read_header(reader: ByteReader<'_>) -> DecodeResult<Header> {
    let mut header = Header::empty();
    for (index, descriptor) in FIELD_TABLE.iter().enumerate() {
        // Every descriptor, padding included, must lie inside the buffer
        reader
            .slice(descriptor.start(), descriptor.length as usize)
            .map_err(|err| field_error(descriptor, err.into()))?;
        if let Some(value) = read_field(reader, descriptor)
            .map_err(|err| field_error(descriptor, err.into()))?
        {
            header.replace(index, value);
        }
    }
    truncate_comment(&mut header);
    apply_hemispheres(&mut header);
    tracing::debug!(fields = header.iter().count(), "decoded header");
    Ok(header)
}

fn read_field(
    reader: ByteReader<'_>,
    descriptor: &FieldDescriptor,
) -> ByteResult<Option<HeaderValue>> {
    let start = descriptor.start();
    let width = descriptor.kind.width() as usize;
    let value = match descriptor.kind {
        FieldKind::Padding(_) => return Ok(None),
        FieldKind::FixedBytes(_) | FieldKind::Char => {
            let raw = reader.slice(start, descriptor.length as usize)?;
            if descriptor.name == names::COMMENT {
                // `Length Comment` decides the visible prefix
                HeaderValue::Text(raw.to_vec())
            } else {
                HeaderValue::Text(until_nul(raw).to_vec())
            }
        }
        FieldKind::Float32 => HeaderValue::Float(f64::from(reader.read_f32(start)?)),
        FieldKind::Float64 => HeaderValue::Float(reader.read_f64(start)?),
        kind if descriptor.is_array() => {
            let values = (0..descriptor.count())
                .map(|i| read_int(reader, kind, start + i * width))
                .collect::<ByteResult<Vec<_>>>()?;
            HeaderValue::Ints(values)
        }
        kind => HeaderValue::Int(read_int(reader, kind, start)?),
    };
    Ok(Some(value))
}

fn read_int(reader: ByteReader<'_>, kind: FieldKind, offset: usize) -> ByteResult<i64> {
    Ok(match kind {
        FieldKind::Int16 => i64::from(reader.read_i16(offset)?),
        FieldKind::Int32 => i64::from(reader.read_i32(offset)?),
        _ => i64::from(reader.read_u16(offset)?),
    })
}

fn until_nul(raw: &[u8]) -> &[u8] {
    raw.iter()
        .position(|&b| b == 0)
        .map_or(raw, |end| &raw[..end])
}

fn truncate_comment(header: &mut Header) {
    let declared = header
        .get(names::LENGTH_COMMENT)
        .and_then(HeaderValue::as_int)
        .unwrap_or(0);
    let keep = usize::try_from(declared).unwrap_or(0);
    if let Some(HeaderValue::Text(bytes)) = slot_by_name(header, names::COMMENT) {
        bytes.truncate(keep);
    }
}

fn apply_hemispheres(header: &mut Header) {
    for (letter_field, negative, coordinate) in [
        (names::NORTHING, b"S", names::LATITUDE),
        (names::EASTING, b"W", names::LONGITUDE),
    ] {
        let flip = header
            .get(letter_field)
            .and_then(HeaderValue::as_bytes)
            .is_some_and(|letter| letter == negative);
        if !flip {
            continue;
        }
        if let Some(HeaderValue::Float(value)) = slot_by_name(header, coordinate) {
            tracing::trace!(field = coordinate, stored = *value, "negating for hemisphere");
            *value = -*value;
        }
    }
}

fn slot_by_name<'h>(header: &'h mut Header, name: &str) -> Option<&'h mut HeaderValue> {
    let (index, _) = find(name)?;
    header.slot_mut(index)
}

fn read_samples(
    reader: ByteReader<'_>,
    header: &Header,
    limits: &Limits,
) -> DecodeResult<Vec<i16>> {
    let Some((_, descriptor)) = find(names::FORCE_SAMPLES) else {
        return Ok(Vec::new());
    };
    let declared = header.force_samples().unwrap_or(0);
    let count = usize::try_from(declared)
        .map_err(|_| field_error(descriptor, DecodeCause::NegativeCount { count: declared }))?;
    if count > limits.max_samples {
        return Err(field_error(
            descriptor,
            DecodeCause::LimitExceeded {
                limit: limits.max_samples,
                actual: count,
            },
        ));
    }

    let bytes = reader
        .slice(SAMPLE_OFFSET, count.saturating_mul(SAMPLE_WIDTH))
        .map_err(|err| DecodeError::new(descriptor.name, SAMPLE_OFFSET, err.into()))?;
    Ok(bytes
        .chunks_exact(SAMPLE_WIDTH)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

const fn field_error(descriptor: &FieldDescriptor, cause: DecodeCause) -> DecodeError {
    DecodeError::new(descriptor.name, descriptor.start(), cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::HEADER_SIZE;

    fn put(buf: &mut [u8], name: &str, bytes: &[u8]) {
        let (_, d) = find(name).unwrap();
        buf[d.start()..d.start() + bytes.len()].copy_from_slice(bytes);
    }

    fn blank() -> Vec<u8> {
        vec![0; HEADER_SIZE]
    }

    #[test]
    fn zero_header_decodes_to_zero_values() {
        let m = decode(&blank()).unwrap();
        assert_eq!(m.header, Header::new());
        assert!(m.samples.is_empty());
    }

    #[test]
    fn empty_buffer_fails_on_first_field() {
        let err = decode(&[]).unwrap_err();
        assert_eq!(err.field, "Version");
        assert_eq!(err.offset, 0);
        assert_eq!(
            err.cause,
            DecodeCause::Truncated {
                needed: 2,
                available: 0
            }
        );
    }

    #[test]
    fn short_buffer_names_first_uncovered_field() {
        let err = decode(&[0u8; 100]).unwrap_err();
        assert_eq!(err.field, "Waypoints");
        assert_eq!(err.offset, 72);
        assert_eq!(
            err.cause,
            DecodeCause::Truncated {
                needed: 112,
                available: 100
            }
        );
    }

    #[test]
    fn buffer_missing_last_padding_byte_fails() {
        let err = decode_header(&[0u8; HEADER_SIZE - 1]).unwrap_err();
        assert_eq!(err.field, "reserved 4");
        assert_eq!(err.offset, 432);
    }

    #[test]
    fn integer_kinds_are_big_endian() {
        let mut buf = blank();
        put(&mut buf, "Version", &[0x01, 0x02]);
        put(&mut buf, "Temp Offset [K]", &(-5i16).to_be_bytes());
        put(&mut buf, "Diameter [um]", &(-70_000i32).to_be_bytes());
        put(&mut buf, "Offset [N]", &[0xFF, 0xFF]);
        let header = decode_header(&buf).unwrap();
        assert_eq!(header.get("Version"), Some(&HeaderValue::Int(0x0102)));
        assert_eq!(header.get("Temp Offset [K]"), Some(&HeaderValue::Int(-5)));
        assert_eq!(header.get("Diameter [um]"), Some(&HeaderValue::Int(-70_000)));
        assert_eq!(header.get("Offset [N]"), Some(&HeaderValue::Int(65_535)));
    }

    #[test]
    fn array_fields_decode_every_element() {
        let mut buf = blank();
        let mut calstart = Vec::new();
        for i in 1..=10u16 {
            calstart.extend_from_slice(&i.to_be_bytes());
        }
        put(&mut buf, "Calstart", &calstart);
        let header = decode_header(&buf).unwrap();
        assert_eq!(
            header.get("Calstart"),
            Some(&HeaderValue::Ints((1..=10).collect()))
        );
    }

    #[test]
    fn text_fields_stop_at_nul() {
        let mut buf = blank();
        put(&mut buf, "File Name", b"AB\0CD");
        put(&mut buf, "Sensor Serial", b"SN-1234");
        let header = decode_header(&buf).unwrap();
        assert_eq!(header.file_name(), "AB");
        assert_eq!(header.get("Sensor Serial").unwrap().as_text().unwrap(), "SN-1234");
        assert_eq!(header.get("GPS State"), Some(&HeaderValue::Text(Vec::new())));
    }

    #[test]
    fn comment_uses_declared_length() {
        let mut buf = blank();
        put(&mut buf, "Comment", &[b'x'; 102]);
        put(&mut buf, "Length Comment", &5u16.to_be_bytes());
        assert_eq!(decode_header(&buf).unwrap().comment(), "xxxxx");

        put(&mut buf, "Length Comment", &0u16.to_be_bytes());
        assert_eq!(decode_header(&buf).unwrap().comment(), "");
    }

    #[test]
    fn comment_length_is_clamped_to_slot() {
        let mut buf = blank();
        put(&mut buf, "Comment", &[b'y'; 102]);
        put(&mut buf, "Length Comment", &500u16.to_be_bytes());
        assert_eq!(decode_header(&buf).unwrap().comment().len(), 102);
    }

    #[test]
    fn hemisphere_letters_set_sign() {
        let mut buf = blank();
        put(&mut buf, "Latitude", &46.5f32.to_be_bytes());
        put(&mut buf, "Longitude", &9.75f32.to_be_bytes());
        put(&mut buf, "Northing", b"S");
        put(&mut buf, "Easting", b"W");
        let header = decode_header(&buf).unwrap();
        assert_eq!(header.latitude(), Some(-46.5));
        assert_eq!(header.longitude(), Some(-9.75));

        put(&mut buf, "Northing", b"N");
        put(&mut buf, "Easting", b"E");
        let header = decode_header(&buf).unwrap();
        assert_eq!(header.latitude(), Some(46.5));
        assert_eq!(header.longitude(), Some(9.75));
    }

    #[test]
    fn negative_sample_count_fails() {
        let mut buf = blank();
        put(&mut buf, "Force Samples", &(-1i32).to_be_bytes());
        let err = decode(&buf).unwrap_err();
        assert_eq!(err.field, "Force Samples");
        assert_eq!(err.offset, 358);
        assert_eq!(err.cause, DecodeCause::NegativeCount { count: -1 });
    }

    #[test]
    fn sample_count_over_limit_fails() {
        let mut buf = blank();
        put(&mut buf, "Force Samples", &5000i32.to_be_bytes());
        let err = decode_with_limits(&buf, &Limits::for_testing()).unwrap_err();
        assert_eq!(
            err.cause,
            DecodeCause::LimitExceeded {
                limit: 4096,
                actual: 5000
            }
        );
    }

    #[test]
    fn truncated_sample_section_fails() {
        let mut buf = blank();
        put(&mut buf, "Force Samples", &3i32.to_be_bytes());
        buf.extend_from_slice(&[0, 1, 0, 2]);
        let err = decode(&buf).unwrap_err();
        assert_eq!(err.field, "Force Samples");
        assert_eq!(err.offset, SAMPLE_OFFSET);
        assert_eq!(
            err.cause,
            DecodeCause::Truncated {
                needed: 518,
                available: 516
            }
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut buf = blank();
        put(&mut buf, "Force Samples", &1i32.to_be_bytes());
        put(&mut buf, "CNV Force [N/mV]", &1.0f32.to_be_bytes());
        buf.extend_from_slice(&[0xFF, 0xFE, 0xAA, 0xBB, 0xCC]);
        let m = decode(&buf).unwrap();
        assert_eq!(m.samples.len(), 1);
        assert_eq!(m.samples.as_slice()[0].force_n, -2.0);
    }

    #[test]
    fn unlimited_limits_do_not_overflow() {
        let mut buf = blank();
        put(&mut buf, "Force Samples", &i32::MAX.to_be_bytes());
        let err = decode_with_limits(&buf, &Limits::unlimited()).unwrap_err();
        assert!(matches!(err.cause, DecodeCause::Truncated { .. }));
    }
}
