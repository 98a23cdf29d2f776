use codec::{decode, decode_with_limits, encode, Header, Limits, Measurement, Sample};
use proptest::prelude::*;
use schema::{names, HEADER_SIZE};

#[derive(Debug, Clone)]
struct Input {
    version: u16,
    dist: f32,
    scale: f32,
    comment: String,
    latitude: f32,
    southern: bool,
    longitude: f32,
    western: bool,
    diameter: i32,
    forces: Vec<f64>,
}

fn input_strategy() -> impl Strategy<Value = Input> {
    (
        any::<u16>(),
        0.001f32..2.0,
        0.0001f32..1.0,
        "[ -~]{0,102}",
        0.0f32..90.0,
        any::<bool>(),
        0.0f32..180.0,
        any::<bool>(),
        any::<i32>(),
        prop::collection::vec(-1000.0f64..1000.0, 0..256),
    )
        .prop_map(
            |(version, dist, scale, comment, latitude, southern, longitude, western, diameter, forces)| {
                Input {
                    version,
                    dist,
                    scale,
                    comment,
                    latitude,
                    southern,
                    longitude,
                    western,
                    diameter,
                    forces,
                }
            },
        )
}

fn build(input: &Input) -> Measurement {
    let mut header = Header::new();
    header.set(names::VERSION, input.version).unwrap();
    header.set(names::SAMPLES_DIST, input.dist).unwrap();
    header.set(names::CNV_FORCE, input.scale).unwrap();
    header.set_comment(input.comment.clone());
    let (lat, northing) = if input.southern {
        (-input.latitude, "S")
    } else {
        (input.latitude, "N")
    };
    let (lon, easting) = if input.western {
        (-input.longitude, "W")
    } else {
        (input.longitude, "E")
    };
    header.set(names::LATITUDE, lat).unwrap();
    header.set(names::NORTHING, northing).unwrap();
    header.set(names::LONGITUDE, lon).unwrap();
    header.set(names::EASTING, easting).unwrap();
    header.set("Diameter [um]", input.diameter).unwrap();

    // Keep every force inside the int16 range of the chosen scale
    let max = f64::from(input.scale) * f64::from(i16::MAX - 1);
    let dist = f64::from(input.dist);
    let samples = input
        .forces
        .iter()
        .enumerate()
        .map(|(i, &f)| Sample::new(i as f64 * dist, f.clamp(-max, max)))
        .collect();
    Measurement::new(header, samples)
}

proptest! {
    #[test]
    fn prop_roundtrip_within_quantization(input in input_strategy()) {
        let mut original = build(&input);
        let bytes = encode(&mut original).unwrap();
        prop_assert_eq!(bytes.len(), HEADER_SIZE + 2 * input.forces.len());

        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(&decoded.header, &original.header);
        prop_assert_eq!(decoded.header.comment(), input.comment.as_str());

        let tolerance = 0.5 * f64::from(input.scale) * (1.0 + 1e-9);
        prop_assert_eq!(decoded.samples.len(), original.samples.len());
        for (a, b) in decoded.samples.iter().zip(original.samples.iter()) {
            prop_assert_eq!(a.depth_mm, b.depth_mm);
            prop_assert!((a.force_n - b.force_n).abs() <= tolerance);
        }
    }

    #[test]
    fn prop_reencode_is_stable(input in input_strategy()) {
        let mut original = build(&input);
        let bytes = encode(&mut original).unwrap();
        let mut decoded = decode(&bytes).unwrap();
        prop_assert_eq!(encode(&mut decoded).unwrap(), bytes);
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        let _ = decode_with_limits(&bytes, &Limits::for_testing());
    }

    #[test]
    fn prop_decoded_arbitrary_header_reencodes(bytes in prop::collection::vec(any::<u8>(), HEADER_SIZE..HEADER_SIZE + 64)) {
        let mut bytes = bytes;
        // Declare zero samples so any header bytes decode
        bytes[358..362].copy_from_slice(&0i32.to_be_bytes());
        let mut m = decode(&bytes).unwrap();
        let encoded = encode(&mut m).unwrap();
        let again = decode(&encoded).unwrap();
        prop_assert_eq!(again.header.comment(), m.header.comment());
        prop_assert_eq!(again.header.file_name(), m.header.file_name());
        prop_assert_eq!(again.sample_count(), 0);
    }
}
