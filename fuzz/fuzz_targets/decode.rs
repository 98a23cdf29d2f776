#![no_main]

use codec::{decode_with_limits, encode, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut measurement) = decode_with_limits(data, &Limits::for_testing()) else {
        return;
    };
    let header = measurement.header.clone();
    let samples = measurement.samples.clone();

    let scale = header.force_scale().unwrap_or(0.0);
    let result = encode(&mut measurement);
    if !samples.is_empty() && (scale == 0.0 || !scale.is_finite()) {
        assert!(result.is_err());
        return;
    }

    // Anything else decode accepts must encode, and decode again to the same values.
    let bytes = result.expect("decoded measurement must encode");
    let again = decode_with_limits(&bytes, &Limits::for_testing()).expect("re-decode");
    assert_eq!(again.sample_count(), samples.len());
    assert_eq!(again.header.comment(), header.comment());
    for (a, b) in again.samples.iter().zip(samples.iter()) {
        assert!(a.force_n == b.force_n || (a.force_n.is_nan() && b.force_n.is_nan()));
    }
});
