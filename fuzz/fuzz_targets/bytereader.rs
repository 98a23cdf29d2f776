#![no_main]

use bytestream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of reads at chosen offsets.
    while idx + 1 < data.len() && idx < 1024 {
        let op = data[idx] % 7;
        let offset = usize::from(data[idx + 1]) * 3;
        idx += 2;

        match op {
            0 => {
                let _ = reader.read_u8(offset);
            }
            1 => {
                let _ = reader.read_u16(offset);
            }
            2 => {
                let _ = reader.read_i16(offset);
            }
            3 => {
                let _ = reader.read_i32(offset);
            }
            4 => {
                let _ = reader.read_f32(offset);
            }
            5 => {
                let _ = reader.read_f64(offset);
            }
            _ => {
                let _ = reader.slice(offset, usize::from(data[idx - 2]));
            }
        }
    }
});
