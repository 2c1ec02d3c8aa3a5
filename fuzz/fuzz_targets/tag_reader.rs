#![no_main]

use libfuzzer_sys::fuzz_target;
use nbt_wire::TagReader;

// Fuzz target: primitive reads, driven by the input itself.
//
// Each input byte picks the next read; the rest of the input is what gets
// read. Position must never move past the input length.
fuzz_target!(|data: &[u8]| {
    let Some((ops, rest)) = data.split_first() else {
        return;
    };
    let mut reader = TagReader::new(rest);
    let mut op = *ops;
    loop {
        let ok = match op % 5 {
            0 => reader.read_u8().is_ok(),
            1 => reader.read_i16().is_ok(),
            2 => reader.read_i32().is_ok(),
            3 => reader.read_f64().is_ok(),
            _ => reader.read_string().is_ok(),
        };
        assert!(reader.position() <= rest.len() as u64);
        if !ok {
            break;
        }
        op = op.wrapping_mul(31).wrapping_add(7);
    }
});
