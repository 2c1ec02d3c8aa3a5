#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: raw tag stream decoder.
//
// Catches bugs in:
// - Kind bytes above 0x0C
// - Huge or negative list and array counts
// - Truncation inside names and payloads
// - Unbounded nesting
fuzz_target!(|data: &[u8]| {
    let _ = nbt_decoder::decode_slice(data);
});
