#![no_main]

use libfuzzer_sys::fuzz_target;
use nbt_decoder::DecoderConfig;

// Fuzz target: gzip transport in front of the decoder.
//
// Arbitrary bytes almost never form a valid gzip member, so this mostly
// covers header rejection and the auto-detect path. The small limit keeps
// decompression bombs cheap.
fuzz_target!(|data: &[u8]| {
    let config = DecoderConfig {
        max_decompressed_bytes: 1 << 20,
        ..DecoderConfig::default()
    };
    let _ = nbt_decoder::read_from_stream_with_config(data, config);
    let _ = nbt_decoder::read_detected(data, config);
});
