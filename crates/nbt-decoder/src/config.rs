/// Limits applied while decoding.
///
/// ```text
/// ┌──────────────────────────┬──────────┬──────────────────────────────────┐
/// │ Field                    │ Default  │ Purpose                          │
/// ├──────────────────────────┼──────────┼──────────────────────────────────┤
/// │ max_depth                │ 512      │ compound/list nesting limit      │
/// │ max_decompressed_bytes   │ 256 MiB  │ gzip output ceiling              │
/// └──────────────────────────┴──────────┴──────────────────────────────────┘
/// ```
///
/// Both limits exist so a hostile file fails with an error instead of
/// exhausting the stack or memory. Neither is reachable by real save data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum nesting of compounds and lists below the root.
    pub max_depth: usize,

    /// Maximum number of bytes the gzip transport will produce.
    /// Only applies to the compressed entry points.
    pub max_decompressed_bytes: u64,
}

/// Default nesting limit, matching what the game itself enforces.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default decompression ceiling: 256 MiB.
pub const DEFAULT_MAX_DECOMPRESSED_BYTES: u64 = 256 * 1024 * 1024;

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_decompressed_bytes: DEFAULT_MAX_DECOMPRESSED_BYTES,
        }
    }
}
