#![warn(clippy::pedantic)]

//! Decoder for gzip-wrapped tag trees (the binary format game worlds use
//! for `level.dat` and friends).
//!
//! ```text
//!   path ──▶ open_path ──┐
//!   compressed stream ───┴─▶ GzipTransport ──┐
//!   decompressed stream ─────────────────────┴─▶ TagDecoder::decode_tree ──▶ Tree
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod transport;

use std::io::Read;
use std::path::Path;

use nbt_types::Tree;
use tracing::debug;

pub use config::DecoderConfig;
pub use decoder::TagDecoder;
pub use error::{DecodeError, ErrorKind, PathSegment};
pub use transport::GzipTransport;

/// Open a gzip-compressed tag file and decode it.
///
/// # Errors
///
/// [`DecodeError::Resource`] if the file cannot be opened, otherwise
/// whatever [`read_from_stream`] returns.
pub fn read_from_path(path: impl AsRef<Path>) -> Result<Tree, DecodeError> {
    read_from_path_with_config(path, DecoderConfig::default())
}

/// [`read_from_path`] with explicit limits.
///
/// # Errors
///
/// See [`read_from_path`].
pub fn read_from_path_with_config(
    path: impl AsRef<Path>,
    config: DecoderConfig,
) -> Result<Tree, DecodeError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening tag file");
    let transport = transport::open_path(path, config.max_decompressed_bytes)?;
    decode_from_stream_with_config(transport, config)
}

/// Decode a gzip-compressed tag stream.
///
/// # Errors
///
/// - [`DecodeError::Transport`] if the gzip layer fails.
/// - Anything [`decode_from_stream`] returns.
pub fn read_from_stream<R: Read>(stream: R) -> Result<Tree, DecodeError> {
    read_from_stream_with_config(stream, DecoderConfig::default())
}

/// [`read_from_stream`] with explicit limits.
///
/// # Errors
///
/// See [`read_from_stream`].
pub fn read_from_stream_with_config<R: Read>(
    stream: R,
    config: DecoderConfig,
) -> Result<Tree, DecodeError> {
    let transport = GzipTransport::new(stream, config.max_decompressed_bytes)?;
    decode_from_stream_with_config(transport, config)
}

/// Decode an already-decompressed tag stream.
///
/// # Errors
///
/// - [`DecodeError::Truncated`] if the stream ends inside a field.
/// - [`DecodeError::RootNotCompound`] if the document does not open with
///   a compound.
/// - [`DecodeError::UnsupportedVariant`] / [`DecodeError::UnknownTagKind`]
///   for kinds without a reader.
pub fn decode_from_stream<R: Read>(stream: R) -> Result<Tree, DecodeError> {
    decode_from_stream_with_config(stream, DecoderConfig::default())
}

/// [`decode_from_stream`] with explicit limits.
///
/// # Errors
///
/// See [`decode_from_stream`].
pub fn decode_from_stream_with_config<R: Read>(
    stream: R,
    config: DecoderConfig,
) -> Result<Tree, DecodeError> {
    TagDecoder::with_config(stream, config).decode_tree()
}

/// Decode an in-memory, already-decompressed document.
///
/// # Errors
///
/// See [`decode_from_stream`].
pub fn decode_slice(bytes: &[u8]) -> Result<Tree, DecodeError> {
    decode_from_stream(bytes)
}

/// Decode a stream that may or may not be gzip-compressed.
///
/// Sniffs the first two bytes for the gzip magic and picks
/// [`read_from_stream_with_config`] or [`decode_from_stream_with_config`].
/// The sniffed bytes are replayed, so `stream` needs no buffering.
///
/// # Errors
///
/// [`DecodeError::Io`] if the sniff itself fails, otherwise whatever the
/// chosen path returns.
pub fn read_detected<R: Read>(stream: R, config: DecoderConfig) -> Result<Tree, DecodeError> {
    let (is_gzip, stream) = transport::sniff_gzip(stream)?;
    if is_gzip {
        debug!("gzip magic found");
        read_from_stream_with_config(stream, config)
    } else {
        debug!("no gzip magic, decoding raw");
        decode_from_stream_with_config(stream, config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use nbt_types::Node;

    use super::*;

    const SINGLE_INT: [u8; 12] = [
        0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2A, 0x00,
    ];

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn read_from_stream_decompresses() {
        let tree = read_from_stream(gzip(&SINGLE_INT).as_slice()).unwrap();
        assert_eq!(tree.root.get("x"), Some(&Node::Int(42)));
    }

    #[test]
    fn read_from_stream_rejects_raw_data() {
        let err = read_from_stream(&SINGLE_INT[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn decode_from_stream_skips_decompression() {
        let tree = decode_from_stream(&SINGLE_INT[..]).unwrap();
        assert_eq!(tree.root.len(), 1);
    }

    #[test]
    fn truncated_inside_gzip_is_truncated() {
        // Valid gzip whose content stops mid-Int.
        let compressed = gzip(&SINGLE_INT[..9]);
        let err = read_from_stream(compressed.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);
    }

    #[test]
    fn read_detected_handles_both() {
        let raw = read_detected(&SINGLE_INT[..], DecoderConfig::default()).unwrap();
        let compressed = gzip(&SINGLE_INT);
        let gz = read_detected(compressed.as_slice(), DecoderConfig::default()).unwrap();
        assert_eq!(raw, gz);
    }

    #[test]
    fn read_detected_from_a_trickling_source() {
        struct OneByte<'a>(&'a [u8]);

        impl Read for OneByte<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                match (self.0.split_first(), buf.first_mut()) {
                    (Some((&b, rest)), Some(slot)) => {
                        *slot = b;
                        self.0 = rest;
                        Ok(1)
                    }
                    _ => Ok(0),
                }
            }
        }

        let compressed = gzip(&SINGLE_INT);
        let source = std::io::BufReader::new(OneByte(&compressed));
        let tree = read_detected(source, DecoderConfig::default()).unwrap();
        assert_eq!(tree.root.get("x"), Some(&Node::Int(42)));

        let raw = read_detected(OneByte(&SINGLE_INT), DecoderConfig::default()).unwrap();
        assert_eq!(raw, tree);
    }

    #[test]
    fn read_from_path_roundtrip() {
        let dir = std::env::temp_dir().join(format!("nbt-decoder-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("level.dat");
        std::fs::write(&path, gzip(&SINGLE_INT)).unwrap();

        let tree = read_from_path(&path).unwrap();
        assert_eq!(tree.root.get("x"), Some(&Node::Int(42)));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn read_from_path_missing_file() {
        let err = read_from_path("/no/such/level.dat").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert!(err.to_string().contains("/no/such/level.dat"));
    }
}
