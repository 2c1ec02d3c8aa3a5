use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::bufread::GzDecoder;

use crate::error::DecodeError;

/// Marker wrapped around every error the decompressor raises.
///
/// The tag decoder only sees `std::io::Error`s coming out of `read`. This
/// marker lets it tell "the gzip layer broke" apart from "the tag stream
/// ran short" once the error reaches [`DecodeError`].
#[derive(Debug, thiserror::Error)]
#[error("gzip transport: {0}")]
pub struct TransportFault(io::Error);

impl TransportFault {
    #[must_use]
    pub fn new(err: io::Error) -> Self {
        Self(err)
    }

    #[must_use]
    pub fn into_inner(self) -> io::Error {
        self.0
    }
}

fn fault(err: io::Error) -> io::Error {
    io::Error::other(TransportFault(err))
}

/// Gzip-decompressing byte source.
///
/// Sequential only: no seek, no rewind. The header is parsed when the
/// transport is built, so a source that is not gzip at all fails before
/// any tag is read. Body errors surface lazily through `read`, tagged as
/// [`TransportFault`].
///
/// ```text
///   source bytes ─▶ BufReader ─▶ GzDecoder ─▶ size limit ─▶ tag decoder
/// ```
pub struct GzipTransport<R> {
    inner: GzDecoder<BufReader<R>>,
    produced: u64,
    limit: u64,
}

impl<R: Read> GzipTransport<R> {
    /// Wrap a compressed source and parse its gzip header.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Transport`] if the header is missing, malformed, or
    /// cut short.
    pub fn new(source: R, limit: u64) -> Result<Self, DecodeError> {
        let mut inner = GzDecoder::new(BufReader::new(source));
        if inner.header().is_none() {
            // The header parse failed; reading replays the stored error.
            let err = match inner.read(&mut [0u8; 1]) {
                Err(e) => e,
                Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "incomplete gzip header"),
            };
            return Err(DecodeError::Transport(err));
        }
        Ok(Self {
            inner,
            produced: 0,
            limit,
        })
    }

    /// Decompressed bytes handed out so far.
    #[must_use]
    pub fn produced(&self) -> u64 {
        self.produced
    }
}

impl<R: Read> Read for GzipTransport<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf).map_err(fault)?;
        self.produced += n as u64;
        if self.produced > self.limit {
            return Err(fault(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "decompressed size {} exceeds limit {}",
                    self.produced, self.limit
                ),
            )));
        }
        Ok(n)
    }
}

/// Open a file and put the gzip transport in front of it.
///
/// The returned transport owns the file handle; dropping it closes the
/// file, whichever way the decode ends.
///
/// # Errors
///
/// - [`DecodeError::Resource`] if the file cannot be opened.
/// - [`DecodeError::Transport`] if it does not start with a valid gzip header.
pub fn open_path(path: &Path, limit: u64) -> Result<GzipTransport<File>, DecodeError> {
    let file = File::open(path).map_err(|source| DecodeError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    GzipTransport::new(file, limit)
}

/// Leading bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// A source with its sniffed head bytes put back in front.
pub type Sniffed<R> = io::Chain<io::Take<io::Cursor<[u8; 2]>>, R>;

/// Read up to two head bytes and report whether they are the gzip magic.
///
/// Keeps reading until two bytes arrive or the source ends, so sources
/// that hand out one byte per read (pipes, FIFOs) sniff the same as files.
/// The returned reader replays the head bytes before the rest of `source`.
///
/// # Errors
///
/// Propagates read errors other than `Interrupted`.
pub fn sniff_gzip<R: Read>(mut source: R) -> io::Result<(bool, Sniffed<R>)> {
    let mut head = [0u8; 2];
    let mut filled = 0;
    while filled < head.len() {
        match source.read(&mut head[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    let is_gzip = head == GZIP_MAGIC && filled == head.len();
    let replay = io::Cursor::new(head).take(filled as u64);
    Ok((is_gzip, replay.chain(source)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;
    use crate::error::ErrorKind;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn decompresses_body() {
        let compressed = gzip(b"hello tags");
        let mut t = GzipTransport::new(compressed.as_slice(), u64::MAX).unwrap();
        let mut out = Vec::new();
        t.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello tags");
        assert_eq!(t.produced(), 10);
    }

    #[test]
    fn rejects_non_gzip_source() {
        let err = GzipTransport::new(&b"\x0A\x00\x00\x00"[..], u64::MAX)
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn rejects_truncated_header() {
        let compressed = gzip(b"payload");
        let err = GzipTransport::new(&compressed[..5], u64::MAX).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn rejects_empty_source() {
        let err = GzipTransport::new(&b""[..], u64::MAX).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn limit_is_a_transport_fault() {
        let compressed = gzip(&[0u8; 4096]);
        let mut t = GzipTransport::new(compressed.as_slice(), 100).unwrap();
        let mut out = Vec::new();
        let err = DecodeError::from(t.read_to_end(&mut out).unwrap_err());
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let err = open_path(Path::new("/definitely/not/here.dat"), u64::MAX)
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Resource);
    }

    /// Hands out at most one byte per `read`, like a slow pipe.
    struct OneByte<'a>(&'a [u8]);

    impl Read for OneByte<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
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

    #[test]
    fn sniffs_gzip_magic() {
        let compressed = gzip(b"x");
        let (is_gzip, mut replay) = sniff_gzip(compressed.as_slice()).unwrap();
        assert!(is_gzip);
        let mut out = Vec::new();
        replay.read_to_end(&mut out).unwrap();
        assert_eq!(out, compressed);

        let (is_gzip, _) = sniff_gzip(&b"\x0A\x00\x00"[..]).unwrap();
        assert!(!is_gzip);
    }

    #[test]
    fn sniff_waits_for_both_magic_bytes() {
        let compressed = gzip(b"x");
        let (is_gzip, mut replay) = sniff_gzip(OneByte(&compressed)).unwrap();
        assert!(is_gzip);
        let mut out = Vec::new();
        replay.read_to_end(&mut out).unwrap();
        assert_eq!(out, compressed);
    }

    #[test]
    fn sniff_short_sources() {
        let (is_gzip, mut replay) = sniff_gzip(&[0x1F][..]).unwrap();
        assert!(!is_gzip);
        let mut out = Vec::new();
        replay.read_to_end(&mut out).unwrap();
        assert_eq!(out, [0x1F]);

        let (is_gzip, mut replay) = sniff_gzip(&b""[..]).unwrap();
        assert!(!is_gzip);
        out.clear();
        replay.read_to_end(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
