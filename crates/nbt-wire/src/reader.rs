use std::io::{self, Read};

use crate::error::WireError;

/// Sequential big-endian reader over a decompressed tag stream.
///
/// Every read consumes exactly the width of its field or fails. There is
/// no seeking and no peeking: once bytes are pulled they are gone, which
/// is why an unsupported field can never be skipped safely.
///
/// ```text
/// ┌────────────┬───────┬─────────────────────────────────────┐
/// │ Method     │ Width │ Interpretation                      │
/// ├────────────┼───────┼─────────────────────────────────────┤
/// │ read_u8    │ 1     │ raw byte                            │
/// │ read_i8    │ 1     │ two's complement                    │
/// │ read_u16   │ 2     │ big-endian unsigned                 │
/// │ read_i16   │ 2     │ big-endian signed                   │
/// │ read_i32   │ 4     │ big-endian signed                   │
/// │ read_i64   │ 8     │ big-endian signed                   │
/// │ read_f32   │ 4     │ IEEE-754 bits of a big-endian u32   │
/// │ read_f64   │ 8     │ IEEE-754 bits of a big-endian u64   │
/// │ read_string│ 2 + n │ u16 length, then n bytes of text    │
/// └────────────┴───────┴─────────────────────────────────────┘
/// ```
pub struct TagReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> TagReader<R> {
    /// Wrap a reader. The position counter starts at zero.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(WireError::UnexpectedEof {
                needed: buf.len(),
                offset: self.position,
            }),
            Err(e) => Err(WireError::Io(e)),
        }
    }

    /// Read one raw byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the stream is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read one signed byte.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the stream is exhausted.
    pub fn read_i8(&mut self) -> Result<i8, WireError> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_i16(&mut self) -> Result<i16, WireError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// Read a 32-bit float by reinterpreting the big-endian bit pattern.
    ///
    /// No numeric conversion happens, so NaN payloads and negative zero
    /// come through untouched.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_bits(u32::from_be_bytes(self.read_array()?)))
    }

    /// Read a 64-bit float by reinterpreting the big-endian bit pattern.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] on a short read.
    pub fn read_f64(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_bits(u64::from_be_bytes(self.read_array()?)))
    }

    /// Read exactly `len` raw bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read a u16-length-prefixed string.
    ///
    /// The payload is nominally modified UTF-8. Bytes that are not valid
    /// UTF-8 are replaced with U+FFFD rather than rejected; text validity
    /// is not a framing concern.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the prefix or the body is cut short.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        let len = self.read_u16()?;
        let raw = self.read_bytes(usize::from(len))?;
        Ok(match String::from_utf8(raw) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}
