/// Errors raised while pulling fixed-width fields off the byte stream.
///
/// The wire layer knows nothing about tags or trees. It only knows how
/// many bytes a field needed and how far into the stream it had got.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The stream ended before a field's full width was available.
    ///
    /// `offset` is the number of bytes successfully consumed before the
    /// failing read, counted from the start of the decompressed stream.
    #[error("unexpected end of stream: needed {needed} bytes at offset {offset}")]
    UnexpectedEof { needed: usize, offset: u64 },

    /// Any other failure from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// UnexpectedEof is split out from Io on purpose: a short read is a property
// of the document (it was cut off), everything else is a property of the
// source. Callers that care only look at the variant.
