use std::fmt;
use std::io;
use std::path::PathBuf;

use nbt_types::{TagKind, TypeError};
use nbt_wire::WireError;

use crate::transport::TransportFault;

/// One step on the way from the root to the failing field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A compound entry, by key.
    Key(String),
    /// A list or array element, by zero-based index.
    Index(usize),
    /// A framing field that is not itself a value (a length prefix, a
    /// list's element kind, the root name).
    Field(&'static str),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key {key:?}"),
            Self::Index(index) => write!(f, "index {index}"),
            Self::Field(field) => f.write_str(field),
        }
    }
}

/// Coarse classification of a [`DecodeError`], stable under context
/// wrapping.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────────┐
/// │ Kind               │ Produced by                                  │
/// ├────────────────────┼──────────────────────────────────────────────┤
/// │ Resource           │ source file missing or unreadable            │
/// │ Transport          │ gzip header bad/truncated, corrupt body,     │
/// │                    │ decompressed size over the limit             │
/// │ Truncated          │ stream ended inside a field                  │
/// │ UnsupportedVariant │ ByteArray/LongArray, or a byte above 0x0C    │
/// │ Structural         │ root not a compound, End where a value was   │
/// │                    │ expected, nesting too deep                   │
/// │ Io                 │ any other read failure                       │
/// └────────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Resource,
    Transport,
    Truncated,
    UnsupportedVariant,
    Structural,
    Io,
}

/// Errors that can occur while decoding a tag tree.
///
/// All of them are terminal for the decode call that produced them. As an
/// error propagates out of nested compounds and lists, each level wraps it
/// in [`DecodeError::At`] with the key or index it was working on. The
/// wrapping never changes [`kind`](Self::kind).
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── Resource             ← file open/read failed
///   ├── Transport            ← gzip layer failed
///   ├── Truncated            ← from WireError::UnexpectedEof
///   ├── UnsupportedVariant   ← known kind, no reader
///   ├── UnknownTagKind       ← from TypeError::UnknownTagKind
///   ├── RootNotCompound      ┐
///   ├── UnexpectedEnd        ├ structural
///   ├── ListOfEnd            │
///   ├── DepthExceeded        ┘
///   ├── Io                   ← from WireError::Io
///   └── At { segment, source } ← context layer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("cannot open {}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The decompression layer rejected the stream.
    #[error("decompression failed")]
    Transport(#[source] io::Error),

    /// The stream ended before a field's declared width.
    #[error("truncated stream: needed {needed} bytes at offset {offset}")]
    Truncated { needed: usize, offset: u64 },

    /// A valid tag kind that this decoder has no reader for.
    ///
    /// Skipping is not an option: without reading the payload the next
    /// tag cannot be found.
    #[error("unsupported tag kind {kind}")]
    UnsupportedVariant { kind: TagKind },

    /// A tag byte outside the known table.
    #[error("unknown tag kind {value:#04X}")]
    UnknownTagKind { value: u8 },

    /// The document did not start with a compound.
    #[error("root tag must be TAG_Compound, found {found}")]
    RootNotCompound { found: TagKind },

    /// An End tag appeared where a value was required.
    #[error("unexpected TAG_End where a value was expected")]
    UnexpectedEnd,

    /// A list declared End as its element kind with a positive count.
    #[error("list of TAG_End declares {count} elements")]
    ListOfEnd { count: usize },

    /// Compounds and lists nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error(transparent)]
    Io(io::Error),

    /// Context layer: `source` happened inside `segment`.
    #[error("in {segment}")]
    At {
        segment: PathSegment,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wrap this error in one more layer of positional context.
    #[must_use]
    pub fn at(self, segment: PathSegment) -> Self {
        Self::At {
            segment,
            source: Box::new(self),
        }
    }

    /// Classification of the underlying failure, ignoring context layers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            Self::Resource { .. } => ErrorKind::Resource,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::UnsupportedVariant { .. } | Self::UnknownTagKind { .. } => {
                ErrorKind::UnsupportedVariant
            }
            Self::RootNotCompound { .. }
            | Self::UnexpectedEnd
            | Self::ListOfEnd { .. }
            | Self::DepthExceeded { .. } => ErrorKind::Structural,
            Self::Io(_) => ErrorKind::Io,
            Self::At { .. } => unreachable!("root_cause strips every At layer"),
        }
    }

    /// The innermost error, with every [`At`](Self::At) layer removed.
    #[must_use]
    pub fn root_cause(&self) -> &DecodeError {
        let mut err = self;
        while let Self::At { source, .. } = err {
            err = source;
        }
        err
    }

    /// Context segments from outermost to innermost.
    #[must_use]
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut out = Vec::new();
        let mut err = self;
        while let Self::At { segment, source } = err {
            out.push(segment);
            err = source;
        }
        out
    }

    /// Render the context as a compact path such as `Data.Player[3]`.
    ///
    /// Framing fields are appended in angle brackets, e.g.
    /// `Data.Inventory<list header>`. Empty when there is no context.
    #[must_use]
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in self.segments() {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
                PathSegment::Field(field) => {
                    out.push('<');
                    out.push_str(field);
                    out.push('>');
                }
            }
        }
        out
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnexpectedEof { needed, offset } => Self::Truncated { needed, offset },
            WireError::Io(e) => Self::from(e),
        }
    }
}

impl From<io::Error> for DecodeError {
    /// Faults raised inside the decompressor arrive tagged with
    /// [`TransportFault`]; those become [`DecodeError::Transport`].
    fn from(err: io::Error) -> Self {
        if err.get_ref().is_some_and(|inner| inner.is::<TransportFault>()) {
            return match err.into_inner().map(|inner| inner.downcast::<TransportFault>()) {
                Some(Ok(fault)) => Self::Transport((*fault).into_inner()),
                // unreachable in practice: checked just above
                Some(Err(other)) => Self::Io(io::Error::other(other)),
                None => Self::Io(io::Error::other("transport fault without payload")),
            };
        }
        Self::Io(err)
    }
}

impl From<TypeError> for DecodeError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnknownTagKind { value } => Self::UnknownTagKind { value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_context_layers() {
        let err = DecodeError::Truncated {
            needed: 4,
            offset: 10,
        }
        .at(PathSegment::Index(3))
        .at(PathSegment::Key("Inventory".into()))
        .at(PathSegment::Key("Data".into()));

        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert!(matches!(
            err.root_cause(),
            DecodeError::Truncated { needed: 4, .. }
        ));
        assert_eq!(err.path(), "Data.Inventory[3]");
    }

    #[test]
    fn path_renders_framing_fields() {
        let err = DecodeError::UnexpectedEnd
            .at(PathSegment::Field("list header"))
            .at(PathSegment::Key("Pos".into()));
        assert_eq!(err.path(), "Pos<list header>");
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn display_names_the_outer_segment() {
        let err = DecodeError::UnexpectedEnd.at(PathSegment::Key("x".into()));
        assert_eq!(err.to_string(), "in key \"x\"");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("unexpected TAG_End where a value was expected".to_string())
        );
    }

    #[test]
    fn wire_eof_becomes_truncated() {
        let err = DecodeError::from(WireError::UnexpectedEof {
            needed: 2,
            offset: 7,
        });
        assert!(matches!(
            err,
            DecodeError::Truncated {
                needed: 2,
                offset: 7
            }
        ));
    }

    #[test]
    fn tagged_io_error_becomes_transport() {
        let tagged = io::Error::other(TransportFault::new(io::Error::new(
            io::ErrorKind::InvalidInput,
            "corrupt deflate stream",
        )));
        let err = DecodeError::from(tagged);
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn plain_io_error_stays_io() {
        let err = DecodeError::from(io::Error::other("disk on fire"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn unknown_and_unsupported_share_a_kind() {
        assert_eq!(
            DecodeError::from(TypeError::UnknownTagKind { value: 0x42 }).kind(),
            ErrorKind::UnsupportedVariant
        );
        assert_eq!(
            DecodeError::UnsupportedVariant {
                kind: TagKind::LongArray
            }
            .kind(),
            ErrorKind::UnsupportedVariant
        );
    }
}
