use std::io::Read;

use nbt_types::{Compound, List, Node, TagKind, Tree};
use nbt_wire::TagReader;
use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::error::{DecodeError, PathSegment};

/// Upper bound on up-front capacity for lists and arrays.
///
/// Declared counts come straight off the wire, so they are only trusted
/// as far as this. Longer sequences still decode; they just grow.
const PREALLOC_LIMIT: usize = 4096;

/// Recursive-descent decoder over a decompressed tag stream.
///
/// The decoder reads one kind byte, dispatches to the reader for that
/// kind, and recurses for compounds and lists. It holds no state besides
/// the byte cursor and the current nesting depth, so independent decoders
/// never interfere with each other.
///
/// ```text
///   decode_tree ── kind == Compound? ── name ── decode_compound
///                                                   │
///               ┌───────────────────────────────────┘
///               ▼
///   loop { kind ── End? ── name ── decode_value(kind) ── insert }
///                                      │
///           Byte/Short/Int/Long/Float/Double/String: fixed read
///           List:     element kind + i32 count + count × decode_value
///           Compound: decode_compound (recursive)
///           IntArray: i32 count + count × i32
///           ByteArray/LongArray: UnsupportedVariant
/// ```
///
/// # Example
///
/// ```rust
/// use nbt_decoder::TagDecoder;
/// use nbt_types::Node;
///
/// let bytes = [0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2A, 0x00];
/// let tree = TagDecoder::new(&bytes[..]).decode_tree().unwrap();
/// assert_eq!(tree.root.get("x"), Some(&Node::Int(42)));
/// ```
pub struct TagDecoder<R> {
    reader: TagReader<R>,
    config: DecoderConfig,
    depth: usize,
}

impl<R: Read> TagDecoder<R> {
    /// Decoder with default limits.
    pub fn new(source: R) -> Self {
        Self::with_config(source, DecoderConfig::default())
    }

    pub fn with_config(source: R, config: DecoderConfig) -> Self {
        Self {
            reader: TagReader::new(source),
            config,
            depth: 0,
        }
    }

    /// Bytes consumed from the decompressed stream so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Decode a whole document: one named compound at the top level.
    ///
    /// The root compound is read like any other, entry after entry until
    /// its End tag. Bytes after that End are left unread.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::RootNotCompound`] if the first tag is any other kind.
    /// - Anything [`decode_value`](Self::decode_value) can return, wrapped
    ///   with the key path to the failing entry.
    pub fn decode_tree(&mut self) -> Result<Tree, DecodeError> {
        let kind = self
            .read_kind()
            .map_err(|e| e.at(PathSegment::Field("root tag")))?;
        if kind != TagKind::Compound {
            return Err(DecodeError::RootNotCompound { found: kind });
        }
        let name = self
            .read_name()
            .map_err(|e| e.at(PathSegment::Field("root name")))?;

        let root = self.decode_compound()?;
        debug!(
            name = %name,
            entries = root.len(),
            bytes = self.position(),
            "decoded tag tree"
        );
        Ok(Tree::new(name, root))
    }

    /// Decode one named tag: kind byte, name, payload.
    ///
    /// This is the shape of every compound entry. An End kind here is an
    /// error, since End carries no name and no value.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnexpectedEnd`] if the kind byte is End.
    /// - Anything [`decode_value`](Self::decode_value) can return, wrapped
    ///   with the tag's name.
    pub fn decode_tagged(&mut self) -> Result<(TagKind, String, Node), DecodeError> {
        let kind = self.read_kind()?;
        if kind == TagKind::End {
            return Err(DecodeError::UnexpectedEnd);
        }
        let name = self.read_name()?;
        match self.decode_value(kind) {
            Ok(node) => Ok((kind, name, node)),
            Err(e) => Err(e.at(PathSegment::Key(name))),
        }
    }

    /// Decode the payload of a tag whose kind is already known.
    ///
    /// Reads no kind byte and no name.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Truncated`] if the stream ends inside the payload.
    /// - [`DecodeError::UnsupportedVariant`] for ByteArray and LongArray.
    /// - [`DecodeError::UnexpectedEnd`] for End.
    /// - [`DecodeError::DepthExceeded`] past the configured nesting limit.
    pub fn decode_value(&mut self, kind: TagKind) -> Result<Node, DecodeError> {
        let node = match kind {
            TagKind::End => return Err(DecodeError::UnexpectedEnd),
            TagKind::Byte => Node::Byte(self.reader.read_i8()?),
            TagKind::Short => Node::Short(self.reader.read_i16()?),
            TagKind::Int => Node::Int(self.reader.read_i32()?),
            TagKind::Long => Node::Long(self.reader.read_i64()?),
            TagKind::Float => Node::Float(self.reader.read_f32()?),
            TagKind::Double => Node::Double(self.reader.read_f64()?),
            TagKind::String => Node::String(self.reader.read_string()?),
            TagKind::List => Node::List(self.nested(Self::decode_list)?),
            TagKind::Compound => Node::Compound(self.nested(Self::decode_compound)?),
            TagKind::IntArray => Node::IntArray(self.decode_int_array()?),
            TagKind::ByteArray | TagKind::LongArray => {
                return Err(DecodeError::UnsupportedVariant { kind });
            }
        };
        Ok(node)
    }

    fn read_kind(&mut self) -> Result<TagKind, DecodeError> {
        let id = self.reader.read_u8()?;
        Ok(TagKind::from_wire_id(id)?)
    }

    fn read_name(&mut self) -> Result<String, DecodeError> {
        Ok(self.reader.read_string()?)
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.config.max_depth {
            return Err(DecodeError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn decode_compound(&mut self) -> Result<Compound, DecodeError> {
        let mut compound = Compound::new();
        loop {
            let kind = self.read_kind()?;
            if kind == TagKind::End {
                return Ok(compound);
            }
            let key = self.read_name()?;
            trace!(key = %key, kind = %kind, depth = self.depth, "compound entry");
            match self.decode_value(kind) {
                Ok(value) => {
                    compound.insert(key, value);
                }
                Err(e) => return Err(e.at(PathSegment::Key(key))),
            }
        }
    }

    fn decode_list(&mut self) -> Result<List, DecodeError> {
        let (element_kind, count) = self
            .read_list_header()
            .map_err(|e| e.at(PathSegment::Field("list header")))?;

        let mut list = List::new(element_kind);
        // Zero and negative counts both mean an empty list.
        let Ok(count) = usize::try_from(count) else {
            return Ok(list);
        };
        if count > 0 && element_kind == TagKind::End {
            return Err(DecodeError::ListOfEnd { count });
        }

        list.items.reserve(count.min(PREALLOC_LIMIT));
        for index in 0..count {
            match self.decode_value(element_kind) {
                Ok(item) => list.items.push(item),
                Err(e) => return Err(e.at(PathSegment::Index(index))),
            }
        }
        Ok(list)
    }

    fn read_list_header(&mut self) -> Result<(TagKind, i32), DecodeError> {
        let element_kind = self.read_kind()?;
        let count = self.reader.read_i32()?;
        Ok((element_kind, count))
    }

    fn decode_int_array(&mut self) -> Result<Vec<i32>, DecodeError> {
        let count = self
            .reader
            .read_i32()
            .map_err(|e| DecodeError::from(e).at(PathSegment::Field("array length")))?;
        let Ok(count) = usize::try_from(count) else {
            return Ok(Vec::new());
        };

        let mut values = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for index in 0..count {
            match self.reader.read_i32() {
                Ok(v) => values.push(v),
                Err(e) => return Err(DecodeError::from(e).at(PathSegment::Index(index))),
            }
        }
        Ok(values)
    }
}
