use crate::error::TypeError;

/// One-byte tag discriminants.
///
/// Each variant maps to the byte that precedes a tag on the wire. Unlike
/// open-ended identifiers, the set is closed: a byte outside the table is
/// a hard error, because without knowing a tag's layout the rest of the
/// stream cannot be located.
///
/// ```text
/// ┌──────┬───────────┬──────────────────────────────────────┐
/// │ Wire │ Variant   │ Payload                              │
/// ├──────┼───────────┼──────────────────────────────────────┤
/// │ 0x00 │ End       │ none; closes a compound              │
/// │ 0x01 │ Byte      │ i8                                   │
/// │ 0x02 │ Short     │ i16 BE                               │
/// │ 0x03 │ Int       │ i32 BE                               │
/// │ 0x04 │ Long      │ i64 BE                               │
/// │ 0x05 │ Float     │ f32 BE bits                          │
/// │ 0x06 │ Double    │ f64 BE bits                          │
/// │ 0x07 │ ByteArray │ i32 count + count bytes              │
/// │ 0x08 │ String    │ u16 length + bytes                   │
/// │ 0x09 │ List      │ element kind + i32 count + payloads  │
/// │ 0x0A │ Compound  │ named tags until End                 │
/// │ 0x0B │ IntArray  │ i32 count + count × i32              │
/// │ 0x0C │ LongArray │ i32 count + count × i64              │
/// └──────┴───────────┴──────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl TagKind {
    /// Every kind in wire order.
    pub const ALL: [TagKind; 13] = [
        Self::End,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::String,
        Self::List,
        Self::Compound,
        Self::IntArray,
        Self::LongArray,
    ];

    /// Return the single-byte wire ID for this kind.
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::End => 0x00,
            Self::Byte => 0x01,
            Self::Short => 0x02,
            Self::Int => 0x03,
            Self::Long => 0x04,
            Self::Float => 0x05,
            Self::Double => 0x06,
            Self::ByteArray => 0x07,
            Self::String => 0x08,
            Self::List => 0x09,
            Self::Compound => 0x0A,
            Self::IntArray => 0x0B,
            Self::LongArray => 0x0C,
        }
    }

    /// Parse a wire byte into a [`TagKind`].
    ///
    /// # Errors
    ///
    /// [`TypeError::UnknownTagKind`] for any byte above `0x0C`.
    pub fn from_wire_id(id: u8) -> Result<Self, TypeError> {
        match id {
            0x00 => Ok(Self::End),
            0x01 => Ok(Self::Byte),
            0x02 => Ok(Self::Short),
            0x03 => Ok(Self::Int),
            0x04 => Ok(Self::Long),
            0x05 => Ok(Self::Float),
            0x06 => Ok(Self::Double),
            0x07 => Ok(Self::ByteArray),
            0x08 => Ok(Self::String),
            0x09 => Ok(Self::List),
            0x0A => Ok(Self::Compound),
            0x0B => Ok(Self::IntArray),
            0x0C => Ok(Self::LongArray),
            other => Err(TypeError::UnknownTagKind { value: other }),
        }
    }

    /// Conventional `TAG_*` name, used in diagnostics and tree dumps.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_known_variants_roundtrip() {
        for (i, kind) in TagKind::ALL.iter().enumerate() {
            let wire = u8::try_from(i).unwrap();
            assert_eq!(kind.wire_id(), wire, "wire_id mismatch for {kind:?}");
            assert_eq!(
                TagKind::from_wire_id(wire).unwrap(),
                *kind,
                "from_wire_id mismatch for {wire:#04X}"
            );
        }
    }

    #[test]
    fn unknown_byte_rejected() {
        assert_eq!(
            TagKind::from_wire_id(0x0D),
            Err(TypeError::UnknownTagKind { value: 0x0D })
        );
        assert!(TagKind::from_wire_id(0xFF).is_err());
    }

    #[test]
    fn display_uses_tag_names() {
        assert_eq!(TagKind::Compound.to_string(), "TAG_Compound");
        assert_eq!(TagKind::IntArray.to_string(), "TAG_Int_Array");
    }
}
