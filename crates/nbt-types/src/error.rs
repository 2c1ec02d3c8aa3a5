/// Errors raised when a raw value cannot be mapped onto the tag model.
///
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                              │
/// │   └── UnknownTagKind for bytes outside 0..=12       │
/// └─────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
  /// A tag byte did not match any variant of [`TagKind`](crate::TagKind).
  ///
  /// Usually means the stream is desynchronised or is not a tag tree at all.
  #[error("unknown tag kind: {value:#04X}")]
  UnknownTagKind { value: u8 },
}
