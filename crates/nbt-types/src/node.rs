use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::tag_kind::TagKind;

/// A decoded tag value.
///
/// Closed sum type over every storable kind. `End` is a framing marker,
/// not a value, so it has no variant here. Every consumer matches on
/// this exhaustively; adding a variant breaks every site that needs to
/// learn about it.
///
/// `ByteArray` and `LongArray` exist so the model covers the whole
/// format, but the decoder refuses those kinds rather than producing them.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
  Byte(i8),
  Short(i16),
  Int(i32),
  Long(i64),
  Float(f32),
  Double(f64),
  ByteArray(Vec<i8>),
  String(String),
  List(List),
  Compound(Compound),
  IntArray(Vec<i32>),
  LongArray(Vec<i64>),
}

impl Node {
  /// The wire kind of this node.
  #[must_use]
  pub fn kind(&self) -> TagKind {
    match self {
      Self::Byte(_) => TagKind::Byte,
      Self::Short(_) => TagKind::Short,
      Self::Int(_) => TagKind::Int,
      Self::Long(_) => TagKind::Long,
      Self::Float(_) => TagKind::Float,
      Self::Double(_) => TagKind::Double,
      Self::ByteArray(_) => TagKind::ByteArray,
      Self::String(_) => TagKind::String,
      Self::List(_) => TagKind::List,
      Self::Compound(_) => TagKind::Compound,
      Self::IntArray(_) => TagKind::IntArray,
      Self::LongArray(_) => TagKind::LongArray,
    }
  }

  #[must_use]
  pub fn as_i8(&self) -> Option<i8> {
    match self {
      Self::Byte(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_i16(&self) -> Option<i16> {
    match self {
      Self::Short(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_i32(&self) -> Option<i32> {
    match self {
      Self::Int(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Long(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_f32(&self) -> Option<f32> {
    match self {
      Self::Float(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Double(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_list(&self) -> Option<&List> {
    match self {
      Self::List(l) => Some(l),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_compound(&self) -> Option<&Compound> {
    match self {
      Self::Compound(c) => Some(c),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_int_array(&self) -> Option<&[i32]> {
    match self {
      Self::IntArray(v) => Some(v),
      _ => None,
    }
  }
}

/// A homogeneous sequence.
///
/// The element kind is declared once on the wire and kept here even when
/// `items` is empty, so an empty list of compounds is distinguishable
/// from an empty list of ints.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
  pub element_kind: TagKind,
  pub items: Vec<Node>,
}

impl List {
  #[must_use]
  pub fn new(element_kind: TagKind) -> Self {
    Self {
      element_kind,
      items: Vec::new(),
    }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Node> {
    self.items.iter()
  }
}

/// Named children of a compound tag.
///
/// Keys are unique; inserting an existing key replaces its value. Entries
/// iterate in key order, which keeps dumps stable between runs. The wire
/// order of entries carries no meaning and is not kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound(BTreeMap<String, Node>);

impl Compound {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or overwrite. Returns the displaced value, if any.
  pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
    self.0.insert(key.into(), value)
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&Node> {
    self.0.get(key)
  }

  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> btree_map::Iter<'_, String, Node> {
    self.0.iter()
  }

  pub fn keys(&self) -> btree_map::Keys<'_, String, Node> {
    self.0.keys()
  }
}

impl<'a> IntoIterator for &'a Compound {
  type Item = (&'a String, &'a Node);
  type IntoIter = btree_map::Iter<'a, String, Node>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

impl FromIterator<(String, Node)> for Compound {
  fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
