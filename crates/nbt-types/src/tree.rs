use crate::node::{Compound, Node};

/// A decoded document: one named root compound.
///
/// The root name is whatever the file carried (level files use the empty
/// string). The tree owns every node beneath it; dropping the tree drops
/// the lot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    pub name: String,
    pub root: Compound,
}

impl Tree {
    #[must_use]
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Follow a dotted path of compound keys from the root.
    ///
    /// `"Data.Player.Health"` looks up `Data`, then `Player` inside it,
    /// then `Health`. Returns `None` if any segment is missing or an
    /// intermediate node is not a compound.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.as_compound()?.get(segment)?;
        }
        Some(node)
    }
}
