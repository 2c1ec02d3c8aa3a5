use std::fmt::{self, Write as _};

use crate::node::{Compound, Node};
use crate::tree::Tree;

/// Indented, human-readable rendering of a node and everything below it.
///
/// ```text
/// TAG_Compound('Data'): 2 entries
/// {
///   TAG_Int('x'): 42
///   TAG_List('Pos'): 1 entry of TAG_Double
///   {
///     TAG_Double(None): 1.5
///   }
/// }
/// ```
///
/// List elements have no name and print as `None`. Floats use `{:?}` so
/// `1.0` and `-0.0` stay distinguishable from integers.
pub struct Dump<'a> {
    name: Option<&'a str>,
    node: &'a Node,
}

impl<'a> Dump<'a> {
    #[must_use]
    pub fn new(name: Option<&'a str>, node: &'a Node) -> Self {
        Self { name, node }
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.name, self.node, 0)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TAG_Compound('{}'): ", self.name)?;
        write_compound(f, &self.root, 0)
    }
}

fn entries(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{n} entries")
    }
}

fn write_node(f: &mut impl fmt::Write, name: Option<&str>, node: &Node, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    write!(f, "{pad}{}(", node.kind())?;
    match name {
        Some(name) => write!(f, "'{name}'")?,
        None => f.write_str("None")?,
    }
    f.write_str("): ")?;

    match node {
        Node::Byte(v) => write!(f, "{v}"),
        Node::Short(v) => write!(f, "{v}"),
        Node::Int(v) => write!(f, "{v}"),
        Node::Long(v) => write!(f, "{v}"),
        Node::Float(v) => write!(f, "{v:?}"),
        Node::Double(v) => write!(f, "{v:?}"),
        Node::String(s) => write!(f, "{s:?}"),
        Node::ByteArray(v) => write!(f, "{v:?}"),
        Node::IntArray(v) => write!(f, "{v:?}"),
        Node::LongArray(v) => write!(f, "{v:?}"),
        Node::List(list) => {
            write!(f, "{} of {}\n{pad}{{", entries(list.len()), list.element_kind)?;
            for item in list.iter() {
                f.write_char('\n')?;
                write_node(f, None, item, depth + 1)?;
            }
            write!(f, "\n{pad}}}")
        }
        Node::Compound(compound) => write_compound(f, compound, depth),
    }
}

/// Writes `N entries`, then the braced body. The caller has already
/// written the `TAG_Compound(...)` header on the current line.
fn write_compound(f: &mut impl fmt::Write, compound: &Compound, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    write!(f, "{}\n{pad}{{", entries(compound.len()))?;
    for (key, value) in compound {
        f.write_char('\n')?;
        write_node(f, Some(key.as_str()), value, depth + 1)?;
    }
    write!(f, "\n{pad}}}")
}
