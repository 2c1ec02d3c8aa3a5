/// JSON view of a decoded tree.
///
/// Integers become JSON numbers, floats become numbers too unless they are
/// NaN or infinite (JSON has no spelling for those, so they become `null`).
/// Lists and arrays become arrays and compounds become objects. The tag
/// kinds themselves are not kept; this is a view for reading, not an
/// interchange format.
use anyhow::{Context, Result};
use nbt_types::{Node, Tree};
use serde_json::{Map, Number, Value};

/// The root compound as a JSON object. The root name is dropped.
pub fn tree_to_json(tree: &Tree) -> Value {
    compound_to_json(tree.root.iter())
}

pub fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Byte(v) => Value::from(*v),
        Node::Short(v) => Value::from(*v),
        Node::Int(v) => Value::from(*v),
        Node::Long(v) => Value::from(*v),
        Node::Float(v) => float(f64::from(*v)),
        Node::Double(v) => float(*v),
        Node::String(s) => Value::String(s.clone()),
        Node::ByteArray(v) => Value::Array(v.iter().map(|b| Value::from(*b)).collect()),
        Node::IntArray(v) => Value::Array(v.iter().map(|i| Value::from(*i)).collect()),
        Node::LongArray(v) => Value::Array(v.iter().map(|l| Value::from(*l)).collect()),
        Node::List(list) => Value::Array(list.iter().map(node_to_json).collect()),
        Node::Compound(c) => compound_to_json(c.iter()),
    }
}

fn compound_to_json<'a>(entries: impl Iterator<Item = (&'a String, &'a Node)>) -> Value {
    let map: Map<String, Value> = entries
        .map(|(k, v)| (k.clone(), node_to_json(v)))
        .collect();
    Value::Object(map)
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Pretty-print with two-space indentation.
///
/// # Errors
///
/// Only if serialisation itself fails, which for a [`Value`] it does not.
pub fn to_pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("cannot serialise JSON")
}
