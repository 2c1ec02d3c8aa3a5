#![warn(clippy::pedantic)]

pub mod error;
pub mod tag_kind;
pub mod node;
pub mod tree;
pub mod dump;

pub use dump::Dump;
pub use error::TypeError;
pub use node::{Compound, List, Node};
pub use tag_kind::TagKind;
pub use tree::Tree;
