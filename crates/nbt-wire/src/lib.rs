#![warn(clippy::pedantic)]

pub mod error;
pub mod reader;

pub use error::WireError;
pub use reader::TagReader;
