//! The KeyValues document model.
//!
//! A hierarchical plain-text format: quoted `"name" "value"` leaf pairs and
//! named `{ ... }` sections, one statement per line, no comments. Documents
//! parse into a mutable forest of [`Property`] nodes that the condition
//! engine can search, rewrite in place, and serialize back out.

mod error;
mod parser;
mod property;
mod writer;

pub use error::{KeyValError, NoKeyError};
pub use parser::{is_identifier, parse};
pub use property::{find_all_in, find_key_in, Property, Value};
pub use writer::to_lines;
