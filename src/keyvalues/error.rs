//! Errors raised by the document model.
//!
//! Parse errors are fatal and carry a 1-based line number; `parse` never
//! returns a partial forest.

use thiserror::Error;

/// An error from parsing or manipulating a KeyValues tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyValError {
    /// A name contained characters outside the identifier set.
    #[error("invalid name {name:?} on line {line}")]
    InvalidName { name: String, line: usize },

    /// `{` followed a name that already holds an in-line value.
    #[error("property cannot have a sub-section if it already has an in-line value (line {line})")]
    InlineValueConflict { line: usize },

    /// `{` appeared with no preceding name declaration.
    #[error("section opened without a name on line {line}")]
    OrphanSection { line: usize },

    /// A `}` with no matching open section.
    #[error("too many closing brackets on line {line}")]
    UnmatchedClose { line: usize },

    /// End of input reached with open sections remaining.
    #[error("end of text reached with remaining open sections")]
    UnclosedSection,

    /// A line began with a character no statement can start with.
    #[error("unexpected beginning character {found:?} on line {line}")]
    UnexpectedChar { found: char, line: usize },

    /// `find_all` was invoked with an empty path.
    #[error("cannot search with an empty key path")]
    EmptyPath,

    /// A child was appended to a leaf-valued node.
    #[error("cannot append children to a leaf value")]
    LeafAppend,
}

/// Raised when `find_key` does not match and no default was supplied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no key {0:?}")]
pub struct NoKeyError(pub String);
