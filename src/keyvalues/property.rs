//! The KeyValues node type.
//!
//! A `Property` is either a leaf (`"name" "value"`) or a section holding an
//! ordered list of child properties. Deletion is a soft tombstone: the node
//! stays linked but disappears from iteration, lookup, and serialization,
//! so trees can be rewritten in place while being traversed.

use serde::{Deserialize, Serialize};

use super::error::{KeyValError, NoKeyError};

/// The payload of a property: an in-line string or an ordered child list.
///
/// The two are mutually exclusive - a node never holds both.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    /// An in-line string value.
    Leaf(String),
    /// A `{ ... }` section of child properties.
    Section(Vec<Property>),
}

/// A single node in a KeyValues tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Property {
    name: Option<String>,
    value: Value,
    valid: bool,
}

impl Property {
    /// Create a leaf property.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Value::Leaf(value.into()),
            valid: true,
        }
    }

    /// Create a section property with the given children.
    pub fn section(name: impl Into<String>, children: Vec<Property>) -> Self {
        Self {
            name: Some(name.into()),
            value: Value::Section(children),
            valid: true,
        }
    }

    /// The node's name, if it has not been tombstoned.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn name_is(&self, other: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.eq_ignore_ascii_case(other))
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The in-line value, or `None` for sections.
    #[must_use]
    pub fn value_str(&self) -> Option<&str> {
        match &self.value {
            Value::Leaf(s) => Some(s),
            Value::Section(_) => None,
        }
    }

    /// Replace the payload with an in-line value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Value::Leaf(value.into());
    }

    /// Does this node hold child properties?
    #[must_use]
    pub fn has_children(&self) -> bool {
        matches!(self.value, Value::Section(_))
    }

    /// Has this node been soft-deleted?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// All children, tombstoned ones included. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Property] {
        match &self.value {
            Value::Section(list) => list,
            Value::Leaf(_) => &[],
        }
    }

    /// Mutable access to the child list. Empty for leaves.
    pub fn children_mut(&mut self) -> &mut [Property] {
        match &mut self.value {
            Value::Section(list) => list,
            Value::Leaf(_) => &mut [],
        }
    }

    /// Iterate the live (non-tombstoned) children.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.children().iter().filter(|p| p.valid)
    }

    /// Number of live children for a section, 1 for a live leaf, 0 once
    /// tombstoned.
    #[must_use]
    pub fn len(&self) -> usize {
        if !self.valid {
            return 0;
        }
        match &self.value {
            Value::Section(_) => self.iter().count(),
            Value::Leaf(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Soft-delete this subtree so it no longer appears in any output.
    pub fn make_invalid(&mut self) {
        self.valid = false;
        self.value = Value::Leaf(String::new());
        self.name = None;
    }

    /// Append a child to a section. Appending to a leaf is an error.
    pub fn push(&mut self, child: Property) -> Result<(), KeyValError> {
        match &mut self.value {
            Value::Section(list) => {
                list.push(child);
                Ok(())
            }
            Value::Leaf(_) => Err(KeyValError::LeafAppend),
        }
    }

    /// Merge an iterable of children into this section's list.
    ///
    /// Unlike `push`, the items extend the list rather than nesting as a
    /// single child.
    pub fn extend(
        &mut self,
        children: impl IntoIterator<Item = Property>,
    ) -> Result<(), KeyValError> {
        match &mut self.value {
            Value::Section(list) => {
                list.extend(children);
                Ok(())
            }
            Value::Leaf(_) => Err(KeyValError::LeafAppend),
        }
    }

    /// Find the child with the given name, scanning from the end so a key
    /// re-declared later in the file overrides earlier occurrences.
    pub fn find_key(&self, key: &str) -> Result<&Property, NoKeyError> {
        find_key_in(self.children(), key)
    }

    /// Like `find_key`, but synthesizes a standalone leaf carrying the
    /// default when the key is absent. The returned node is never linked
    /// into the tree.
    #[must_use]
    pub fn find_key_or(&self, key: &str, default: &str) -> Property {
        match self.find_key(key) {
            Ok(prop) => prop.clone(),
            Err(_) => Property::new(key, default),
        }
    }

    /// The in-line value of the named child, or `default` when the key is
    /// absent or names a section.
    #[must_use]
    pub fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.find_key(key) {
            Ok(prop) => prop.value_str().unwrap_or(default),
            Err(_) => default,
        }
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub(crate) fn into_value(self) -> Value {
        self.value
    }

    /// Collect every property matching a multi-level, case-insensitive path.
    ///
    /// Each segment descends into matching sections; nodes matching the
    /// final segment are collected. An empty path is an error.
    pub fn find_all<'a>(&'a self, path: &[&str]) -> Result<Vec<&'a Property>, KeyValError> {
        find_all_in(std::slice::from_ref(self), path)
    }
}

/// `find_key` over a bare child list (used for forests and split borrows).
pub fn find_key_in<'a>(children: &'a [Property], key: &str) -> Result<&'a Property, NoKeyError> {
    children
        .iter()
        .rev()
        .find(|p| p.valid && p.name_is(key))
        .ok_or_else(|| NoKeyError(key.to_string()))
}

/// `find_all` over a top-level forest.
pub fn find_all_in<'a>(
    forest: &'a [Property],
    path: &[&str],
) -> Result<Vec<&'a Property>, KeyValError> {
    let (first, rest) = path.split_first().ok_or(KeyValError::EmptyPath)?;
    let mut found = Vec::new();
    for prop in forest.iter().filter(|p| p.valid) {
        if prop.name_is(first) {
            if rest.is_empty() {
                found.push(prop);
            } else if prop.has_children() {
                found.extend(find_all_in(prop.children(), rest)?);
            }
        }
    }
    Ok(found)
}

impl PartialEq for Property {
    /// Case-insensitive on name, exact on value.
    fn eq(&self, other: &Self) -> bool {
        let names_match = match (&self.name, &other.name) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => true,
            _ => false,
        };
        names_match
            && match (&self.value, &other.value) {
                (Value::Leaf(a), Value::Leaf(b)) => a == b,
                (Value::Section(a), Value::Section(b)) => a == b,
                _ => false,
            }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_strings().join("\n"))
    }
}
