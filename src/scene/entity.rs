//! Scene entities.
//!
//! An entity is identity (name, position, orientation) plus free-form
//! key/value attributes and output connections. Keys are case-insensitive;
//! lookups default rather than fail, matching how authored maps omit most
//! keys.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::output::Output;
use super::vector::{Vec3, VecError};

/// Unique identifier for a scene entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// A placeable object in the scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneEntity {
    id: EntityId,
    keys: FxHashMap<String, String>,
    /// Output connections to other entities.
    pub outputs: SmallVec<[Output; 2]>,
}

impl SceneEntity {
    /// Create an empty entity.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            keys: FxHashMap::default(),
            outputs: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Look up an attribute, case-insensitively, with a default.
    #[must_use]
    pub fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.keys
            .get(&key.to_ascii_lowercase())
            .map_or(default, String::as_str)
    }

    /// Set an attribute.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.keys.insert(key.to_ascii_lowercase(), value.into());
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.keys.contains_key(&key.to_ascii_lowercase())
    }

    /// The entity's targetname; empty when unnamed.
    #[must_use]
    pub fn name(&self) -> &str {
        self.get("targetname", "")
    }

    /// Strictly parsed position.
    pub fn origin(&self) -> Result<Vec3, VecError> {
        Vec3::from_str(self.get("origin", ""))
    }

    /// Strictly parsed orientation angles.
    pub fn angles(&self) -> Result<Vec3, VecError> {
        Vec3::from_str(self.get("angles", "0 0 0"))
    }

    /// Names of every entity this one's outputs point at.
    pub fn output_targets(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|o| o.target.as_str())
    }

    /// Insert a suffix into the `file` attribute ahead of its extension,
    /// e.g. `door.mdl` + `_var2` becomes `door_var2.mdl`.
    pub fn add_file_suffix(&mut self, suffix: &str) {
        let file = self.get("file", "");
        let new = match file.split_once('.') {
            Some((stem, ext)) => format!("{stem}{suffix}.{ext}"),
            None => format!("{file}{suffix}"),
        };
        self.set("file", new);
    }
}
