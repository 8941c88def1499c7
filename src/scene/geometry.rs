//! Minimal geometry the engine reads and writes.
//!
//! The real solid representation is external; the engine only sees grid
//! surface brushes (read) and tile placement records (write).

use serde::{Deserialize, Serialize};

use super::vector::Vec3;

/// An existing surface brush at a grid location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Center of the surface.
    pub origin: Vec3,
    /// Surface normal; anything but up marks a pillar block.
    pub normal: Vec3,
    /// Surface material name.
    pub material: String,
}

impl Solid {
    /// A floor surface at the given origin.
    #[must_use]
    pub fn floor(origin: Vec3, material: impl Into<String>) -> Self {
        Self {
            origin,
            normal: Vec3::UP,
            material: material.into(),
        }
    }

    #[must_use]
    pub fn is_floor(&self) -> bool {
        self.normal.approx_eq(Vec3::UP)
    }
}

/// What kind of geometry a placement request creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// A full-thickness tile.
    Full,
    /// The thinner glue variant bordering full tiles.
    Glue,
    /// Sealing geometry along a footprint edge open to empty space.
    Seal,
    /// A cell with no adjacent generated geometry, patched separately.
    VoidSeal,
    /// Filler for a pillar block inside the footprint.
    Pillar,
}

/// A geometry creation request recorded against the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub origin: Vec3,
    pub kind: TileKind,
}
