//! The external scene, reduced to the API the engine consumes.
//!
//! Entities expose identity, free-form attributes, and output connections;
//! geometry is visible only as grid surface brushes and tile placement
//! records. Everything beyond this narrow surface stays scene-specific.

mod entity;
mod geometry;
mod output;
#[allow(clippy::module_inception)]
mod scene;
mod vector;

pub use entity::{EntityId, SceneEntity};
pub use geometry::{Solid, TileKind, TilePlacement};
pub use output::{Output, OUTPUT_SEP};
pub use scene::Scene;
pub use vector::{Vec3, VecError};
