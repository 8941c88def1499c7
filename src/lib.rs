//! # mapforge
//!
//! A procedural map-transformation pipeline: KeyValues documents drive an
//! ordered set of condition rules that inspect and mutate a scene of
//! placeable entities, with fully deterministic seeded randomness.
//!
//! ## Design Principles
//!
//! 1. **Tombstones over deletion**: document nodes are soft-deleted so the
//!    same tree can be rewritten while it is traversed, and replayed
//!    idempotently after resolved random choices are recorded into it.
//!
//! 2. **One generator per draw**: every stochastic decision derives a fresh
//!    generator from a string seed key (feature salt + author token +
//!    entity identity, or the map seed). No shared RNG state, so builds
//!    reproduce exactly.
//!
//! 3. **Schema-less registry**: flags and results are looked up by name and
//!    parse their own generic `Property` argument blocks; setup runs once
//!    per condition load, execute once per match.
//!
//! ## Modules
//!
//! - `keyvalues`: the document model - parser, tree, serializer
//! - `random`: seed-key derivation, chance gates, weighted pools
//! - `scene`: the external scene's narrow entity/geometry API
//! - `conditions`: the rule engine plus the built-in flags and results
//! - `conv`: lenient string-to-scalar conversions

pub mod conditions;
pub mod conv;
pub mod keyvalues;
pub mod random;
pub mod scene;

// Re-export commonly used types
pub use crate::keyvalues::{parse, to_lines, KeyValError, NoKeyError, Property, Value};

pub use crate::random::{entity_seed, global_seed, parse_chance, weighted_pool, DrawRng};

pub use crate::scene::{
    EntityId, Output, Scene, SceneEntity, Solid, TileKind, TilePlacement, Vec3, VecError,
};

pub use crate::conditions::{
    Condition, ConditionEngine, ConfigError, Context, ExecError, Outcome, Registry, ResultEntry,
    ResultSlot, SetupOutcome,
};
