//! Deterministic random selection.
//!
//! Seeds are derived from string keys (per-feature salt + author token +
//! entity identity, or the map seed for global decisions), one fresh
//! generator per draw. Weighted selection expands integer weights into a
//! flat index pool and draws uniformly from it.

mod seed;
mod weights;

pub use seed::{entity_seed, global_seed, DrawRng};
pub use weights::{parse_chance, weighted_pool};
