//! The compile driver.
//!
//! A run is strictly sequential: conditions load and set up first (fail
//! fast), then the meta pass runs each global condition once, then the
//! per-entity pass tests every ordinary condition against a snapshot of
//! the scene's entities. Priorities ascend; ties keep declaration order.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::keyvalues::{find_all_in, Property};
use crate::scene::Scene;

use super::condition::Condition;
use super::error::{ConfigError, ExecError};
use super::registry::Registry;

/// Shared state handed to result executions during one compile.
pub struct Context<'a> {
    /// The scene under transformation.
    pub scene: &'a mut Scene,
    /// Process-wide seed for identity-less draws.
    pub map_seed: &'a str,
    /// Auxiliary index built by the meta pass: 32-unit grid cells that must
    /// always generate a tile.
    pub forced_tiles: &'a mut FxHashSet<[i32; 3]>,
}

/// Loads conditions from a document tree and runs them against a scene.
pub struct ConditionEngine {
    registry: Registry,
    conditions: Vec<Condition>,
    map_seed: String,
}

impl ConditionEngine {
    /// An engine with the built-in registry.
    #[must_use]
    pub fn new(map_seed: impl Into<String>) -> Self {
        Self::with_registry(map_seed, Registry::builtins())
    }

    /// An engine with a caller-assembled registry.
    #[must_use]
    pub fn with_registry(map_seed: impl Into<String>, registry: Registry) -> Self {
        Self {
            registry,
            conditions: Vec::new(),
            map_seed: map_seed.into(),
        }
    }

    /// Register additional flags or results before loading.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The loaded conditions, in declaration order until `compile` sorts.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Load every `Conditions` → `Condition` section from a document
    /// forest. Returns how many conditions were kept.
    pub fn load(&mut self, forest: &[Property]) -> Result<usize, ConfigError> {
        let sections = find_all_in(forest, &["conditions", "condition"])
            .expect("static path is never empty");
        let mut kept = 0;
        for section in sections {
            if self.add_condition(section)? {
                kept += 1;
            }
        }
        info!(kept, "loaded conditions");
        Ok(kept)
    }

    /// Load a single condition section. Returns whether it was kept or
    /// discarded by a setup step.
    pub fn add_condition(&mut self, prop: &Property) -> Result<bool, ConfigError> {
        match Condition::parse(prop, &self.registry)? {
            Some(cond) => {
                self.conditions.push(cond);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run the full schedule against a scene: meta pass, then per-entity
    /// pass over a snapshot. Any error aborts the entire run.
    pub fn compile(&mut self, scene: &mut Scene) -> Result<(), ExecError> {
        // Stable sort: equal priorities keep declaration order.
        self.conditions.sort_by_key(|c| c.priority);

        let mut forced_tiles = FxHashSet::default();
        let Self {
            registry,
            conditions,
            map_seed,
        } = self;
        let mut ctx = Context {
            scene,
            map_seed,
            forced_tiles: &mut forced_tiles,
        };

        debug!(total = conditions.len(), "meta pass");
        for cond in conditions.iter_mut().filter(|c| c.meta) {
            cond.execute(registry, &mut ctx, None)?;
        }

        let snapshot = ctx.scene.entity_ids();
        debug!(entities = snapshot.len(), "per-entity pass");
        for id in snapshot {
            for cond in conditions.iter_mut().filter(|c| !c.meta) {
                // Removed mid-pass: skip the remaining conditions.
                if !ctx.scene.contains(id) {
                    break;
                }
                if cond.test(registry, ctx.scene, id, ctx.map_seed)? {
                    cond.execute(registry, &mut ctx, Some(id))?;
                }
            }
        }
        Ok(())
    }

    /// Rebuild the `Conditions` tree, reflecting every tombstone rewrite,
    /// for persistence and idempotent reprocessing.
    #[must_use]
    pub fn export(&self) -> Property {
        Property::section(
            "Conditions",
            self.conditions
                .iter()
                .map(|c| c.export(&self.registry))
                .collect(),
        )
    }
}
