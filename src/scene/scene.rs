//! The scene container.
//!
//! Owns the placeable entities and the narrow geometry views the engine is
//! allowed to touch. Entity iteration order is insertion order, and passes
//! work from an id snapshot, so results may freely remove or create
//! entities mid-pass without invalidating the outer iteration.

use rustc_hash::FxHashMap;

use super::entity::{EntityId, SceneEntity};
use super::geometry::{Solid, TilePlacement};

/// The collection of placeable entities plus the engine-visible geometry.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    entities: FxHashMap<EntityId, SceneEntity>,
    order: Vec<EntityId>,
    next_id: u32,
    solids: FxHashMap<[i32; 3], Solid>,
    tiles: Vec<TilePlacement>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request creation of a new entity; returns it for attribute setup.
    pub fn create_entity(&mut self) -> &mut SceneEntity {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.order.push(id);
        self.entities.entry(id).or_insert_with(|| SceneEntity::new(id))
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Remove an entity from the scene. Later pass steps simply skip it.
    pub fn remove(&mut self, id: EntityId) -> Option<SceneEntity> {
        self.entities.remove(&id)
    }

    /// Snapshot the ids of every live entity, in insertion order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.entities.contains_key(id))
            .collect()
    }

    /// Iterate live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Register an existing surface brush at its grid location.
    pub fn add_solid(&mut self, solid: Solid) {
        self.solids.insert(solid.origin.grid(), solid);
    }

    #[must_use]
    pub fn solid_at(&self, grid: [i32; 3]) -> Option<&Solid> {
        self.solids.get(&grid)
    }

    pub fn solid_at_mut(&mut self, grid: [i32; 3]) -> Option<&mut Solid> {
        self.solids.get_mut(&grid)
    }

    /// Record a geometry creation request.
    pub fn place_tile(&mut self, tile: TilePlacement) {
        self.tiles.push(tile);
    }

    /// Every geometry request recorded so far.
    #[must_use]
    pub fn tiles(&self) -> &[TilePlacement] {
        &self.tiles
    }
}
