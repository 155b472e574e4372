//! Physics module for integration and collision
//!
//! Entities move with per-axis integration and are kept out of solid tiles
//! by the [`TilemapResolver`]. Entity-vs-entity contact is a plain
//! [`Aabb`] overlap test with no response; gameplay code decides what a
//! contact means.

pub mod aabb;
pub mod tilemap_collision;

pub use aabb::Aabb;
pub use tilemap_collision::TilemapResolver;

use crate::core::config::PhysicsConfig;
use crate::entity::{CollisionFlags, Entity};
use crate::tilemap::TileMap;

/// Per-tick movement of entities through a tilemap
#[derive(Debug, Clone, Copy)]
pub struct PhysicsSystem {
    resolver: TilemapResolver,
    horizontal_damping: f32,
}

impl PhysicsSystem {
    /// Create a physics system
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            resolver: TilemapResolver::new(config.collision_epsilon),
            horizontal_damping: config.horizontal_damping,
        }
    }

    /// The tile resolver in use
    pub fn resolver(&self) -> &TilemapResolver {
        &self.resolver
    }

    /// Move one entity by one fixed step and resolve it against the map
    ///
    /// Order is integrate Y, resolve Y, integrate X, resolve X, so a diagonal
    /// move cannot slip through the corner between two tiles. Static
    /// entities are skipped entirely and keep their flags.
    pub fn step_entity(&self, entity: &mut Entity, map: &TileMap, dt: f32) -> CollisionFlags {
        if entity.is_static {
            return entity.collisions;
        }
        entity.integrate_y(dt);
        self.resolver.resolve_y(entity, map);
        entity.integrate_x_damped(dt, self.horizontal_damping);
        self.resolver.resolve_x(entity, map);
        entity.collisions
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(&PhysicsConfig::default())
    }
}

/// Step an entity with the stock resolver settings
pub fn step_entity(entity: &mut Entity, map: &TileMap, dt: f32) -> CollisionFlags {
    PhysicsSystem::default().step_entity(entity, map, dt)
}
