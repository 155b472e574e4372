//! Level context
//!
//! A [`LevelContext`] owns everything that lives for exactly one level: the
//! tile map, the entity table, particle emitters and camera bounds.
//! Dropping it tears the level down.

pub mod data;

pub use data::{LayerData, LevelData, SpawnPoint};

use std::collections::HashMap;
use std::path::Path;

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::core::config::PhysicsConfig;
use crate::entity::{CollisionFlags, Entity, EntityKind};
use crate::foundation::math::Vec2;
use crate::particles::ParticleEmitter;
use crate::physics::PhysicsSystem;
use crate::tilemap::{LayerKind, SolidTiles, TileGrid, TileGridError, TileMap};

new_key_type! {
    /// Handle to an entity in a [`LevelContext`]
    pub struct EntityId;
}

/// Half width of the visible area in world units (16:9)
pub const VIEW_HALF_WIDTH: f32 = 1.777;

/// Half height of the visible area in world units
pub const VIEW_HALF_HEIGHT: f32 = 1.0;

/// Errors raised while building a level
#[derive(Error, Debug)]
pub enum LevelError {
    /// Header lacks a width or height
    #[error("Level header is missing dimensions (width {width}, height {height})")]
    MissingDimensions {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },

    /// A layer does not match the header dimensions
    #[error("Layer {layer:?} has {actual} tiles, expected {expected}")]
    GridSize {
        /// Offending layer
        layer: LayerKind,
        /// `width * height`
        expected: usize,
        /// Tiles supplied
        actual: usize,
    },

    /// A required layer is absent
    #[error("Level has no {0:?} layer")]
    MissingLayer(LayerKind),

    /// A required entity has no spawn record
    #[error("Level has no {0:?} spawn")]
    MissingSpawn(EntityKind),

    /// Tile grid construction failed
    #[error("Tile grid error: {0}")]
    Grid(#[from] TileGridError),

    /// Level file could not be read
    #[error("Level file error: {0}")]
    Config(#[from] ConfigError),
}

/// Range the camera center may occupy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    /// Lowest center X and the magnitude of the highest center Y
    pub min: Vec2,
    /// Highest center X and the magnitude of the lowest center Y
    pub max: Vec2,
}

impl CameraBounds {
    /// Bounds that keep the view one tile inside the map edges
    pub fn for_map(map: &TileMap, half_view: Vec2) -> Self {
        let tile = map.tile_size();
        let (world_w, world_h) = map.world_size();
        Self {
            min: Vec2::new(half_view.x + tile, half_view.y + tile),
            max: Vec2::new(world_w - half_view.x - tile, world_h - half_view.y - tile),
        }
    }

    /// Camera center that follows `target` without leaving the bounds
    ///
    /// World Y is negative inside the map, so the vertical range is
    /// `[-max.y, -min.y]`. When the map is smaller than the view the lower
    /// bound wins horizontally and the deeper bound wins vertically.
    pub fn clamp(&self, target: Vec2) -> Vec2 {
        let x = if target.x < self.min.x {
            self.min.x
        } else if target.x > self.max.x {
            self.max.x
        } else {
            target.x
        };
        let y = if target.y < -self.max.y {
            -self.max.y
        } else if target.y > -self.min.y {
            -self.min.y
        } else {
            target.y
        };
        Vec2::new(x, y)
    }
}

/// Everything owned by the level currently in play
pub struct LevelContext {
    map: TileMap,
    entities: SlotMap<EntityId, Entity>,
    by_kind: HashMap<EntityKind, EntityId>,
    emitters: Vec<ParticleEmitter>,
    camera: CameraBounds,
    physics: PhysicsSystem,
}

impl LevelContext {
    /// Build a level from parsed data
    pub fn from_data(data: &LevelData, physics: &PhysicsConfig) -> Result<Self, LevelError> {
        data.validate()?;

        let base = data.layer(LayerKind::Base).ok_or(LevelError::MissingLayer(LayerKind::Base))?;
        let base = TileGrid::from_rows(data.width, data.height, &base.rows)?;
        let mut map = TileMap::new(base, physics.tile_size, SolidTiles::new(physics.solid_tiles.clone()));
        for kind in [LayerKind::Overlay, LayerKind::Temporary] {
            if let Some(layer) = data.layer(kind) {
                map.set_layer(kind, TileGrid::from_rows(data.width, data.height, &layer.rows)?)?;
            }
        }

        let mut context = Self {
            camera: CameraBounds::for_map(&map, Vec2::new(VIEW_HALF_WIDTH, VIEW_HALF_HEIGHT)),
            map,
            entities: SlotMap::with_key(),
            by_kind: HashMap::new(),
            emitters: Vec::new(),
            physics: PhysicsSystem::new(physics),
        };
        for spawn in &data.spawns {
            let (x, y) = spawn.world_position(physics.tile_size);
            context.spawn(Entity::spawn(spawn.kind, x, y, physics.tile_size));
        }

        log::info!(
            "Level built: {}x{} tiles, {} entities",
            data.width,
            data.height,
            context.entities.len()
        );
        Ok(context)
    }

    /// Load and build a level file
    pub fn load(path: impl AsRef<Path>, physics: &PhysicsConfig) -> Result<Self, LevelError> {
        let path = path.as_ref();
        log::debug!("Loading level {}", path.display());
        let data = LevelData::load_from_file(path)?;
        Self::from_data(&data, physics)
    }

    /// Insert an entity; it replaces any earlier entity of the same kind
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let kind = entity.kind;
        let id = self.entities.insert(entity);
        if let Some(old) = self.by_kind.insert(kind, id) {
            log::warn!("Second {:?} spawn replaces the first", kind);
            self.entities.remove(old);
        }
        id
    }

    /// The tile map
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Mutable tile map access (layer visibility, tile edits)
    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    /// Handle of the entity of a kind
    pub fn id_of(&self, kind: EntityKind) -> Option<EntityId> {
        self.by_kind.get(&kind).copied()
    }

    /// Entity by handle
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutable entity by handle
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Entity of a kind
    pub fn get(&self, kind: EntityKind) -> Option<&Entity> {
        self.id_of(kind).and_then(|id| self.entities.get(id))
    }

    /// Mutable entity of a kind
    pub fn get_mut(&mut self, kind: EntityKind) -> Option<&mut Entity> {
        let id = self.id_of(kind)?;
        self.entities.get_mut(id)
    }

    /// All entities
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter()
    }

    /// Whether the entities of two kinds overlap; false if either is absent
    pub fn overlapping(&self, a: EntityKind, b: EntityKind) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.is_colliding(b),
            _ => false,
        }
    }

    /// Integrate one entity and resolve it against the map
    pub fn step_entity(&mut self, id: EntityId, dt: f32) -> Option<CollisionFlags> {
        let entity = self.entities.get_mut(id)?;
        Some(self.physics.step_entity(entity, &self.map, dt))
    }

    /// Integrate the entity of a kind
    pub fn step_kind(&mut self, kind: EntityKind, dt: f32) -> Option<CollisionFlags> {
        let id = self.id_of(kind)?;
        self.step_entity(id, dt)
    }

    /// The physics settings in use
    pub fn physics(&self) -> &PhysicsSystem {
        &self.physics
    }

    /// Add a particle emitter
    pub fn add_emitter(&mut self, emitter: ParticleEmitter) {
        self.emitters.push(emitter);
    }

    /// The level's emitters
    pub fn emitters(&self) -> &[ParticleEmitter] {
        &self.emitters
    }

    /// Advance every emitter
    pub fn update_particles(&mut self, dt: f32) {
        for emitter in &mut self.emitters {
            emitter.update(dt);
        }
    }

    /// Camera limits
    pub fn camera_bounds(&self) -> CameraBounds {
        self.camera
    }

    /// Camera center following `target`, kept inside the level
    pub fn camera_position(&self, target: Vec2) -> Vec2 {
        self.camera.clamp(target)
    }
}

impl Drop for LevelContext {
    fn drop(&mut self) {
        log::debug!("Level torn down ({} entities, {} emitters)", self.entities.len(), self.emitters.len());
    }
}
