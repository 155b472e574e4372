//! Parsed level description
//!
//! [`LevelData`] is the fully-parsed form of a level: dimensions, one tile
//! grid per layer and the object layer's spawn records. It loads from
//! `.ron` or `.toml` through [`Config`].

use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::entity::EntityKind;
use crate::tilemap::LayerKind;

use super::LevelError;

/// Tile rows of one layer, top row first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerData {
    /// Which layer these rows fill
    pub kind: LayerKind,
    /// Level-file tile values, `0` for empty
    pub rows: Vec<Vec<u32>>,
}

/// An object-layer record, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Entity to place
    pub kind: EntityKind,
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl SpawnPoint {
    /// Create a spawn record
    pub fn new(kind: EntityKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }

    /// Top-left corner of the spawn cell in world units
    pub fn world_position(&self, tile_size: f32) -> (f32, f32) {
        (self.x as f32 * tile_size, self.y as f32 * -tile_size)
    }
}

/// A complete level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelData {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Tile layers; the base layer is required
    pub layers: Vec<LayerData>,
    /// Entities to place
    pub spawns: Vec<SpawnPoint>,
}

impl LevelData {
    /// Create an empty level of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Add a layer
    pub fn with_layer(mut self, kind: LayerKind, rows: Vec<Vec<u32>>) -> Self {
        self.layers.push(LayerData { kind, rows });
        self
    }

    /// Add a spawn record
    pub fn with_spawn(mut self, kind: EntityKind, x: i32, y: i32) -> Self {
        self.spawns.push(SpawnPoint::new(kind, x, y));
        self
    }

    /// The rows of a layer, if present
    ///
    /// When a layer appears more than once the last one wins.
    pub fn layer(&self, kind: LayerKind) -> Option<&LayerData> {
        self.layers.iter().rev().find(|layer| layer.kind == kind)
    }

    /// Spawn records of one kind, in file order
    pub fn spawns_of(&self, kind: EntityKind) -> impl Iterator<Item = &SpawnPoint> + '_ {
        self.spawns.iter().filter(move |spawn| spawn.kind == kind)
    }

    /// Check the header, layer sizes and the player spawn
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::MissingDimensions { width: self.width, height: self.height });
        }
        let expected = self.width * self.height;
        for layer in &self.layers {
            let actual: usize = layer.rows.iter().map(Vec::len).sum();
            if actual != expected || layer.rows.len() != self.height {
                return Err(LevelError::GridSize { layer: layer.kind, expected, actual });
            }
        }
        if self.layer(LayerKind::Base).is_none() {
            return Err(LevelError::MissingLayer(LayerKind::Base));
        }
        if self.spawns_of(EntityKind::Player).next().is_none() {
            return Err(LevelError::MissingSpawn(EntityKind::Player));
        }
        Ok(())
    }
}

impl Config for LevelData {}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_level() -> LevelData {
        LevelData::new(3, 2)
            .with_layer(LayerKind::Base, vec![vec![0, 0, 0], vec![114, 114, 114]])
            .with_spawn(EntityKind::Player, 1, 0)
    }

    #[test]
    fn test_valid_level() {
        assert!(small_level().validate().is_ok());
    }

    #[test]
    fn test_missing_header_rejected() {
        let level = LevelData { width: 0, ..small_level() };
        assert!(matches!(level.validate(), Err(LevelError::MissingDimensions { width: 0, height: 2 })));
    }

    #[test]
    fn test_short_layer_rejected() {
        let level = small_level().with_layer(LayerKind::Overlay, vec![vec![1, 2, 3], vec![4, 5]]);
        match level.validate() {
            Err(LevelError::GridSize { layer, expected, actual }) => {
                assert_eq!(layer, LayerKind::Overlay);
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_base_layer_and_player_required() {
        let mut level = small_level();
        level.layers.clear();
        assert!(matches!(level.validate(), Err(LevelError::MissingLayer(LayerKind::Base))));

        let mut level = small_level();
        level.spawns.clear();
        assert!(matches!(level.validate(), Err(LevelError::MissingSpawn(EntityKind::Player))));
    }

    #[test]
    fn test_spawn_world_position() {
        let spawn = SpawnPoint::new(EntityKind::Key, 3, 2);
        let (x, y) = spawn.world_position(0.2);
        approx::assert_relative_eq!(x, 0.6, epsilon = 1e-6);
        approx::assert_relative_eq!(y, -0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_ron_level_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.ron");
        std::fs::write(
            &path,
            r#"(
                width: 2,
                height: 1,
                layers: [(kind: base, rows: [[0, 114]])],
                spawns: [(kind: player, x: 0, y: 0), (kind: poi, x: 1, y: 0)],
            )"#,
        )
        .unwrap();

        let level = LevelData::load_from_file(&path).unwrap();
        assert_eq!(level.width, 2);
        assert_eq!(level.layer(LayerKind::Base).unwrap().rows, vec![vec![0, 114]]);
        assert_eq!(level.spawns[1].kind, EntityKind::PointOfInterest);
        assert!(level.validate().is_ok());
    }
}
