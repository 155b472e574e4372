//! Contiguous tile grids, the solid-tile set and world/grid conversion

use serde::{Serialize, Deserialize};
use thiserror::Error;

use super::{DEFAULT_SOLID_TILES, TILE_SIZE};

/// Errors raised while building a grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileGridError {
    /// Width or height is zero
    #[error("Tile grid must be at least 1x1, got {width}x{height}")]
    EmptyDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Tile buffer does not match the declared dimensions
    #[error("Tile grid expects {expected} tiles, got {actual}")]
    SizeMismatch {
        /// `width * height`
        expected: usize,
        /// Tiles supplied
        actual: usize,
    },

    /// A row has the wrong number of columns
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        /// Offending row
        row: usize,
        /// Declared width
        expected: usize,
        /// Columns supplied
        actual: usize,
    },
}

/// Logical tile layers of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Collision geometry and background
    Base,
    /// Drawn over the base layer (e.g. darkness); can be hidden
    Overlay,
    /// Decoration removed once a level's objective is met
    Temporary,
}

impl LayerKind {
    /// All layers in draw order
    pub const ALL: [LayerKind; 3] = [LayerKind::Base, LayerKind::Overlay, LayerKind::Temporary];
}

/// A `width x height` grid of tile indices stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<u32>,
}

impl TileGrid {
    /// Create a grid from a row-major buffer
    pub fn new(width: usize, height: usize, tiles: Vec<u32>) -> Result<Self, TileGridError> {
        if width == 0 || height == 0 {
            return Err(TileGridError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if tiles.len() != expected {
            return Err(TileGridError::SizeMismatch { expected, actual: tiles.len() });
        }
        Ok(Self { width, height, tiles })
    }

    /// Create a grid of empty tiles
    pub fn empty(width: usize, height: usize) -> Result<Self, TileGridError> {
        Self::new(width, height, vec![0; width * height])
    }

    /// Create a grid from rows; every row must have `width` columns
    pub fn from_rows(width: usize, height: usize, rows: &[Vec<u32>]) -> Result<Self, TileGridError> {
        if rows.len() != height {
            return Err(TileGridError::SizeMismatch {
                expected: width * height,
                actual: rows.iter().map(Vec::len).sum(),
            });
        }
        let mut tiles = Vec::with_capacity(width * height);
        for (row, columns) in rows.iter().enumerate() {
            if columns.len() != width {
                return Err(TileGridError::RaggedRow { row, expected: width, actual: columns.len() });
            }
            tiles.extend_from_slice(columns);
        }
        Self::new(width, height, tiles)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Tile at `(col, row)`, or `None` outside the grid
    pub fn get(&self, col: i64, row: i64) -> Option<u32> {
        self.index(col, row).map(|i| self.tiles[i])
    }

    /// Overwrite the tile at `(col, row)`; returns false outside the grid
    pub fn set(&mut self, col: i64, row: i64, tile: u32) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Iterate `(col, row, tile)` over non-empty tiles
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile != 0)
            .map(move |(i, tile)| (i % self.width, i / self.width, *tile))
    }
}

/// The small fixed set of level-file tile values that block movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidTiles {
    indices: Vec<u32>,
}

impl SolidTiles {
    /// Create a solid set
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self { indices: indices.into() }
    }

    /// Whether tile value `tile` blocks movement
    pub fn contains(&self, tile: u32) -> bool {
        self.indices.iter().any(|solid| *solid == tile)
    }

    /// The solid indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

impl Default for SolidTiles {
    fn default() -> Self {
        Self::new(DEFAULT_SOLID_TILES.to_vec())
    }
}

/// The tile layers of one level plus the geometry needed to query them
#[derive(Debug, Clone)]
pub struct TileMap {
    tile_size: f32,
    solid: SolidTiles,
    base: TileGrid,
    overlay: Option<TileGrid>,
    temporary: Option<TileGrid>,
    overlay_visible: bool,
    temporary_visible: bool,
}

impl TileMap {
    /// Create a tilemap around its collision layer
    pub fn new(base: TileGrid, tile_size: f32, solid: SolidTiles) -> Self {
        Self {
            tile_size,
            solid,
            base,
            overlay: None,
            temporary: None,
            overlay_visible: true,
            temporary_visible: true,
        }
    }

    /// Tilemap with stock tile size and solid set
    pub fn with_defaults(base: TileGrid) -> Self {
        Self::new(base, TILE_SIZE, SolidTiles::default())
    }

    /// Attach or replace a non-collision layer
    ///
    /// Passing [`LayerKind::Base`] replaces the collision layer.
    pub fn set_layer(&mut self, kind: LayerKind, grid: TileGrid) -> Result<(), TileGridError> {
        if grid.width() != self.width() || grid.height() != self.height() {
            return Err(TileGridError::SizeMismatch {
                expected: self.width() * self.height(),
                actual: grid.width() * grid.height(),
            });
        }
        match kind {
            LayerKind::Base => self.base = grid,
            LayerKind::Overlay => self.overlay = Some(grid),
            LayerKind::Temporary => self.temporary = Some(grid),
        }
        Ok(())
    }

    /// A layer, if the level defines it
    pub fn layer(&self, kind: LayerKind) -> Option<&TileGrid> {
        match kind {
            LayerKind::Base => Some(&self.base),
            LayerKind::Overlay => self.overlay.as_ref(),
            LayerKind::Temporary => self.temporary.as_ref(),
        }
    }

    /// Mutable access to a layer
    pub fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut TileGrid> {
        match kind {
            LayerKind::Base => Some(&mut self.base),
            LayerKind::Overlay => self.overlay.as_mut(),
            LayerKind::Temporary => self.temporary.as_mut(),
        }
    }

    /// Whether the renderer should draw a layer
    pub fn is_layer_visible(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Base => true,
            LayerKind::Overlay => self.overlay_visible && self.overlay.is_some(),
            LayerKind::Temporary => self.temporary_visible && self.temporary.is_some(),
        }
    }

    /// Show or hide a decorative layer; the base layer is always shown
    pub fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) {
        match kind {
            LayerKind::Base => {}
            LayerKind::Overlay => self.overlay_visible = visible,
            LayerKind::Temporary => self.temporary_visible = visible,
        }
    }

    /// Columns in every layer
    pub fn width(&self) -> usize {
        self.base.width()
    }

    /// Rows in every layer
    pub fn height(&self) -> usize {
        self.base.height()
    }

    /// Edge length of a tile in world units
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// The solid tile set
    pub fn solid_tiles(&self) -> &SolidTiles {
        &self.solid
    }

    /// Grid cell `(col, row)` containing a world point
    pub fn world_to_tile(&self, world_x: f32, world_y: f32) -> (i64, i64) {
        (
            (world_x / self.tile_size).floor() as i64,
            (world_y / -self.tile_size).floor() as i64,
        )
    }

    /// World X of a column's left edge
    pub fn column_left(&self, col: i64) -> f32 {
        self.tile_size * col as f32
    }

    /// World Y of a row's top edge
    pub fn row_top(&self, row: i64) -> f32 {
        -self.tile_size * row as f32
    }

    /// Whether the collision tile at `(col, row)` is solid
    ///
    /// Cells outside the grid are open space.
    pub fn is_solid(&self, col: i64, row: i64) -> bool {
        self.base
            .get(col, row)
            .is_some_and(|tile| tile != 0 && self.solid.contains(tile))
    }

    /// The solid cell containing a world point, if any
    pub fn solid_cell_at(&self, world_x: f32, world_y: f32) -> Option<(i64, i64)> {
        let (col, row) = self.world_to_tile(world_x, world_y);
        self.is_solid(col, row).then_some((col, row))
    }

    /// World-space width and height of the map
    pub fn world_size(&self) -> (f32, f32) {
        (self.width() as f32 * self.tile_size, self.height() as f32 * self.tile_size)
    }
}
