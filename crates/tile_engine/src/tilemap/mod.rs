//! Tile grids and the tilemap they form
//!
//! Level geometry is a set of rectangular grids of tile indices, one per
//! [`LayerKind`]. Indices use the level-file numbering: `0` is empty and
//! `n > 0` is cell `n - 1` of the shared spritesheet. Only the base layer
//! takes part in collision, and solidity is looked up by level-file value.
//!
//! Grid rows grow downward while world Y grows upward, so row `r` spans world
//! Y from `-r * tile_size` down to `-(r + 1) * tile_size`.

pub mod grid;
pub mod mesh;

pub use grid::{LayerKind, SolidTiles, TileGrid, TileGridError, TileMap};
pub use mesh::{tile_uv, TileVertex, SHEET_CELL_UV, SPRITE_COUNT_X, SPRITE_COUNT_Y};

/// Edge length of one tile in world units
pub const TILE_SIZE: f32 = 0.2;

/// Level-file tile values that block movement in the stock tileset
pub const DEFAULT_SOLID_TILES: [u32; 7] = [114, 100, 86, 72, 120, 177, 64];
