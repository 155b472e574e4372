//! Vertex data for drawing tile layers
//!
//! The renderer uploads these buffers as-is: six vertices (two triangles) per
//! non-empty tile, with UVs into a 14x14 spritesheet.

use bytemuck::{Pod, Zeroable};

use super::grid::{LayerKind, TileGrid, TileMap};

/// Spritesheet columns
pub const SPRITE_COUNT_X: u32 = 14;

/// Spritesheet rows
pub const SPRITE_COUNT_Y: u32 = 14;

/// UV extent of one sheet cell
///
/// Slightly under `1 / 14` to skip the padding baked into the sheet.
pub const SHEET_CELL_UV: f32 = 0.069_444_444;

/// One vertex of a tile quad
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TileVertex {
    /// World-space position
    pub position: [f32; 2],
    /// Spritesheet coordinates
    pub tex_coord: [f32; 2],
}

/// Top-left UV of a tile index (level-file numbering; `0` has no UV)
pub fn tile_uv(tile: u32) -> Option<(f32, f32)> {
    let cell = tile.checked_sub(1)?;
    let u = (cell % SPRITE_COUNT_X) as f32 / SPRITE_COUNT_X as f32;
    let v = (cell / SPRITE_COUNT_X) as f32 / SPRITE_COUNT_Y as f32;
    Some((u, v))
}

fn push_quad(vertices: &mut Vec<TileVertex>, col: usize, row: usize, tile: u32, tile_size: f32) {
    let Some((u, v)) = tile_uv(tile) else {
        return;
    };
    let left = tile_size * col as f32;
    let top = -tile_size * row as f32;
    let right = left + tile_size;
    let bottom = top - tile_size;
    let (u1, v1) = (u + SHEET_CELL_UV, v + SHEET_CELL_UV);

    let corners = [
        ([left, top], [u, v]),
        ([left, bottom], [u, v1]),
        ([right, bottom], [u1, v1]),
        ([left, top], [u, v]),
        ([right, bottom], [u1, v1]),
        ([right, top], [u1, v]),
    ];
    vertices.extend(corners.iter().map(|(position, tex_coord)| TileVertex {
        position: *position,
        tex_coord: *tex_coord,
    }));
}

fn build_grid_mesh(grid: &TileGrid, tile_size: f32) -> Vec<TileVertex> {
    let mut vertices = Vec::new();
    for (col, row, tile) in grid.occupied() {
        push_quad(&mut vertices, col, row, tile, tile_size);
    }
    vertices
}

impl TileMap {
    /// Build the vertex buffer for one layer; empty if the layer is absent
    pub fn build_mesh(&self, kind: LayerKind) -> Vec<TileVertex> {
        self.layer(kind)
            .map(|grid| build_grid_mesh(grid, self.tile_size()))
            .unwrap_or_default()
    }
}
