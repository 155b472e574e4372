//! Entity-vs-tilemap collision resolution
//!
//! Each pass probes the midpoints of two opposite edges of the entity
//! against the collision layer. A probe that lands in a solid tile stops the
//! entity on that axis and pushes it back out past the tile boundary by
//! `epsilon`, so floating-point residue cannot re-trigger the probe on the
//! next tick. Run the Y pass before the X pass, with integration of the
//! matching axis in front of each.

use crate::core::config::COLLISION_EPSILON;
use crate::entity::{CollisionFlags, Entity};
use crate::tilemap::TileMap;

/// Resolves penetration of entities into solid tiles, one axis at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilemapResolver {
    epsilon: f32,
}

impl TilemapResolver {
    /// Create a resolver with the given push-out distance
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Push-out distance past a tile boundary
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Vertical pass: probe the top and bottom edge midpoints
    ///
    /// Clears `TOP`/`BOTTOM`, then sets whichever probe hit. Horizontal
    /// position and velocity are never touched. Returns the flags this pass
    /// set.
    pub fn resolve_y(&self, entity: &mut Entity, map: &TileMap) -> CollisionFlags {
        entity.collisions.remove(CollisionFlags::VERTICAL);
        let tile_size = map.tile_size();
        let half = entity.half_extents();

        let probe_x = entity.position.x;
        let top = entity.position.y + half.y;
        if let Some((_, row)) = map.solid_cell_at(probe_x, top) {
            let tile_bottom = map.row_top(row) - tile_size;
            entity.velocity.y = 0.0;
            entity.collisions.insert(CollisionFlags::TOP);
            entity.position.y -= (top - tile_bottom) + self.epsilon;
            log::trace!("{:?} hit ceiling tile row {}", entity.kind, row);
        }

        let bottom = entity.position.y - half.y;
        if let Some((_, row)) = map.solid_cell_at(probe_x, bottom) {
            let tile_top = map.row_top(row);
            entity.velocity.y = 0.0;
            entity.collisions.insert(CollisionFlags::BOTTOM);
            entity.position.y += (tile_top - bottom) + self.epsilon;
            log::trace!("{:?} landed on tile row {}", entity.kind, row);
        }

        entity.collisions & CollisionFlags::VERTICAL
    }

    /// Horizontal pass: probe the left and right edge midpoints
    ///
    /// Clears `LEFT`/`RIGHT`, then sets whichever probe hit. Vertical
    /// position and velocity are never touched. Returns the flags this pass
    /// set.
    pub fn resolve_x(&self, entity: &mut Entity, map: &TileMap) -> CollisionFlags {
        entity.collisions.remove(CollisionFlags::HORIZONTAL);
        let tile_size = map.tile_size();
        let half = entity.half_extents();

        let probe_y = entity.position.y;
        let left = entity.position.x - half.x;
        if let Some((col, _)) = map.solid_cell_at(left, probe_y) {
            let tile_right = map.column_left(col) + tile_size;
            entity.velocity.x = 0.0;
            entity.collisions.insert(CollisionFlags::LEFT);
            entity.position.x += (tile_right - left) + self.epsilon;
            log::trace!("{:?} hit wall tile column {} on the left", entity.kind, col);
        }

        let right = entity.position.x + half.x;
        if let Some((col, _)) = map.solid_cell_at(right, probe_y) {
            let tile_left = map.column_left(col);
            entity.velocity.x = 0.0;
            entity.collisions.insert(CollisionFlags::RIGHT);
            entity.position.x -= (right - tile_left) + self.epsilon;
            log::trace!("{:?} hit wall tile column {} on the right", entity.kind, col);
        }

        entity.collisions & CollisionFlags::HORIZONTAL
    }
}

impl Default for TilemapResolver {
    fn default() -> Self {
        Self::new(COLLISION_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::foundation::math::Vec2;
    use crate::tilemap::TileGrid;
    use approx::assert_relative_eq;

    const SOLID: u32 = 114;

    fn map_with(cells: &[(i64, i64)]) -> TileMap {
        let mut grid = TileGrid::empty(10, 10).unwrap();
        for (col, row) in cells {
            grid.set(*col, *row, SOLID);
        }
        TileMap::with_defaults(grid)
    }

    fn body_at(x: f32, y: f32) -> Entity {
        Entity::new(EntityKind::Player, Vec2::new(x, y), Vec2::new(0.1, 0.2))
    }

    #[test]
    fn test_open_space_is_untouched() {
        let map = map_with(&[(0, 9)]);
        let resolver = TilemapResolver::default();
        let mut entity = body_at(1.0, -1.0);
        entity.velocity = Vec2::new(0.3, -0.4);
        let before = entity.clone();

        assert!(resolver.resolve_y(&mut entity, &map).is_empty());
        assert!(resolver.resolve_x(&mut entity, &map).is_empty());
        assert_eq!(entity.position, before.position);
        assert_eq!(entity.velocity, before.velocity);
        assert!(entity.collisions.is_empty());
    }

    #[test]
    fn test_landing_on_a_tile() {
        // Bottom edge 0.0005 below the top of the tile at row 1, col 5
        let map = map_with(&[(5, 1)]);
        let resolver = TilemapResolver::default();
        let mut entity = body_at(1.0, -0.1005);
        entity.velocity = Vec2::new(0.25, -2.0);

        let flags = resolver.resolve_y(&mut entity, &map);
        assert_eq!(flags, CollisionFlags::BOTTOM);
        assert!(entity.collided_bottom());
        assert_eq!(entity.velocity.y, 0.0);
        let bottom_edge = entity.position.y - entity.half_extents().y;
        assert!(bottom_edge >= -0.2);
        assert_relative_eq!(bottom_edge, -0.2 + 0.001, epsilon = 1e-5);
        assert_eq!(entity.velocity.x, 0.25);
        assert_eq!(entity.position.x, 1.0);
    }

    #[test]
    fn test_hitting_a_ceiling() {
        // Tile at row 2 spans y in [-0.6, -0.4]; top edge pokes into it
        let map = map_with(&[(5, 2)]);
        let resolver = TilemapResolver::default();
        let mut entity = body_at(1.0, -0.65);
        entity.velocity.y = 1.0;

        let flags = resolver.resolve_y(&mut entity, &map);
        assert_eq!(flags, CollisionFlags::TOP);
        assert_eq!(entity.velocity.y, 0.0);
        let top_edge = entity.position.y + entity.half_extents().y;
        assert_relative_eq!(top_edge, -0.6 - 0.001, epsilon = 1e-5);
    }

    #[test]
    fn test_walls_on_either_side() {
        let resolver = TilemapResolver::default();

        let map = map_with(&[(4, 5)]);
        let mut entity = body_at(1.02, -1.1);
        entity.velocity = Vec2::new(-1.0, 0.5);
        let flags = resolver.resolve_x(&mut entity, &map);
        assert_eq!(flags, CollisionFlags::LEFT);
        assert_eq!(entity.velocity, Vec2::new(0.0, 0.5));
        assert_relative_eq!(entity.position.x - 0.05, 1.0 + 0.001, epsilon = 1e-5);
        assert_eq!(entity.position.y, -1.1);

        let map = map_with(&[(6, 5)]);
        let mut entity = body_at(1.18, -1.1);
        entity.velocity.x = 1.0;
        let flags = resolver.resolve_x(&mut entity, &map);
        assert_eq!(flags, CollisionFlags::RIGHT);
        assert_relative_eq!(entity.position.x + 0.05, 1.2 - 0.001, epsilon = 1e-5);
    }

    #[test]
    fn test_flags_are_not_sticky() {
        let map = map_with(&[(5, 1)]);
        let resolver = TilemapResolver::default();
        let mut entity = body_at(1.0, -0.1005);
        resolver.resolve_y(&mut entity, &map);
        assert!(entity.collided_bottom());

        entity.position.y = -1.0;
        resolver.resolve_y(&mut entity, &map);
        assert!(!entity.collided_bottom());
    }

    #[test]
    fn test_passes_only_clear_their_own_axis() {
        let map = map_with(&[(5, 1)]);
        let resolver = TilemapResolver::default();
        let mut entity = body_at(1.0, -0.1005);
        resolver.resolve_y(&mut entity, &map);
        resolver.resolve_x(&mut entity, &map);
        assert!(entity.collided_bottom());
        assert!(!entity.collided_left());
    }

    #[test]
    fn test_probe_outside_map_is_open() {
        let map = map_with(&[(0, 0)]);
        let resolver = TilemapResolver::default();
        let mut entity = body_at(-0.5, 0.5);
        entity.velocity = Vec2::new(-1.0, 1.0);
        resolver.resolve_y(&mut entity, &map);
        resolver.resolve_x(&mut entity, &map);
        assert!(entity.collisions.is_empty());
        assert_eq!(entity.velocity, Vec2::new(-1.0, 1.0));
    }
}
