//! Stock entity definitions used when a level is populated

use super::{Entity, EntityKind};
use crate::animation::SheetSprite;
use crate::foundation::math::Vec2;

/// X coordinate pooled entities are parked at when removed from play
pub const OFFSCREEN_X: f32 = -100.0;

/// Player walk cycle: mostly idle, with a blink and a hop at the end
const PLAYER_FRAMES: [f32; 32] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5,
    0.0, 0.0, 0.5, 0.0, 0.5, 0.5, 0.5, 0.0,
];

impl Entity {
    /// Build the stock entity for `kind` at a spawn location
    ///
    /// `x`/`y` are the world coordinates of the spawn cell's top-left corner.
    /// Everything but the player is centered horizontally in that cell.
    pub fn spawn(kind: EntityKind, x: f32, y: f32, tile_size: f32) -> Self {
        let centered = Vec2::new(x + 0.5 * tile_size, y);
        match kind {
            EntityKind::Player => Entity::new(kind, Vec2::new(x, y), Vec2::new(0.165_714, 0.111_429))
                .with_animation(SheetSprite::new(0.5, 0.5, 1.0), PLAYER_FRAMES.to_vec(), 4.0),
            EntityKind::Key => Entity::new(kind, centered, Vec2::new(0.1714, 0.16)),
            EntityKind::Door => {
                let mut door = Entity::new(kind, centered, Vec2::new(0.2, 0.2)).into_static();
                door.locked = true;
                door
            }
            EntityKind::PointOfInterest => Entity::new(kind, centered, Vec2::new(0.3, 0.3)).into_static(),
            EntityKind::Enemy => Entity::new(kind, centered, Vec2::new(0.16, 0.137)),
            EntityKind::Coin => Entity::new(kind, centered, Vec2::new(0.1, 0.1)).into_static(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_player_is_not_centered() {
        let player = Entity::spawn(EntityKind::Player, 0.4, -0.6, 0.2);
        assert_eq!(player.position, Vec2::new(0.4, -0.6));
        assert!(!player.is_static);
        assert_eq!(player.animator.frame_count(), 16);
    }

    #[test]
    fn test_props_are_centered_in_cell() {
        let key = Entity::spawn(EntityKind::Key, 0.4, -0.6, 0.2);
        assert_relative_eq!(key.position.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(key.home.x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_doors_start_locked_and_static() {
        let door = Entity::spawn(EntityKind::Door, 0.0, 0.0, 0.2);
        assert!(door.locked);
        assert!(door.is_static);
    }
}
