//! Physical actors
//!
//! An [`Entity`] carries its kinematic state, its extents, the collision
//! flags written by the tilemap resolver and an attached sprite animator.
//! Integration is split per axis so tile collision can be resolved between
//! the vertical and horizontal moves (see [`crate::physics::step_entity`]).

pub mod flags;
pub mod prefab;

pub use flags::CollisionFlags;
pub use prefab::OFFSCREEN_X;

use serde::{Serialize, Deserialize};

use crate::animation::{SheetSprite, SpriteSheetAnimator};
use crate::core::config::HORIZONTAL_DAMPING;
use crate::foundation::math::{utils::lerp, Vec2};

/// Named entity types placed by a level's object layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// The controllable character
    Player,
    /// Pickup that unlocks the level's door
    Key,
    /// Exit of the level
    Door,
    /// Spot that shows flavor text when touched
    #[serde(rename = "poi")]
    PointOfInterest,
    /// Hostile actor
    Enemy,
    /// Collectible
    Coin,
}

impl EntityKind {
    /// Every kind, in spawn order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Player,
        EntityKind::Key,
        EntityKind::Door,
        EntityKind::PointOfInterest,
        EntityKind::Enemy,
        EntityKind::Coin,
    ];
}

/// World transform handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTransform {
    /// Center in world space
    pub position: Vec2,
    /// Signed scale; X is negative when facing left
    pub scale: Vec2,
    /// Whether the sprite faces +X
    pub facing_right: bool,
}

/// A physical actor in a level
#[derive(Debug, Clone)]
pub struct Entity {
    /// What this entity is
    pub kind: EntityKind,
    /// Center in world units
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    /// Units per second squared
    pub acceleration: Vec2,
    /// Full extents before sprite scale
    pub size: Vec2,
    /// Immovable: integration is skipped
    pub is_static: bool,
    /// Sides touched by the last resolver pass
    pub collisions: CollisionFlags,
    /// Sprite sub-image description
    pub sprite: SheetSprite,
    /// Frame offsets of the sprite
    pub animator: SpriteSheetAnimator,
    /// Animation frames per second
    pub anim_fps: f32,
    /// Time accumulated toward the next animation frame
    pub elapsed_since_last_frame: f32,
    /// Sprite orientation
    pub facing_right: bool,
    /// Squash-and-stretch scale driven by vertical speed
    pub squish: Vec2,
    /// Doors: whether the door refuses to open
    pub locked: bool,
    /// Enemies: whether the enemy is chasing
    pub angry: bool,
    /// Enemies: position to return to when calm
    pub home: Vec2,
    parked: bool,
}

impl Entity {
    /// Create a dynamic entity of the given kind and size at `position`
    pub fn new(kind: EntityKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            size,
            is_static: false,
            collisions: CollisionFlags::empty(),
            sprite: SheetSprite::default(),
            animator: SpriteSheetAnimator::still(0.0, 0.0),
            anim_fps: 1.0,
            elapsed_since_last_frame: 0.0,
            facing_right: true,
            squish: Vec2::new(1.0, 1.0),
            locked: false,
            angry: false,
            home: position,
            parked: false,
        }
    }

    /// Make the entity immovable
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Attach an animation
    pub fn with_animation(mut self, sprite: SheetSprite, offsets: Vec<f32>, fps: f32) -> Self {
        self.sprite = sprite;
        self.animator = SpriteSheetAnimator::new(offsets);
        self.anim_fps = fps;
        self
    }

    /// Half width and half height, sprite scale included
    pub fn half_extents(&self) -> Vec2 {
        self.size * self.sprite.scale * 0.5
    }

    /// Whether the last resolver pass hit something above
    pub fn collided_top(&self) -> bool {
        self.collisions.contains(CollisionFlags::TOP)
    }

    /// Whether the last resolver pass hit something below
    pub fn collided_bottom(&self) -> bool {
        self.collisions.contains(CollisionFlags::BOTTOM)
    }

    /// Whether the last resolver pass hit something to the left
    pub fn collided_left(&self) -> bool {
        self.collisions.contains(CollisionFlags::LEFT)
    }

    /// Whether the last resolver pass hit something to the right
    pub fn collided_right(&self) -> bool {
        self.collisions.contains(CollisionFlags::RIGHT)
    }

    /// Horizontal integration with damping toward rest
    ///
    /// `v += a*dt`, then `v = lerp(v, 0, min(1, 2*dt))`, then `x += v*dt`.
    pub fn integrate_x(&mut self, dt: f32) {
        self.integrate_x_damped(dt, HORIZONTAL_DAMPING);
    }

    /// Horizontal integration with a custom damping rate
    pub fn integrate_x_damped(&mut self, dt: f32, damping: f32) {
        if self.is_static {
            return;
        }
        self.velocity.x += self.acceleration.x * dt;
        self.velocity.x = lerp(self.velocity.x, 0.0, (damping * dt).min(1.0));
        self.position.x += self.velocity.x * dt;
    }

    /// Vertical integration, undamped
    pub fn integrate_y(&mut self, dt: f32) {
        if self.is_static {
            return;
        }
        self.velocity.y += self.acceleration.y * dt;
        self.position.y += self.velocity.y * dt;
    }

    /// Advance the sprite animation and the squash-and-stretch scale
    ///
    /// The animator steps once whenever at least `1 / anim_fps` seconds have
    /// accumulated; the accumulator then restarts from zero.
    pub fn animate(&mut self, elapsed: f32) {
        self.elapsed_since_last_frame += elapsed;
        if self.anim_fps > 0.0 && self.elapsed_since_last_frame >= 1.0 / self.anim_fps {
            self.animator.advance();
            self.elapsed_since_last_frame = 0.0;
        }

        let stretch = (self.velocity.y / 2.0).abs();
        self.squish = Vec2::new(lerp(1.0, 0.7, stretch), lerp(1.0, 1.5, stretch));
    }

    /// Axis-aligned overlap test against another entity
    ///
    /// Touching edges count as colliding.
    pub fn is_colliding(&self, other: &Entity) -> bool {
        crate::physics::aabb::Aabb::from_entity(self).intersects(&crate::physics::aabb::Aabb::from_entity(other))
    }

    /// Move a pooled entity out of play without deallocating it
    pub fn park_offscreen(&mut self) {
        self.position.x = OFFSCREEN_X;
        self.velocity = Vec2::zeros();
        self.acceleration = Vec2::zeros();
        self.is_static = true;
        self.parked = true;
    }

    /// Whether the entity has been parked by [`Entity::park_offscreen`]
    pub fn is_parked(&self) -> bool {
        self.parked
    }

    /// World transform for the renderer
    pub fn transform(&self) -> EntityTransform {
        let mut scale = self.size * self.sprite.scale;
        if !self.facing_right {
            scale.x = -scale.x;
        }
        if self.kind == EntityKind::Player {
            scale = scale.component_mul(&self.squish);
        }
        EntityTransform {
            position: self.position,
            scale,
            facing_right: self.facing_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body() -> Entity {
        Entity::new(EntityKind::Player, Vec2::new(1.0, -1.0), Vec2::new(0.2, 0.2))
    }

    #[test]
    fn test_integrate_y_applies_acceleration() {
        let mut entity = body();
        entity.acceleration = Vec2::new(0.0, -2.0);
        entity.integrate_y(0.1);
        assert_relative_eq!(entity.velocity.y, -0.2, epsilon = 1e-6);
        assert_relative_eq!(entity.position.y, -1.02, epsilon = 1e-6);
        assert_eq!(entity.position.x, 1.0);
    }

    #[test]
    fn test_integrate_x_damps_toward_zero() {
        let mut entity = body();
        entity.velocity.x = 1.0;
        entity.integrate_x(0.1);
        // lerp(1.0, 0.0, 0.2)
        assert_relative_eq!(entity.velocity.x, 0.8, epsilon = 1e-6);
        assert_relative_eq!(entity.position.x, 1.08, epsilon = 1e-6);
        assert_eq!(entity.position.y, -1.0);
    }

    #[test]
    fn test_damping_factor_is_capped() {
        let mut entity = body();
        entity.velocity.x = 3.0;
        entity.integrate_x(1.0);
        assert_eq!(entity.velocity.x, 0.0);
        assert_eq!(entity.position.x, 1.0);
    }

    #[test]
    fn test_static_entities_do_not_move() {
        let mut entity = body().into_static();
        entity.velocity = Vec2::new(1.0, 1.0);
        entity.acceleration = Vec2::new(5.0, 5.0);
        entity.integrate_x(0.1);
        entity.integrate_y(0.1);
        assert_eq!(entity.position, Vec2::new(1.0, -1.0));
        assert_eq!(entity.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_animate_waits_for_frame_time() {
        let mut entity = body().with_animation(SheetSprite::new(0.5, 0.5, 1.0), vec![0.0, 0.0, 0.5, 0.0], 4.0);
        entity.animate(0.2);
        assert_eq!(entity.animator.cursor(), 0);
        entity.animate(0.05);
        assert_eq!(entity.animator.cursor(), 2);
        assert_eq!(entity.elapsed_since_last_frame, 0.0);
    }

    #[test]
    fn test_zero_fps_never_advances() {
        let mut entity = body().with_animation(SheetSprite::default(), vec![0.0, 0.0, 0.5, 0.0], 0.0);
        entity.animate(10.0);
        assert_eq!(entity.animator.cursor(), 0);
    }

    #[test]
    fn test_squish_follows_vertical_speed() {
        let mut entity = body();
        entity.velocity.y = -1.0;
        entity.animate(0.0);
        assert_relative_eq!(entity.squish.x, 0.85, epsilon = 1e-6);
        assert_relative_eq!(entity.squish.y, 1.25, epsilon = 1e-6);
    }

    #[test]
    fn test_transform_mirrors_when_facing_left() {
        let mut entity = Entity::new(EntityKind::Key, Vec2::zeros(), Vec2::new(0.2, 0.1));
        entity.facing_right = false;
        let transform = entity.transform();
        assert_relative_eq!(transform.scale.x, -0.2, epsilon = 1e-6);
        assert_relative_eq!(transform.scale.y, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_park_offscreen() {
        let mut entity = body();
        entity.velocity = Vec2::new(1.0, 1.0);
        entity.park_offscreen();
        assert!(entity.is_parked());
        assert!(entity.is_static);
        assert_eq!(entity.velocity, Vec2::zeros());
    }

    #[test]
    fn test_far_left_entity_is_not_parked() {
        let mut entity = body();
        entity.position.x = OFFSCREEN_X - 5.0;
        assert!(!entity.is_parked());
    }
}
