//! Axis-aligned bounding boxes for entity-vs-entity overlap tests

use crate::entity::Entity;
use crate::foundation::math::Vec2;

/// A centered, axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Center in world space
    pub center: Vec2,
    /// Half width and half height
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a box from its center and half-extents
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// The box an entity occupies
    pub fn from_entity(entity: &Entity) -> Self {
        Self::new(entity.position, entity.half_extents())
    }

    /// Lower-left corner
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Upper-right corner
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Separating-axis test; boxes that share an edge intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x <= reach.x && delta.y <= reach.y
    }

    /// Whether a point lies inside or on the boundary
    pub fn contains_point(&self, point: Vec2) -> bool {
        let delta = (self.center - point).abs();
        delta.x <= self.half_extents.x && delta.y <= self.half_extents.y
    }
}
