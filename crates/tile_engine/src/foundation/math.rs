//! Math utilities and types
//!
//! Provides the vector types used by the simulation. World space is 2D with
//! +Y pointing up; one tile is [`crate::tilemap::TILE_SIZE`] units wide.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec4;

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    ///
    /// `t` is not clamped; callers that need a bounded blend clamp it first.
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        (1.0 - t) * a + t * b
    }

    /// Component-wise linear interpolation of two RGBA colors
    pub fn lerp_color(a: Vec4, b: Vec4, t: f32) -> Vec4 {
        Vec4::new(
            lerp(a.x, b.x, t),
            lerp(a.y, b.y, t),
            lerp(a.z, b.z, t),
            lerp(a.w, b.w, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_relative_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_relative_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_lerp_color_midpoint() {
        let start = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let end = Vec4::new(0.0, 0.0, 1.0, 0.2);
        let mid = lerp_color(start, end, 0.5);
        assert_relative_eq!(mid, Vec4::new(0.5, 0.0, 0.5, 0.6), epsilon = 1e-6);
    }
}
