//! Math utilities and types
//!
//! Provides the 2D math types used by the arcade simulation. Everything is
//! expressed in world units on the XY plane.

use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned rectangle describing the playable area of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Minimum corner (inclusive)
    pub min: Vec2,
    /// Maximum corner (inclusive)
    pub max: Vec2,
}

impl Bounds2 {
    /// Create bounds from two corners (order does not matter)
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Bounds starting at the origin with the given size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::zeros(), Vec2::new(width, height))
    }

    /// Width of the bounds
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the bounds
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether a point lies inside the bounds
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::from_size(1024.0, 768.0)
    }
}

/// Common math utilities
pub mod utils {
    use super::Vec2;
    use nalgebra::Rotation2;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Rotate a vector counter-clockwise by `angle` radians
    pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
        if angle == 0.0 {
            return v;
        }
        Rotation2::new(angle) * v
    }

    /// Perpendicular of a vector (rotated +90 degrees)
    pub fn perp(v: Vec2) -> Vec2 {
        Vec2::new(-v.y, v.x)
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(a: Vec2, b: Vec2) -> f32 {
        a.x * b.y - a.y * b.x
    }
}
