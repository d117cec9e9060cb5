//! Primitive collision shapes and intersection algorithms
//!
//! Circles are the baseline collision volume. Overlap is strict: two circles
//! whose centres are exactly `r1 + r2` apart touch but do not collide.

use crate::foundation::math::Vec2;

/// A bounding circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// The center position of the circle in world space
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this circle overlaps another
    ///
    /// Compares squared distances so no square root is taken. Exact tangency
    /// is not an overlap.
    pub fn intersects(&self, other: &BoundingCircle) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }

    /// Project the circle onto an axis, returning `(min, max)`
    ///
    /// The axis does not need to be normalized.
    pub fn project(&self, axis: Vec2) -> (f32, f32) {
        let c = self.center.dot(&axis);
        let r = self.radius * axis.magnitude();
        (c - r, c + r)
    }
}
