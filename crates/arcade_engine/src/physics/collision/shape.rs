//! World-space collision shapes built from transforms
//!
//! A transform always yields a bounding circle. When polygon testing is on
//! and the transform carries a valid convex outline, the polygon refines the
//! circle; otherwise the circle alone decides.

use super::polygon::ConvexPolygon;
use super::primitives::BoundingCircle;
use crate::ecs::components::TransformComponent;

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, PartialEq)]
pub enum WorldSpaceShape {
    /// Bounding circle only
    Circle(BoundingCircle),
    /// Convex outline plus its bounding circle
    Polygon {
        /// Bounding circle, used as an early reject
        bounds: BoundingCircle,
        /// World-space outline
        polygon: ConvexPolygon,
    },
}

impl WorldSpaceShape {
    /// Build the shape for a transform
    pub fn from_transform(transform: &TransformComponent, use_polygons: bool) -> Self {
        let bounds = BoundingCircle::new(transform.position, transform.radius);
        if !use_polygons {
            return Self::Circle(bounds);
        }

        match transform.world_outline().map(ConvexPolygon::try_new) {
            Some(Ok(polygon)) => Self::Polygon { bounds, polygon },
            Some(Err(e)) => {
                // Builders already warned; this only happens for outlines set by hand.
                log::debug!("Ignoring outline at {:?}: {e}; using bounding circle", transform.position);
                Self::Circle(bounds)
            }
            None => Self::Circle(bounds),
        }
    }

    /// Get bounding circle
    pub fn bounding_circle(&self) -> BoundingCircle {
        match self {
            Self::Circle(circle) => *circle,
            Self::Polygon { bounds, .. } => *bounds,
        }
    }

    /// Test if this shape intersects with another shape
    pub fn intersects(&self, other: &WorldSpaceShape) -> bool {
        if !self.bounding_circle().intersects(&other.bounding_circle()) {
            return false;
        }

        match (self, other) {
            (Self::Circle(_), Self::Circle(_)) => true,
            (Self::Circle(circle), Self::Polygon { polygon, .. })
            | (Self::Polygon { polygon, .. }, Self::Circle(circle)) => polygon.intersects_circle(circle),
            (Self::Polygon { polygon: a, .. }, Self::Polygon { polygon: b, .. }) => a.intersects_polygon(b),
        }
    }
}

/// Narrow-phase test between two transforms
pub fn transforms_overlap(a: &TransformComponent, b: &TransformComponent, use_polygons: bool) -> bool {
    WorldSpaceShape::from_transform(a, use_polygons).intersects(&WorldSpaceShape::from_transform(b, use_polygons))
}
