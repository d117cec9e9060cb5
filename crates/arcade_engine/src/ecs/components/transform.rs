//! Transform component for the ECS system
//!
//! Pure data: where an entity is, how it is rotated, how far it reaches
//! (bounding radius) and, optionally, its convex outline in local space.

use crate::ecs::Component;
use crate::foundation::math::{utils, Vec2};
use crate::physics::collision::ConvexPolygon;

/// 2D transform consumed by the collision system
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec2,

    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,

    /// Bounding radius; authoritative for the broad phase and the circle test
    pub radius: f32,

    /// Optional convex outline, local space, in winding order
    pub outline: Option<Vec<Vec2>>,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            radius: 0.0,
            outline: None,
        }
    }
}

impl TransformComponent {
    /// Create a circle at a position (negative radii are clamped to zero)
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            ..Default::default()
        }
    }

    /// Convenience constructor from raw coordinates
    pub fn at(x: f32, y: f32, radius: f32) -> Self {
        Self::new(Vec2::new(x, y), radius)
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set the local-space outline
    ///
    /// An outline that is not a usable convex polygon is dropped here, once,
    /// and the entity collides as a circle.
    pub fn with_outline(mut self, outline: Vec<Vec2>) -> Self {
        match ConvexPolygon::try_new(outline.clone()) {
            Ok(_) => self.outline = Some(outline),
            Err(e) => {
                log::warn!("Dropping outline at {:?}: {e}", self.position);
                self.outline = None;
            }
        }
        self
    }

    /// Outline transformed into world space, if the entity has one
    pub fn world_outline(&self) -> Option<Vec<Vec2>> {
        self.outline.as_ref().map(|local| {
            local
                .iter()
                .map(|v| utils::rotate(*v, self.rotation) + self.position)
                .collect()
        })
    }
}
