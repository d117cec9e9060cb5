//! Abstract spatial query interface for broad-phase collision detection
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.2:
//! "Spatial partitioning schemes... allow us to quickly cull out pairs of
//! objects that cannot possibly be colliding."
//!
//! This abstraction allows swapping different spatial partitioning schemes
//! without changing the collision system. The index is rebuilt from scratch
//! every frame, so there is no incremental update or removal.

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Interface for spatial partitioning used in broad-phase collision detection
pub trait SpatialQuery: Send + Sync {
    /// Insert an entity at a position with a bounding radius
    fn insert(&mut self, entity: Entity, position: Vec2, radius: f32);

    /// Entities sharing at least one partition with `entity`, excluding it
    ///
    /// Returned sorted and without duplicates. Empty if `entity` was never
    /// inserted.
    fn query_nearby(&self, entity: Entity) -> Vec<Entity>;

    /// Entities whose partitions intersect the given circle's partitions
    fn query_circle(&self, center: Vec2, radius: f32) -> Vec<Entity>;

    /// Position and radius an entity was inserted with
    fn get_entity_data(&self, entity: Entity) -> Option<(Vec2, f32)>;

    /// Remove everything
    fn clear(&mut self);

    /// Number of distinct entities inserted
    fn entity_count(&self) -> usize;

    /// Number of non-empty partitions
    fn cell_count(&self) -> usize;
}
