//! Collision detection components for ECS
//!
//! Based on Game Engine Architecture 3rd Edition:
//! - Section 13.3: Collision Detection System
//! - Section 16.2: Component-based architecture

use crate::ecs::Component;
use crate::physics::collision_layers::{CollisionCategory, CollisionGroups};

/// Component that marks an entity as taking part in collision detection
///
/// Only entities with an active collider and a `TransformComponent` are
/// indexed by the broad phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderComponent {
    /// Category used by the policy table (GEA 13.3.8)
    pub category: CollisionCategory,

    /// Group memberships used by the resolution-time veto
    pub groups: CollisionGroups,

    /// Inactive colliders are skipped entirely
    pub active: bool,
}

impl Component for ColliderComponent {}

impl ColliderComponent {
    /// Create an active collider in the given category with no groups
    pub fn new(category: CollisionCategory) -> Self {
        Self {
            category,
            groups: CollisionGroups::empty(),
            active: true,
        }
    }

    /// Set group memberships
    pub fn with_groups(mut self, groups: CollisionGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Default for ColliderComponent {
    fn default() -> Self {
        Self::new(CollisionCategory::Default)
    }
}
