//! Physics module for collision detection and response
//!
//! - [`collision_layers`]: categories, groups and the policy table
//! - [`collision`]: narrow-phase geometry
//! - [`collision_system`]: broad-phase detector
//! - [`response`]: the handler contract and per-entity response tables
//! - [`resolver`]: dispatch of detected pairs and application of results

pub mod collision;
pub mod collision_layers;
pub mod collision_system;
pub mod resolver;
pub mod response;

pub use collision::{transforms_overlap, BoundingCircle, ConvexPolygon, WorldSpaceShape};
pub use collision_layers::{CollisionCategory, CollisionGroups, CollisionPolicy, PolicyOverride};
pub use collision_system::{BroadPhaseDetector, CollisionPair, DetectionStats};
pub use resolver::{CollisionResolver, ResolutionOutcome, ResolutionStats};
pub use response::{
    ActionContext, CollisionResponse, CollisionResult, DeferredAction, ResponseContext, ResponseFn,
};
