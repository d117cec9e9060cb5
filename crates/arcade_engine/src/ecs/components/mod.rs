//! ECS Components module
//!
//! Components the collision system reads every frame

pub mod transform;
pub mod collision;

pub use transform::TransformComponent;
pub use collision::ColliderComponent;
