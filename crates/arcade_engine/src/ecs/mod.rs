//! Entity-Component-System implementation
//!
//! Provides the entity store and the components the collision pipeline
//! consumes.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod system;
pub mod systems;

pub use world::{ComponentAccess, World};
pub use entity::Entity;
pub use component::Component;
pub use system::System;
