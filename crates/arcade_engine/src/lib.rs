//! # Arcade Engine
//!
//! The engine side of a 2D arcade game: an entity/component store and the
//! collision pipeline that runs on top of it.
//!
//! ## Features
//!
//! - **ECS Storage**: Generational entity ids with per-type component columns
//! - **Collision Policy**: Symmetric category table plus a group veto
//! - **Broad Phase**: Uniform spatial grid with deterministic pair ordering
//! - **Narrow Phase**: Strict circle tests, optional convex polygon refinement
//! - **Deferred Response**: Handlers return results; removals and side effects
//!   are applied once per frame
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_engine::prelude::*;
//!
//! let mut world = World::new();
//! let player = world.create_entity();
//! world.add_component(player, TransformComponent::at(100.0, 100.0, 10.0));
//! world.add_component(player, ColliderComponent::new(CollisionCategory::Player));
//!
//! let mut collisions = CollisionSystem::new(CollisionConfig::default());
//! let stats = collisions.update(&mut world, 1.0 / 60.0);
//! assert_eq!(stats.pairs_detected, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod error;

pub mod foundation;
pub mod ecs;
pub mod events;
pub mod physics;
pub mod spatial;

pub use error::CollisionError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{CollisionConfig, Config, ConfigError},
        ecs::{
            components::{ColliderComponent, TransformComponent},
            systems::{CollisionStats, CollisionSystem},
            Component, ComponentAccess, Entity, System, World,
        },
        error::CollisionError,
        events::{Event, EventArg, EventPublisher, EventSystem, EventType},
        foundation::{
            math::{Bounds2, Vec2},
            time::FrameTime,
        },
        physics::{
            ActionContext, CollisionCategory, CollisionGroups, CollisionPair, CollisionPolicy,
            CollisionResponse, CollisionResult, DeferredAction, ResponseContext, ResponseFn,
        },
    };
}
