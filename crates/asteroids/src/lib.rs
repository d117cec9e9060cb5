//! # Asteroids
//!
//! Gameplay layer of the arcade collision engine: components, response
//! handlers and prefabs for the player, asteroids, enemies, bullets and
//! power-ups.
//!
//! Frame order is [`systems::TimerSystem`] first, then the engine's
//! `CollisionSystem`.

#![warn(missing_docs)]

pub mod collision;
pub mod components;
pub mod config;
pub mod events;
pub mod prefabs;
pub mod systems;

pub use config::{GameConfig, GameplayConfig};
pub use prefabs::PrefabFactory;
pub use systems::TimerSystem;
