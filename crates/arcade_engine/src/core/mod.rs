//! # Core Engine Module
//!
//! Shared configuration for the engine's subsystems.
//!
//! ## Organization
//!
//! - **Config**: Collision pipeline configuration on top of the generic
//!   [`Config`] load/save trait

pub mod config;

pub use config::{CollisionConfig, Config, ConfigError};
