//! # Collision Configuration
//!
//! Tunables for the collision pipeline. Loaded from TOML or RON through the
//! [`Config`] trait and validated on load.
//!
//! ```toml
//! cell_size = 64.0
//! world_width = 1024.0
//! world_height = 768.0
//! polygon_narrow_phase = true
//! log_frame_stats = false
//!
//! [[policy_overrides]]
//! a = "ENEMY"
//! b = "OBSTACLE"
//! allowed = true
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Bounds2;
use crate::physics::collision_layers::{CollisionPolicy, PolicyOverride};
use crate::spatial::DEFAULT_CELL_SIZE;

/// Collision pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Spatial grid cell edge length
    pub cell_size: f32,
    /// Width of the playable area
    pub world_width: f32,
    /// Height of the playable area
    pub world_height: f32,
    /// Use convex outlines when entities carry them
    pub polygon_narrow_phase: bool,
    /// Log a summary line every frame at debug level
    pub log_frame_stats: bool,
    /// Changes applied on top of the standard policy table
    pub policy_overrides: Vec<PolicyOverride>,
}

impl CollisionConfig {
    /// Playable area
    pub fn bounds(&self) -> Bounds2 {
        Bounds2::from_size(self.world_width, self.world_height)
    }

    /// Standard policy with the configured overrides applied
    pub fn build_policy(&self) -> CollisionPolicy {
        CollisionPolicy::standard().with_overrides(&self.policy_overrides)
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        let bounds = Bounds2::default();
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            world_width: bounds.width(),
            world_height: bounds.height(),
            polygon_narrow_phase: true,
            log_frame_stats: false,
            policy_overrides: Vec::new(),
        }
    }
}

impl Config for CollisionConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(format!("Cell size must be positive, got {}", self.cell_size));
        }

        let finite = self.world_width.is_finite() && self.world_height.is_finite();
        if !(finite && self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(format!(
                "World size must be positive and finite, got {}x{}",
                self.world_width, self.world_height
            ));
        }

        Ok(())
    }
}
