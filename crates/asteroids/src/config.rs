//! Game configuration
//!
//! Gameplay tunables plus the engine's collision settings, loadable from
//! TOML or RON through the engine's [`Config`] trait.

use crate::components::AsteroidSize;
use arcade_engine::core::config::{CollisionConfig, Config};
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Collision pipeline settings
    pub collision: CollisionConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Starting lives
    pub starting_lives: u32,

    /// Player health per life
    pub player_health: u32,

    /// Invulnerability after losing a life (seconds)
    pub respawn_invulnerability: f32,

    /// Length of the damage flicker cue (seconds)
    pub damage_flicker_duration: f32,

    /// Hits a large asteroid takes
    pub large_asteroid_health: u32,

    /// Hits a medium asteroid takes
    pub medium_asteroid_health: u32,

    /// Hits a small asteroid takes
    pub small_asteroid_health: u32,

    /// Enemy health
    pub enemy_health: u32,

    /// Damage dealt by a bullet to enemies
    pub bullet_damage: u32,

    /// Bullet lifetime (seconds)
    pub bullet_lifetime: f32,

    /// Shield power-up duration (seconds)
    pub shield_duration: f32,
}

impl GameplayConfig {
    /// Health for an asteroid of the given size
    pub fn asteroid_health(&self, size: AsteroidSize) -> u32 {
        match size {
            AsteroidSize::Large => self.large_asteroid_health,
            AsteroidSize::Medium => self.medium_asteroid_health,
            AsteroidSize::Small => self.small_asteroid_health,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.starting_lives == 0 {
            return Err("Starting lives must be at least 1".to_string());
        }

        if self.player_health == 0 || self.enemy_health == 0 {
            return Err("Player and enemy health must be at least 1".to_string());
        }

        if [self.large_asteroid_health, self.medium_asteroid_health, self.small_asteroid_health].contains(&0) {
            return Err("Asteroid health must be at least 1".to_string());
        }

        let durations = [
            ("respawn_invulnerability", self.respawn_invulnerability),
            ("damage_flicker_duration", self.damage_flicker_duration),
            ("bullet_lifetime", self.bullet_lifetime),
            ("shield_duration", self.shield_duration),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number of seconds, got {value}"));
            }
        }

        Ok(())
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            player_health: 3,
            respawn_invulnerability: 2.0,
            damage_flicker_duration: 0.3,
            large_asteroid_health: 3,
            medium_asteroid_health: 2,
            small_asteroid_health: 1,
            enemy_health: 2,
            bullet_damage: 1,
            bullet_lifetime: 3.0,
            shield_duration: 5.0,
        }
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), String> {
        self.gameplay.validate()?;
        self.collision.validate()
    }
}

impl GameConfig {
    /// Load configuration from file or return default if it cannot be loaded
    pub fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default game configuration ({path}: {e})");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let text = r#"
            [gameplay]
            starting_lives = 5
            large_asteroid_health = 4

            [collision]
            cell_size = 32.0
        "#;
        let config = GameConfig::from_str_with_format(text, "game.toml").unwrap();
        assert_eq!(config.gameplay.starting_lives, 5);
        assert_eq!(config.gameplay.asteroid_health(AsteroidSize::Large), 4);
        assert_eq!(config.gameplay.player_health, 3);
        assert_eq!(config.collision.cell_size, 32.0);
    }

    #[test]
    fn test_rejects_zero_lives_and_negative_durations() {
        let mut config = GameConfig::default();
        config.gameplay.starting_lives = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.gameplay.shield_duration = -1.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.collision.cell_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = GameConfig::load_or_default("/nonexistent/asteroids/game.toml");
        assert_eq!(config, GameConfig::default());
    }
}
