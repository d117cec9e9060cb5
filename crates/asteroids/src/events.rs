//! Gameplay notifications
//!
//! Published through the engine's event system as `EventType::Custom`
//! events. Scoring, audio and the asteroid spawner listen for them.

use crate::components::{AsteroidSize, PowerUpKind};
use arcade_engine::prelude::*;

/// An asteroid was destroyed and should be replaced by smaller pieces
pub const ASTEROID_SPLIT: &str = "asteroid_split";
/// An enemy ship was destroyed
pub const ENEMY_DESTROYED: &str = "enemy_destroyed";
/// The player lost health or a life
pub const PLAYER_DAMAGED: &str = "player_damaged";
/// The player lost the last life
pub const PLAYER_DIED: &str = "player_died";
/// The player picked up a power-up
pub const POWERUP_COLLECTED: &str = "powerup_collected";
/// Two projectiles destroyed each other
pub const PROJECTILES_CANCELLED: &str = "projectiles_cancelled";

fn at(name: &'static str, entity: Entity, position: Vec2, timestamp: f64) -> Event {
    Event::new(EventType::Custom(name), timestamp)
        .with_arg("entity", EventArg::Entity(entity))
        .with_arg("position", EventArg::Position(position.x, position.y))
}

/// Asteroid destroyed
///
/// `size` is the size of the destroyed asteroid; `pieces` names the size of
/// the replacements and is absent when nothing should be spawned.
pub fn asteroid_split(asteroid: Entity, size: AsteroidSize, position: Vec2, points: u32, timestamp: f64) -> Event {
    let event = at(ASTEROID_SPLIT, asteroid, position, timestamp)
        .with_arg("size", EventArg::Label(size.label()))
        .with_arg("points", EventArg::Amount(points));
    match size.split_into() {
        Some(pieces) => event.with_arg("pieces", EventArg::Label(pieces.label())),
        None => event,
    }
}

/// Enemy destroyed
pub fn enemy_destroyed(enemy: Entity, position: Vec2, points: u32, timestamp: f64) -> Event {
    at(ENEMY_DESTROYED, enemy, position, timestamp).with_arg("points", EventArg::Amount(points))
}

/// Player damaged, with what is left afterwards
pub fn player_damaged(player: Entity, health: u32, lives: u32, timestamp: f64) -> Event {
    Event::new(EventType::Custom(PLAYER_DAMAGED), timestamp)
        .with_arg("entity", EventArg::Entity(player))
        .with_arg("health", EventArg::Amount(health))
        .with_arg("lives", EventArg::Amount(lives))
}

/// Player out of lives
pub fn player_died(player: Entity, position: Vec2, timestamp: f64) -> Event {
    at(PLAYER_DIED, player, position, timestamp)
}

/// Power-up collected by `player`
pub fn powerup_collected(player: Entity, kind: PowerUpKind, timestamp: f64) -> Event {
    Event::new(EventType::Custom(POWERUP_COLLECTED), timestamp)
        .with_arg("entity", EventArg::Entity(player))
        .with_arg("kind", EventArg::Label(kind.label()))
}

/// Two projectiles cancelled each other out
pub fn projectiles_cancelled(a: Entity, b: Entity, timestamp: f64) -> Event {
    Event::new(EventType::Custom(PROJECTILES_CANCELLED), timestamp)
        .with_arg("a", EventArg::Entity(a))
        .with_arg("b", EventArg::Entity(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> Entity {
        World::new().create_entity()
    }

    #[test]
    fn test_split_names_the_pieces() {
        let rock = entity();
        let large = asteroid_split(rock, AsteroidSize::Large, Vec2::new(1.0, 2.0), 20, 0.5);
        assert!(large.is_custom(ASTEROID_SPLIT));
        assert_eq!(large.get_label("pieces"), Some("medium"));
        assert_eq!(large.get_entity("entity"), Some(rock));
        assert_eq!(large.get_position(), Some((1.0, 2.0)));

        let small = asteroid_split(rock, AsteroidSize::Small, Vec2::zeros(), 100, 0.5);
        assert_eq!(small.get_label("pieces"), None);
        assert_eq!(small.get_amount("points"), Some(100));
    }

    #[test]
    fn test_player_damaged_reports_remaining() {
        let event = player_damaged(entity(), 2, 1, 3.0);
        assert_eq!(event.get_amount("health"), Some(2));
        assert_eq!(event.get_amount("lives"), Some(1));
        assert_eq!(event.timestamp, 3.0);
    }
}
