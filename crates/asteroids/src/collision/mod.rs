//! Asteroids collision responses
//!
//! [`handlers`] holds the reusable handler functions; this module wires them
//! into one response table per kind of game object. Prefabs attach these
//! tables together with the matching collider.
//!
//! Ownership of a collision follows the engine's priority order: the entity
//! with the lower category priority is asked first. Bullets therefore own
//! every bullet-vs-target collision except against the player, where the
//! player's table deliberately leaves enemy projectiles unhandled so the
//! bullet's own handler runs as the fallback.

pub mod handlers;

use arcade_engine::prelude::*;
use arcade_engine::physics::CollisionCategory::{
    Default as DefaultCategory, Enemy, EnemyProjectile, Invincible, Obstacle, Player, PlayerProjectile, PowerUp,
};

/// Group membership of the player's ship
pub const PLAYER_GROUPS: CollisionGroups = CollisionGroups::FRIENDLY;
/// Group membership of enemy ships and their bullets
pub const ENEMY_GROUPS: CollisionGroups = CollisionGroups::HOSTILE;
/// Group membership of asteroids
pub const ASTEROID_GROUPS: CollisionGroups = CollisionGroups::SOLID.union(CollisionGroups::DESTRUCTIBLE);
/// Group membership of power-ups
pub const POWERUP_GROUPS: CollisionGroups = CollisionGroups::POWERUP;

/// Player ship: hurt by contact, collects power-ups
pub fn player_response() -> CollisionResponse {
    CollisionResponse::new()
        .on_category(Enemy, handlers::direct_contact)
        .on_category(Obstacle, handlers::player_damage)
        .on_category(PowerUp, handlers::powerup_pickup)
}

/// Bullet fired by the player
pub fn player_bullet_response() -> CollisionResponse {
    CollisionResponse::new()
        .on_categories(&[Enemy, Obstacle, Invincible, DefaultCategory], handlers::bullet_hit)
        .on_category(EnemyProjectile, handlers::projectile_cancel)
}

/// Bullet fired by an enemy
pub fn enemy_bullet_response() -> CollisionResponse {
    CollisionResponse::new()
        .on_categories(&[Player, Obstacle, DefaultCategory], handlers::bullet_hit)
        .on_category(PlayerProjectile, handlers::projectile_cancel)
}

/// Enemy ship: rams anything on the player's side
pub fn enemy_response() -> CollisionResponse {
    CollisionResponse::new().on_group(PLAYER_GROUPS, handlers::direct_contact)
}

/// Asteroid: damage from projectiles that carry no handler of their own
pub fn asteroid_response() -> CollisionResponse {
    CollisionResponse::new().on_categories(&[PlayerProjectile, EnemyProjectile], handlers::asteroid_damage)
}

/// Power-up: collected by the player whichever side asks first
pub fn powerup_response() -> CollisionResponse {
    CollisionResponse::new().on_category(Player, handlers::powerup_pickup)
}
