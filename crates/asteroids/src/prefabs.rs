//! Entity prefabs
//!
//! One factory method per kind of game object. Each attaches the transform,
//! a collider with the right category and groups, the response table and
//! the gameplay components the handlers expect.

use crate::collision::{self, ASTEROID_GROUPS, ENEMY_GROUPS, PLAYER_GROUPS, POWERUP_GROUPS};
use crate::components::{
    Asteroid, AsteroidSize, Bullet, BulletOwner, DamageFlicker, Enemy, Health, Player, PowerUp, PowerUpKind,
};
use crate::config::GameplayConfig;
use arcade_engine::prelude::*;
use std::f32::consts::TAU;

/// Corners of the octagonal asteroid outline
const ASTEROID_OUTLINE_VERTICES: usize = 8;

/// Builds game entities from gameplay settings
pub struct PrefabFactory<'a> {
    config: &'a GameplayConfig,
}

impl<'a> PrefabFactory<'a> {
    /// Create a factory using the given settings
    pub fn new(config: &'a GameplayConfig) -> Self {
        Self { config }
    }

    fn flicker(&self) -> DamageFlicker {
        DamageFlicker::new(self.config.damage_flicker_duration)
    }

    /// Player ship
    pub fn player(&self, world: &mut World, transform: TransformComponent) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, transform);
        world.add_component(
            entity,
            ColliderComponent::new(CollisionCategory::Player).with_groups(PLAYER_GROUPS),
        );
        world.add_component(entity, collision::player_response());
        world.add_component(
            entity,
            Player::new(self.config.starting_lives, self.config.respawn_invulnerability),
        );
        world.add_component(entity, Health::new(self.config.player_health));
        world.add_component(entity, self.flicker());
        log::debug!("Spawned player {entity}");
        entity
    }

    /// Asteroid with an octagonal outline matching its radius
    pub fn asteroid(&self, world: &mut World, size: AsteroidSize, transform: TransformComponent) -> Entity {
        let outline = octagon(transform.radius);
        let entity = world.create_entity();
        world.add_component(entity, transform.with_outline(outline));
        world.add_component(
            entity,
            ColliderComponent::new(CollisionCategory::Obstacle).with_groups(ASTEROID_GROUPS),
        );
        world.add_component(entity, collision::asteroid_response());
        world.add_component(entity, Asteroid::new(size, self.config.asteroid_health(size)));
        world.add_component(entity, self.flicker());
        entity
    }

    /// Enemy ship
    pub fn enemy(&self, world: &mut World, transform: TransformComponent) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, transform);
        world.add_component(
            entity,
            ColliderComponent::new(CollisionCategory::Enemy).with_groups(ENEMY_GROUPS),
        );
        world.add_component(entity, collision::enemy_response());
        world.add_component(entity, Enemy::default());
        world.add_component(entity, Health::new(self.config.enemy_health));
        world.add_component(entity, self.flicker());
        entity
    }

    /// Bullet fired by `shooter`; the owner decides category, groups and table
    pub fn bullet(
        &self,
        world: &mut World,
        owner: BulletOwner,
        shooter: Option<Entity>,
        transform: TransformComponent,
    ) -> Entity {
        let (category, groups, response) = match owner {
            BulletOwner::Player => (
                CollisionCategory::PlayerProjectile,
                PLAYER_GROUPS,
                collision::player_bullet_response(),
            ),
            BulletOwner::Enemy => (
                CollisionCategory::EnemyProjectile,
                ENEMY_GROUPS,
                collision::enemy_bullet_response(),
            ),
        };

        let mut bullet = Bullet::new(owner, self.config.bullet_damage);
        bullet.lifetime = self.config.bullet_lifetime;
        if let Some(shooter) = shooter {
            bullet = bullet.fired_by(shooter);
        }

        let entity = world.create_entity();
        world.add_component(entity, transform);
        world.add_component(entity, ColliderComponent::new(category).with_groups(groups));
        world.add_component(entity, response);
        world.add_component(entity, bullet);
        entity
    }

    /// Collectible power-up
    pub fn powerup(&self, world: &mut World, kind: PowerUpKind, transform: TransformComponent) -> Entity {
        let duration = match kind {
            PowerUpKind::Shield => self.config.shield_duration,
            PowerUpKind::ExtraLife | PowerUpKind::Repair => 0.0,
        };

        let entity = world.create_entity();
        world.add_component(entity, transform);
        world.add_component(
            entity,
            ColliderComponent::new(CollisionCategory::PowerUp).with_groups(POWERUP_GROUPS),
        );
        world.add_component(entity, collision::powerup_response());
        world.add_component(entity, PowerUp::new(kind, duration));
        entity
    }
}

/// Regular octagon inscribed in a circle of `radius`, counter-clockwise
fn octagon(radius: f32) -> Vec<Vec2> {
    (0..ASTEROID_OUTLINE_VERTICES)
        .map(|i| {
            let angle = TAU * i as f32 / ASTEROID_OUTLINE_VERTICES as f32;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
