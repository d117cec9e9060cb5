//! Response handler library
//!
//! Every handler has the engine's [`ResponseFn`] signature: it receives the
//! entity owning the response table (`this`), the entity it hit (`other`) and
//! returns a [`CollisionResult`]. Component data (health, lives, pierce
//! counters) is updated in place; removals and notifications are scheduled
//! through the result.
//!
//! The `damage_*` helpers are the building blocks the handlers share. They
//! return results too, so handlers combine them with `merge`.

use crate::components::{Asteroid, Bullet, DamageFlicker, Enemy, Health, Player, PowerUp, PowerUpKind};
use crate::events;
use arcade_engine::prelude::*;

/// Label of the deferred action that starts a damage flicker
pub const DAMAGE_FLICKER: &str = "damage_flicker";

fn position_of(ctx: &ResponseContext<'_>, entity: Entity) -> Vec2 {
    ctx.get::<TransformComponent>(entity)
        .map_or_else(Vec2::zeros, |t| t.position)
}

/// Deferred action starting `entity`'s damage flicker
pub fn flicker(entity: Entity) -> DeferredAction {
    DeferredAction::new(DAMAGE_FLICKER, move |ctx| {
        ctx.require_mut::<DamageFlicker>(entity)?.start();
        Ok(())
    })
}

/// Damage an asteroid; at zero health it is removed and a split is announced
pub fn damage_asteroid(ctx: &mut ResponseContext<'_>, asteroid: Entity, amount: u32) -> Result<CollisionResult, CollisionError> {
    let timestamp = ctx.time().elapsed;
    let position = position_of(ctx, asteroid);

    let state = ctx.require_mut::<Asteroid>(asteroid)?;
    state.health = state.health.saturating_sub(amount);
    if state.health > 0 {
        return Ok(CollisionResult::none().with_action(flicker(asteroid)));
    }

    log::debug!("Asteroid {asteroid} ({:?}) destroyed", state.size);
    let split = events::asteroid_split(asteroid, state.size, position, state.points, timestamp);
    Ok(CollisionResult::none()
        .remove(asteroid)
        .with_action(DeferredAction::publish(events::ASTEROID_SPLIT, split)))
}

/// Remove an enemy and announce it
pub fn destroy_enemy(ctx: &ResponseContext<'_>, enemy: Entity) -> CollisionResult {
    let points = ctx.get::<Enemy>(enemy).map_or(0, |e| e.points);
    let event = events::enemy_destroyed(enemy, position_of(ctx, enemy), points, ctx.time().elapsed);
    CollisionResult::none()
        .remove(enemy)
        .with_action(DeferredAction::publish(events::ENEMY_DESTROYED, event))
}

/// Damage an enemy; enemies without health are destroyed outright
pub fn damage_enemy(ctx: &mut ResponseContext<'_>, enemy: Entity, amount: u32) -> Result<CollisionResult, CollisionError> {
    if let Some(health) = ctx.get_mut::<Health>(enemy) {
        health.take_damage(amount);
        if !health.is_dead() {
            return Ok(CollisionResult::none().with_action(flicker(enemy)));
        }
    }
    Ok(destroy_enemy(ctx, enemy))
}

/// Damage the player, following the lives/respawn rules
///
/// Does nothing while the player is invulnerable. Losing the last health
/// point costs a life, refills health and grants respawn invulnerability;
/// losing the last life removes the player.
pub fn damage_player(ctx: &mut ResponseContext<'_>, player: Entity, amount: u32) -> Result<CollisionResult, CollisionError> {
    if ctx.require::<Player>(player)?.invulnerable {
        return Ok(CollisionResult::none());
    }

    let timestamp = ctx.time().elapsed;
    let position = position_of(ctx, player);

    let health = ctx.require_mut::<Health>(player)?;
    health.take_damage(amount);
    let remaining = health.current;

    if remaining == 0 {
        let state = ctx.require_mut::<Player>(player)?;
        if !state.lose_life() {
            log::info!("Player {player} is out of lives");
            return Ok(CollisionResult::none()
                .remove(player)
                .with_action(DeferredAction::publish(events::PLAYER_DIED, events::player_died(player, position, timestamp))));
        }
        let respawn = state.respawn_invulnerability;
        state.make_invulnerable(respawn);
        ctx.require_mut::<Health>(player)?.refill();
    }

    let health = ctx.require::<Health>(player)?.current;
    let lives = ctx.require::<Player>(player)?.lives;
    Ok(CollisionResult::none()
        .with_action(flicker(player))
        .with_action(DeferredAction::publish(
            events::PLAYER_DAMAGED,
            events::player_damaged(player, health, lives, timestamp),
        )))
}

/// Bullet (`this`) hits something
///
/// A bullet never hurts the entity that fired it. Asteroids and players take
/// one point of damage, enemies take the bullet's damage. The bullet is
/// removed unless it still has pierce budget left.
pub fn bullet_hit(ctx: &mut ResponseContext<'_>, this: Entity, other: Entity) -> Result<CollisionResult, CollisionError> {
    let bullet = ctx.require::<Bullet>(this)?;
    if bullet.shooter == Some(other) {
        return Ok(CollisionResult::none());
    }
    let damage = bullet.damage;

    let mut result = if ctx.has::<Asteroid>(other) {
        damage_asteroid(ctx, other, 1)?
    } else if ctx.has::<Enemy>(other) {
        damage_enemy(ctx, other, damage)?
    } else if ctx.has::<Player>(other) {
        damage_player(ctx, other, 1)?
    } else {
        CollisionResult::none()
    };

    let bullet = ctx.require_mut::<Bullet>(this)?;
    if bullet.can_pierce() {
        bullet.pierce_count += 1;
    } else {
        result = result.remove(this);
    }

    Ok(result.stop())
}

/// Player and enemy ship ram each other
///
/// Works from either side's table. The player takes one point of damage
/// (none while invulnerable) and the enemy is destroyed.
pub fn direct_contact(ctx: &mut ResponseContext<'_>, this: Entity, other: Entity) -> Result<CollisionResult, CollisionError> {
    let (player, enemy) = if ctx.has::<Player>(this) { (this, other) } else { (other, this) };

    let mut result = if ctx.has::<Player>(player) {
        damage_player(ctx, player, 1)?
    } else {
        CollisionResult::none()
    };

    if ctx.has::<Enemy>(enemy) {
        result.absorb(destroy_enemy(ctx, enemy));
    }

    Ok(result)
}

/// Asteroid (`this`) struck by something that carries no handler of its own
pub fn asteroid_damage(ctx: &mut ResponseContext<'_>, this: Entity, _other: Entity) -> Result<CollisionResult, CollisionError> {
    damage_asteroid(ctx, this, 1)
}

/// Player (`this`) collides with an asteroid: only the player is hurt
pub fn player_damage(ctx: &mut ResponseContext<'_>, this: Entity, _other: Entity) -> Result<CollisionResult, CollisionError> {
    damage_player(ctx, this, 1)
}

/// Two projectiles destroy each other
pub fn projectile_cancel(ctx: &mut ResponseContext<'_>, this: Entity, other: Entity) -> Result<CollisionResult, CollisionError> {
    let event = events::projectiles_cancelled(this, other, ctx.time().elapsed);
    Ok(CollisionResult::none()
        .remove(this)
        .remove(other)
        .with_action(DeferredAction::publish(events::PROJECTILES_CANCELLED, event)))
}

/// Player picks up a power-up; works from either side's table
pub fn powerup_pickup(ctx: &mut ResponseContext<'_>, this: Entity, other: Entity) -> Result<CollisionResult, CollisionError> {
    let (player, pickup) = if ctx.has::<PowerUp>(other) { (this, other) } else { (other, this) };
    let powerup = ctx.require::<PowerUp>(pickup)?.clone();

    match powerup.kind {
        PowerUpKind::ExtraLife => ctx.require_mut::<Player>(player)?.lives += 1,
        PowerUpKind::Shield => ctx.require_mut::<Player>(player)?.make_invulnerable(powerup.duration),
        PowerUpKind::Repair => {
            if let Some(health) = ctx.get_mut::<Health>(player) {
                health.refill();
            }
        }
    }

    let event = events::powerup_collected(player, powerup.kind, ctx.time().elapsed);
    Ok(CollisionResult::none()
        .remove(pickup)
        .with_action(DeferredAction::publish(events::POWERUP_COLLECTED, event)))
}
