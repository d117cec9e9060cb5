//! Per-frame gameplay timers
//!
//! Runs before the collision system so invulnerability that expires this
//! frame is already gone when contacts are resolved.

use crate::components::{Bullet, DamageFlicker, Player};
use arcade_engine::prelude::*;

/// Counts down invulnerability, damage flickers and bullet lifetimes
#[derive(Debug, Default)]
pub struct TimerSystem;

impl TimerSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }

    /// Advance every timer by `delta_time`, removing expired bullets
    ///
    /// Returns the number of bullets removed.
    pub fn tick(&mut self, world: &mut World, delta_time: f32) -> usize {
        let entities: Vec<Entity> = world.entities().collect();
        let mut expired = Vec::new();

        for entity in entities {
            if let Some(player) = world.get_component_mut::<Player>(entity) {
                player.tick(delta_time);
            }
            if let Some(flicker) = world.get_component_mut::<DamageFlicker>(entity) {
                flicker.tick(delta_time);
            }
            if let Some(bullet) = world.get_component_mut::<Bullet>(entity) {
                bullet.lifetime -= delta_time;
                if bullet.lifetime <= 0.0 {
                    expired.push(entity);
                }
            }
        }

        expired.into_iter().filter(|e| world.remove_entity(*e)).count()
    }
}

impl System for TimerSystem {
    fn run(&mut self, world: &mut World, delta_time: f32) {
        let expired = self.tick(world, delta_time);
        if expired > 0 {
            log::trace!("{expired} bullets expired");
        }
    }
}
