//! Collision resolution
//!
//! Turns the detector's pairs into game-state changes in two steps:
//!
//! 1. [`CollisionResolver::resolve`] visits the pairs in order, applies the
//!    group veto, publishes a collision notification and asks the entities'
//!    response tables what to do. Handlers only see component data, so the
//!    entity set stays fixed for the whole pass.
//! 2. [`CollisionResolver::apply`] runs the aggregated deferred actions in
//!    order and then removes every scheduled entity once.
//!
//! Handler and action errors are logged and absorbed; one bad handler never
//! stops the rest of the frame.

use crate::ecs::components::ColliderComponent;
use crate::ecs::{ComponentAccess, Entity, World};
use crate::events::{Event, EventPublisher};
use crate::foundation::time::FrameTime;
use crate::physics::collision_layers::CollisionPolicy;
use crate::physics::collision_system::CollisionPair;
use crate::physics::response::{ActionContext, CollisionResponse, CollisionResult, ResponseContext};
use std::collections::HashSet;

/// Counters for one resolve + apply cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Pairs handed to the resolver
    pub pairs_seen: usize,
    /// Pairs skipped because an entity was already gone
    pub skipped_dead: usize,
    /// Pairs rejected by the group check
    pub vetoed: usize,
    /// Handler calls made
    pub handlers_invoked: usize,
    /// Handler calls that returned an error
    pub handler_failures: usize,
    /// Pairs that no handler claimed
    pub unhandled: usize,
    /// Deferred actions that completed
    pub actions_run: usize,
    /// Deferred actions that returned an error
    pub action_failures: usize,
    /// Entities actually removed from the world
    pub entities_removed: usize,
    /// Whether any result carried the stop flag
    pub stop_requested: bool,
}

/// Aggregate produced by [`CollisionResolver::resolve`]
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    /// Merged result of every dispatched pair
    pub result: CollisionResult,
    /// Counters so far
    pub stats: ResolutionStats,
}

/// Dispatches collision pairs to response handlers
pub struct CollisionResolver<'a> {
    policy: &'a CollisionPolicy,
    events: &'a mut dyn EventPublisher,
    time: FrameTime,
}

impl<'a> CollisionResolver<'a> {
    /// Create a resolver publishing to `events`
    pub fn new(policy: &'a CollisionPolicy, events: &'a mut dyn EventPublisher) -> Self {
        Self {
            policy,
            events,
            time: FrameTime::default(),
        }
    }

    /// Builder pattern: set the frame timing passed to handlers and actions
    pub fn with_time(mut self, time: FrameTime) -> Self {
        self.time = time;
        self
    }

    /// Policy used for the group veto
    pub fn policy(&self) -> &CollisionPolicy {
        self.policy
    }

    /// Dispatch every pair and aggregate the results
    ///
    /// The world's entity set is not changed; handlers may only modify
    /// component data.
    pub fn resolve(&mut self, pairs: &[CollisionPair], world: &mut World) -> ResolutionOutcome {
        let mut outcome = ResolutionOutcome::default();
        let mut dead: HashSet<Entity> = HashSet::new();

        for pair in pairs {
            outcome.stats.pairs_seen += 1;
            let (a, b) = (pair.first, pair.second);

            if dead.contains(&a) || dead.contains(&b) || !world.contains(a) || !world.contains(b) {
                log::trace!("Skipping {a} <-> {b}: entity already removed");
                outcome.stats.skipped_dead += 1;
                continue;
            }

            let (Some(collider_a), Some(collider_b)) = (
                world.get_component::<ColliderComponent>(a).copied(),
                world.get_component::<ColliderComponent>(b).copied(),
            ) else {
                outcome.stats.skipped_dead += 1;
                continue;
            };

            if !CollisionPolicy::groups_compatible(collider_a.groups, collider_b.groups) {
                log::trace!(
                    "Group veto {a} ({:?}) <-> {b} ({:?})",
                    collider_a.groups,
                    collider_b.groups
                );
                outcome.stats.vetoed += 1;
                continue;
            }

            self.events.publish(Event::collision(a, b, self.time.elapsed));

            let mut result = self.dispatch(world, a, b, &collider_b, &mut outcome.stats);
            if !result.handled() {
                result.absorb(self.dispatch(world, b, a, &collider_a, &mut outcome.stats));
            }

            if !result.handled() {
                outcome.stats.unhandled += 1;
            }

            dead.extend(result.removals().iter().copied());
            outcome.stats.stop_requested |= result.stop_requested();
            outcome.result.absorb(result);
        }

        outcome
    }

    /// Ask `this` entity's response table about `other`
    fn dispatch(
        &mut self,
        world: &mut World,
        this: Entity,
        other: Entity,
        other_collider: &ColliderComponent,
        stats: &mut ResolutionStats,
    ) -> CollisionResult {
        let handler = world
            .get_component::<CollisionResponse>(this)
            .and_then(|response| response.handler_for(other_collider.category, other_collider.groups));

        let Some(handler) = handler else {
            return CollisionResult::none();
        };

        stats.handlers_invoked += 1;
        let mut ctx = ResponseContext::new(ComponentAccess::new(world), self.time);
        match handler(&mut ctx, this, other) {
            Ok(result) => result,
            Err(e) => {
                log::warn!(
                    "Collision handler of {this} failed against {other} ({:?}/{:?}): {e}",
                    other_collider.category,
                    other_collider.groups
                );
                stats.handler_failures += 1;
                CollisionResult::none()
            }
        }
    }

    /// Run deferred actions, then remove scheduled entities
    ///
    /// Actions run in aggregation order while every entity is still alive.
    /// Removing an entity that is already gone is a no-op.
    pub fn apply(&mut self, outcome: ResolutionOutcome, world: &mut World) -> ResolutionStats {
        let ResolutionOutcome { result, mut stats } = outcome;
        let (removals, actions, stop) = result.into_parts();
        stats.stop_requested |= stop;

        {
            let mut ctx = ActionContext::new(ComponentAccess::new(world), &mut *self.events, self.time);
            for action in actions {
                let label = action.label();
                match action.run(&mut ctx) {
                    Ok(()) => stats.actions_run += 1,
                    Err(e) => {
                        log::warn!("Deferred action '{label}' failed: {e}");
                        stats.action_failures += 1;
                    }
                }
            }
        }

        for entity in removals {
            if world.remove_entity(entity) {
                stats.entities_removed += 1;
            }
        }

        stats
    }

    /// [`resolve`](Self::resolve) followed by [`apply`](Self::apply)
    pub fn resolve_and_apply(&mut self, pairs: &[CollisionPair], world: &mut World) -> ResolutionStats {
        let outcome = self.resolve(pairs, world);
        self.apply(outcome, world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;
    use crate::error::CollisionError;
    use crate::events::{EventArg, EventType};
    use crate::physics::collision_layers::{CollisionCategory, CollisionGroups};
    use crate::physics::response::DeferredAction;

    #[derive(Debug, Default)]
    struct Hits(u32);
    impl Component for Hits {}

    fn count_and_remove_self(ctx: &mut ResponseContext<'_>, this: Entity, _: Entity) -> Result<CollisionResult, CollisionError> {
        ctx.require_mut::<Hits>(this)?.0 += 1;
        Ok(CollisionResult::none().remove(this))
    }

    fn count_only(ctx: &mut ResponseContext<'_>, this: Entity, _: Entity) -> Result<CollisionResult, CollisionError> {
        ctx.require_mut::<Hits>(this)?.0 += 1;
        Ok(CollisionResult::none())
    }

    fn fail(_: &mut ResponseContext<'_>, _: Entity, _: Entity) -> Result<CollisionResult, CollisionError> {
        Err(CollisionError::Handler("boom".into()))
    }

    fn announce(_: &mut ResponseContext<'_>, this: Entity, _: Entity) -> Result<CollisionResult, CollisionError> {
        Ok(CollisionResult::none().with_action(DeferredAction::new("announce", move |ctx| {
            ctx.publish(Event::new(EventType::Custom("announce"), 0.0).with_arg("who", EventArg::Entity(this)));
            Ok(())
        })))
    }

    fn spawn(world: &mut World, category: CollisionCategory, groups: CollisionGroups, response: CollisionResponse) -> Entity {
        let e = world.create_entity();
        world.add_component(e, ColliderComponent::new(category).with_groups(groups));
        world.add_component(e, response);
        world.add_component(e, Hits::default());
        e
    }

    fn hits(world: &World, e: Entity) -> u32 {
        world.get_component::<Hits>(e).map_or(0, |h| h.0)
    }

    #[test]
    fn test_first_handler_wins_when_handled() {
        let mut world = World::new();
        let a = spawn(&mut world, CollisionCategory::Player, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Enemy, count_and_remove_self));
        let b = spawn(&mut world, CollisionCategory::Enemy, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Player, count_and_remove_self));

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let outcome = resolver.resolve(&[CollisionPair::new(a, b)], &mut world);

        assert_eq!(outcome.result.removals(), &[a]);
        assert_eq!(outcome.stats.handlers_invoked, 1);
        assert_eq!(hits(&world, a), 1);
        assert_eq!(hits(&world, b), 0);
        assert!(world.contains(a), "resolve must not remove entities");
        drop(resolver);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::CollisionOccurred);
    }

    #[test]
    fn test_second_handler_runs_when_first_unhandled() {
        let mut world = World::new();
        let a = spawn(&mut world, CollisionCategory::Player, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Enemy, count_only));
        let b = spawn(&mut world, CollisionCategory::Enemy, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Player, count_and_remove_self));

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let stats = resolver.resolve_and_apply(&[CollisionPair::new(a, b)], &mut world);

        assert_eq!(stats.handlers_invoked, 2);
        assert_eq!(stats.entities_removed, 1);
        assert!(world.contains(a));
        assert!(!world.contains(b));
        assert_eq!(hits(&world, a), 1);
    }

    #[test]
    fn test_group_veto_skips_notification_and_handlers() {
        let mut world = World::new();
        let response = CollisionResponse::new().on_category(CollisionCategory::Player, count_only);
        let a = spawn(&mut world, CollisionCategory::Player, CollisionGroups::FRIENDLY, response.clone());
        let b = spawn(&mut world, CollisionCategory::Player, CollisionGroups::FRIENDLY, response);

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let outcome = resolver.resolve(&[CollisionPair::new(a, b)], &mut world);

        assert_eq!(outcome.stats.vetoed, 1);
        assert_eq!(outcome.stats.handlers_invoked, 0);
        drop(resolver);
        assert!(events.is_empty());
        assert_eq!(hits(&world, a) + hits(&world, b), 0);
    }

    #[test]
    fn test_removed_entity_is_dead_for_rest_of_pass() {
        let mut world = World::new();
        let bullet = spawn(&mut world, CollisionCategory::PlayerProjectile, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Obstacle, count_and_remove_self));
        let rock1 = spawn(&mut world, CollisionCategory::Obstacle, CollisionGroups::empty(), CollisionResponse::new());
        let rock2 = spawn(&mut world, CollisionCategory::Obstacle, CollisionGroups::empty(), CollisionResponse::new());

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let outcome = resolver.resolve(
            &[CollisionPair::new(bullet, rock1), CollisionPair::new(bullet, rock2)],
            &mut world,
        );

        assert_eq!(outcome.stats.skipped_dead, 1);
        assert_eq!(hits(&world, bullet), 1);
        drop(resolver);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_handler_failure_is_absorbed() {
        let mut world = World::new();
        let a = spawn(&mut world, CollisionCategory::Player, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Enemy, fail));
        let b = spawn(&mut world, CollisionCategory::Enemy, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Player, count_and_remove_self));
        let c = spawn(&mut world, CollisionCategory::Enemy, CollisionGroups::empty(), CollisionResponse::new());

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let stats = resolver.resolve_and_apply(&[CollisionPair::new(a, b), CollisionPair::new(a, c)], &mut world);

        // The failure downgrades to "unhandled", so b's handler still runs.
        assert_eq!(stats.handler_failures, 2);
        assert_eq!(stats.handlers_invoked, 3);
        assert_eq!(stats.unhandled, 1);
        assert!(!world.contains(b));
        assert!(world.contains(a) && world.contains(c));
    }

    #[test]
    fn test_actions_run_before_removals_in_order() {
        let mut world = World::new();
        let a = spawn(&mut world, CollisionCategory::Player, CollisionGroups::empty(),
            CollisionResponse::new().on_category(CollisionCategory::Enemy, announce));
        let b = spawn(&mut world, CollisionCategory::Enemy, CollisionGroups::empty(), CollisionResponse::new());
        let c = spawn(&mut world, CollisionCategory::Enemy, CollisionGroups::empty(), CollisionResponse::new());

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let mut outcome = resolver.resolve(&[CollisionPair::new(a, b), CollisionPair::new(a, c)], &mut world);
        outcome.result.absorb(
            CollisionResult::none()
                .remove(b)
                .remove(b)
                .with_action(DeferredAction::new("broken", |_| Err(CollisionError::Handler("nope".into())))),
        );
        let stats = resolver.apply(outcome, &mut world);

        assert_eq!(stats.actions_run, 2);
        assert_eq!(stats.action_failures, 1);
        assert_eq!(stats.entities_removed, 1);
        drop(resolver);

        let announcements: Vec<_> = events.iter().filter(|e| e.is_custom("announce")).collect();
        assert_eq!(announcements.len(), 2);
        assert_eq!(announcements[0].get_entity("who"), Some(a));
    }

    #[test]
    fn test_empty_pair_list() {
        let mut world = World::new();
        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let stats = resolver.resolve_and_apply(&[], &mut world);
        assert_eq!(stats, ResolutionStats::default());
        drop(resolver);
        assert!(events.is_empty());
    }
}
