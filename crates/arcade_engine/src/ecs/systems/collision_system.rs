//! ECS collision system wrapper
//!
//! Based on Game Engine Architecture 3rd Edition:
//! - Section 13.3: Collision Detection System
//! - Section 16.6: Updating Game Objects in Real Time
//!
//! One call to [`CollisionSystem::update`] runs the whole per-frame cycle:
//! broad phase and narrow phase detection, dispatch to the entities' response
//! tables, then the deferred actions and removals. The entity set only changes
//! in that last step.

use crate::core::config::CollisionConfig;
use crate::ecs::{System, World};
use crate::events::{EventPublisher, EventSystem};
use crate::foundation::time::{FrameTime, Stopwatch};
use crate::physics::collision_layers::CollisionPolicy;
use crate::physics::collision_system::{BroadPhaseDetector, CollisionPair};
use crate::physics::resolver::CollisionResolver;
use std::sync::Arc;
use std::time::Duration;

/// Statistics for one collision frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Entities placed in the spatial index
    pub entities_indexed: usize,
    /// Entities left out of the index for a non-finite transform
    pub entities_rejected: usize,
    /// Neighbour candidates examined by the broad phase
    pub candidate_checks: usize,
    /// Narrow-phase overlap tests
    pub narrow_tests: usize,
    /// Overlapping, policy-permitted pairs
    pub pairs_detected: usize,
    /// Pairs rejected by the group check
    pub pairs_vetoed: usize,
    /// Pairs skipped because an entity was removed earlier in the frame
    pub pairs_skipped: usize,
    /// Response handlers called
    pub handlers_invoked: usize,
    /// Response handlers that failed
    pub handler_failures: usize,
    /// Pairs no handler claimed
    pub unhandled_pairs: usize,
    /// Deferred actions completed
    pub actions_run: usize,
    /// Deferred actions that failed
    pub action_failures: usize,
    /// Entities removed from the world
    pub entities_removed: usize,
    /// Any handler set the stop flag
    pub stop_requested: bool,
    /// Wall time spent in the frame
    pub elapsed: Duration,
}

/// Per-frame collision pipeline
///
/// Owns the detector, the shared policy table and the publisher that
/// receives collision and gameplay notifications.
pub struct CollisionSystem<P: EventPublisher = EventSystem> {
    config: CollisionConfig,
    policy: Arc<CollisionPolicy>,
    detector: BroadPhaseDetector,
    events: P,
    time: FrameTime,
    last_stats: CollisionStats,
}

impl CollisionSystem<EventSystem> {
    /// Create a collision system publishing to a fresh [`EventSystem`]
    pub fn new(config: CollisionConfig) -> Self {
        Self::with_publisher(config, EventSystem::new())
    }
}

impl Default for CollisionSystem<EventSystem> {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

impl<P: EventPublisher> CollisionSystem<P> {
    /// Create a collision system publishing to `events`
    ///
    /// The policy is the standard table plus the configured overrides.
    pub fn with_publisher(config: CollisionConfig, events: P) -> Self {
        let policy = Arc::new(config.build_policy());
        let detector = BroadPhaseDetector::for_world(config.cell_size, config.bounds())
            .with_polygons(config.polygon_narrow_phase);
        Self {
            config,
            policy,
            detector,
            events,
            time: FrameTime::default(),
            last_stats: CollisionStats::default(),
        }
    }

    /// Builder pattern: use an existing policy table
    pub fn with_policy(mut self, policy: Arc<CollisionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Run detection, resolution and application for one frame
    pub fn update(&mut self, world: &mut World, delta_time: f32) -> CollisionStats {
        let stopwatch = Stopwatch::start_new();
        self.time = self.time.next(delta_time);

        let pairs = self.detector.detect(world, &self.policy);
        let detection = self.detector.stats();

        let mut resolver = CollisionResolver::new(&self.policy, &mut self.events).with_time(self.time);
        let resolution = resolver.resolve_and_apply(&pairs, world);

        let stats = CollisionStats {
            entities_indexed: detection.entities_indexed,
            entities_rejected: detection.entities_rejected,
            candidate_checks: detection.candidates_examined,
            narrow_tests: detection.narrow_tests,
            pairs_detected: detection.pairs_found,
            pairs_vetoed: resolution.vetoed,
            pairs_skipped: resolution.skipped_dead,
            handlers_invoked: resolution.handlers_invoked,
            handler_failures: resolution.handler_failures,
            unhandled_pairs: resolution.unhandled,
            actions_run: resolution.actions_run,
            action_failures: resolution.action_failures,
            entities_removed: resolution.entities_removed,
            stop_requested: resolution.stop_requested,
            elapsed: stopwatch.elapsed(),
        };

        if self.config.log_frame_stats {
            log::debug!(
                "Collision frame {}: {} entities, {} pairs, {} removed in {:.3}ms",
                self.time.frame,
                stats.entities_indexed,
                stats.pairs_detected,
                stats.entities_removed,
                stats.elapsed.as_secs_f64() * 1000.0
            );
        }

        self.last_stats = stats;
        stats
    }

    /// Detection only, without dispatching anything
    pub fn detect(&mut self, world: &World) -> Vec<CollisionPair> {
        self.detector.detect(world, &self.policy)
    }

    /// Statistics of the last [`update`](Self::update)
    pub fn last_stats(&self) -> CollisionStats {
        self.last_stats
    }

    /// Shared policy table
    pub fn policy(&self) -> &Arc<CollisionPolicy> {
        &self.policy
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Timing of the last frame
    pub fn frame_time(&self) -> FrameTime {
        self.time
    }

    /// Notification publisher
    pub fn events(&self) -> &P {
        &self.events
    }

    /// Mutable notification publisher (for dispatching or draining)
    pub fn events_mut(&mut self) -> &mut P {
        &mut self.events
    }
}

impl<P: EventPublisher> System for CollisionSystem<P> {
    fn run(&mut self, world: &mut World, delta_time: f32) {
        self.update(world, delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{ColliderComponent, TransformComponent};
    use crate::events::{Event, EventType};
    use crate::physics::collision_layers::CollisionCategory;

    fn spawn(world: &mut World, category: CollisionCategory, x: f32, y: f32, r: f32) {
        let e = world.create_entity();
        world.add_component(e, TransformComponent::at(x, y, r));
        world.add_component(e, ColliderComponent::new(category));
    }

    #[test]
    fn test_empty_world() {
        let mut world = World::new();
        let mut system = CollisionSystem::new(CollisionConfig::default());
        let stats = system.update(&mut world, 0.016);

        assert_eq!(stats.entities_indexed, 0);
        assert_eq!(stats.pairs_detected, 0);
        assert_eq!(stats.entities_removed, 0);
        assert!(system.events().pending().is_empty());
        assert_eq!(system.frame_time().frame, 1);
    }

    #[test]
    fn test_update_publishes_collision_events() {
        let mut world = World::new();
        spawn(&mut world, CollisionCategory::Player, 0.0, 0.0, 10.0);
        spawn(&mut world, CollisionCategory::Obstacle, 5.0, 0.0, 10.0);

        let mut system = CollisionSystem::with_publisher(CollisionConfig::default(), Vec::<Event>::new());
        let stats = system.update(&mut world, 0.016);

        assert_eq!(stats.pairs_detected, 1);
        assert_eq!(stats.unhandled_pairs, 1);
        assert_eq!(world.entity_count(), 2);
        assert_eq!(system.events().len(), 1);
        assert_eq!(system.events()[0].event_type, EventType::CollisionOccurred);
        assert_eq!(system.last_stats(), stats);
    }

    #[test]
    fn test_oversized_and_far_entities_under_world_bounds() {
        let mut world = World::new();
        spawn(&mut world, CollisionCategory::Boundary, 0.0, 0.0, 200_000.0);
        spawn(&mut world, CollisionCategory::Player, 5_000.0, 5_000.0, 10.0);
        spawn(&mut world, CollisionCategory::Enemy, f32::NAN, 0.0, 10.0);

        let config = CollisionConfig {
            world_width: 640.0,
            world_height: 480.0,
            ..Default::default()
        };
        let mut system = CollisionSystem::with_publisher(config, Vec::<Event>::new());
        let stats = system.update(&mut world, 0.016);

        assert_eq!(stats.entities_indexed, 2);
        assert_eq!(stats.entities_rejected, 1);
        assert_eq!(stats.pairs_detected, 1);
    }

    #[test]
    fn test_runs_as_system() {
        let mut world = World::new();
        spawn(&mut world, CollisionCategory::Enemy, 0.0, 0.0, 10.0);
        spawn(&mut world, CollisionCategory::PlayerProjectile, 5.0, 0.0, 2.0);

        let mut system = CollisionSystem::new(CollisionConfig::default());
        system.run(&mut world, 0.016);
        system.run(&mut world, 0.016);

        assert_eq!(system.last_stats().pairs_detected, 1);
        assert_eq!(system.events().pending_count(EventType::CollisionOccurred), 2);
        assert_eq!(system.frame_time().frame, 2);
    }

    #[test]
    fn test_configured_override_changes_detection() {
        let mut world = World::new();
        spawn(&mut world, CollisionCategory::Enemy, 0.0, 0.0, 10.0);
        spawn(&mut world, CollisionCategory::Obstacle, 5.0, 0.0, 10.0);

        let mut system = CollisionSystem::new(CollisionConfig::default());
        assert!(system.detect(&world).is_empty());

        let config = CollisionConfig {
            policy_overrides: vec![crate::physics::collision_layers::PolicyOverride {
                a: CollisionCategory::Enemy,
                b: CollisionCategory::Obstacle,
                allowed: true,
            }],
            ..Default::default()
        };
        let mut system = CollisionSystem::new(config);
        assert_eq!(system.detect(&world).len(), 1);
    }
}
