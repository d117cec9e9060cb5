//! Broad-phase collision detection
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13:
//! "The collision detection system is typically split into two phases:
//! broad-phase and narrow-phase."
//!
//! The detector only reads the world. It rebuilds its spatial index from every
//! entity with an active collider and a transform, walks those entities in a
//! fixed priority order and reports each overlapping, policy-permitted pair
//! exactly once. The ECS wrapper that also resolves and applies the pairs is in
//! ecs/systems/collision_system.rs

use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::physics::collision::transforms_overlap;
use crate::physics::collision_layers::{CollisionCategory, CollisionPolicy};
use crate::foundation::math::Bounds2;
use crate::spatial::{SpatialGrid, SpatialQuery, DEFAULT_CELL_SIZE};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// Two entities whose collision volumes overlap
///
/// `first` is the entity whose neighbour query found the pair and is offered
/// the collision first. Equality and hashing ignore that order, so `(a, b)` and
/// `(b, a)` are the same pair.
#[derive(Debug, Clone, Copy)]
pub struct CollisionPair {
    /// Initiating entity
    pub first: Entity,
    /// Entity found by the initiator's query
    pub second: Entity,
}

impl CollisionPair {
    /// Create a pair, keeping the given dispatch order
    pub fn new(first: Entity, second: Entity) -> Self {
        Self { first, second }
    }

    /// The pair as `(smaller, larger)`
    pub fn normalized(&self) -> (Entity, Entity) {
        if self.first <= self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }

    /// Whether the pair involves `entity`
    pub fn contains(&self, entity: Entity) -> bool {
        self.first == entity || self.second == entity
    }

    /// The other side of the pair, if `entity` is part of it
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.first == entity {
            Some(self.second)
        } else if self.second == entity {
            Some(self.first)
        } else {
            None
        }
    }
}

impl PartialEq for CollisionPair {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for CollisionPair {}

impl Hash for CollisionPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

/// Counters from the most recent detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Entities inserted into the spatial index
    pub entities_indexed: usize,
    /// Entities skipped because their transform is not finite
    pub entities_rejected: usize,
    /// Neighbour candidates looked at (before relevance filtering)
    pub candidates_examined: usize,
    /// Pairs that reached the narrow phase
    pub narrow_tests: usize,
    /// Pairs reported
    pub pairs_found: usize,
}

struct Indexed<'w> {
    category: CollisionCategory,
    transform: &'w TransformComponent,
}

/// Broad-phase detector (GEA 13.3)
///
/// Holds only per-frame scratch state; nothing carries over between calls
/// to [`detect`](Self::detect).
pub struct BroadPhaseDetector {
    /// Spatial partitioning structure for broad-phase
    spatial_query: Box<dyn SpatialQuery>,

    /// Unordered pairs already examined this frame
    processed: HashSet<(Entity, Entity)>,

    /// Run polygon tests for entities with a valid outline
    use_polygons: bool,

    stats: DetectionStats,
}

impl BroadPhaseDetector {
    /// Create a detector over a uniform grid covering the default world
    pub fn new(cell_size: f32) -> Self {
        Self::with_spatial_query(Box::new(SpatialGrid::new(cell_size)))
    }

    /// Create a detector over a uniform grid clamped to `bounds`
    pub fn for_world(cell_size: f32, bounds: Bounds2) -> Self {
        Self::with_spatial_query(Box::new(SpatialGrid::with_bounds(cell_size, bounds)))
    }

    /// Create a detector with the given spatial query implementation
    pub fn with_spatial_query(spatial_query: Box<dyn SpatialQuery>) -> Self {
        Self {
            spatial_query,
            processed: HashSet::new(),
            use_polygons: true,
            stats: DetectionStats::default(),
        }
    }

    /// Builder pattern: enable or disable polygon narrow phase
    pub fn with_polygons(mut self, enabled: bool) -> Self {
        self.use_polygons = enabled;
        self
    }

    /// Enable or disable polygon narrow phase
    pub fn set_polygons(&mut self, enabled: bool) {
        self.use_polygons = enabled;
    }

    /// Counters from the last call to [`detect`](Self::detect)
    pub fn stats(&self) -> DetectionStats {
        self.stats
    }

    /// Spatial index as built by the last detection pass
    pub fn spatial_query(&self) -> &dyn SpatialQuery {
        self.spatial_query.as_ref()
    }

    /// Find this frame's collision pairs
    ///
    /// Entities without an active collider or without a transform are
    /// skipped. The order of the returned pairs only depends on the set of
    /// entities and their components.
    pub fn detect(&mut self, world: &World, policy: &CollisionPolicy) -> Vec<CollisionPair> {
        self.spatial_query.clear();
        self.processed.clear();
        self.stats = DetectionStats::default();

        let mut indexed: HashMap<Entity, Indexed<'_>> = HashMap::new();
        for (entity, collider) in world.query::<ColliderComponent>() {
            if !collider.active {
                continue;
            }
            let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                continue;
            };
            if !is_finite(transform) {
                log::warn!(
                    "Skipping {entity}: non-finite transform at {:?} with radius {}",
                    transform.position,
                    transform.radius
                );
                self.stats.entities_rejected += 1;
                continue;
            }
            self.spatial_query.insert(entity, transform.position, transform.radius);
            indexed.insert(entity, Indexed { category: collider.category, transform });
        }
        self.stats.entities_indexed = indexed.len();

        let mut order: Vec<(u8, Entity)> = indexed
            .iter()
            .map(|(entity, data)| (data.category.priority(), *entity))
            .collect();
        order.sort_unstable();

        let mut pairs = Vec::new();
        for (_, entity) in order {
            let this = &indexed[&entity];

            for other in self.spatial_query.query_nearby(entity) {
                self.stats.candidates_examined += 1;

                let Some(that) = indexed.get(&other) else {
                    continue;
                };

                // Not marked as processed: the other side may still claim it.
                if !policy.is_relevant(this.category, that.category) {
                    continue;
                }

                let key = CollisionPair::new(entity, other).normalized();
                if !self.processed.insert(key) {
                    continue;
                }

                if !policy.can_collide(this.category, that.category) {
                    continue;
                }

                self.stats.narrow_tests += 1;
                if transforms_overlap(this.transform, that.transform, self.use_polygons) {
                    log::trace!(
                        "Collision {entity} ({:?}) <-> {other} ({:?})",
                        this.category,
                        that.category
                    );
                    pairs.push(CollisionPair::new(entity, other));
                }
            }
        }

        self.stats.pairs_found = pairs.len();
        pairs
    }
}

fn is_finite(transform: &TransformComponent) -> bool {
    transform.position.x.is_finite() && transform.position.y.is_finite() && transform.radius.is_finite()
}

impl Default for BroadPhaseDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}
