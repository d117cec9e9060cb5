//! Property tests for the collision pipeline

use arcade_engine::physics::{
    transforms_overlap, BroadPhaseDetector, CollisionPair, CollisionResolver, PolicyOverride,
};
use arcade_engine::prelude::*;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

fn category() -> impl Strategy<Value = CollisionCategory> {
    (0..CollisionCategory::COUNT).prop_map(|i| CollisionCategory::ALL[i])
}

fn policy_override() -> impl Strategy<Value = PolicyOverride> {
    (category(), category(), any::<bool>()).prop_map(|(a, b, allowed)| PolicyOverride { a, b, allowed })
}

/// (x, y, radius, category, active, has_transform)
type Spawn = (f32, f32, f32, CollisionCategory, bool, bool);

fn spawn() -> impl Strategy<Value = Spawn> {
    (
        -200.0f32..200.0,
        -200.0f32..200.0,
        0.0f32..40.0,
        category(),
        prop::bool::weighted(0.9),
        prop::bool::weighted(0.9),
    )
}

fn populate(specs: &[Spawn]) -> (World, Vec<Entity>) {
    let mut world = World::new();
    let entities = specs
        .iter()
        .map(|&(x, y, r, category, active, has_transform)| {
            let e = world.create_entity();
            if has_transform {
                world.add_component(e, TransformComponent::at(x, y, r));
            }
            world.add_component(e, ColliderComponent::new(category).with_active(active));
            e
        })
        .collect();
    (world, entities)
}

fn hash_of(pair: &CollisionPair) -> u64 {
    let mut hasher = DefaultHasher::new();
    pair.hash(&mut hasher);
    hasher.finish()
}

fn counted(removals: &[u8], labels: &[u8], world_entities: &[Entity]) -> CollisionResult {
    const LABELS: [&str; 4] = ["a", "b", "c", "d"];
    let mut result = CollisionResult::none();
    for &r in removals {
        result = result.remove(world_entities[r as usize % world_entities.len()]);
    }
    for &l in labels {
        result = result.with_action(DeferredAction::new(LABELS[l as usize % LABELS.len()], |_| Ok(())));
    }
    result
}

proptest! {
    #[test]
    fn policy_stays_symmetric_under_overrides(overrides in prop::collection::vec(policy_override(), 0..40)) {
        let policy = CollisionPolicy::standard().with_overrides(&overrides);
        prop_assert!(policy.is_symmetric());
        for a in CollisionCategory::ALL {
            for b in CollisionCategory::ALL {
                prop_assert_eq!(policy.can_collide(a, b), policy.can_collide(b, a));
                if policy.can_collide(a, b) {
                    prop_assert!(policy.is_relevant(a, b));
                }
            }
        }
    }

    #[test]
    fn pair_equality_ignores_order(n in 2usize..16, i in 0usize..16, j in 0usize..16) {
        let (_, entities) = populate(&vec![(0.0, 0.0, 1.0, CollisionCategory::Default, true, true); n]);
        let (a, b) = (entities[i % n], entities[j % n]);
        let forward = CollisionPair::new(a, b);
        let backward = CollisionPair::new(b, a);
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(hash_of(&forward), hash_of(&backward));
        prop_assert_eq!(forward.normalized(), backward.normalized());
    }

    #[test]
    fn detection_matches_brute_force(
        specs in prop::collection::vec(spawn(), 0..60),
        cell_size in 8.0f32..128.0,
    ) {
        let (world, entities) = populate(&specs);
        let policy = CollisionPolicy::standard();
        let mut detector = BroadPhaseDetector::new(cell_size).with_polygons(false);
        let pairs = detector.detect(&world, &policy);

        let found: HashSet<(Entity, Entity)> = pairs.iter().map(CollisionPair::normalized).collect();
        prop_assert_eq!(found.len(), pairs.len(), "duplicate pairs");

        let mut expected = HashSet::new();
        for i in 0..entities.len() {
            for j in i + 1..entities.len() {
                let (sa, sb) = (&specs[i], &specs[j]);
                if !(sa.4 && sa.5 && sb.4 && sb.5) || !policy.can_collide(sa.3, sb.3) {
                    continue;
                }
                let ta = world.get_component::<TransformComponent>(entities[i]).unwrap();
                let tb = world.get_component::<TransformComponent>(entities[j]).unwrap();
                if transforms_overlap(ta, tb, false) {
                    expected.insert(CollisionPair::new(entities[i], entities[j]).normalized());
                }
            }
        }
        prop_assert_eq!(found, expected);

        // The initiator is never processed after its partner
        for pair in &pairs {
            let first = world.get_component::<ColliderComponent>(pair.first).unwrap().category;
            let second = world.get_component::<ColliderComponent>(pair.second).unwrap().category;
            prop_assert!((first.priority(), pair.first) <= (second.priority(), pair.second));
        }
    }

    #[test]
    fn merging_nothing_changes_nothing(
        removals in prop::collection::vec(any::<u8>(), 0..6),
        labels in prop::collection::vec(any::<u8>(), 0..6),
    ) {
        let (_, entities) = populate(&[(0.0, 0.0, 1.0, CollisionCategory::Default, true, true); 4]);
        let left = CollisionResult::none().merge(counted(&removals, &labels, &entities));
        let right = counted(&removals, &labels, &entities).merge(CollisionResult::none());
        prop_assert_eq!(&left, &counted(&removals, &labels, &entities));
        prop_assert_eq!(&right, &counted(&removals, &labels, &entities));
    }

    #[test]
    fn merging_is_associative(
        parts in prop::collection::vec(
            (prop::collection::vec(any::<u8>(), 0..4), prop::collection::vec(any::<u8>(), 0..4)),
            3,
        ),
    ) {
        let (_, entities) = populate(&[(0.0, 0.0, 1.0, CollisionCategory::Default, true, true); 5]);
        let build = |i: usize| counted(&parts[i].0, &parts[i].1, &entities);

        let grouped_left = build(0).merge(build(1)).merge(build(2));
        let grouped_right = build(0).merge(build(1).merge(build(2)));
        prop_assert_eq!(grouped_left, grouped_right);
    }

    #[test]
    fn repeated_removal_removes_once(times in 1usize..6) {
        let (mut world, entities) = populate(&[(0.0, 0.0, 1.0, CollisionCategory::Default, true, true); 2]);
        let mut result = CollisionResult::none();
        for _ in 0..times {
            result = result.remove(entities[0]);
        }

        let policy = CollisionPolicy::standard();
        let mut events: Vec<Event> = Vec::new();
        let mut resolver = CollisionResolver::new(&policy, &mut events);
        let mut outcome = resolver.resolve(&[], &mut world);
        outcome.result.absorb(result);
        let stats = resolver.apply(outcome, &mut world);

        prop_assert_eq!(stats.entities_removed, 1);
        prop_assert!(!world.contains(entities[0]));
        prop_assert!(world.contains(entities[1]));
    }
}
