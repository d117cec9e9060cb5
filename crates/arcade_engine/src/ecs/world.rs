//! ECS World implementation
//!
//! Entities live in a generational slot map; each component type gets its own
//! column keyed by entity. Columns are type-erased so that removing an entity
//! can drop every component it owns without knowing the concrete types.

use super::{Component, Entity};
use crate::error::CollisionError;
use slotmap::{SecondaryMap, SlotMap};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Type-erased access to one component column
trait ComponentColumn: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentColumn for SecondaryMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, ()>,
    columns: HashMap<TypeId, Box<dyn ComponentColumn>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Remove an entity and all of its components
    ///
    /// Returns `false` (and does nothing) if the entity is not alive, so
    /// removing the same entity twice is harmless.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for column in self.columns.values_mut() {
            column.remove_entity(entity);
        }
        true
    }

    /// Check whether an entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all live entities in a deterministic order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Add a component to an entity, returning the component it replaced
    ///
    /// Adding a component to an entity that is not alive is ignored.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        if !self.contains(entity) {
            log::warn!("Ignoring {} added to dead entity {}", type_name::<T>(), entity);
            return None;
        }
        self.column_mut::<T>().insert(entity, component)
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()?
            .remove(entity)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.column::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.columns
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()?
            .get_mut(entity)
    }

    /// Check whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// All entities carrying a component of type `T`, with the component
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.column::<T>()
            .map(|column| column.iter().collect())
            .unwrap_or_default()
    }

    fn column<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.columns
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<SecondaryMap<Entity, T>>()
    }

    fn column_mut<T: Component>(&mut self) -> &mut SecondaryMap<Entity, T> {
        self.columns
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SecondaryMap::<Entity, T>::new()))
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()
            .expect("component column registered under the wrong TypeId")
    }
}

/// Component-only view of the world
///
/// Collision handlers and deferred actions receive this instead of the
/// world itself: they may read and modify component data, but they cannot
/// create or remove entities. Removals go through a `CollisionResult`.
pub struct ComponentAccess<'w> {
    world: &'w mut World,
}

impl<'w> ComponentAccess<'w> {
    /// Wrap a world
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }

    /// Check whether an entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    /// Get a component from an entity
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.get_component::<T>(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.world.get_component_mut::<T>(entity)
    }

    /// Check whether an entity has a component of type `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.world.has_component::<T>(entity)
    }

    /// Get a component, failing with [`CollisionError::MissingComponent`]
    pub fn require<T: Component>(&self, entity: Entity) -> Result<&T, CollisionError> {
        self.world
            .get_component::<T>(entity)
            .ok_or_else(|| CollisionError::missing::<T>(entity))
    }

    /// Get a mutable component, failing with [`CollisionError::MissingComponent`]
    pub fn require_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, CollisionError> {
        self.world
            .get_component_mut::<T>(entity)
            .ok_or_else(|| CollisionError::missing::<T>(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    #[test]
    fn test_add_get_remove_component() {
        let mut world = World::new();
        let e = world.create_entity();

        assert!(!world.has_component::<Health>(e));
        assert_eq!(world.add_component(e, Health(3)), None);
        assert_eq!(world.add_component(e, Health(5)), Some(Health(3)));
        assert_eq!(world.get_component::<Health>(e), Some(&Health(5)));

        world.get_component_mut::<Health>(e).unwrap().0 -= 1;
        assert_eq!(world.get_component::<Health>(e), Some(&Health(4)));

        assert_eq!(world.remove_component::<Health>(e), Some(Health(4)));
        assert!(!world.has_component::<Health>(e));
    }

    #[test]
    fn test_remove_entity_is_idempotent() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Health(1));
        world.add_component(e, Tag);

        assert!(world.remove_entity(e));
        assert!(!world.remove_entity(e));
        assert!(!world.contains(e));
        assert!(world.get_component::<Health>(e).is_none());
        assert!(world.query::<Tag>().is_empty());
    }

    #[test]
    fn test_stale_entity_ids_do_not_alias() {
        let mut world = World::new();
        let old = world.create_entity();
        world.remove_entity(old);
        let new = world.create_entity();

        assert_ne!(old, new);
        assert_ne!(old.id(), new.id());
        world.add_component(old, Health(9));
        assert!(world.get_component::<Health>(new).is_none());
        assert!(world.get_component::<Health>(old).is_none());
    }

    #[test]
    fn test_query_returns_only_owners() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        world.add_component(a, Health(1));
        world.add_component(c, Health(2));
        world.add_component(b, Tag);

        let owners: Vec<Entity> = world.query::<Health>().into_iter().map(|(e, _)| e).collect();
        assert_eq!(owners, vec![a, c]);
        assert_eq!(world.entities().count(), 3);
    }

    #[test]
    fn test_component_access_require() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Health(2));

        let mut access = ComponentAccess::new(&mut world);
        access.require_mut::<Health>(e).unwrap().0 = 7;
        assert_eq!(access.require::<Health>(e).unwrap(), &Health(7));
        assert!(matches!(
            access.require::<Tag>(e),
            Err(CollisionError::MissingComponent { .. })
        ));
    }
}
