//! Collision response contract
//!
//! Handlers never touch the entity set directly. They inspect and modify
//! component data through a [`ResponseContext`] and describe everything else
//! (removals, follow-up side effects) in the [`CollisionResult`] they return.
//! The resolver merges those results over the whole frame and applies them once
//! every pair has been dispatched.

use crate::ecs::{Component, ComponentAccess, Entity};
use crate::error::CollisionError;
use crate::events::{Event, EventPublisher};
use crate::foundation::time::FrameTime;
use crate::physics::collision_layers::{CollisionCategory, CollisionGroups};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// World access handed to response handlers
///
/// Dereferences to [`ComponentAccess`], so handlers read and write component
/// data but cannot create or remove entities.
pub struct ResponseContext<'w> {
    components: ComponentAccess<'w>,
    time: FrameTime,
}

impl<'w> ResponseContext<'w> {
    /// Create a context over the given component view
    pub fn new(components: ComponentAccess<'w>, time: FrameTime) -> Self {
        Self { components, time }
    }

    /// Timing of the frame being resolved
    pub fn time(&self) -> FrameTime {
        self.time
    }
}

impl<'w> Deref for ResponseContext<'w> {
    type Target = ComponentAccess<'w>;

    fn deref(&self) -> &Self::Target {
        &self.components
    }
}

impl DerefMut for ResponseContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.components
    }
}

/// World access handed to deferred actions
///
/// Like [`ResponseContext`] plus the event publisher.
pub struct ActionContext<'a> {
    components: ComponentAccess<'a>,
    events: &'a mut dyn EventPublisher,
    time: FrameTime,
}

impl<'a> ActionContext<'a> {
    /// Create a context
    pub fn new(components: ComponentAccess<'a>, events: &'a mut dyn EventPublisher, time: FrameTime) -> Self {
        Self {
            components,
            events,
            time,
        }
    }

    /// Publish a notification
    pub fn publish(&mut self, event: Event) {
        self.events.publish(event);
    }

    /// Timing of the frame being applied
    pub fn time(&self) -> FrameTime {
        self.time
    }
}

impl<'a> Deref for ActionContext<'a> {
    type Target = ComponentAccess<'a>;

    fn deref(&self) -> &Self::Target {
        &self.components
    }
}

impl DerefMut for ActionContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.components
    }
}

type ActionFn = Box<dyn FnOnce(&mut ActionContext<'_>) -> Result<(), CollisionError>>;

/// A side effect scheduled by a handler, run after the resolution pass
pub struct DeferredAction {
    label: &'static str,
    run: ActionFn,
}

impl DeferredAction {
    /// Wrap a closure
    pub fn new<F>(label: &'static str, f: F) -> Self
    where
        F: FnOnce(&mut ActionContext<'_>) -> Result<(), CollisionError> + 'static,
    {
        Self {
            label,
            run: Box::new(f),
        }
    }

    /// An action that only publishes `event`
    pub fn publish(label: &'static str, event: Event) -> Self {
        Self::new(label, move |ctx| {
            ctx.publish(event);
            Ok(())
        })
    }

    /// Name used in logs and diagnostics
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Consume and run the action
    pub fn run(self, ctx: &mut ActionContext<'_>) -> Result<(), CollisionError> {
        (self.run)(ctx)
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeferredAction").field(&self.label).finish()
    }
}

/// What a handler wants done about a collision
///
/// Results combine with [`merge`](Self::merge): removal and action lists are
/// concatenated in order and the stop flags are OR-ed. [`none`](Self::none)
/// is the identity of that operation.
#[derive(Debug, Default)]
#[must_use]
pub struct CollisionResult {
    removals: Vec<Entity>,
    actions: Vec<DeferredAction>,
    stop: bool,
}

impl CollisionResult {
    /// An empty result
    pub fn none() -> Self {
        Self::default()
    }

    /// Schedule an entity for removal
    pub fn remove(mut self, entity: Entity) -> Self {
        self.removals.push(entity);
        self
    }

    /// Schedule a deferred action
    pub fn with_action(mut self, action: DeferredAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Mark the collision handled, even with nothing else to do
    pub fn stop(mut self) -> Self {
        self.stop = true;
        self
    }

    /// Combine two results
    pub fn merge(mut self, other: Self) -> Self {
        self.absorb(other);
        self
    }

    /// In-place [`merge`](Self::merge)
    pub fn absorb(&mut self, other: Self) {
        self.removals.extend(other.removals);
        self.actions.extend(other.actions);
        self.stop |= other.stop;
    }

    /// No removals and no actions
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.actions.is_empty()
    }

    /// Whether the handler dealt with the collision
    pub fn handled(&self) -> bool {
        !self.is_empty() || self.stop
    }

    /// Whether the stop flag is set
    pub fn stop_requested(&self) -> bool {
        self.stop
    }

    /// Entities scheduled for removal, in request order (may repeat)
    pub fn removals(&self) -> &[Entity] {
        &self.removals
    }

    /// Scheduled actions, in request order
    pub fn actions(&self) -> &[DeferredAction] {
        &self.actions
    }

    /// Labels of the scheduled actions, in request order
    pub fn action_labels(&self) -> Vec<&'static str> {
        self.actions.iter().map(DeferredAction::label).collect()
    }

    /// Split into removals, actions and the stop flag
    pub fn into_parts(self) -> (Vec<Entity>, Vec<DeferredAction>, bool) {
        (self.removals, self.actions, self.stop)
    }
}

/// Results compare by removals, action labels and stop flag
impl PartialEq for CollisionResult {
    fn eq(&self, other: &Self) -> bool {
        self.removals == other.removals
            && self.stop == other.stop
            && self.actions.len() == other.actions.len()
            && self
                .actions
                .iter()
                .zip(&other.actions)
                .all(|(a, b)| a.label == b.label)
    }
}

/// Response handler signature
///
/// Called as `handler(ctx, this, other)` where `this` carries the response
/// table and `other` is the entity it collided with.
pub type ResponseFn = fn(&mut ResponseContext<'_>, Entity, Entity) -> Result<CollisionResult, CollisionError>;

/// Per-entity table of response handlers
///
/// Built once when the entity is assembled. Lookups try the other entity's
/// category first, then the group entries in insertion order.
#[derive(Clone)]
pub struct CollisionResponse {
    by_category: [Option<ResponseFn>; CollisionCategory::COUNT],
    by_group: Vec<(CollisionGroups, ResponseFn)>,
}

impl Component for CollisionResponse {}

impl CollisionResponse {
    /// An empty table
    pub fn new() -> Self {
        Self {
            by_category: [None; CollisionCategory::COUNT],
            by_group: Vec::new(),
        }
    }

    /// Builder pattern: handle collisions with a category
    pub fn on_category(mut self, category: CollisionCategory, handler: ResponseFn) -> Self {
        self.by_category[category.index()] = Some(handler);
        self
    }

    /// Builder pattern: same handler for several categories
    pub fn on_categories(mut self, categories: &[CollisionCategory], handler: ResponseFn) -> Self {
        for category in categories {
            self.by_category[category.index()] = Some(handler);
        }
        self
    }

    /// Builder pattern: handle collisions with entities in any of `groups`
    pub fn on_group(mut self, groups: CollisionGroups, handler: ResponseFn) -> Self {
        self.by_group.push((groups, handler));
        self
    }

    /// Handler for an entity of the given category and groups
    pub fn handler_for(&self, category: CollisionCategory, groups: CollisionGroups) -> Option<ResponseFn> {
        self.by_category[category.index()].or_else(|| {
            self.by_group
                .iter()
                .find(|(g, _)| g.intersects(groups))
                .map(|(_, handler)| *handler)
        })
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.by_category.iter().all(Option::is_none) && self.by_group.is_empty()
    }
}

impl Default for CollisionResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollisionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories: Vec<CollisionCategory> = CollisionCategory::ALL
            .into_iter()
            .filter(|c| self.by_category[c.index()].is_some())
            .collect();
        let groups: Vec<CollisionGroups> = self.by_group.iter().map(|(g, _)| *g).collect();
        f.debug_struct("CollisionResponse")
            .field("categories", &categories)
            .field("groups", &groups)
            .finish()
    }
}
