//! Event system following Game Engine Architecture Ch 16.8
//! Key principles:
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queuing support (immediate + deferred delivery)
//!
//! Gameplay code only needs the fire-and-forget [`EventPublisher`] side;
//! [`EventSystem`] is the engine's implementation of it.

use crate::ecs::Entity;
use std::collections::HashMap;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Two entities collided (published once per resolved pair)
    CollisionOccurred,
    /// Game defined event, identified by name
    Custom(&'static str),
}

/// Variant for type-safe event arguments
/// Uses key-value pairs to avoid order dependency problems
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Entity reference
    Entity(Entity),
    /// Position coordinates
    Position(f32, f32),
    /// Counter or amount (damage, points, size...)
    Amount(u32),
    /// Static label
    Label(&'static str),
    /// Boolean flag
    Flag(bool),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Timestamp when event was created (seconds)
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and timestamp
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Event announcing that two entities collided
    pub fn collision(a: Entity, b: Entity, timestamp: f64) -> Self {
        Self::new(EventType::CollisionOccurred, timestamp)
            .with_arg("a", EventArg::Entity(a))
            .with_arg("b", EventArg::Entity(b))
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get an entity argument if present
    pub fn get_entity(&self, key: &str) -> Option<Entity> {
        if let Some(EventArg::Entity(entity)) = self.get_arg(key) {
            Some(*entity)
        } else {
            None
        }
    }

    /// Get position argument if present
    pub fn get_position(&self) -> Option<(f32, f32)> {
        if let Some(EventArg::Position(x, y)) = self.get_arg("position") {
            Some((*x, *y))
        } else {
            None
        }
    }

    /// Get an amount argument if present
    pub fn get_amount(&self, key: &str) -> Option<u32> {
        if let Some(EventArg::Amount(amount)) = self.get_arg(key) {
            Some(*amount)
        } else {
            None
        }
    }

    /// Get a label argument if present
    pub fn get_label(&self, key: &str) -> Option<&'static str> {
        if let Some(EventArg::Label(label)) = self.get_arg(key) {
            Some(*label)
        } else {
            None
        }
    }

    /// Whether this is the named custom event
    pub fn is_custom(&self, name: &str) -> bool {
        matches!(self.event_type, EventType::Custom(n) if n == name)
    }
}

/// Fire-and-forget notification sink
pub trait EventPublisher {
    /// Queue an event for delivery
    fn publish(&mut self, event: Event);
}

impl EventPublisher for Vec<Event> {
    fn publish(&mut self, event: Event) {
        self.push(event);
    }
}

/// Listener registered with an [`EventSystem`]
///
/// Returning `true` consumes the event: listeners registered after this one
/// for the same type do not see it.
pub trait EventHandler {
    /// React to an event
    fn on_event(&mut self, event: &Event) -> bool;
}

/// Queued event delivery with per-type listener chains
///
/// Events published during a frame wait in `pending` until
/// [`dispatch`](Self::dispatch). Events posted for a later time wait in
/// `scheduled` until the clock set by [`update_time`](Self::update_time)
/// reaches them.
#[derive(Default)]
pub struct EventSystem {
    pending: Vec<Event>,
    scheduled: Vec<(f64, Event)>,
    listeners: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
    now: f64,
}

impl EventSystem {
    /// Create a system with no listeners and nothing queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clock used for scheduled delivery (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.now = time;
    }

    /// Clock as last set by [`update_time`](Self::update_time)
    pub fn current_time(&self) -> f64 {
        self.now
    }

    /// Append a listener to the chain for `event_type`
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.listeners.entry(event_type).or_default().push(handler);
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, event: Event) {
        self.pending.push(event);
    }

    /// Queue an event for the first dispatch at or after `delivery_time`
    pub fn post(&mut self, delivery_time: f64, event: Event) {
        self.scheduled.push((delivery_time, event));
    }

    /// Events sent but not yet dispatched, in send order
    pub fn pending(&self) -> &[Event] {
        &self.pending
    }

    /// Number of undispatched events of a type
    pub fn pending_count(&self, event_type: EventType) -> usize {
        self.pending.iter().filter(|e| e.event_type == event_type).count()
    }

    /// Number of events waiting for their delivery time
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Deliver every pending event, then every scheduled event that is due
    pub fn dispatch(&mut self) {
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|(at, _)| *at <= self.now);
        self.scheduled = later;

        let ready = std::mem::take(&mut self.pending)
            .into_iter()
            .chain(due.into_iter().map(|(_, event)| event));
        for event in ready {
            self.deliver(&event);
        }
    }

    fn deliver(&mut self, event: &Event) {
        let Some(chain) = self.listeners.get_mut(&event.event_type) else {
            return;
        };
        for listener in chain.iter_mut() {
            if listener.on_event(event) {
                break;
            }
        }
    }

    /// Drop everything queued; listeners stay registered
    pub fn clear(&mut self) {
        self.pending.clear();
        self.scheduled.clear();
    }
}

impl EventPublisher for EventSystem {
    fn publish(&mut self, event: Event) {
        self.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<EventType>>>;

    struct Recorder {
        seen: Log,
        consume: bool,
    }

    impl EventHandler for Recorder {
        fn on_event(&mut self, event: &Event) -> bool {
            self.seen.borrow_mut().push(event.event_type);
            self.consume
        }
    }

    fn recorder(consume: bool) -> (Box<Recorder>, Log) {
        let seen = Log::default();
        (Box::new(Recorder { seen: Rc::clone(&seen), consume }), seen)
    }

    #[test]
    fn test_published_collision_is_delivered_on_dispatch() {
        let mut events = EventSystem::new();
        let (listener, seen) = recorder(false);
        events.register_handler(EventType::CollisionOccurred, listener);

        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        events.publish(Event::collision(a, b, 0.0));
        assert_eq!(events.pending_count(EventType::CollisionOccurred), 1);
        assert_eq!(events.pending()[0].get_entity("b"), Some(b));
        assert!(seen.borrow().is_empty());

        events.dispatch();
        assert!(events.pending().is_empty());
        assert_eq!(*seen.borrow(), vec![EventType::CollisionOccurred]);
    }

    #[test]
    fn test_scheduled_event_waits_for_its_time() {
        let mut events = EventSystem::new();
        let (listener, seen) = recorder(false);
        events.register_handler(EventType::Custom("spawn_wave"), listener);
        events.post(1.0, Event::new(EventType::Custom("spawn_wave"), 1.0));

        events.update_time(0.5);
        events.dispatch();
        assert_eq!(events.scheduled_count(), 1);
        assert!(seen.borrow().is_empty());

        events.update_time(1.0);
        events.dispatch();
        assert_eq!(events.scheduled_count(), 0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_consumed_event_stops_the_chain() {
        let mut events = EventSystem::new();
        let (first, first_seen) = recorder(true);
        let (second, second_seen) = recorder(false);
        events.register_handler(EventType::Custom("boom"), first);
        events.register_handler(EventType::Custom("boom"), second);

        events.send(Event::new(EventType::Custom("boom"), 0.0));
        events.dispatch();

        assert_eq!(first_seen.borrow().len(), 1);
        assert!(second_seen.borrow().is_empty());
    }

    #[test]
    fn test_clear_keeps_listeners() {
        let mut events = EventSystem::new();
        let (listener, seen) = recorder(false);
        events.register_handler(EventType::Custom("boom"), listener);
        events.send(Event::new(EventType::Custom("boom"), 0.0));
        events.post(5.0, Event::new(EventType::Custom("boom"), 5.0));

        events.clear();
        events.dispatch();
        assert!(seen.borrow().is_empty());

        events.send(Event::new(EventType::Custom("boom"), 0.0));
        events.dispatch();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_custom_event_args() {
        let event = Event::new(EventType::Custom("asteroid_split"), 2.0)
            .with_arg("position", EventArg::Position(3.0, 4.0))
            .with_arg("size", EventArg::Amount(2))
            .with_arg("kind", EventArg::Label("large"));

        assert!(event.is_custom("asteroid_split"));
        assert!(!event.is_custom("enemy_destroyed"));
        assert_eq!(event.get_position(), Some((3.0, 4.0)));
        assert_eq!(event.get_amount("size"), Some(2));
        assert_eq!(event.get_label("kind"), Some("large"));
        assert_eq!(event.get_amount("kind"), None);
    }
}
