//! Collision errors
//!
//! None of these are fatal: the collision pipeline logs them at the point
//! they are raised and keeps the frame going.

use crate::ecs::Entity;
use thiserror::Error;

/// Errors raised by collision handlers and deferred actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    /// A handler expected a component the entity does not carry
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// Entity that was inspected
        entity: Entity,
        /// Type name of the missing component
        component: &'static str,
    },

    /// A handler or action referenced an entity that is no longer alive
    #[error("entity {0} is not alive")]
    DeadEntity(Entity),

    /// A handler refused the collision for a game-specific reason
    #[error("collision handler failed: {0}")]
    Handler(String),

    /// A deferred action failed
    #[error("deferred action '{label}' failed: {reason}")]
    Action {
        /// Label of the failing action
        label: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl CollisionError {
    /// Build a [`CollisionError::MissingComponent`] for component type `T`
    pub fn missing<T: 'static>(entity: Entity) -> Self {
        let full = std::any::type_name::<T>();
        let component = full.rsplit("::").next().unwrap_or(full);
        Self::MissingComponent { entity, component }
    }
}
