//! Entity implementation

use slotmap::Key;

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational: once an entity is removed its id is never handed out
    /// again, so a stale id can never alias a newer entity.
    pub struct Entity;
}

impl Entity {
    /// Get the entity ID as a single integer (stable for the entity's lifetime)
    pub fn id(&self) -> u64 {
        self.data().as_ffi()
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.id())
    }
}
