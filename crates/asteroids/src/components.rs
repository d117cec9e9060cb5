//! Game-specific components

use arcade_engine::prelude::*;

/// Player ship component
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Remaining lives
    pub lives: u32,

    /// Whether the player is invulnerable (after respawn or a shield pickup)
    pub invulnerable: bool,

    /// Invulnerability timer
    pub invulnerability_time: f32,

    /// Invulnerability granted after losing a life
    pub respawn_invulnerability: f32,
}

impl Component for Player {}

impl Player {
    /// Create a player with the given lives
    pub fn new(lives: u32, respawn_invulnerability: f32) -> Self {
        Self {
            lives,
            invulnerable: false,
            invulnerability_time: 0.0,
            respawn_invulnerability,
        }
    }

    /// Become invulnerable for `duration` seconds (extends, never shortens)
    pub fn make_invulnerable(&mut self, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.invulnerable = true;
        self.invulnerability_time = self.invulnerability_time.max(duration);
    }

    /// Count down invulnerability
    pub fn tick(&mut self, delta_time: f32) {
        if !self.invulnerable {
            return;
        }
        self.invulnerability_time -= delta_time;
        if self.invulnerability_time <= 0.0 {
            self.invulnerability_time = 0.0;
            self.invulnerable = false;
        }
    }

    /// Lose a life, returning `true` if any are left
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(3, 2.0)
    }
}

/// Breakable rock; destroyed at zero health
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Current size; decides what the split produces
    pub size: AsteroidSize,

    /// Hits left
    pub health: u32,

    /// Score for destroying it
    pub points: u32,
}

impl Component for Asteroid {}

impl Asteroid {
    /// Create an asteroid of a size with the given health
    pub fn new(size: AsteroidSize, health: u32) -> Self {
        Self {
            size,
            health,
            points: size.points(),
        }
    }
}

/// Asteroid sizes, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    /// Splits into medium pieces
    Large,
    /// Splits into small pieces
    Medium,
    /// Leaves nothing behind
    Small,
}

impl AsteroidSize {
    /// Score for destroying an asteroid of this size
    pub fn points(self) -> u32 {
        match self {
            Self::Large => 20,
            Self::Medium => 50,
            Self::Small => 100,
        }
    }

    /// Size of the pieces a destroyed asteroid breaks into
    pub fn split_into(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }

    /// Name used in notifications
    pub fn label(self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

/// Bullet projectile component
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Remaining lifetime in seconds
    pub lifetime: f32,

    /// Damage dealt on impact (enemies take the full amount)
    pub damage: u32,

    /// Who fired this bullet
    pub owner: BulletOwner,

    /// Entity that fired the bullet; it can never be hit by it
    pub shooter: Option<Entity>,

    /// Whether the bullet survives hits
    pub piercing: bool,

    /// Extra hits a piercing bullet survives
    pub max_pierce: u32,

    /// Hits survived so far
    pub pierce_count: u32,
}

impl Component for Bullet {}

impl Bullet {
    /// Create a non-piercing bullet
    pub fn new(owner: BulletOwner, damage: u32) -> Self {
        Self {
            owner,
            damage,
            ..Default::default()
        }
    }

    /// Builder pattern: record the shooter
    pub fn fired_by(mut self, shooter: Entity) -> Self {
        self.shooter = Some(shooter);
        self
    }

    /// Builder pattern: survive up to `max_pierce` hits
    pub fn with_piercing(mut self, max_pierce: u32) -> Self {
        self.piercing = true;
        self.max_pierce = max_pierce;
        self
    }

    /// Whether the next hit is survived
    pub fn can_pierce(&self) -> bool {
        self.piercing && self.pierce_count < self.max_pierce
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    /// Player bullet
    Player,

    /// Enemy bullet
    Enemy,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            lifetime: 2.0,
            damage: 1,
            owner: BulletOwner::Player,
            shooter: None,
            piercing: false,
            max_pierce: 0,
            pierce_count: 0,
        }
    }
}

/// Enemy ship component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    /// Points awarded when destroyed
    pub points: u32,
}

impl Component for Enemy {}

impl Default for Enemy {
    fn default() -> Self {
        Self { points: 200 }
    }
}

/// Health component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    /// Current health
    pub current: u32,

    /// Maximum health
    pub max: u32,
}

impl Component for Health {}

impl Health {
    /// Create a new health component
    pub fn new(max_health: u32) -> Self {
        Self {
            current: max_health,
            max: max_health,
        }
    }

    /// Take damage
    pub fn take_damage(&mut self, damage: u32) {
        self.current = self.current.saturating_sub(damage);
    }

    /// Heal
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Refill to maximum
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Check if dead
    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.current == self.max
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Kinds of collectible power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// One more life
    ExtraLife,
    /// Temporary invulnerability
    Shield,
    /// Restores health to full
    Repair,
}

impl PowerUpKind {
    /// Name used in notifications
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::ExtraLife => "extra_life",
            PowerUpKind::Shield => "shield",
            PowerUpKind::Repair => "repair",
        }
    }
}

/// Collectible power-up component
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    /// What the pickup grants
    pub kind: PowerUpKind,
    /// Effect duration in seconds (shield only)
    pub duration: f32,
}

impl Component for PowerUp {}

impl PowerUp {
    /// Create a power-up
    pub fn new(kind: PowerUpKind, duration: f32) -> Self {
        Self { kind, duration }
    }
}

/// Visual damage cue; rendering reads `active()`
#[derive(Debug, Clone, PartialEq)]
pub struct DamageFlicker {
    /// Length of one flicker in seconds
    pub duration: f32,
    /// Time left in the current flicker
    pub remaining: f32,
    /// Number of times the flicker was started
    pub count: u32,
}

impl Component for DamageFlicker {}

impl DamageFlicker {
    /// Idle flicker of the given length
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
            count: 0,
        }
    }

    /// Start (or restart) flickering
    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.count += 1;
    }

    /// Count down
    pub fn tick(&mut self, delta_time: f32) {
        self.remaining = (self.remaining - delta_time).max(0.0);
    }

    /// Whether the entity is currently flickering
    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }
}
