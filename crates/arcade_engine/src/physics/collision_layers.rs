//! Collision categories, groups and the pair policy table
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."
//!
//! Two independent filters are applied. The category table decides whether
//! two kinds of entity may be tested at all and is consulted during the
//! broad phase. The group check runs later, at resolution time, and can
//! veto a pair the table allowed.

use serde::{Deserialize, Serialize};

/// Closed set of collision categories (layers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollisionCategory {
    /// Untyped entity; collides with everything except invincible entities and itself
    Default,
    /// Player ship
    Player,
    /// Enemy ship
    Enemy,
    /// Projectile fired by an enemy
    EnemyProjectile,
    /// Projectile fired by the player
    PlayerProjectile,
    /// Asteroids and other obstacles
    Obstacle,
    /// World edges
    Boundary,
    /// Trigger volume
    Trigger,
    /// Entity that only the player and the player's projectiles can touch
    Invincible,
    /// Collectible power-up
    PowerUp,
}

impl CollisionCategory {
    /// Number of categories
    pub const COUNT: usize = 10;

    /// Every category, in declaration order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Default,
        Self::Player,
        Self::Enemy,
        Self::EnemyProjectile,
        Self::PlayerProjectile,
        Self::Obstacle,
        Self::Boundary,
        Self::Trigger,
        Self::Invincible,
        Self::PowerUp,
    ];

    /// Dense index of this category, usable for fixed-size tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Processing order used by the broad phase (lower runs first)
    pub const fn priority(self) -> u8 {
        match self {
            Self::Player => 0,
            Self::PlayerProjectile => 1,
            Self::EnemyProjectile => 2,
            Self::Enemy => 3,
            Self::Obstacle => 4,
            Self::PowerUp => 5,
            Self::Boundary => 6,
            Self::Invincible => 7,
            Self::Trigger => 8,
            Self::Default => 9,
        }
    }

    /// Categories worth looking up as neighbours of this category
    ///
    /// A cheap pre-filter only; the policy table stays the authority.
    pub fn relevant_categories(self) -> &'static [Self] {
        use CollisionCategory::*;
        match self {
            Player => &[Enemy, EnemyProjectile, Obstacle, Boundary, PowerUp, Invincible, Default],
            PlayerProjectile => &[Enemy, Obstacle, EnemyProjectile, Invincible, Default],
            EnemyProjectile => &[Player, Obstacle, PlayerProjectile, Default],
            Enemy => &[Player, PlayerProjectile, Boundary, Default],
            Obstacle => &[Obstacle, Player, PlayerProjectile, EnemyProjectile, Default],
            PowerUp => &[Player, Default],
            Boundary => &[Player, Enemy, Default],
            Invincible => &[Player, PlayerProjectile],
            Trigger => &[Default],
            Default => &[
                Player,
                Enemy,
                EnemyProjectile,
                PlayerProjectile,
                Obstacle,
                Boundary,
                Trigger,
                PowerUp,
            ],
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

bitflags::bitflags! {
    /// Group memberships used by the resolution-time veto
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionGroups: u8 {
        /// On the player's side
        const FRIENDLY = 1 << 0;
        /// Against the player
        const HOSTILE = 1 << 1;
        /// Hard surface
        const SOLID = 1 << 2;
        /// Can be broken
        const DESTRUCTIBLE = 1 << 3;
        /// Collectible
        const POWERUP = 1 << 4;
    }
}

impl CollisionGroups {
    /// Group compatibility check applied after the category table
    ///
    /// - SOLID against DESTRUCTIBLE always collides
    /// - mutually FRIENDLY or mutually HOSTILE entities never collide
    /// - POWERUP entities only collide with FRIENDLY entities
    /// - everything else collides
    pub fn compatible(self, other: Self) -> bool {
        if (self.contains(Self::SOLID) && other.contains(Self::DESTRUCTIBLE))
            || (other.contains(Self::SOLID) && self.contains(Self::DESTRUCTIBLE))
        {
            return true;
        }

        if self.contains(Self::FRIENDLY) && other.contains(Self::FRIENDLY) {
            return false;
        }
        if self.contains(Self::HOSTILE) && other.contains(Self::HOSTILE) {
            return false;
        }

        if self.contains(Self::POWERUP) && !other.contains(Self::FRIENDLY) {
            return false;
        }
        if other.contains(Self::POWERUP) && !self.contains(Self::FRIENDLY) {
            return false;
        }

        true
    }
}

/// A single configured change to the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOverride {
    /// One side of the pair
    pub a: CollisionCategory,
    /// Other side of the pair
    pub b: CollisionCategory,
    /// Whether the pair may collide
    pub allowed: bool,
}

const N: usize = CollisionCategory::COUNT;

/// Symmetric category-pair policy table
///
/// Built once at startup and shared (read-only) by the detector and the
/// resolver. Every write goes through `set_pair`, which writes both
/// directions, so `can_collide(a, b) == can_collide(b, a)` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionPolicy {
    table: [[bool; N]; N],
    relevance: [u16; N],
}

impl CollisionPolicy {
    /// A policy where nothing collides
    pub fn empty() -> Self {
        Self {
            table: [[false; N]; N],
            relevance: [0; N],
        }
    }

    /// The standard arcade rule set
    pub fn standard() -> Self {
        use CollisionCategory::*;

        let mut policy = Self::empty();
        for category in CollisionCategory::ALL {
            policy.relevance[category.index()] = category
                .relevant_categories()
                .iter()
                .fold(0, |mask, other| mask | other.bit());
        }

        // Player
        policy.set_pair(Player, Enemy, true);
        policy.set_pair(Player, EnemyProjectile, true);
        policy.set_pair(Player, Obstacle, true);
        policy.set_pair(Player, Boundary, true);
        policy.set_pair(Player, PowerUp, true);

        // Enemy
        policy.set_pair(Enemy, PlayerProjectile, true);
        policy.set_pair(Enemy, Obstacle, false);
        policy.set_pair(Enemy, Boundary, true);

        // Obstacles bump into each other but wrap around the world edges
        policy.set_pair(Obstacle, Obstacle, true);
        policy.set_pair(Obstacle, Boundary, false);

        // Projectiles
        policy.set_pair(PlayerProjectile, Obstacle, true);
        policy.set_pair(EnemyProjectile, Obstacle, true);
        policy.set_pair(PlayerProjectile, EnemyProjectile, true);
        policy.set_pair(PlayerProjectile, Boundary, false);
        policy.set_pair(EnemyProjectile, Boundary, false);

        // No self hits, no friendly fire
        policy.set_pair(Player, PlayerProjectile, false);
        policy.set_pair(Enemy, EnemyProjectile, false);
        policy.set_pair(Enemy, Enemy, false);
        policy.set_pair(EnemyProjectile, EnemyProjectile, false);

        // Invincible
        policy.set_pair(Invincible, PlayerProjectile, true);
        policy.set_pair(Invincible, Player, true);
        policy.set_pair(Invincible, Boundary, false);
        policy.set_pair(Invincible, Obstacle, false);
        policy.set_pair(Invincible, EnemyProjectile, false);
        policy.set_pair(Invincible, Enemy, false);
        policy.set_pair(Invincible, Invincible, false);

        // Default
        for other in CollisionCategory::ALL {
            let allowed = !matches!(other, Default | Invincible);
            policy.set_pair(Default, other, allowed);
        }

        policy
    }

    /// Apply configured overrides on top of this policy
    pub fn with_overrides(mut self, overrides: &[PolicyOverride]) -> Self {
        for o in overrides {
            log::debug!("Collision policy override: {:?} <-> {:?} = {}", o.a, o.b, o.allowed);
            self.set_pair(o.a, o.b, o.allowed);
        }
        self
    }

    /// Builder-style single pair change
    pub fn with_pair(mut self, a: CollisionCategory, b: CollisionCategory, allowed: bool) -> Self {
        self.set_pair(a, b, allowed);
        self
    }

    fn set_pair(&mut self, a: CollisionCategory, b: CollisionCategory, allowed: bool) {
        self.table[a.index()][b.index()] = allowed;
        self.table[b.index()][a.index()] = allowed;
        if allowed {
            self.relevance[a.index()] |= b.bit();
            self.relevance[b.index()] |= a.bit();
        }
    }

    /// Whether entities of these two categories may collide
    pub fn can_collide(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        self.table[a.index()][b.index()]
    }

    /// Whether `other` is worth querying as a neighbour of `category`
    pub fn is_relevant(&self, category: CollisionCategory, other: CollisionCategory) -> bool {
        self.relevance[category.index()] & other.bit() != 0
    }

    /// Group veto, see [`CollisionGroups::compatible`]
    pub fn groups_compatible(a: CollisionGroups, b: CollisionGroups) -> bool {
        a.compatible(b)
    }

    /// Check the table's symmetry invariant
    pub fn is_symmetric(&self) -> bool {
        (0..N).all(|i| (0..N).all(|j| self.table[i][j] == self.table[j][i]))
    }
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
