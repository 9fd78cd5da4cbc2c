//! Collision layer system for filtering collision detection
//!
//! Every collider carries three masks:
//! - a *category* mask saying what it is,
//! - a *collision* mask saying which categories block its movement,
//! - a *trigger* mask saying which categories it senses as triggers.
//!
//! Filtering is one-directional: a mover is blocked by `other` when
//! `mover.collision_mask & other.category_mask != 0`, regardless of what
//! `other` wants. The collision and trigger masks of one collider must be
//! disjoint.

/// Collision layer definitions
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    // Standard game layers (bits 0-7)
    /// Player character layer
    pub const PLAYER: u32 = 1 << 0;

    /// Enemy character layer
    pub const ENEMY: u32 = 1 << 1;

    /// Projectiles (bullets, arrows, etc.)
    pub const PROJECTILE: u32 = 1 << 2;

    /// Static level geometry
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Sensor volumes (doors, checkpoints, hazards)
    pub const TRIGGER: u32 = 1 << 4;

    /// One-off pickups and collectibles
    pub const PICKUP: u32 = 1 << 5;

    /// Movement blockers that only affect non-player actors
    pub const ACTOR_BLOCKER: u32 = 1 << 6;

    /// First bit free for game-specific layers (bits 8-31)
    pub const FIRST_CUSTOM_BIT: u32 = 8;

    /// Custom layer `n` (0-based, counted from [`Self::FIRST_CUSTOM_BIT`])
    pub const fn custom(n: u32) -> u32 {
        1 << (Self::FIRST_CUSTOM_BIT + n)
    }

    /// Does a mover with `collision_mask` get blocked by a collider in
    /// `category_mask`?
    pub const fn blocks(collision_mask: u32, category_mask: u32) -> bool {
        (collision_mask & category_mask) != 0
    }

    /// Does a collider with `trigger_mask` sense a collider in `category_mask`?
    pub const fn senses(trigger_mask: u32, category_mask: u32) -> bool {
        (trigger_mask & category_mask) != 0
    }

    /// Collision and trigger masks must never share a bit
    pub const fn are_disjoint(collision_mask: u32, trigger_mask: u32) -> bool {
        (collision_mask & trigger_mask) == 0
    }

    /// Helper to create a mask from multiple layers
    ///
    /// # Example
    /// ```
    /// use sector_collide::physics::CollisionLayers;
    ///
    /// let mask = CollisionLayers::mask(&[
    ///     CollisionLayers::PLAYER,
    ///     CollisionLayers::ENEMY,
    ///     CollisionLayers::ENVIRONMENT,
    /// ]);
    /// assert_eq!(mask, 0b1011);
    /// ```
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}
