//! Collision system errors

use crate::config::ConfigError;
use crate::physics::collider::ColliderHandle;
use crate::physics::collision::AABB;
use thiserror::Error;

/// Errors reported by the collision system
///
/// Every failing operation leaves the system exactly as it was before the
/// call.
#[derive(Error, Debug)]
pub enum CollisionError {
    /// Every arena slot is in use
    #[error("Collider arena is full ({capacity} slots)")]
    ArenaFull {
        /// Configured arena capacity
        capacity: usize,
    },

    /// The handle was removed, or never belonged to this system
    #[error("Stale or unknown collider handle {0:?}")]
    StaleHandle(ColliderHandle),

    /// A collider's collision and trigger masks share bits
    #[error("Collision mask {collision:#010x} overlaps trigger mask {trigger:#010x}")]
    OverlappingMasks {
        /// Requested collision mask
        collision: u32,
        /// Requested trigger mask
        trigger: u32,
    },

    /// Inverted or non-finite box
    #[error("Invalid bounds: {0:?}")]
    InvalidBounds(AABB),

    /// Construction parameters rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
