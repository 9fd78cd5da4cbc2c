//! Geometric primitives used by the collision system
//!
//! # Key Types
//!
//! - [`AABB`] - Axis-aligned box in world meters, the only collider shape
//! - [`Ray`] - Segment used for raycasts
//! - [`RayHit`] - Raycast result carrying the hit collider

pub mod primitives;

// Re-export commonly used types
pub use primitives::{Ray, RayHit, AABB};
