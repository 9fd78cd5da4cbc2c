//! Physics module for broad-phase collision and triggers
//!
//! [`CollisionSystem`] owns every collider and answers movement, trigger,
//! box, point and ray queries against a spatial hash of unit sectors.

pub mod arena;
pub mod collider;
pub mod collision;
pub mod collision_layers;
pub mod collision_system;
pub mod contact;
pub mod delegate;
pub mod error;
pub mod movement;
pub mod query;
pub mod trigger;

#[cfg(test)]
mod tests;

pub use collider::{Collider, ColliderDesc, ColliderHandle};
pub use collision::{Ray, RayHit, AABB};
pub use collision_layers::CollisionLayers;
pub use collision_system::CollisionSystem;
pub use contact::Contact;
pub use delegate::{ColliderDelegate, PositionDelegate, TransformNode};
pub use error::CollisionError;
pub use movement::HitSides;
pub use query::ColliderQuery;
pub use trigger::{TriggerEvent, TriggerKind};
