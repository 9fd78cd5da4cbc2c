//! # Sector Collide
//!
//! Broad-phase axis-aligned box collision and trigger events for 2D games.
//!
//! ## Features
//!
//! - **Fixed capacity**: arena, spatial hash and contact table are sized once
//! - **Sliding movement**: moves resolve Y then X, so movers slide along walls
//! - **Trigger diffing**: per-tick `Enter`/`Exit` (and optional `Stay`) events
//! - **Queries**: box, point and segment raycast
//! - **Delegates**: push moved positions into transforms or scene nodes
//!
//! ## Quick Start
//!
//! ```rust
//! use sector_collide::prelude::*;
//!
//! fn main() -> Result<(), CollisionError> {
//!     let mut world = CollisionSystem::new(CollisionConfig::default())?;
//!
//!     let floor = world.add_collider(
//!         ColliderDesc::new(AABB::from_coords(-10.0, 2.0, 10.0, 3.0))
//!             .with_category(CollisionLayers::ENVIRONMENT)
//!             .with_collision_mask(CollisionLayers::NONE),
//!     )?;
//!     let hero = world.add_collider(
//!         ColliderDesc::new(AABB::from_coords(0.0, 0.0, 1.0, 1.0))
//!             .with_category(CollisionLayers::PLAYER)
//!             .with_collision_mask(CollisionLayers::ENVIRONMENT),
//!     )?;
//!
//!     let hits = world.move_collider(hero, Vec2::new(0.0, 5.0))?;
//!     assert!(hits.hit_bottom());
//!     assert!(world.contains(floor));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::new_without_default)]

pub mod assets;
pub mod config;
pub mod debug;
pub mod foundation;
pub mod physics;
pub mod spatial;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{boxes_from_bytes, AssetError, BoxRecord},
        config::{CollisionConfig, Config, ConfigError},
        debug::{DebugLineBuffer, LinePlotter},
        foundation::math::{Color, Mat3, Point2, Vec2},
        physics::{
            Collider, ColliderDelegate, ColliderDesc, ColliderHandle, CollisionError,
            CollisionLayers, CollisionSystem, HitSides, PositionDelegate, Ray, RayHit,
            TransformNode, TriggerEvent, TriggerKind, AABB,
        },
    };
}
