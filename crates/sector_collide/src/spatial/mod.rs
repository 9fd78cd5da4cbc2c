//! Spatial partitioning data structures
//!
//! Provides the broad-phase index used by the collision system: a spatial
//! hash of unit sectors into a fixed number of bitset buckets.

mod spatial_hash;

pub use spatial_hash::{SectorRange, SpatialHashGrid};
