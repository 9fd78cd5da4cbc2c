//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - 2D math types and affine helpers
//! - Fixed-width bitsets used by the arena and the spatial hash
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
