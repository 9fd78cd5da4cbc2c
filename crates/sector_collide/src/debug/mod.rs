//! Debug drawing support
//!
//! The collision system draws through the [`LinePlotter`] trait so any
//! renderer can consume its outlines.

pub mod draw;

pub use draw::{DebugLine, DebugLineBuffer, LinePlotter};
