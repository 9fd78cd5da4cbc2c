//! Math utilities and types
//!
//! Provides the 2D math types used by the collision system. World space is
//! measured in "meters" with +Y pointing down, so the minimum corner of a box
//! is its top-left.

pub use nalgebra::{Matrix3, Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Homogeneous 3x3 matrix used as a 2D affine transform
pub type Mat3 = Matrix3<f32>;

/// RGBA color used by debug drawing
pub type Color = Vector4<f32>;

/// Shorthand for building a [`Vec2`]
#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Affine transform helpers for [`Mat3`]
pub mod affine {
    use super::{Mat3, Point2, Vec2};

    /// Uniform scale transform
    pub fn scale(k: f32) -> Mat3 {
        Mat3::new_nonuniform_scaling(&Vec2::new(k, k))
    }

    /// Read the translation column of an affine transform
    pub fn get_translation(m: &Mat3) -> Vec2 {
        Vec2::new(m[(0, 2)], m[(1, 2)])
    }

    /// Overwrite the translation column of an affine transform, leaving the
    /// linear part untouched
    pub fn set_translation(m: &mut Mat3, t: Point2) {
        m[(0, 2)] = t.x;
        m[(1, 2)] = t.y;
    }
}

/// Color constants for debug output
pub mod colors {
    use super::Color;

    /// Opaque white
    pub fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque green
    pub fn green() -> Color {
        Color::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Opaque red
    pub fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }
}
