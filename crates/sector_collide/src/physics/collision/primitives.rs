//! Primitive collision shapes and intersection algorithms
//!
//! Provides the axis-aligned box and the segment ray used by every query in
//! the collision system. Coordinates are in meters with +Y pointing down, so
//! `min` is the top-left corner and `max` the bottom-right.

use crate::foundation::math::{Point2, Vec2};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (top-left)
    pub min: Vec2,
    /// Maximum corner (bottom-right)
    pub max: Vec2,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create an AABB from raw corner coordinates
    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// Create an AABB from its top-left corner and size
    pub fn from_top_left_size(top_left: Vec2, size: Vec2) -> Self {
        Self::new(top_left, top_left + size)
    }

    /// True when `min <= max` on both axes (false for NaN corners)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Top-left corner
    pub fn top_left(&self) -> Vec2 {
        self.min
    }

    /// Top-right corner
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }

    /// Bottom-left corner
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }

    /// Bottom-right corner
    pub fn bottom_right(&self) -> Vec2 {
        self.max
    }

    /// Middle of the bottom edge, handy for "feet" positions
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(0.5 * (self.min.x + self.max.x), self.max.y)
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Corners in outline order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// Check if this AABB contains a point (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.min.x <= point.x && self.max.x >= point.x &&
        self.min.y <= point.y && self.max.y >= point.y
    }

    /// Strict separating-axis overlap test: boxes that only share an edge do
    /// not overlap
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x &&
        self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Overlap test that ignores penetration of `slop` or less on either axis
    pub fn overlaps_with_slop(&self, other: &AABB, slop: f32) -> bool {
        self.min.x + slop < other.max.x && self.max.x - slop > other.min.x &&
        self.min.y + slop < other.max.y && self.max.y - slop > other.min.y
    }

    /// Copy of this box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> AABB {
        AABB::new(self.min + offset, self.max + offset)
    }

    /// Smallest box covering both boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB::new(
            Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    /// Box covering this box both before and after moving by `offset`
    pub fn swept(&self, offset: Vec2) -> AABB {
        self.union(&self.translated(offset))
    }
}

/// A segment ray from `p0` to `p1`, parameterised by `u` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub p0: Vec2,
    /// End point
    pub p1: Vec2,
}

impl Ray {
    /// Creates a new ray between two points
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }

    /// Creates a ray from raw coordinates
    pub fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// Vector from `p0` to `p1`
    pub fn offset(&self) -> Vec2 {
        self.p1 - self.p0
    }

    /// Get the point at parameter `u`
    pub fn point_at(&self, u: f32) -> Vec2 {
        self.p0 + self.offset() * u
    }

    /// Bounding box of the segment
    pub fn bounds(&self) -> AABB {
        AABB::from_coords(
            self.p0.x.min(self.p1.x),
            self.p0.y.min(self.p1.y),
            self.p0.x.max(self.p1.x),
            self.p0.y.max(self.p1.y),
        )
    }

    /// Parametric entry point of the segment into `aabb`
    ///
    /// Tests the box edge facing the ray on each axis (the left or right edge,
    /// then the top or bottom edge) and keeps the smallest positive `u` whose
    /// crossing lies strictly inside the perpendicular extent. Segments that
    /// start inside the box, or that never cross a facing edge within
    /// `[0, 1]`, return `None`.
    pub fn intersect(&self, aabb: &AABB) -> Option<f32> {
        let d = self.offset();
        let mut result: Option<f32> = None;

        let mut keep = |u: f32| {
            if u > 0.0 {
                result = Some(result.map_or(u, |r| r.min(u)));
            }
        };

        if self.p0.x < aabb.min.x && self.p1.x > aabb.min.x {
            // left edge
            let u = (aabb.min.x - self.p0.x) / d.x;
            let y = self.p0.y + u * d.y;
            if y > aabb.min.y && y < aabb.max.y {
                keep(u);
            }
        } else if self.p0.x > aabb.max.x && self.p1.x < aabb.max.x {
            // right edge
            let u = (aabb.max.x - self.p0.x) / d.x;
            let y = self.p0.y + u * d.y;
            if y > aabb.min.y && y < aabb.max.y {
                keep(u);
            }
        }

        if self.p0.y < aabb.min.y && self.p1.y > aabb.min.y {
            // top edge
            let u = (aabb.min.y - self.p0.y) / d.y;
            let x = self.p0.x + u * d.x;
            if x > aabb.min.x && x < aabb.max.x {
                keep(u);
            }
        } else if self.p0.y > aabb.max.y && self.p1.y < aabb.max.y {
            // bottom edge
            let u = (aabb.max.y - self.p0.y) / d.y;
            let x = self.p0.x + u * d.x;
            if x > aabb.min.x && x < aabb.max.x {
                keep(u);
            }
        }

        result
    }
}

/// Result of a successful raycast against the collision system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<H> {
    /// The collider that was hit
    pub collider: H,
    /// Ray parameter of the entry point, in `(0, 1]`
    pub u: f32,
    /// Entry point in world meters
    pub point: Point2,
}
