//! Box, point and ray queries
//!
//! All queries start from the spatial hash and then run the exact test, so
//! only enabled colliders are ever reported. Category filtering uses the
//! caller's mask against each collider's category mask.

use crate::foundation::collections::{BitsetIter, COLLIDER_SET_WORDS};
use crate::foundation::math::{Point2, Vec2};
use crate::physics::arena::ColliderArena;
use crate::physics::collider::ColliderHandle;
use crate::physics::collision::{Ray, RayHit, AABB};
use crate::physics::collision_system::CollisionSystem;

/// Lazy iterator over the colliders overlapping a box
///
/// Holds a snapshot of the broad-phase candidates taken when the query was
/// created.
pub struct ColliderQuery<'a> {
    arena: &'a ColliderArena,
    candidates: BitsetIter<COLLIDER_SET_WORDS>,
    bounds: AABB,
    mask: u32,
}

impl Iterator for ColliderQuery<'_> {
    type Item = ColliderHandle;

    fn next(&mut self) -> Option<ColliderHandle> {
        for slot in self.candidates.by_ref() {
            if let Some(c) = self.arena.at(slot) {
                if c.category_mask & self.mask != 0 && self.bounds.overlaps(&c.bounds) {
                    return Some(c.handle);
                }
            }
        }
        None
    }
}

impl CollisionSystem {
    /// Colliders in `mask` whose box strictly overlaps `bounds`
    pub fn query(&self, bounds: AABB, mask: u32) -> ColliderQuery<'_> {
        let candidates = self.grid.broad_phase(&bounds);
        ColliderQuery {
            arena: &self.arena,
            candidates: candidates.iter(),
            bounds,
            mask,
        }
    }

    /// Up to `capacity` colliders in `mask` overlapping `bounds`, in slot
    /// order. Extra hits are dropped.
    pub fn query_colliders(&self, bounds: AABB, mask: u32, capacity: usize) -> Vec<ColliderHandle> {
        self.query(bounds, mask).take(capacity).collect()
    }

    /// Up to `capacity` colliders in `mask` whose box contains `point`,
    /// edges included
    pub fn query_point(&self, point: Vec2, mask: u32, capacity: usize) -> Vec<ColliderHandle> {
        self.grid
            .broad_phase(&AABB::new(point, point))
            .iter()
            .filter_map(|slot| self.arena.at(slot))
            .filter(|c| c.category_mask & mask != 0 && c.bounds.contains_point(point))
            .map(|c| c.handle)
            .take(capacity)
            .collect()
    }

    /// Nearest collider in `mask` entered by the segment `ray`
    ///
    /// Only boxes under the ray's bounding box are considered. Boxes that
    /// contain the ray's start are not hit.
    pub fn raycast(&self, ray: &Ray, mask: u32) -> Option<RayHit<ColliderHandle>> {
        let mut best: Option<(f32, ColliderHandle)> = None;
        for slot in self.grid.broad_phase(&ray.bounds()).iter() {
            let Some(c) = self.arena.at(slot) else {
                continue;
            };
            if c.category_mask & mask == 0 {
                continue;
            }
            if let Some(u) = ray.intersect(&c.bounds) {
                if best.map_or(true, |(b, _)| u < b) {
                    best = Some((u, c.handle));
                }
            }
        }

        best.map(|(u, collider)| RayHit {
            collider,
            u,
            point: Point2::from(ray.point_at(u)),
        })
    }
}
