//! Fixed-bucket spatial hash over unit sectors
//!
//! World space is cut into 1m x 1m *sectors*. Each sector is hashed to one of
//! a fixed number of *buckets*, and each bucket is a [`ColliderSet`] of arena
//! slots. A collider is flagged in the bucket of every sector its box
//! overlaps, so a broad-phase query is the union of the buckets under the
//! query box. Unrelated sectors can share a bucket, which makes the result a
//! superset of the true overlaps: callers still run the exact AABB test.

use crate::foundation::collections::ColliderSet;
use crate::physics::collision::AABB;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Inclusive range of integer sectors covered by a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorRange {
    /// Leftmost sector column
    pub min_x: i32,
    /// Topmost sector row
    pub min_y: i32,
    /// Rightmost sector column
    pub max_x: i32,
    /// Bottommost sector row
    pub max_y: i32,
}

impl SectorRange {
    /// Sectors covered by `aabb`, each corner rounded with a +0.5 bias so a
    /// box resting exactly on a sector edge does not flicker between rows
    pub fn of(aabb: &AABB) -> Self {
        Self {
            min_x: sector_coord(aabb.min.x),
            min_y: sector_coord(aabb.min.y),
            max_x: sector_coord(aabb.max.x),
            max_y: sector_coord(aabb.max.y),
        }
    }

    /// Number of sectors in the range
    pub fn sector_count(&self) -> u64 {
        let w = (i64::from(self.max_x) - i64::from(self.min_x) + 1).max(0);
        let h = (i64::from(self.max_y) - i64::from(self.min_y) + 1).max(0);
        (w as u64).saturating_mul(h as u64)
    }

    /// Does the range include sector `(x, y)`?
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Iterate every `(x, y)` sector in the range, row by row
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> {
        let r = *self;
        (r.min_x..=r.max_x).flat_map(move |x| (r.min_y..=r.max_y).map(move |y| (x, y)))
    }
}

#[inline]
fn sector_coord(v: f32) -> i32 {
    // `as` saturates at the i32 bounds and maps NaN to 0
    (v + 0.5).floor() as i32
}

/// Spatial hash grid with a fixed number of bitset buckets
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    buckets: Vec<ColliderSet>,
}

impl SpatialHashGrid {
    /// Create a grid with `bucket_count` empty buckets
    ///
    /// `bucket_count` must be non-zero; the collision configuration validates
    /// this before the grid is built.
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![ColliderSet::new(); bucket_count.max(1)],
        }
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// FNV-1a style mix of the sector coordinates, reduced modulo the bucket
    /// count
    pub fn bucket_index(&self, x: i32, y: i32) -> usize {
        let h = ((FNV_OFFSET_BASIS ^ x as u32).wrapping_mul(FNV_PRIME) ^ y as u32)
            .wrapping_mul(FNV_PRIME);
        h as usize % self.buckets.len()
    }

    /// Bucket contents at `index`
    pub fn bucket(&self, index: usize) -> Option<&ColliderSet> {
        self.buckets.get(index)
    }

    /// Flag `slot` in every bucket under `aabb`
    pub fn insert(&mut self, slot: usize, aabb: &AABB) {
        self.for_each_bucket(aabb, |bucket| bucket.mark(slot));
    }

    /// Clear `slot` from every bucket under `aabb`
    ///
    /// Must be called with the same box that was inserted; any box mutation
    /// is bracketed by `remove` and `insert`.
    pub fn remove(&mut self, slot: usize, aabb: &AABB) {
        self.for_each_bucket(aabb, |bucket| bucket.clear(slot));
    }

    /// Union of every bucket under `sweep`
    pub fn broad_phase(&self, sweep: &AABB) -> ColliderSet {
        let mut result = ColliderSet::new();
        let range = SectorRange::of(sweep);
        if self.covers_every_bucket(&range) {
            for bucket in &self.buckets {
                result |= *bucket;
            }
        } else {
            for (x, y) in range.iter() {
                result |= self.buckets[self.bucket_index(x, y)];
            }
        }
        result
    }

    /// Clear every bucket
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.reset();
        }
    }

    fn for_each_bucket(&mut self, aabb: &AABB, mut f: impl FnMut(&mut ColliderSet)) {
        let range = SectorRange::of(aabb);
        if self.covers_every_bucket(&range) {
            self.buckets.iter_mut().for_each(f);
        } else {
            for (x, y) in range.iter() {
                let idx = self.bucket_index(x, y);
                f(&mut self.buckets[idx]);
            }
        }
    }

    // A range with at least as many sectors as there are buckets is treated
    // as touching every bucket. This keeps huge boxes O(buckets) and is
    // applied identically on insert, remove and query.
    fn covers_every_bucket(&self, range: &SectorRange) -> bool {
        range.sector_count() >= self.buckets.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_rounding_bias() {
        let range = SectorRange::of(&AABB::from_coords(0.0, 0.0, 1.0, 1.0));
        assert_eq!(range, SectorRange { min_x: 0, min_y: 0, max_x: 1, max_y: 1 });

        let range = SectorRange::of(&AABB::from_coords(0.6, 2.4, 1.2, 2.49));
        assert_eq!(range, SectorRange { min_x: 1, min_y: 2, max_x: 1, max_y: 2 });

        // negative coordinates floor rather than truncate
        let range = SectorRange::of(&AABB::from_coords(-0.7, -1.6, -0.6, -1.4));
        assert_eq!(range, SectorRange { min_x: -1, min_y: -2, max_x: -1, max_y: -1 });
    }

    #[test]
    fn test_bucket_index_is_deterministic_and_in_range() {
        let grid = SpatialHashGrid::new(97);
        for x in -20..20 {
            for y in -20..20 {
                let i = grid.bucket_index(x, y);
                assert!(i < 97);
                assert_eq!(i, grid.bucket_index(x, y));
            }
        }
    }

    #[test]
    fn test_insert_and_remove_round_trip() {
        let mut grid = SpatialHashGrid::new(64);
        let b = AABB::from_coords(2.0, 3.0, 4.5, 4.0);
        grid.insert(5, &b);

        let range = SectorRange::of(&b);
        for (x, y) in range.iter() {
            assert!(grid.bucket(grid.bucket_index(x, y)).unwrap().contains(5));
        }
        assert!(grid.broad_phase(&b).contains(5));

        grid.remove(5, &b);
        assert!((0..grid.bucket_count()).all(|i| grid.bucket(i).unwrap().is_empty()));
    }

    #[test]
    fn test_broad_phase_is_superset_of_neighbours() {
        let mut grid = SpatialHashGrid::new(1024);
        grid.insert(1, &AABB::from_coords(0.0, 0.0, 1.0, 1.0));
        grid.insert(2, &AABB::from_coords(10.0, 10.0, 11.0, 11.0));

        let near = grid.broad_phase(&AABB::from_coords(0.5, 0.5, 0.9, 0.9));
        assert!(near.contains(1));

        let far = grid.broad_phase(&AABB::from_coords(10.2, 10.2, 10.4, 10.4));
        assert!(far.contains(2));
    }

    #[test]
    fn test_huge_box_touches_every_bucket() {
        let mut grid = SpatialHashGrid::new(16);
        let huge = AABB::from_coords(-1.0e6, -1.0e6, 1.0e6, 1.0e6);
        grid.insert(3, &huge);
        assert!((0..16).all(|i| grid.bucket(i).unwrap().contains(3)));

        // a tiny query anywhere sees it
        assert!(grid.broad_phase(&AABB::from_coords(5.0, 5.0, 5.1, 5.1)).contains(3));

        grid.remove(3, &huge);
        assert!((0..16).all(|i| grid.bucket(i).unwrap().is_empty()));
    }
}
