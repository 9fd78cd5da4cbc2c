//! Cross-module collision system tests
//!
//! Scenario tests drive the public API the way a game loop does. Randomized
//! tests compare trigger events and movement against brute-force models.

mod scenarios;

use crate::physics::CollisionSystem;
use crate::spatial::SectorRange;
use std::collections::HashSet;

/// Every enabled collider's slot must be in exactly the buckets under its
/// box, and disabled or free slots in none
pub(crate) fn assert_hash_consistent(sys: &CollisionSystem) {
    let bucket_count = sys.grid.bucket_count();
    for slot in 0..sys.capacity() {
        let expected: HashSet<usize> = match sys.arena.at(slot) {
            Some(c) if c.is_enabled() => {
                let range = SectorRange::of(&c.bounds());
                if range.sector_count() >= bucket_count as u64 {
                    (0..bucket_count).collect()
                } else {
                    range.iter().map(|(x, y)| sys.grid.bucket_index(x, y)).collect()
                }
            }
            _ => HashSet::new(),
        };
        for bucket in 0..bucket_count {
            let present = sys.grid.bucket(bucket).map_or(false, |b| b.contains(slot));
            assert_eq!(
                present,
                expected.contains(&bucket),
                "slot {} in bucket {}",
                slot,
                bucket
            );
        }
    }
}
