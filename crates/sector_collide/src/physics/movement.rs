//! Axis-separated movement resolution
//!
//! A move is resolved on Y first and then on X, each against the same set of
//! broad-phase candidates gathered once for the whole swept box. Because the
//! axes are independent, a diagonal move into a wall stops on one axis and
//! keeps sliding on the other. Large offsets can tunnel through thin
//! blockers; callers sub-step fast movers.

use crate::foundation::math::{Point2, Vec2};
use crate::physics::collider::ColliderHandle;
use crate::physics::collision::AABB;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::collision_system::{check_bounds, CollisionSystem};
use crate::physics::error::CollisionError;
use bitflags::bitflags;

bitflags! {
    /// Sides of the mover that were blocked during a move
    ///
    /// One flag per byte: the low 16 bits are the vertical half and the high
    /// 16 bits the horizontal half.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HitSides: u32 {
        /// Landed on something while moving down
        const BOTTOM = 0x0000_0001;
        /// Bumped something while moving up
        const TOP = 0x0000_0100;
        /// Blocked while moving left
        const LEFT = 0x0001_0000;
        /// Blocked while moving right
        const RIGHT = 0x0100_0000;

        /// Either vertical side
        const VERTICAL = Self::BOTTOM.bits() | Self::TOP.bits();
        /// Either horizontal side
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl HitSides {
    /// Blocked below
    pub fn hit_bottom(self) -> bool {
        self.contains(Self::BOTTOM)
    }

    /// Blocked above
    pub fn hit_top(self) -> bool {
        self.contains(Self::TOP)
    }

    /// Blocked on the left
    pub fn hit_left(self) -> bool {
        self.contains(Self::LEFT)
    }

    /// Blocked on the right
    pub fn hit_right(self) -> bool {
        self.contains(Self::RIGHT)
    }

    /// Blocked on either vertical side
    pub fn hit_vertical(self) -> bool {
        self.intersects(Self::VERTICAL)
    }

    /// Blocked on either horizontal side
    pub fn hit_horizontal(self) -> bool {
        self.intersects(Self::HORIZONTAL)
    }
}

impl CollisionSystem {
    /// Move a collider by `offset`, sliding along blockers
    ///
    /// A blocker is any enabled collider whose category intersects the
    /// mover's collision mask. Blockers the mover already overlaps before a
    /// pass are ignored by that pass, so a collider spawned inside geometry
    /// can still walk out. After the move the attached delegate, if any,
    /// receives `meters_to_display * (min + pivot)`.
    pub fn move_collider(&mut self, handle: ColliderHandle, offset: Vec2) -> Result<HitSides, CollisionError> {
        let slot = self.arena.slot_of(handle)?;
        let (start, collision_mask, enabled) = {
            let c = self.arena.get(handle)?;
            (c.bounds, c.collision_mask, c.enabled)
        };
        check_bounds(&start.translated(offset))?;

        if enabled {
            self.grid.remove(slot, &start);
        }

        let slop = self.config.slop;
        let candidates = self.grid.broad_phase(&start.swept(offset));
        let blockers: Vec<AABB> = candidates
            .iter()
            .filter_map(|s| self.arena.at(s))
            .filter(|c| c.handle != handle && CollisionLayers::blocks(collision_mask, c.category_mask))
            .map(|c| c.bounds)
            .collect();

        let mut hits = HitSides::empty();
        let after_y = resolve_y(start, offset.y, &blockers, slop, &mut hits);
        let bounds = resolve_x(after_y, offset.x, &blockers, slop, &mut hits);

        if enabled {
            self.grid.insert(slot, &bounds);
        }

        let collider = self.arena.get_mut(handle)?;
        collider.bounds = bounds;
        if collider.delegate.is_attached() {
            let position = self
                .meters_to_display
                .transform_point(&Point2::from(bounds.min + collider.pivot));
            collider.delegate.push(position);
        }

        if !hits.is_empty() {
            log::trace!("Collider {:?} blocked {:?} at {:?}", handle, hits, bounds);
        }
        Ok(hits)
    }
}

fn resolve_y(start: AABB, dy: f32, blockers: &[AABB], slop: f32, hits: &mut HitSides) -> AABB {
    let height = start.max.y - start.min.y;
    let mut b = start;
    if dy > 0.0 {
        b.max.y += dy;
        for other in ahead(&start, blockers, slop) {
            if b.overlaps_with_slop(other, slop) {
                b.max.y = other.min.y;
                *hits |= HitSides::BOTTOM;
            }
        }
        b.min.y = b.max.y - height;
    } else if dy < 0.0 {
        b.min.y += dy;
        for other in ahead(&start, blockers, slop) {
            if b.overlaps_with_slop(other, slop) {
                b.min.y = other.max.y;
                *hits |= HitSides::TOP;
            }
        }
        b.max.y = b.min.y + height;
    }
    b
}

fn resolve_x(start: AABB, dx: f32, blockers: &[AABB], slop: f32, hits: &mut HitSides) -> AABB {
    let width = start.max.x - start.min.x;
    let mut b = start;
    if dx > 0.0 {
        b.max.x += dx;
        for other in ahead(&start, blockers, slop) {
            if b.overlaps_with_slop(other, slop) {
                b.max.x = other.min.x;
                *hits |= HitSides::RIGHT;
            }
        }
        b.min.x = b.max.x - width;
    } else if dx < 0.0 {
        b.min.x += dx;
        for other in ahead(&start, blockers, slop) {
            if b.overlaps_with_slop(other, slop) {
                b.min.x = other.max.x;
                *hits |= HitSides::LEFT;
            }
        }
        b.max.x = b.min.x + width;
    }
    b
}

// Blockers not already overlapped by the box at the start of a pass. Every
// remaining blocker that overlaps the extended box lies beyond the leading
// edge, so each clamp only shortens the box.
fn ahead<'a>(start: &'a AABB, blockers: &'a [AABB], slop: f32) -> impl Iterator<Item = &'a AABB> + 'a {
    blockers.iter().filter(move |b| !start.overlaps_with_slop(b, slop))
}
