//! Collision system facade
//!
//! Owns the collider arena, the spatial hash and the trigger contact table.
//! Movement lives in [`movement`](super::movement), trigger diffing in
//! [`trigger`](super::trigger) and box/point/ray queries in
//! [`query`](super::query); this module covers construction, collider
//! lifecycle, per-collider state and debug drawing.
//!
//! A collider is present in the spatial hash exactly while it is enabled.
//! Every mutation of an enabled collider's box is bracketed by an unhash of
//! the old box and a rehash of the new one.

use crate::config::CollisionConfig;
use crate::debug::LinePlotter;
use crate::foundation::math::{affine, Color, Mat3, Point2, Vec2};
use crate::physics::arena::ColliderArena;
use crate::physics::collider::{Collider, ColliderDesc, ColliderHandle};
use crate::physics::collision::AABB;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::contact::ContactTable;
use crate::physics::delegate::PositionDelegate;
use crate::physics::error::CollisionError;
use crate::spatial::SpatialHashGrid;
use std::any::Any;

/// Broad-phase collision and trigger system
pub struct CollisionSystem {
    pub(crate) arena: ColliderArena,
    pub(crate) grid: SpatialHashGrid,
    pub(crate) contacts: ContactTable,
    pub(crate) meters_to_display: Mat3,
    pub(crate) config: CollisionConfig,
}

impl CollisionSystem {
    /// Create a system from a validated configuration
    pub fn new(config: CollisionConfig) -> Result<Self, CollisionError> {
        config.validate()?;

        log::info!(
            "Creating collision system: {} colliders, {} buckets, {} contacts",
            config.collider_capacity,
            config.bucket_count,
            config.max_contacts
        );

        Ok(Self {
            arena: ColliderArena::new(config.collider_capacity),
            grid: SpatialHashGrid::new(config.bucket_count),
            contacts: ContactTable::new(config.max_contacts),
            meters_to_display: affine::scale(config.meters_to_display_scale),
            config,
        })
    }

    /// Create a system with explicit capacities and default tuning
    pub fn with_capacity(
        collider_capacity: usize,
        bucket_count: usize,
        max_contacts: usize,
    ) -> Result<Self, CollisionError> {
        Self::new(CollisionConfig::with_capacities(collider_capacity, bucket_count, max_contacts))
    }

    /// Configuration the system was built with
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Transform from world meters to display units
    pub fn meters_to_display(&self) -> &Mat3 {
        &self.meters_to_display
    }

    /// Replace the meters-to-display transform
    pub fn set_meters_to_display(&mut self, matrix: Mat3) {
        self.meters_to_display = matrix;
    }

    /// Use a uniform meters-to-display scale
    pub fn set_meters_to_display_scale(&mut self, scale: f32) {
        self.meters_to_display = affine::scale(scale);
    }

    // ---- lifecycle ----

    /// Add a collider
    ///
    /// Fails without side effects when the box is inverted or non-finite, when
    /// the collision and trigger masks share bits, or when the arena is full.
    pub fn add_collider(&mut self, desc: ColliderDesc) -> Result<ColliderHandle, CollisionError> {
        check_bounds(&desc.bounds)?;
        check_masks(desc.collision_mask, desc.trigger_mask)?;

        let bounds = desc.bounds;
        let enabled = desc.enabled;
        let (handle, slot) = self.arena.insert(desc).map_err(|e| {
            log::warn!("Cannot add collider: {}", e);
            e
        })?;
        if enabled {
            self.grid.insert(slot, &bounds);
        }

        log::debug!("Added collider {:?} in slot {} at {:?}", handle, slot, bounds);
        Ok(handle)
    }

    /// Add one non-moving blocker per box
    ///
    /// Static boxes have an empty collision mask: they block others but are
    /// never resolved against anything themselves. Either every box is added
    /// or, on the first failure, the ones already added are removed again.
    pub fn add_static_boxes<I>(&mut self, boxes: I, category: u32) -> Result<Vec<ColliderHandle>, CollisionError>
    where
        I: IntoIterator<Item = AABB>,
    {
        let mut added = Vec::new();
        for aabb in boxes {
            let desc = ColliderDesc::new(aabb)
                .with_category(category)
                .with_collision_mask(CollisionLayers::NONE);
            match self.add_collider(desc) {
                Ok(handle) => added.push(handle),
                Err(e) => {
                    for handle in added {
                        if let Err(undo) = self.remove_collider(handle) {
                            log::warn!("Rollback could not remove static box {:?}: {}", handle, undo);
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(added)
    }

    /// Remove a collider and hand back its record
    ///
    /// Every contact naming the collider on either side is dropped. No EXIT
    /// is reported for those contacts.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<Collider, CollisionError> {
        let (slot, collider) = self.arena.remove(handle)?;
        if collider.enabled {
            self.grid.remove(slot, &collider.bounds);
        }
        let purged = self.contacts.purge(handle);

        log::debug!(
            "Removed collider {:?} from slot {} ({} contacts purged)",
            handle,
            slot,
            purged
        );
        Ok(collider)
    }

    /// Put a collider back into the spatial hash
    pub fn enable(&mut self, handle: ColliderHandle) -> Result<(), CollisionError> {
        let slot = self.arena.slot_of(handle)?;
        let collider = self.arena.get_mut(handle)?;
        if !collider.enabled {
            collider.enabled = true;
            self.grid.insert(slot, &collider.bounds);
            log::debug!("Enabled collider {:?}", handle);
        }
        Ok(())
    }

    /// Take a collider out of the spatial hash
    ///
    /// Disabled colliders are invisible to queries, movement and trigger
    /// discovery, but can still be moved and are still debug drawn.
    pub fn disable(&mut self, handle: ColliderHandle) -> Result<(), CollisionError> {
        let slot = self.arena.slot_of(handle)?;
        let collider = self.arena.get_mut(handle)?;
        if collider.enabled {
            collider.enabled = false;
            self.grid.remove(slot, &collider.bounds);
            log::debug!("Disabled collider {:?}", handle);
        }
        Ok(())
    }

    // ---- per-collider state ----

    /// Read access to a collider
    pub fn collider(&self, handle: ColliderHandle) -> Result<&Collider, CollisionError> {
        self.arena.get(handle)
    }

    /// Teleport a collider so its top-left corner is at `top_left`
    ///
    /// Keeps the size. Does not resolve collisions or notify the delegate.
    pub fn set_position(&mut self, handle: ColliderHandle, top_left: Vec2) -> Result<(), CollisionError> {
        let slot = self.arena.slot_of(handle)?;
        let collider = self.arena.get_mut(handle)?;
        let bounds = AABB::from_top_left_size(top_left, collider.bounds.size());
        check_bounds(&bounds)?;

        if collider.enabled {
            self.grid.remove(slot, &collider.bounds);
            self.grid.insert(slot, &bounds);
        }
        collider.bounds = bounds;
        Ok(())
    }

    /// Change what the collider is
    pub fn set_category_mask(&mut self, handle: ColliderHandle, mask: u32) -> Result<(), CollisionError> {
        self.arena.get_mut(handle)?.category_mask = mask;
        Ok(())
    }

    /// Change what blocks the collider; must stay disjoint from its trigger mask
    pub fn set_collision_mask(&mut self, handle: ColliderHandle, mask: u32) -> Result<(), CollisionError> {
        let collider = self.arena.get_mut(handle)?;
        check_masks(mask, collider.trigger_mask)?;
        collider.collision_mask = mask;
        Ok(())
    }

    /// Change what the collider senses; must stay disjoint from its collision mask
    pub fn set_trigger_mask(&mut self, handle: ColliderHandle, mask: u32) -> Result<(), CollisionError> {
        let collider = self.arena.get_mut(handle)?;
        check_masks(collider.collision_mask, mask)?;
        collider.trigger_mask = mask;
        Ok(())
    }

    /// Offset from the top-left corner used for delegate positions
    pub fn set_pivot(&mut self, handle: ColliderHandle, pivot: Vec2) -> Result<(), CollisionError> {
        self.arena.get_mut(handle)?.pivot = pivot;
        Ok(())
    }

    /// Attach a position delegate, replacing any previous one
    pub fn set_delegate(
        &mut self,
        handle: ColliderHandle,
        delegate: PositionDelegate,
        pivot: Vec2,
    ) -> Result<(), CollisionError> {
        let collider = self.arena.get_mut(handle)?;
        collider.delegate = delegate;
        collider.pivot = pivot;
        Ok(())
    }

    /// Detach the position delegate
    pub fn clear_delegate(&mut self, handle: ColliderHandle) -> Result<(), CollisionError> {
        self.arena.get_mut(handle)?.delegate = PositionDelegate::None;
        Ok(())
    }

    /// Replace the collider's payload
    pub fn set_user_data<T: Any>(&mut self, handle: ColliderHandle, data: T) -> Result<(), CollisionError> {
        self.arena.get_mut(handle)?.user_data = Some(Box::new(data));
        Ok(())
    }

    /// Typed view of the collider's payload
    pub fn user_data<T: Any>(&self, handle: ColliderHandle) -> Result<Option<&T>, CollisionError> {
        Ok(self.arena.get(handle)?.user_data::<T>())
    }

    // ---- polling ----

    /// Is `b` blocking `a` right now? Uses the exact, slop-free overlap.
    pub fn collides(&self, a: ColliderHandle, b: ColliderHandle) -> Result<bool, CollisionError> {
        Ok(self.arena.get(a)?.collides(self.arena.get(b)?, 0.0))
    }

    /// Is `a` overlapping trigger `b` right now? Uses the exact overlap.
    pub fn triggers(&self, a: ColliderHandle, b: ColliderHandle) -> Result<bool, CollisionError> {
        Ok(self.arena.get(a)?.triggers(self.arena.get(b)?, 0.0))
    }

    /// Is the handle live?
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.arena.contains(handle)
    }

    /// Number of live colliders
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when no collider is live
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Arena capacity
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Number of active trigger contacts
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Live colliders in slot order
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.arena.iter()
    }

    // ---- debug ----

    /// Outline every allocated collider, enabled or not, in display space
    ///
    /// Emits four edges per box: top, right, bottom, left.
    pub fn debug_draw(&self, plotter: &mut dyn LinePlotter, color: Color) {
        for collider in self.arena.iter() {
            let corners = collider.bounds.corners().map(|c| {
                self.meters_to_display.transform_point(&Point2::from(c))
            });
            for i in 0..4 {
                plotter.plot(corners[i], corners[(i + 1) % 4], color);
            }
        }
    }
}

pub(crate) fn check_bounds(bounds: &AABB) -> Result<(), CollisionError> {
    let finite = bounds.min.iter().chain(bounds.max.iter()).all(|v| v.is_finite());
    if finite && bounds.is_valid() {
        Ok(())
    } else {
        Err(CollisionError::InvalidBounds(*bounds))
    }
}

fn check_masks(collision: u32, trigger: u32) -> Result<(), CollisionError> {
    if CollisionLayers::are_disjoint(collision, trigger) {
        Ok(())
    } else {
        Err(CollisionError::OverlappingMasks { collision, trigger })
    }
}
