//! Fixed-capacity collider arena
//!
//! Colliders live in a fixed array of slots whose allocation is tracked by a
//! [`ColliderSet`]. A slot index is what the spatial hash stores; callers only
//! ever see the generational [`ColliderHandle`], which the arena maps back to
//! a slot and validates on every access.

use crate::foundation::collections::{ColliderSet, MAX_COLLIDERS};
use crate::physics::collider::{Collider, ColliderDesc, ColliderHandle};
use crate::physics::error::CollisionError;
use slotmap::SlotMap;

/// Slot storage for colliders
pub struct ColliderArena {
    handles: SlotMap<ColliderHandle, usize>,
    slots: Vec<Option<Collider>>,
    alloc: ColliderSet,
    capacity: usize,
}

impl ColliderArena {
    /// Create an arena with `capacity` slots (at most [`MAX_COLLIDERS`])
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_COLLIDERS);
        Self {
            handles: SlotMap::with_capacity_and_key(capacity),
            slots: (0..capacity).map(|_| None).collect(),
            alloc: ColliderSet::new(),
            capacity,
        }
    }

    /// Allocate the lowest free slot for a new collider
    pub fn insert(&mut self, desc: ColliderDesc) -> Result<(ColliderHandle, usize), CollisionError> {
        let slot = self
            .alloc
            .first_clear_below(self.capacity)
            .ok_or(CollisionError::ArenaFull { capacity: self.capacity })?;

        let handle = self.handles.insert(slot);
        self.alloc.mark(slot);
        self.slots[slot] = Some(Collider::from_desc(handle, desc));
        Ok((handle, slot))
    }

    /// Free a collider's slot and hand back its record
    pub fn remove(&mut self, handle: ColliderHandle) -> Result<(usize, Collider), CollisionError> {
        let slot = self
            .handles
            .remove(handle)
            .ok_or(CollisionError::StaleHandle(handle))?;
        self.alloc.clear(slot);
        let collider = self.slots[slot]
            .take()
            .ok_or(CollisionError::StaleHandle(handle))?;
        Ok((slot, collider))
    }

    /// Slot index of a live handle
    pub fn slot_of(&self, handle: ColliderHandle) -> Result<usize, CollisionError> {
        self.handles
            .get(handle)
            .copied()
            .ok_or(CollisionError::StaleHandle(handle))
    }

    /// Collider behind a live handle
    pub fn get(&self, handle: ColliderHandle) -> Result<&Collider, CollisionError> {
        let slot = self.slot_of(handle)?;
        self.at(slot).ok_or(CollisionError::StaleHandle(handle))
    }

    /// Mutable collider behind a live handle
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Result<&mut Collider, CollisionError> {
        let slot = self.slot_of(handle)?;
        self.at_mut(slot).ok_or(CollisionError::StaleHandle(handle))
    }

    /// Collider in `slot`, if allocated
    pub fn at(&self, slot: usize) -> Option<&Collider> {
        self.slots.get(slot)?.as_ref()
    }

    /// Mutable collider in `slot`, if allocated
    pub fn at_mut(&mut self, slot: usize) -> Option<&mut Collider> {
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Handle of the collider in `slot`, if allocated
    pub fn handle_at(&self, slot: usize) -> Option<ColliderHandle> {
        self.at(slot).map(Collider::handle)
    }

    /// Is the handle live?
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.handles.contains_key(handle)
    }

    /// Set of allocated slots
    pub fn allocated(&self) -> ColliderSet {
        self.alloc
    }

    /// Allocated colliders in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Number of live colliders
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no collider is allocated
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when every slot is in use
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }
}
