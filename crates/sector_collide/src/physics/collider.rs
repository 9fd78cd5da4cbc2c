//! Collider records and creation parameters

use crate::foundation::math::Vec2;
use crate::physics::collision::AABB;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::delegate::PositionDelegate;
use std::any::Any;
use std::fmt;

slotmap::new_key_type! {
    /// Generational handle to a collider
    ///
    /// Handles stay valid until the collider is removed. A removed handle is
    /// never confused with the collider that later reuses its slot.
    pub struct ColliderHandle;
}

/// Parameters for [`CollisionSystem::add_collider`](crate::physics::CollisionSystem::add_collider)
///
/// Defaults: category and collision masks [`CollisionLayers::ALL`], empty
/// trigger mask, enabled, no user data. Because the default collision mask
/// covers every bit, a non-empty trigger mask needs a collision mask that
/// leaves those bits out.
pub struct ColliderDesc {
    /// Initial box in world meters
    pub bounds: AABB,
    /// What the collider is
    pub category_mask: u32,
    /// What blocks the collider's movement
    pub collision_mask: u32,
    /// What the collider senses as a trigger
    pub trigger_mask: u32,
    /// Start in the spatial hash
    pub enabled: bool,
    /// Opaque payload
    pub user_data: Option<Box<dyn Any>>,
}

impl ColliderDesc {
    /// Description with default masks
    pub fn new(bounds: AABB) -> Self {
        Self {
            bounds,
            category_mask: CollisionLayers::ALL,
            collision_mask: CollisionLayers::ALL,
            trigger_mask: CollisionLayers::NONE,
            enabled: true,
            user_data: None,
        }
    }

    /// Set the category mask
    pub fn with_category(mut self, mask: u32) -> Self {
        self.category_mask = mask;
        self
    }

    /// Set the collision mask
    pub fn with_collision_mask(mut self, mask: u32) -> Self {
        self.collision_mask = mask;
        self
    }

    /// Set the trigger mask
    pub fn with_trigger_mask(mut self, mask: u32) -> Self {
        self.trigger_mask = mask;
        self
    }

    /// Start outside the spatial hash
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Attach a payload, retrievable with `user_data::<T>()`
    pub fn with_user_data<T: Any>(mut self, data: T) -> Self {
        self.user_data = Some(Box::new(data));
        self
    }
}

/// A box collider owned by the collision system
pub struct Collider {
    pub(crate) handle: ColliderHandle,
    pub(crate) bounds: AABB,
    pub(crate) pivot: Vec2,
    pub(crate) category_mask: u32,
    pub(crate) collision_mask: u32,
    pub(crate) trigger_mask: u32,
    pub(crate) enabled: bool,
    pub(crate) delegate: PositionDelegate,
    pub(crate) user_data: Option<Box<dyn Any>>,
}

impl Collider {
    pub(crate) fn from_desc(handle: ColliderHandle, desc: ColliderDesc) -> Self {
        Self {
            handle,
            bounds: desc.bounds,
            pivot: Vec2::zeros(),
            category_mask: desc.category_mask,
            collision_mask: desc.collision_mask,
            trigger_mask: desc.trigger_mask,
            enabled: desc.enabled,
            delegate: PositionDelegate::None,
            user_data: desc.user_data,
        }
    }

    /// This collider's handle
    pub fn handle(&self) -> ColliderHandle {
        self.handle
    }

    /// Bounds in world meters
    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    /// What the collider is
    pub fn category_mask(&self) -> u32 {
        self.category_mask
    }

    /// What blocks the collider (not necessarily symmetric)
    pub fn collision_mask(&self) -> u32 {
        self.collision_mask
    }

    /// What the collider senses as a trigger
    pub fn trigger_mask(&self) -> u32 {
        self.trigger_mask
    }

    /// Delegate pivot offset from the top-left corner, in meters
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// Is the collider in the spatial hash?
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Attached position delegate
    pub fn delegate(&self) -> &PositionDelegate {
        &self.delegate
    }

    /// Typed view of the payload, if it is a `T`
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref::<T>()
    }

    /// Is `other` a blocker for this collider? Mask test plus overlap.
    pub fn collides(&self, other: &Collider, slop: f32) -> bool {
        CollisionLayers::blocks(self.collision_mask, other.category_mask)
            && self.bounds.overlaps_with_slop(&other.bounds, slop)
    }

    /// Is `other` a trigger for this collider? Mask test plus overlap.
    pub fn triggers(&self, other: &Collider, slop: f32) -> bool {
        CollisionLayers::senses(self.trigger_mask, other.category_mask)
            && self.bounds.overlaps_with_slop(&other.bounds, slop)
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collider")
            .field("handle", &self.handle)
            .field("bounds", &self.bounds)
            .field("pivot", &self.pivot)
            .field("category_mask", &format_args!("{:#010x}", self.category_mask))
            .field("collision_mask", &format_args!("{:#010x}", self.collision_mask))
            .field("trigger_mask", &format_args!("{:#010x}", self.trigger_mask))
            .field("enabled", &self.enabled)
            .field("delegate", &self.delegate)
            .field("has_user_data", &self.user_data.is_some())
            .finish()
    }
}
