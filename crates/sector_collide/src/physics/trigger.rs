//! Trigger contact diffing
//!
//! Each call to [`CollisionSystem::query_triggers`] compares the triggers a
//! collider overlaps now with the contacts recorded for it on the previous
//! call. New overlaps produce `Enter` and a contact; vanished ones produce
//! `Exit` and drop the contact. Continuing overlaps are silent unless `Stay`
//! events are enabled in the configuration.
//!
//! The set of contacts still waiting to be confirmed is kept as a bitset over
//! trigger slots. Removing a contact compacts the table, but slots do not
//! move, so the pending set stays valid for the whole pass.

use crate::foundation::collections::ColliderSet;
use crate::physics::collider::ColliderHandle;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::collision_system::CollisionSystem;
use crate::physics::contact::Contact;
use crate::physics::error::CollisionError;

/// Kind of trigger transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// The collider started overlapping the trigger
    Enter,
    /// The overlap continues (only when stay events are enabled)
    Stay,
    /// The collider stopped overlapping the trigger
    Exit,
}

/// One trigger transition reported to the querying collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerEvent {
    /// What happened
    pub kind: TriggerKind,
    /// The trigger it happened with
    pub trigger: ColliderHandle,
}

impl TriggerEvent {
    /// Enter event for `trigger`
    pub fn enter(trigger: ColliderHandle) -> Self {
        Self { kind: TriggerKind::Enter, trigger }
    }

    /// Stay event for `trigger`
    pub fn stay(trigger: ColliderHandle) -> Self {
        Self { kind: TriggerKind::Stay, trigger }
    }

    /// Exit event for `trigger`
    pub fn exit(trigger: ColliderHandle) -> Self {
        Self { kind: TriggerKind::Exit, trigger }
    }
}

impl CollisionSystem {
    /// Diff the collider's trigger overlaps against the last call
    ///
    /// Returns at most `capacity` events. Only `Enter` and `Exit` count
    /// toward the limit; when it is reached the pass stops early and the
    /// transitions not yet reported are found again on the next call, so
    /// callers must query every tick even if they drop the result. `Stay`
    /// events come last and only fill the room a finished pass leaves over.
    /// A capacity of zero returns nothing and changes nothing.
    ///
    /// When the contact table is full a new overlap is not recorded and no
    /// `Enter` is reported for it; it is retried on the next call.
    pub fn query_triggers(
        &mut self,
        handle: ColliderHandle,
        capacity: usize,
    ) -> Result<Vec<TriggerEvent>, CollisionError> {
        let (bounds, trigger_mask) = {
            let c = self.arena.get(handle)?;
            (c.bounds, c.trigger_mask)
        };
        let mut events = Vec::new();
        let mut stays = Vec::new();
        if capacity == 0 {
            return Ok(events);
        }

        let slop = self.config.slop;
        let report_stay = self.config.report_stay_events;

        let mut pending = ColliderSet::new();
        for trigger in self.contacts.triggers_of(handle) {
            if let Ok(slot) = self.arena.slot_of(trigger) {
                pending.mark(slot);
            }
        }

        let candidates = self.grid.broad_phase(&bounds);
        for slot in candidates.iter() {
            let Some(other) = self.arena.at(slot) else {
                continue;
            };
            if other.handle == handle
                || !CollisionLayers::senses(trigger_mask, other.category_mask)
                || !bounds.overlaps_with_slop(&other.bounds, slop)
            {
                continue;
            }

            if pending.contains(slot) {
                pending.clear(slot);
                if report_stay {
                    stays.push(TriggerEvent::stay(other.handle));
                }
                continue;
            } else {
                let contact = Contact { collider: handle, trigger: other.handle };
                if self.contacts.insert(contact) {
                    log::trace!("Collider {:?} entered trigger {:?}", handle, other.handle);
                    events.push(TriggerEvent::enter(other.handle));
                } else {
                    log::warn!(
                        "Contact table full ({} contacts); deferring enter of {:?} into {:?}",
                        self.contacts.capacity(),
                        handle,
                        other.handle
                    );
                }
            }

            if events.len() >= capacity {
                return Ok(events);
            }
        }

        for slot in pending.iter() {
            let Some(trigger) = self.arena.handle_at(slot) else {
                continue;
            };
            self.contacts.remove(&Contact { collider: handle, trigger });
            log::trace!("Collider {:?} exited trigger {:?}", handle, trigger);
            events.push(TriggerEvent::exit(trigger));

            if events.len() >= capacity {
                return Ok(events);
            }
        }

        let room = capacity - events.len();
        events.extend(stays.into_iter().take(room));
        Ok(events)
    }
}
