//! Active trigger contacts
//!
//! A [`Contact`] exists between the ENTER and EXIT of one (collider, trigger)
//! pair. The table is dense: removal swaps the last entry into the hole, so
//! entry positions are not stable and nothing outside this module holds one.

use crate::physics::collider::ColliderHandle;

/// A currently overlapping (collider, trigger) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    /// The collider that queried triggers
    pub collider: ColliderHandle,
    /// The trigger it overlaps
    pub trigger: ColliderHandle,
}

/// Fixed-capacity dense contact array
#[derive(Debug, Clone)]
pub struct ContactTable {
    contacts: Vec<Contact>,
    capacity: usize,
}

impl ContactTable {
    /// Create an empty table holding at most `capacity` contacts
    pub fn new(capacity: usize) -> Self {
        Self {
            contacts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of active contacts
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// True when no contact is active
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Maximum number of contacts
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no further contact fits
    pub fn is_full(&self) -> bool {
        self.contacts.len() >= self.capacity
    }

    /// Record a contact. Returns `false` (and records nothing) when full.
    pub fn insert(&mut self, contact: Contact) -> bool {
        if self.is_full() {
            return false;
        }
        self.contacts.push(contact);
        true
    }

    /// Is this exact pair active?
    pub fn contains(&self, contact: &Contact) -> bool {
        self.contacts.contains(contact)
    }

    /// Remove one pair, compacting by swap-with-last. Returns whether it was
    /// present.
    pub fn remove(&mut self, contact: &Contact) -> bool {
        match self.contacts.iter().position(|c| c == contact) {
            Some(index) => {
                self.contacts.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every contact in which `handle` is either side. Returns the
    /// number removed.
    pub fn purge(&mut self, handle: ColliderHandle) -> usize {
        let before = self.contacts.len();
        let mut i = before;
        while i > 0 {
            i -= 1;
            let c = self.contacts[i];
            if c.collider == handle || c.trigger == handle {
                self.contacts.swap_remove(i);
            }
        }
        before - self.contacts.len()
    }

    /// Triggers currently in contact with `collider`
    pub fn triggers_of(&self, collider: ColliderHandle) -> impl Iterator<Item = ColliderHandle> + '_ {
        self.contacts
            .iter()
            .filter(move |c| c.collider == collider)
            .map(|c| c.trigger)
    }

    /// All active contacts, in table order
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }
}
