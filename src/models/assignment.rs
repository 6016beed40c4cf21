//! Assignment map.
//!
//! The mutable heart of the timetable: which item sits in which slot. Keyed
//! by slot, so a slot can never hold two items. Keeping an item out of two
//! slots at once is the job of [`AssignmentMap::assign`], which clears the
//! item's old slot before setting the new one. [`AssignmentMap::place`] on
//! its own does not.

use std::collections::{HashMap, HashSet};

use super::{Item, Slot};

/// Partial, injective slot → item mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    by_slot: HashMap<Slot, Item>,
}

impl AssignmentMap {
    /// Creates an empty map (every item unscheduled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (`Some`) or clears (`None`) the mapping for `slot`, returning
    /// the previous occupant.
    ///
    /// Does not clear any other slot already holding the item; use
    /// [`assign`](Self::assign) for that.
    pub fn place(&mut self, item: Option<Item>, slot: &Slot) -> Option<Item> {
        match item {
            Some(item) => self.by_slot.insert(slot.clone(), item),
            None => self.by_slot.remove(slot),
        }
    }

    /// Puts `item` in `slot`, first clearing whichever slot held it before.
    ///
    /// Returns the slot the item was moved out of, if any. Any different
    /// item previously in `slot` is overwritten and becomes unscheduled.
    pub fn assign(&mut self, item: Item, slot: &Slot) -> Option<Slot> {
        let previous = self.slot_of(&item).cloned();
        if let Some(prev) = &previous {
            self.place(None, prev);
        }
        self.place(Some(item), slot);
        previous
    }

    /// Removes `item` from whichever slot holds it, returning that slot.
    pub fn unassign(&mut self, item: &Item) -> Option<Slot> {
        let slot = self.slot_of(item).cloned()?;
        self.place(None, &slot);
        Some(slot)
    }

    /// Item occupying `slot`, if any.
    pub fn item_at(&self, slot: &Slot) -> Option<&Item> {
        self.by_slot.get(slot)
    }

    /// Slot holding `item`, found by a linear scan over occupied slots.
    pub fn slot_of(&self, item: &Item) -> Option<&Slot> {
        self.by_slot
            .iter()
            .find(|(_, held)| *held == item)
            .map(|(slot, _)| slot)
    }

    /// Whether `item` is scheduled anywhere.
    pub fn is_scheduled(&self, item: &Item) -> bool {
        self.slot_of(item).is_some()
    }

    /// Every occupied slot.
    pub fn occupied_slots(&self) -> HashSet<&Slot> {
        self.by_slot.keys().collect()
    }

    /// Iterates over (slot, item) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &Item)> {
        self.by_slot.iter()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.by_slot.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }
}
