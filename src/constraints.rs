//! Placement rules.
//!
//! Pure checks deciding whether an item may go into a slot, given the
//! current assignments:
//!
//! 0. The slot is part of the grid; its seat count is the grid's.
//! 1. The slot is empty or already holds this same item.
//! 2. The slot has enough seats.
//! 3. No other item of the same group sits anywhere in the slot's time row.
//!
//! Nothing here mutates. Callers moving an item must take it out of the
//! map first, or its current slot will count against it.

use std::fmt;

use crate::models::{AssignmentMap, Item, Slot, SlotGrid};

/// Why a placement is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The grid has no slot at these coordinates.
    OffGrid {
        /// Time-code pressed.
        time: String,
        /// Room pressed.
        room: String,
    },
    /// The slot holds a different item.
    Occupied {
        /// Code of the occupant.
        by: String,
    },
    /// The item has more students than the room has seats.
    OverCapacity {
        /// Item size.
        size: u32,
        /// Slot capacity.
        capacity: u32,
    },
    /// An item of the same group already runs at this time-code.
    GroupConflict {
        /// Code of the clashing item.
        with: String,
        /// Room the clashing item is in.
        room: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OffGrid { time, room } => write!(f, "no slot at {time} {room}"),
            Rejection::Occupied { by } => write!(f, "slot already holds {by}"),
            Rejection::OverCapacity { size, capacity } => {
                write!(f, "{size} students exceed {capacity} seats")
            }
            Rejection::GroupConflict { with, room } => {
                write!(f, "clashes with {with} in room {room}")
            }
        }
    }
}

/// Checks every rule, returning the first one that fails.
pub fn check_placement(
    assignments: &AssignmentMap,
    grid: &SlotGrid,
    item: &Item,
    slot: &Slot,
) -> Result<(), Rejection> {
    let Some(slot) = grid.slot(&slot.time, &slot.room) else {
        return Err(Rejection::OffGrid {
            time: slot.time.clone(),
            room: slot.room.clone(),
        });
    };

    if let Some(occupant) = assignments.item_at(slot) {
        if occupant != item {
            return Err(Rejection::Occupied {
                by: occupant.code.clone(),
            });
        }
    }

    if !slot.fits(item.size) {
        return Err(Rejection::OverCapacity {
            size: item.size,
            capacity: slot.capacity,
        });
    }

    for other_slot in grid.row(&slot.time) {
        if let Some(other) = assignments.item_at(other_slot) {
            // The item sitting in this very slot does not clash with itself.
            if other == item && other_slot == slot {
                continue;
            }
            if other.same_group(item) {
                return Err(Rejection::GroupConflict {
                    with: other.code.clone(),
                    room: other_slot.room.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Whether `item` may legally go into `slot`.
pub fn can_place(assignments: &AssignmentMap, grid: &SlotGrid, item: &Item, slot: &Slot) -> bool {
    check_placement(assignments, grid, item, slot).is_ok()
}

/// Every slot, in grid order, that `item` may legally go into.
pub fn valid_slots_for(assignments: &AssignmentMap, grid: &SlotGrid, item: &Item) -> Vec<Slot> {
    grid.slots()
        .iter()
        .filter(|s| can_place(assignments, grid, item, s))
        .cloned()
        .collect()
}
