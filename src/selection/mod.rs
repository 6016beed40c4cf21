//! Pick-up / place-down selection.
//!
//! Drives single-module moves: pressing a module picks it up (lifting it out
//! of its slot), pressing a highlighted slot puts it down, pressing the same
//! module again puts it back where it came from. Each step reports
//! [`Effect`]s for whatever front-end is showing the timetable.
//!
//! # Usage
//!
//! ```
//! use u_timetable::config::GridConfig;
//! use u_timetable::models::Timetable;
//! use u_timetable::selection::{Input, SelectionMachine};
//!
//! let mut tt = Timetable::new(&GridConfig::default()).unwrap();
//! tt.add_item("CS1101", "Programming", 80);
//! let item = tt.item("CS1101").unwrap().clone();
//! let slot = tt.slot("MonAM", "A").unwrap().clone();
//!
//! let mut machine = SelectionMachine::new();
//! machine.dispatch(&mut tt, Input::PressItem(item.clone()));
//! machine.dispatch(&mut tt, Input::PressSlot(slot.clone()));
//!
//! assert_eq!(tt.slot_of(&item), Some(&slot));
//! assert!(machine.is_idle());
//! ```

mod machine;

pub use machine::SelectionMachine;

use crate::models::{Item, Slot};

/// Selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing in hand.
    #[default]
    Idle,
    /// `item` is picked up; `origin` is the slot it was lifted from.
    Holding {
        /// The picked-up item, absent from the assignment map.
        item: Item,
        /// Where the item was before pick-up, if it was scheduled.
        origin: Option<Slot>,
    },
}

/// Resolved press delivered to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A module in the list was pressed.
    PressItem(Item),
    /// A grid cell was pressed.
    PressSlot(Slot),
}

/// View-level consequence of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show `item` as held and mark `slots` as legal targets.
    Highlight {
        /// Held module code.
        item: String,
        /// Legal targets in grid order.
        slots: Vec<Slot>,
    },
    /// `item` now sits in `slot`.
    MarkScheduled {
        /// Module code.
        item: String,
        /// Destination slot.
        slot: Slot,
        /// Item-list text.
        description: String,
    },
    /// `item` is back in the unscheduled pool.
    MarkUnscheduled {
        /// Module code.
        item: String,
        /// Item-list text.
        description: String,
    },
    /// Remove every highlight.
    ClearHighlights,
    /// Enable or disable the module and slot buttons.
    SetButtonsEnabled(bool),
    /// The timetable was committed.
    Saved {
        /// Where it went.
        location: String,
    },
    /// The commit failed; the timetable in memory is unchanged.
    SaveFailed {
        /// Error text.
        reason: String,
    },
}
