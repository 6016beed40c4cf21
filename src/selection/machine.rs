//! Selection state machine.

use std::mem;

use tracing::debug;

use super::{Effect, Input, Selection};
use crate::models::{Item, Slot, Timetable};

/// Tracks the held module and applies moves to a [`Timetable`].
///
/// A held module is always absent from the assignment map; it is either
/// put down somewhere legal or returned to its origin before the machine
/// goes idle again.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: Selection,
}

impl SelectionMachine {
    /// Creates an idle machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// The held item, if any.
    pub fn held(&self) -> Option<&Item> {
        match &self.state {
            Selection::Holding { item, .. } => Some(item),
            Selection::Idle => None,
        }
    }

    /// Slot the held item was lifted from.
    pub fn origin(&self) -> Option<&Slot> {
        match &self.state {
            Selection::Holding { origin, .. } => origin.as_ref(),
            Selection::Idle => None,
        }
    }

    /// Whether nothing is held.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, Selection::Idle)
    }

    /// Applies one press.
    pub fn dispatch(&mut self, timetable: &mut Timetable, input: Input) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            Input::PressItem(item) => self.press_item(timetable, item, &mut effects),
            Input::PressSlot(slot) => self.press_slot(timetable, &slot, &mut effects),
        }
        effects
    }

    /// Puts the held item back where it came from (or leaves it
    /// unscheduled) and goes idle. No-op when idle.
    pub fn deselect(&mut self, timetable: &mut Timetable) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.release(timetable, &mut effects);
        effects
    }

    fn press_item(&mut self, timetable: &mut Timetable, item: Item, effects: &mut Vec<Effect>) {
        match &self.state {
            Selection::Idle => self.pick_up(timetable, item, effects),
            Selection::Holding { item: held, .. } if *held == item => {
                self.release(timetable, effects);
            }
            Selection::Holding { .. } => {
                self.release(timetable, effects);
                self.pick_up(timetable, item, effects);
            }
        }
    }

    fn press_slot(&mut self, timetable: &mut Timetable, pressed: &Slot, effects: &mut Vec<Effect>) {
        let Some(slot) = timetable.slot(&pressed.time, &pressed.room).cloned() else {
            debug!(slot = %pressed, "press outside the grid ignored");
            return;
        };
        let slot = &slot;

        if let Selection::Holding { item, .. } = &self.state {
            match timetable.check_placement(item, slot) {
                Ok(()) => {
                    let item = item.clone();
                    self.state = Selection::Idle;
                    timetable.assignments_mut().assign(item.clone(), slot);
                    debug!(item = %item, slot = %slot, "placed");
                    effects.push(Effect::MarkScheduled {
                        description: timetable.description(&item),
                        item: item.code,
                        slot: slot.clone(),
                    });
                    effects.push(Effect::ClearHighlights);
                    return;
                }
                Err(reason) => {
                    debug!(item = %item, slot = %slot, %reason, "placement refused");
                }
            }
        }

        // Idle, or the drop was refused: a press on an occupied slot acts
        // on its occupant.
        if let Some(occupant) = timetable.item_at(slot).cloned() {
            self.press_item(timetable, occupant, effects);
        }
    }

    fn pick_up(&mut self, timetable: &mut Timetable, item: Item, effects: &mut Vec<Effect>) {
        let origin = timetable.assignments_mut().unassign(&item);
        let slots = timetable.valid_slots_for(&item);
        debug!(
            item = %item,
            origin = ?origin.as_ref().map(|s| s.to_string()),
            targets = slots.len(),
            "picked up"
        );
        effects.push(Effect::Highlight {
            item: item.code.clone(),
            slots,
        });
        self.state = Selection::Holding { item, origin };
    }

    fn release(&mut self, timetable: &mut Timetable, effects: &mut Vec<Effect>) {
        let Selection::Holding { item, origin } = mem::take(&mut self.state) else {
            return;
        };

        match origin {
            Some(origin) => {
                // Origin was vacated at pick-up and nothing else can move
                // while an item is held.
                timetable.assignments_mut().assign(item.clone(), &origin);
                debug!(item = %item, slot = %origin, "returned to origin");
                effects.push(Effect::MarkScheduled {
                    description: timetable.description(&item),
                    item: item.code,
                    slot: origin,
                });
            }
            None => {
                debug!(item = %item, "returned to unscheduled");
                effects.push(Effect::MarkUnscheduled {
                    description: timetable.description(&item),
                    item: item.code,
                });
            }
        }
        effects.push(Effect::ClearHighlights);
    }
}
