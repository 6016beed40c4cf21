//! Editing session.
//!
//! One [`Session`] owns the timetable, the selection machine, the edit mode
//! and the snapshot sink. Front-ends feed it [`Event`]s and render the
//! [`Effect`]s it returns. Presses only reach the selection machine while
//! editing; leaving edit mode puts any held module back and commits.

use tracing::{debug, info, warn};

use crate::error::SnapshotError;
use crate::models::Timetable;
use crate::selection::{Effect, Input, SelectionMachine};
use crate::snapshot::SnapshotSink;

/// External input, addressed by code and coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A module in the list was pressed.
    PressItem(String),
    /// A grid cell was pressed.
    PressSlot {
        /// Time-code.
        time: String,
        /// Room.
        room: String,
    },
    /// The edit / save button was pressed.
    ToggleEditMode,
    /// The front-end is closing.
    RequestShutdown,
}

impl Event {
    /// Shorthand for [`Event::PressItem`].
    pub fn press_item(code: impl Into<String>) -> Self {
        Event::PressItem(code.into())
    }

    /// Shorthand for [`Event::PressSlot`].
    pub fn press_slot(time: impl Into<String>, room: impl Into<String>) -> Self {
        Event::PressSlot {
            time: time.into(),
            room: room.into(),
        }
    }
}

/// Whether presses are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Read-only; presses are ignored.
    #[default]
    Viewing,
    /// Presses move modules.
    Editing,
}

/// Timetable editing session.
#[derive(Debug)]
pub struct Session<S: SnapshotSink> {
    timetable: Timetable,
    selection: SelectionMachine,
    mode: Mode,
    sink: S,
    closed: bool,
}

impl<S: SnapshotSink> Session<S> {
    /// Starts a session in viewing mode.
    pub fn new(timetable: Timetable, sink: S) -> Self {
        Self {
            timetable,
            selection: SelectionMachine::new(),
            mode: Mode::Viewing,
            sink,
            closed: false,
        }
    }

    /// The timetable.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The selection machine.
    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    /// The snapshot sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether presses are accepted.
    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// Whether shutdown has been processed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Effects that draw the loaded timetable from scratch.
    pub fn initial_effects(&self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self
            .timetable
            .catalog()
            .items()
            .iter()
            .map(|item| {
                let description = self.timetable.description(item);
                match self.timetable.slot_of(item) {
                    Some(slot) => Effect::MarkScheduled {
                        item: item.code.clone(),
                        slot: slot.clone(),
                        description,
                    },
                    None => Effect::MarkUnscheduled {
                        item: item.code.clone(),
                        description,
                    },
                }
            })
            .collect();
        effects.push(Effect::SetButtonsEnabled(self.is_editing()));
        effects
    }

    /// Handles one event.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if self.closed {
            debug!(?event, "session closed; event ignored");
            return Vec::new();
        }

        match event {
            Event::PressItem(code) => {
                if !self.is_editing() {
                    debug!(%code, "not editing; press ignored");
                    return Vec::new();
                }
                match self.timetable.item(&code).cloned() {
                    Some(item) => self
                        .selection
                        .dispatch(&mut self.timetable, Input::PressItem(item)),
                    None => {
                        warn!(%code, "press on unknown module ignored");
                        Vec::new()
                    }
                }
            }
            Event::PressSlot { time, room } => {
                if !self.is_editing() {
                    debug!(%time, %room, "not editing; press ignored");
                    return Vec::new();
                }
                match self.timetable.slot(&time, &room).cloned() {
                    Some(slot) => self
                        .selection
                        .dispatch(&mut self.timetable, Input::PressSlot(slot)),
                    None => {
                        warn!(%time, %room, "press on unknown slot ignored");
                        Vec::new()
                    }
                }
            }
            Event::ToggleEditMode => self.toggle_edit_mode(),
            Event::RequestShutdown => self.shutdown(),
        }
    }

    /// Puts any held module back and writes the timetable to the sink.
    ///
    /// Reports `Saved` or `SaveFailed`; a failed write leaves the
    /// timetable unchanged.
    pub fn commit(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.commit_into(&mut effects);
        effects
    }

    fn commit_into(&mut self, effects: &mut Vec<Effect>) -> bool {
        effects.extend(self.selection.deselect(&mut self.timetable));
        match self.write() {
            Ok(()) => {
                info!(location = %self.sink.location(), "changes saved");
                effects.push(Effect::Saved {
                    location: self.sink.location(),
                });
                true
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                effects.push(Effect::SaveFailed {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    fn write(&mut self) -> Result<(), SnapshotError> {
        let records = self.timetable.to_records();
        self.sink.write_snapshot(&records)
    }

    fn toggle_edit_mode(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.mode {
            Mode::Viewing => {
                self.mode = Mode::Editing;
                info!("editing enabled");
                effects.push(Effect::SetButtonsEnabled(true));
            }
            Mode::Editing => {
                if self.commit_into(&mut effects) {
                    self.mode = Mode::Viewing;
                    info!("editing disabled");
                    effects.push(Effect::SetButtonsEnabled(false));
                }
            }
        }
        effects
    }

    fn shutdown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.is_editing() {
            self.commit_into(&mut effects);
            self.mode = Mode::Viewing;
        }
        self.closed = true;
        info!("session closed");
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::snapshot::{MemorySink, SnapshotRecord};
    use std::io;

    #[derive(Debug, Default)]
    struct FailingSink {
        attempts: usize,
    }

    impl SnapshotSink for FailingSink {
        fn location(&self) -> String {
            "nowhere".into()
        }

        fn write_snapshot(&mut self, _: &[SnapshotRecord]) -> Result<(), SnapshotError> {
            self.attempts += 1;
            Err(SnapshotError::Io {
                path: "nowhere".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn timetable() -> Timetable {
        let mut tt = Timetable::new(&GridConfig::default()).unwrap();
        tt.add_item("CS1101", "Programming", 80);
        tt.add_item("CS1102", "Data", 50);
        tt
    }

    #[test]
    fn test_presses_ignored_until_editing() {
        let mut s = Session::new(timetable(), MemorySink::new());
        assert_eq!(s.mode(), Mode::Viewing);
        assert!(s.handle(Event::press_item("CS1101")).is_empty());
        assert!(s.handle(Event::press_slot("MonAM", "A")).is_empty());
        assert!(s.selection().is_idle());

        assert_eq!(
            s.handle(Event::ToggleEditMode),
            vec![Effect::SetButtonsEnabled(true)]
        );
        assert!(s.is_editing());
        assert!(!s.handle(Event::press_item("CS1101")).is_empty());
    }

    #[test]
    fn test_unknown_targets_ignored() {
        let mut s = Session::new(timetable(), MemorySink::new());
        s.handle(Event::ToggleEditMode);
        assert!(s.handle(Event::press_item("XX9999")).is_empty());
        assert!(s.handle(Event::press_slot("SunAM", "A")).is_empty());
        assert!(s.selection().is_idle());
    }

    #[test]
    fn test_leaving_edit_mode_deselects_and_commits() {
        let mut s = Session::new(timetable(), MemorySink::new());
        s.handle(Event::ToggleEditMode);
        s.handle(Event::press_item("CS1101"));
        s.handle(Event::press_slot("MonAM", "A"));
        s.handle(Event::press_item("CS1101"));
        assert!(!s.selection().is_idle());

        let effects = s.handle(Event::ToggleEditMode);
        assert!(s.selection().is_idle());
        assert_eq!(s.mode(), Mode::Viewing);
        assert_eq!(
            effects[2..],
            [
                Effect::Saved {
                    location: "memory".into()
                },
                Effect::SetButtonsEnabled(false),
            ]
        );
        assert_eq!(
            s.sink().contents(),
            Some("CS1101 Programming MonAM A 80\nCS1102 Data ????? ? 50\n")
        );
    }

    #[test]
    fn test_failed_commit_stays_editing() {
        let mut s = Session::new(timetable(), FailingSink::default());
        s.handle(Event::ToggleEditMode);
        s.handle(Event::press_item("CS1101"));
        s.handle(Event::press_slot("MonAM", "A"));
        let before = s.timetable().assignments().clone();

        let effects = s.handle(Event::ToggleEditMode);
        assert!(matches!(effects.last(), Some(Effect::SaveFailed { reason }) if reason.contains("read-only")));
        assert!(s.is_editing());
        assert_eq!(s.timetable().assignments(), &before);

        // Retry hits the sink again.
        s.handle(Event::ToggleEditMode);
        assert_eq!(s.sink().attempts, 2);
    }

    #[test]
    fn test_shutdown_while_editing_commits() {
        let mut s = Session::new(timetable(), MemorySink::new());
        s.handle(Event::ToggleEditMode);
        s.handle(Event::press_item("CS1102"));

        let effects = s.handle(Event::RequestShutdown);
        assert!(s.is_closed());
        assert_eq!(s.sink().writes(), 1);
        assert!(effects.contains(&Effect::Saved {
            location: "memory".into()
        }));

        assert!(s.handle(Event::ToggleEditMode).is_empty());
    }

    #[test]
    fn test_shutdown_while_viewing_does_not_write() {
        let mut s = Session::new(timetable(), MemorySink::new());
        assert!(s.handle(Event::RequestShutdown).is_empty());
        assert!(s.is_closed());
        assert_eq!(s.sink().writes(), 0);
    }

    #[test]
    fn test_initial_effects() {
        let mut tt = timetable();
        let item = tt.item("CS1101").unwrap().clone();
        let slot = tt.slot("FriPM", "B").unwrap().clone();
        tt.assignments_mut().assign(item, &slot);

        let s = Session::new(tt, MemorySink::new());
        let effects = s.initial_effects();
        assert_eq!(effects.len(), 3);
        assert_eq!(
            effects[0],
            Effect::MarkScheduled {
                item: "CS1101".into(),
                slot,
                description: "CS1101  80  -  FriPM  B".into(),
            }
        );
        assert!(matches!(&effects[1], Effect::MarkUnscheduled { item, .. } if item == "CS1102"));
        assert_eq!(effects[2], Effect::SetButtonsEnabled(false));
    }
}
