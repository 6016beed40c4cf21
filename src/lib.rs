//! Interactive timetable editing core.
//!
//! Places a fixed set of modules into a fixed grid of (time-code, room)
//! slots, one move at a time, enforcing room capacity and subject-year
//! clashes at every step. There is no automatic solver: the user picks a
//! module up, the crate highlights where it may legally go, and the user
//! puts it down.
//!
//! # Modules
//!
//! - **`models`**: `Slot`, `Item`, `SlotGrid`, `ItemCatalog`,
//!   `AssignmentMap`, and the `Timetable` aggregate
//! - **`constraints`**: placement rules (`can_place`, `valid_slots_for`)
//! - **`selection`**: the pick-up / place-down state machine and its effects
//! - **`session`**: edit-mode gating, event dispatch and commit
//! - **`snapshot`**: flat-file load/save and the `SnapshotSink` seam
//! - **`validation`**: audit of a timetable against every placement rule
//! - **`config`**: grid layout configuration
//! - **`console`**: text front-end used by the `u-timetable` binary
//!
//! # Example
//!
//! ```
//! use u_timetable::config::GridConfig;
//! use u_timetable::models::Timetable;
//! use u_timetable::session::{Event, Session};
//! use u_timetable::snapshot::MemorySink;
//!
//! let mut tt = Timetable::new(&GridConfig::default()).unwrap();
//! tt.add_item("CS1101", "Programming", 80);
//!
//! let mut session = Session::new(tt, MemorySink::new());
//! session.handle(Event::ToggleEditMode);
//! session.handle(Event::press_item("CS1101"));
//! session.handle(Event::press_slot("MonAM", "A"));
//! session.handle(Event::ToggleEditMode);
//!
//! assert_eq!(
//!     session.sink().contents(),
//!     Some("CS1101 Programming MonAM A 80\n")
//! );
//! ```

pub mod config;
pub mod console;
pub mod constraints;
pub mod error;
pub mod models;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod validation;

pub use error::{ConfigError, SnapshotError};
