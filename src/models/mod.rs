//! Timetable domain models.
//!
//! Provides the data types for a room-and-time timetable: the fixed slot
//! grid, the module catalog, and the mutable assignment of modules to slots.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Conference | Clinic |
//! |-------------|------------|------------|--------|
//! | Slot | Session × Lecture hall | Track × Time block | Room × Shift |
//! | Item | Module | Talk | Appointment type |
//! | Group key | Subject + year | Speaker | Practitioner |
//! | AssignmentMap | Timetable | Programme | Roster |

mod assignment;
mod catalog;
mod grid;
mod item;
mod slot;
mod timetable;

pub use assignment::AssignmentMap;
pub use catalog::ItemCatalog;
pub use grid::SlotGrid;
pub use item::{group_key_of, Item};
pub use slot::Slot;
pub use timetable::{Timetable, UNSCHEDULED_ROOM, UNSCHEDULED_TIME};
