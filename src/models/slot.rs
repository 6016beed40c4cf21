//! Slot model.
//!
//! A slot is one cell of the timetable grid: a time-code (row) paired with
//! a room (column). Capacity belongs to the room, so every slot sharing a
//! room has the same capacity.

use std::fmt;
use std::hash::{Hash, Hasher};

/// One (time-code, room) cell of the timetable.
///
/// Identity is the `(time, room)` pair. Capacity is carried along for
/// constraint checks but does not take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Time-code (e.g., "MonAM").
    pub time: String,
    /// Room identifier (e.g., "A").
    pub room: String,
    /// Number of seats in the room.
    pub capacity: u32,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(time: impl Into<String>, room: impl Into<String>, capacity: u32) -> Self {
        Self {
            time: time.into(),
            room: room.into(),
            capacity,
        }
    }

    /// Whether this slot is at the given coordinates.
    pub fn is_at(&self, time: &str, room: &str) -> bool {
        self.time == time && self.room == room
    }

    /// Whether an item of `size` seats fits in this slot.
    #[inline]
    pub fn fits(&self, size: u32) -> bool {
        size <= self.capacity
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.room == other.room
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.hash(state);
        self.room.hash(state);
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slot_identity_ignores_capacity() {
        let a = Slot::new("MonAM", "A", 100);
        let b = Slot::new("MonAM", "A", 30);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_slot_fits() {
        let s = Slot::new("MonAM", "F", 30);
        assert!(s.fits(30));
        assert!(s.fits(1));
        assert!(!s.fits(31));
    }

    #[test]
    fn test_slot_display() {
        let s = Slot::new("TuePM", "C", 60);
        assert_eq!(s.to_string(), "TuePM C");
        assert!(s.is_at("TuePM", "C"));
        assert!(!s.is_at("TuePM", "D"));
    }
}
