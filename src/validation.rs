//! Invariant audit for a timetable.
//!
//! The editor only ever makes legal moves, but a snapshot is loaded on
//! trust. This pass reports every place where the current assignments break
//! a timetable rule:
//! - A module larger than its room
//! - A module scheduled in more than one slot
//! - Two modules of the same group at the same time-code
//! - A module placed in a slot the grid does not have

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Slot, Timetable};

/// Audit result.
pub type AuditResult = Result<(), Vec<Violation>>;

/// One broken rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Rule category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of broken rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Module size exceeds room capacity.
    CapacityExceeded,
    /// The same module occupies two or more slots.
    ItemDoubleBooked,
    /// Two modules of one group share a time-code.
    GroupConflict,
    /// A module sits in a slot that is not part of the grid.
    OffGrid,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audits the timetable's assignments.
///
/// Slots are visited in grid order, so the report is deterministic.
///
/// # Returns
/// `Ok(())` if every rule holds, `Err(violations)` with all findings.
pub fn audit(timetable: &Timetable) -> AuditResult {
    let grid = timetable.grid();
    let assignments = timetable.assignments();
    let mut errors = Vec::new();

    // Capacity
    for slot in grid.slots() {
        if let Some(item) = assignments.item_at(slot) {
            if !slot.fits(item.size) {
                errors.push(Violation::new(
                    ViolationKind::CapacityExceeded,
                    format!(
                        "{} ({} students) exceeds room {} ({} seats) at {}",
                        item.code, item.size, slot.room, slot.capacity, slot.time
                    ),
                ));
            }
        }
    }

    // Item injectivity
    let mut order: Vec<&str> = Vec::new();
    let mut placements: HashMap<&str, Vec<&Slot>> = HashMap::new();
    for slot in grid.slots() {
        if let Some(item) = assignments.item_at(slot) {
            let entry = placements.entry(item.code.as_str()).or_default();
            if entry.is_empty() {
                order.push(item.code.as_str());
            }
            entry.push(slot);
        }
    }
    for code in order {
        let slots = &placements[code];
        if slots.len() > 1 {
            let listed: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
            errors.push(Violation::new(
                ViolationKind::ItemDoubleBooked,
                format!("{} is scheduled in {} slots: {}", code, slots.len(), listed.join(", ")),
            ));
        }
    }

    // Group exclusivity per time row
    for time in grid.times() {
        let mut first_of_group: HashMap<&str, &str> = HashMap::new();
        for slot in grid.row(time) {
            if let Some(item) = assignments.item_at(slot) {
                match first_of_group.get(item.group_key.as_str()) {
                    Some(&first) => errors.push(Violation::new(
                        ViolationKind::GroupConflict,
                        format!(
                            "{} and {} (group {}) both run at {}",
                            first, item.code, item.group_key, time
                        ),
                    )),
                    None => {
                        first_of_group.insert(item.group_key.as_str(), item.code.as_str());
                    }
                }
            }
        }
    }

    // Placements the grid walk above cannot see
    let mut stray: Vec<(&Slot, &str)> = assignments
        .iter()
        .filter(|(slot, _)| grid.slot(&slot.time, &slot.room).is_none())
        .map(|(slot, item)| (slot, item.code.as_str()))
        .collect();
    stray.sort_by(|a, b| (&a.0.time, &a.0.room).cmp(&(&b.0.time, &b.0.room)));
    for (slot, code) in stray {
        errors.push(Violation::new(
            ViolationKind::OffGrid,
            format!("{} is placed at {}, which is not in the grid", code, slot),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Audits the timetable and logs each violation as a warning.
///
/// Returns the number of violations found.
pub fn warn_violations(timetable: &Timetable) -> usize {
    match audit(timetable) {
        Ok(()) => 0,
        Err(violations) => {
            for v in &violations {
                warn!(kind = ?v.kind, "{}", v.message);
            }
            violations.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    fn sample() -> Timetable {
        let mut tt = Timetable::new(&GridConfig::default()).unwrap();
        tt.add_item("CS1101", "Programming", 80);
        tt.add_item("CS1102", "Data", 50);
        tt.add_item("MA1101", "Calculus", 60);
        tt
    }

    fn place(tt: &mut Timetable, code: &str, time: &str, room: &str, raw: bool) {
        let item = tt.item(code).unwrap().clone();
        let slot = tt.slot(time, room).unwrap().clone();
        if raw {
            tt.assignments_mut().place(Some(item), &slot);
        } else {
            tt.assignments_mut().assign(item, &slot);
        }
    }

    #[test]
    fn test_clean_timetable() {
        let mut tt = sample();
        place(&mut tt, "CS1101", "MonAM", "A", false);
        place(&mut tt, "CS1102", "MonPM", "C", false);
        place(&mut tt, "MA1101", "MonAM", "C", false);
        assert!(audit(&tt).is_ok());
    }

    #[test]
    fn test_empty_timetable() {
        assert!(audit(&sample()).is_ok());
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut tt = sample();
        place(&mut tt, "CS1101", "MonAM", "F", false);
        let errors = audit(&tt).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::CapacityExceeded);
        assert!(errors[0].message.contains("CS1101"));
    }

    #[test]
    fn test_double_booked() {
        let mut tt = sample();
        place(&mut tt, "MA1101", "MonAM", "C", true);
        place(&mut tt, "MA1101", "TueAM", "C", true);
        let errors = audit(&tt).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ViolationKind::ItemDoubleBooked && e.message.contains("2 slots")));
    }

    #[test]
    fn test_group_conflict() {
        let mut tt = sample();
        place(&mut tt, "CS1101", "WedAM", "A", false);
        place(&mut tt, "CS1102", "WedAM", "D", false);
        let errors = audit(&tt).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::GroupConflict);
        assert!(errors[0].message.contains("WedAM"));
    }

    #[test]
    fn test_off_grid_placement() {
        let mut tt = sample();
        let item = tt.item("CS1102").unwrap().clone();
        tt.assignments_mut().place(Some(item), &Slot::new("SunAM", "Z", 100));
        let errors = audit(&tt).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::OffGrid);
        assert!(errors[0].message.contains("SunAM Z"));
    }

    #[test]
    fn test_warn_violations_counts() {
        let mut tt = sample();
        assert_eq!(warn_violations(&tt), 0);
        place(&mut tt, "CS1101", "MonAM", "H", false);
        assert_eq!(warn_violations(&tt), 1);
    }

    #[test]
    fn test_multiple_violations() {
        let mut tt = sample();
        place(&mut tt, "CS1101", "MonAM", "H", false);
        place(&mut tt, "CS1102", "MonAM", "G", false);
        let errors = audit(&tt).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
