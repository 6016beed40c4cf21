//! Timetable aggregate.
//!
//! Owns the static grid and catalog together with the mutable assignment
//! map, and converts to and from flat snapshot records.

use tracing::{info, warn};

use crate::config::GridConfig;
use crate::constraints::{self, Rejection};
use crate::error::{ConfigError, SnapshotError};
use crate::snapshot::SnapshotRecord;

use super::{AssignmentMap, Item, ItemCatalog, Slot, SlotGrid};

/// Placeholder time-code for an unscheduled item.
pub const UNSCHEDULED_TIME: &str = "?????";
/// Placeholder room for an unscheduled item.
pub const UNSCHEDULED_ROOM: &str = "?";

/// Grid, catalog and current assignments.
#[derive(Debug, Clone)]
pub struct Timetable {
    grid: SlotGrid,
    catalog: ItemCatalog,
    assignments: AssignmentMap,
    group_key_len: usize,
}

impl Timetable {
    /// Creates a timetable with an empty catalog.
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: SlotGrid::from_config(config)?,
            catalog: ItemCatalog::new(),
            assignments: AssignmentMap::new(),
            group_key_len: config.group_key_len,
        })
    }

    /// Builds a timetable from snapshot records.
    ///
    /// Items enter the catalog in record order. Placed records are applied
    /// one at a time through [`AssignmentMap::assign`]; capacity and group
    /// rules are trusted, not re-checked (see [`crate::validation::audit`]). If two
    /// records name the same slot, the later one wins.
    pub fn from_records(
        config: &GridConfig,
        records: &[SnapshotRecord],
    ) -> Result<Self, SnapshotError> {
        let mut tt = Self::new(config)?;

        for (i, rec) in records.iter().enumerate() {
            let record = i + 1;
            if rec.code.is_empty() {
                return Err(SnapshotError::InvalidItem {
                    record,
                    reason: "empty module code",
                });
            }
            if rec.name.is_empty() {
                return Err(SnapshotError::InvalidItem {
                    record,
                    reason: "empty module name",
                });
            }
            if rec.size == 0 {
                return Err(SnapshotError::InvalidItem {
                    record,
                    reason: "module size must be positive",
                });
            }

            let item = Item::new(rec.code.clone(), rec.name.clone(), rec.size, tt.group_key_len);
            if !tt.catalog.insert(item.clone()) {
                return Err(SnapshotError::DuplicateCode {
                    record,
                    code: rec.code.clone(),
                });
            }

            if let Some((time, room)) = &rec.placement {
                let slot = tt
                    .grid
                    .slot(time, room)
                    .cloned()
                    .ok_or_else(|| SnapshotError::UnknownSlot {
                        record,
                        time: time.clone(),
                        room: room.clone(),
                    })?;
                if let Some(displaced) = tt.assignments.item_at(&slot) {
                    warn!(
                        slot = %slot,
                        displaced = %displaced,
                        by = %item,
                        "snapshot places two modules in one slot; keeping the later"
                    );
                }
                tt.assignments.assign(item, &slot);
            }
        }

        info!(
            items = tt.catalog.len(),
            scheduled = tt.assignments.len(),
            "timetable loaded"
        );
        Ok(tt)
    }

    /// One record per item, in catalog order.
    pub fn to_records(&self) -> Vec<SnapshotRecord> {
        self.catalog
            .items()
            .iter()
            .map(|item| SnapshotRecord {
                code: item.code.clone(),
                name: item.name.clone(),
                placement: self
                    .assignments
                    .slot_of(item)
                    .map(|s| (s.time.clone(), s.room.clone())),
                size: item.size,
            })
            .collect()
    }

    /// Adds an item to the catalog (unscheduled). Returns `false` for a
    /// duplicate code.
    pub fn add_item(&mut self, code: impl Into<String>, name: impl Into<String>, size: u32) -> bool {
        let item = Item::new(code, name, size, self.group_key_len);
        self.catalog.insert(item)
    }

    /// The slot grid.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// The item catalog.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Current assignments.
    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    /// Mutable access to the assignments.
    pub fn assignments_mut(&mut self) -> &mut AssignmentMap {
        &mut self.assignments
    }

    /// Looks up an item by code.
    pub fn item(&self, code: &str) -> Option<&Item> {
        self.catalog.get(code)
    }

    /// Looks up a slot by coordinates.
    pub fn slot(&self, time: &str, room: &str) -> Option<&Slot> {
        self.grid.slot(time, room)
    }

    /// Item currently in `slot`.
    pub fn item_at(&self, slot: &Slot) -> Option<&Item> {
        self.assignments.item_at(slot)
    }

    /// Slot currently holding `item`.
    pub fn slot_of(&self, item: &Item) -> Option<&Slot> {
        self.assignments.slot_of(item)
    }

    /// See [`constraints::check_placement`].
    pub fn check_placement(&self, item: &Item, slot: &Slot) -> Result<(), Rejection> {
        constraints::check_placement(&self.assignments, &self.grid, item, slot)
    }

    /// See [`constraints::can_place`].
    pub fn can_place(&self, item: &Item, slot: &Slot) -> bool {
        constraints::can_place(&self.assignments, &self.grid, item, slot)
    }

    /// See [`constraints::valid_slots_for`].
    pub fn valid_slots_for(&self, item: &Item) -> Vec<Slot> {
        constraints::valid_slots_for(&self.assignments, &self.grid, item)
    }

    /// Slots `item` could be moved to.
    ///
    /// Unlike [`valid_slots_for`](Self::valid_slots_for), the item is first
    /// lifted out of its current slot, so its own placement does not count
    /// against it. This is what a pick-up highlights.
    pub fn movable_slots_for(&self, item: &Item) -> Vec<Slot> {
        let mut lifted = self.assignments.clone();
        lifted.unassign(item);
        constraints::valid_slots_for(&lifted, &self.grid, item)
    }

    /// Item-list text: `"<code>  <size>  -  <time>  <room>"`, with
    /// placeholders when unscheduled.
    pub fn description(&self, item: &Item) -> String {
        let (time, room) = match self.assignments.slot_of(item) {
            Some(s) => (s.time.as_str(), s.room.as_str()),
            None => (UNSCHEDULED_TIME, UNSCHEDULED_ROOM),
        };
        format!("{}  {}  -  {}  {}", item.code, item.size, time, room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, placement: Option<(&str, &str)>, size: u32) -> SnapshotRecord {
        SnapshotRecord {
            code: code.into(),
            name: format!("{code}_name"),
            placement: placement.map(|(t, r)| (t.into(), r.into())),
            size,
        }
    }

    #[test]
    fn test_from_records_places_items() {
        let recs = vec![
            record("CS1101", Some(("MonAM", "A")), 80),
            record("CS1102", None, 50),
        ];
        let tt = Timetable::from_records(&GridConfig::default(), &recs).unwrap();

        let a = tt.slot("MonAM", "A").unwrap();
        assert_eq!(tt.item_at(a).unwrap().code, "CS1101");
        assert!(tt.slot_of(tt.item("CS1102").unwrap()).is_none());
        assert_eq!(tt.catalog().len(), 2);
    }

    #[test]
    fn test_from_records_unknown_slot() {
        let recs = vec![record("CS1101", Some(("SatAM", "A")), 80)];
        let err = Timetable::from_records(&GridConfig::default(), &recs).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownSlot { record: 1, .. }));
    }

    #[test]
    fn test_from_records_duplicate_code() {
        let recs = vec![record("CS1101", None, 80), record("CS1101", None, 80)];
        let err = Timetable::from_records(&GridConfig::default(), &recs).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateCode { record: 2, .. }));
    }

    #[test]
    fn test_from_records_invalid_item() {
        let recs = vec![record("CS1101", None, 0)];
        let err = Timetable::from_records(&GridConfig::default(), &recs).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidItem { record: 1, .. }));
    }

    #[test]
    fn test_later_record_wins_shared_slot() {
        let recs = vec![
            record("CS1101", Some(("MonAM", "A")), 80),
            record("MA1101", Some(("MonAM", "A")), 80),
        ];
        let tt = Timetable::from_records(&GridConfig::default(), &recs).unwrap();
        let a = tt.slot("MonAM", "A").unwrap();
        assert_eq!(tt.item_at(a).unwrap().code, "MA1101");
        assert!(tt.slot_of(tt.item("CS1101").unwrap()).is_none());
    }

    #[test]
    fn test_loader_trusts_capacity() {
        // Over-capacity placements are loaded as-is.
        let recs = vec![record("CS1101", Some(("MonAM", "H")), 200)];
        let tt = Timetable::from_records(&GridConfig::default(), &recs).unwrap();
        let h = tt.slot("MonAM", "H").unwrap();
        assert_eq!(tt.item_at(h).unwrap().code, "CS1101");
    }

    #[test]
    fn test_to_records_catalog_order() {
        let recs = vec![
            record("MA2001", Some(("WedPM", "C")), 40),
            record("CS1101", None, 80),
        ];
        let tt = Timetable::from_records(&GridConfig::default(), &recs).unwrap();
        assert_eq!(tt.to_records(), recs);
    }

    #[test]
    fn test_description() {
        let recs = vec![
            record("CS1101", Some(("MonAM", "A")), 80),
            record("CS1102", None, 50),
        ];
        let tt = Timetable::from_records(&GridConfig::default(), &recs).unwrap();
        assert_eq!(
            tt.description(tt.item("CS1101").unwrap()),
            "CS1101  80  -  MonAM  A"
        );
        assert_eq!(
            tt.description(tt.item("CS1102").unwrap()),
            "CS1102  50  -  ?????  ?"
        );
    }

    #[test]
    fn test_movable_slots_ignore_own_placement() {
        let recs = vec![record("CS1101", Some(("MonAM", "A")), 80)];
        let tt = Timetable::from_records(&GridConfig::default(), &recs).unwrap();
        let cs = tt.item("CS1101").unwrap();

        let movable = tt.movable_slots_for(cs);
        assert!(movable.contains(tt.slot("MonAM", "B").unwrap()));
        assert!(movable.contains(tt.slot("MonAM", "A").unwrap()));
        assert_eq!(movable.len(), 20);

        // The raw query still counts the current placement.
        assert!(!tt.valid_slots_for(cs).contains(tt.slot("MonAM", "B").unwrap()));
        // Nothing was moved.
        assert_eq!(tt.slot_of(cs), tt.slot("MonAM", "A"));
    }

    #[test]
    fn test_add_item() {
        let mut tt = Timetable::new(&GridConfig::default()).unwrap();
        assert!(tt.add_item("CS1101", "Programming", 80));
        assert!(!tt.add_item("CS1101", "Programming", 80));
        assert_eq!(tt.item("CS1101").unwrap().group_key, "CS1");
    }
}
