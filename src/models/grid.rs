//! Slot grid.
//!
//! The full, fixed enumeration of slots: every time-code crossed with every
//! room, stored row-major so that one time-code's row is a contiguous run.

use crate::config::{GridConfig, RoomConfig};
use crate::error::ConfigError;

use super::Slot;

/// Immutable R × C grid of slots.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    times: Vec<String>,
    rooms: Vec<RoomConfig>,
    slots: Vec<Slot>,
}

impl SlotGrid {
    /// Builds the grid from a configuration.
    pub fn from_config(config: &GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let slots = config
            .times
            .iter()
            .flat_map(|t| {
                config
                    .rooms
                    .iter()
                    .map(move |r| Slot::new(t.clone(), r.name.clone(), r.capacity))
            })
            .collect();

        Ok(Self {
            times: config.times.clone(),
            rooms: config.rooms.clone(),
            slots,
        })
    }

    /// All slots in row-major order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Ordered time-codes.
    pub fn times(&self) -> &[String] {
        &self.times
    }

    /// Rooms in column order.
    pub fn rooms(&self) -> &[RoomConfig] {
        &self.rooms
    }

    /// Number of rows (time-codes).
    pub fn row_count(&self) -> usize {
        self.times.len()
    }

    /// Number of columns (rooms).
    pub fn col_count(&self) -> usize {
        self.rooms.len()
    }

    /// Row index of a time-code.
    pub fn time_index(&self, time: &str) -> Option<usize> {
        self.times.iter().position(|t| t == time)
    }

    /// All slots sharing a time-code, in room order. Empty for an unknown
    /// time-code.
    pub fn row(&self, time: &str) -> &[Slot] {
        match self.time_index(time) {
            Some(i) => {
                let cols = self.col_count();
                &self.slots[i * cols..(i + 1) * cols]
            }
            None => &[],
        }
    }

    /// Looks up a slot by coordinates.
    pub fn slot(&self, time: &str, room: &str) -> Option<&Slot> {
        self.row(time).iter().find(|s| s.room == room)
    }
}
