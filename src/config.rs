//! Grid configuration.
//!
//! Describes the fixed axes of the timetable: the ordered time-codes, the
//! rooms with their capacities, and how many leading characters of a module
//! code form its conflict group. The default is the reference week of ten
//! half-day sessions across eight rooms.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// A room column of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Room identifier.
    pub name: String,
    /// Seats available.
    pub capacity: u32,
}

impl RoomConfig {
    /// Creates a room.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Static layout of the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Ordered time-codes (grid rows).
    pub times: Vec<String>,
    /// Rooms (grid columns).
    pub rooms: Vec<RoomConfig>,
    /// Prefix length of a module code that forms its group key.
    #[serde(default = "default_group_key_len")]
    pub group_key_len: usize,
}

fn default_group_key_len() -> usize {
    3
}

impl Default for GridConfig {
    fn default() -> Self {
        let times = [
            "MonAM", "MonPM", "TueAM", "TuePM", "WedAM", "WedPM", "ThuAM", "ThuPM", "FriAM",
            "FriPM",
        ];
        let rooms = [
            ("A", 100),
            ("B", 100),
            ("C", 60),
            ("D", 60),
            ("E", 60),
            ("F", 30),
            ("G", 30),
            ("H", 30),
        ];
        Self {
            times: times.iter().map(|t| t.to_string()).collect(),
            rooms: rooms
                .iter()
                .map(|&(name, capacity)| RoomConfig::new(name, capacity))
                .collect(),
            group_key_len: default_group_key_len(),
        }
    }
}

impl GridConfig {
    /// Creates a configuration from explicit axes.
    pub fn new(times: Vec<String>, rooms: Vec<RoomConfig>) -> Self {
        Self {
            times,
            rooms,
            group_key_len: default_group_key_len(),
        }
    }

    /// Sets the group key prefix length.
    pub fn with_group_key_len(mut self, len: usize) -> Self {
        self.group_key_len = len;
        self
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GridConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both axes are non-empty, identifiers are unique and
    /// non-blank, and capacities are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.times.is_empty() {
            return Err(ConfigError::NoTimes);
        }
        if self.rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }
        if self.group_key_len == 0 {
            return Err(ConfigError::ZeroGroupKeyLen);
        }

        let mut seen = HashSet::new();
        for t in &self.times {
            if t.trim().is_empty() {
                return Err(ConfigError::EmptyIdentifier);
            }
            if !seen.insert(t.as_str()) {
                return Err(ConfigError::DuplicateTime(t.clone()));
            }
        }

        let mut seen = HashSet::new();
        for r in &self.rooms {
            if r.name.trim().is_empty() {
                return Err(ConfigError::EmptyIdentifier);
            }
            if !seen.insert(r.name.as_str()) {
                return Err(ConfigError::DuplicateRoom(r.name.clone()));
            }
            if r.capacity == 0 {
                return Err(ConfigError::ZeroCapacity(r.name.clone()));
            }
        }

        Ok(())
    }
}
