//! Error types.
//!
//! Only configuration and persistence can fail. A placement that breaks a
//! constraint is an ordinary outcome (see [`crate::constraints::Rejection`]),
//! not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the grid configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No time-codes configured.
    #[error("grid configuration has no time-codes")]
    NoTimes,

    /// No rooms configured.
    #[error("grid configuration has no rooms")]
    NoRooms,

    /// A time-code or room name is blank.
    #[error("grid configuration contains an empty identifier")]
    EmptyIdentifier,

    /// The same time-code is listed twice.
    #[error("duplicate time-code in grid configuration: {0}")]
    DuplicateTime(String),

    /// The same room is listed twice.
    #[error("duplicate room in grid configuration: {0}")]
    DuplicateRoom(String),

    /// A room was configured with zero seats.
    #[error("room {0} must have a positive capacity")]
    ZeroCapacity(String),

    /// Group keys must use at least one character.
    #[error("group key length must be positive")]
    ZeroGroupKeyLen,

    /// The configuration file could not be read.
    #[error("cannot read grid configuration {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for a grid.
    #[error("invalid grid configuration {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems reading or writing a snapshot.
///
/// Load-side variants are fatal at startup; write-side failures are
/// reported to the user as a failed save and leave the session intact.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be opened, read or written.
    #[error("snapshot I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line does not have exactly five fields.
    #[error("line {line}: expected 5 fields, found {found}")]
    MalformedRecord { line: usize, found: usize },

    /// The size field is not a positive integer.
    #[error("line {line}: invalid size {value:?}")]
    InvalidSize { line: usize, value: String },

    /// A record places its item in a slot the grid does not have.
    #[error("record {record}: no slot at {time} {room}")]
    UnknownSlot {
        record: usize,
        time: String,
        room: String,
    },

    /// Two records share a module code.
    #[error("record {record}: duplicate module code {code}")]
    DuplicateCode { record: usize, code: String },

    /// A record cannot form a well-formed item.
    #[error("record {record}: {reason}")]
    InvalidItem { record: usize, reason: &'static str },

    /// The grid configuration itself is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
