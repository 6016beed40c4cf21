//! Flat-file snapshot of a timetable.
//!
//! One record per module, whitespace-delimited:
//!
//! ```text
//! code name time room size
//! ```
//!
//! An unscheduled module uses `?????` for time and `?` for room. Output is
//! written one line per module in catalog order, fields separated by one
//! space, so a load followed by a save without edits reproduces the file.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::GridConfig;
use crate::error::SnapshotError;
use crate::models::{Timetable, UNSCHEDULED_ROOM, UNSCHEDULED_TIME};
use crate::validation;

/// One module line of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Module code.
    pub code: String,
    /// Module name (a single token).
    pub name: String,
    /// `(time, room)` when scheduled.
    pub placement: Option<(String, String)>,
    /// Number of students.
    pub size: u32,
}

impl SnapshotRecord {
    /// Parses one line. `line` is the 1-based line number for errors.
    pub fn parse(text: &str, line: usize) -> Result<Self, SnapshotError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [code, name, time, room, size] = fields[..] else {
            return Err(SnapshotError::MalformedRecord {
                line,
                found: fields.len(),
            });
        };

        let size = match size.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(SnapshotError::InvalidSize {
                    line,
                    value: size.to_string(),
                })
            }
        };

        let placement = if time == UNSCHEDULED_TIME {
            None
        } else {
            Some((time.to_string(), room.to_string()))
        };

        Ok(Self {
            code: code.to_string(),
            name: name.to_string(),
            placement,
            size,
        })
    }
}

impl fmt::Display for SnapshotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (time, room) = match &self.placement {
            Some((t, r)) => (t.as_str(), r.as_str()),
            None => (UNSCHEDULED_TIME, UNSCHEDULED_ROOM),
        };
        write!(f, "{} {} {} {} {}", self.code, self.name, time, room, self.size)
    }
}

/// Parses snapshot text. Blank lines are skipped.
pub fn parse_snapshot(text: &str) -> Result<Vec<SnapshotRecord>, SnapshotError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| SnapshotRecord::parse(l, i + 1))
        .collect()
}

/// Renders records as snapshot text, each line newline-terminated.
pub fn render_snapshot(records: &[SnapshotRecord]) -> String {
    records.iter().map(|r| format!("{r}\n")).collect()
}

/// Reads and parses a snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<SnapshotRecord>, SnapshotError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_snapshot(&text)?;
    debug!(path = %path.display(), records = records.len(), "snapshot read");
    Ok(records)
}

/// Loads a timetable from a snapshot file on the given grid.
///
/// Rule violations already present in the file are logged as warnings,
/// not rejected.
pub fn load_timetable(
    config: &GridConfig,
    path: impl AsRef<Path>,
) -> Result<Timetable, SnapshotError> {
    let records = load_snapshot(path)?;
    let timetable = Timetable::from_records(config, &records)?;
    validation::warn_violations(&timetable);
    Ok(timetable)
}

/// Destination for committed timetables.
pub trait SnapshotSink {
    /// Where snapshots go, for user messages.
    fn location(&self) -> String;

    /// Writes a full snapshot, replacing any previous one.
    fn write_snapshot(&mut self, records: &[SnapshotRecord]) -> Result<(), SnapshotError>;
}

/// Writes snapshots to a file path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for FileSink {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn write_snapshot(&mut self, records: &[SnapshotRecord]) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        for r in records {
            writeln!(out, "{r}").map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;

        info!(path = %self.path.display(), records = records.len(), "snapshot written");
        Ok(())
    }
}

/// Keeps the last written snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    contents: Option<String>,
    writes: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the last snapshot written, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of snapshots written.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotSink for MemorySink {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn write_snapshot(&mut self, records: &[SnapshotRecord]) -> Result<(), SnapshotError> {
        self.contents = Some(render_snapshot(records));
        self.writes += 1;
        Ok(())
    }
}
