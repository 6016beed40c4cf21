//! Line-oriented text front-end.
//!
//! Turns typed commands into session [`Event`]s and renders [`Effect`]s and
//! the grid as plain text. Used by the `u-timetable edit` and `show`
//! subcommands.

use std::fmt;

use thiserror::Error;

use crate::models::Timetable;
use crate::selection::Effect;
use crate::session::Event;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the session.
    Send(Event),
    /// List legal slots for a module without changing anything.
    Valid(String),
    /// Print the grid.
    Show,
    /// Print command help.
    Help,
}

/// A line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Nothing typed.
    #[error("empty command")]
    Empty,
    /// Unrecognised verb.
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Help text listing every command.
pub const HELP: &str = "\
item <code>          pick up / put back a module
slot <time> <room>   press a grid cell
valid <code>         list legal slots for a module
edit                 toggle edit mode (leaving it saves)
show                 print the timetable
quit                 save if editing, then exit";

/// Parses one console line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err(CommandError::Empty);
    };

    match (verb.to_ascii_lowercase().as_str(), args) {
        ("item", [code]) => Ok(Command::Send(Event::press_item(*code))),
        ("item", _) => Err(CommandError::Usage("item <code>")),
        ("slot", [time, room]) => Ok(Command::Send(Event::press_slot(*time, *room))),
        ("slot", _) => Err(CommandError::Usage("slot <time> <room>")),
        ("valid", [code]) => Ok(Command::Valid(code.to_string())),
        ("valid", _) => Err(CommandError::Usage("valid <code>")),
        ("edit" | "save", []) => Ok(Command::Send(Event::ToggleEditMode)),
        ("quit" | "exit", []) => Ok(Command::Send(Event::RequestShutdown)),
        ("show", []) => Ok(Command::Show),
        ("help" | "?", []) => Ok(Command::Help),
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}

/// One line of text per effect.
pub fn render_effect(effect: &Effect) -> String {
    match effect {
        Effect::Highlight { item, slots } => {
            let listed: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
            if listed.is_empty() {
                format!("holding {item}; no legal slots")
            } else {
                format!("holding {item}; legal: {}", listed.join(", "))
            }
        }
        Effect::MarkScheduled { description, .. } => format!("scheduled  {description}"),
        Effect::MarkUnscheduled { description, .. } => format!("unscheduled  {description}"),
        Effect::ClearHighlights => "selection cleared".to_string(),
        Effect::SetButtonsEnabled(true) => "editing on".to_string(),
        Effect::SetButtonsEnabled(false) => "editing off".to_string(),
        Effect::Saved { location } => format!("changes saved to {location}"),
        Effect::SaveFailed { reason } => format!("save failed: {reason}"),
    }
}

/// Column width, separator included.
const CELL: usize = 8;

/// Grid (one row per time-code) followed by the module list.
#[derive(Debug, Clone, Copy)]
pub struct TimetableView<'a>(pub &'a Timetable);

impl fmt::Display for TimetableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timetable = self.0;
        let grid = timetable.grid();

        // Each cell is padded to CELL - 1 and followed by a space, so long
        // labels push the row out instead of merging with the next column.
        write!(f, "{:<w$} ", "", w = CELL - 1)?;
        for room in grid.rooms() {
            let label = format!("{}({})", room.name, room.capacity);
            write!(f, "{label:<w$} ", w = CELL - 1)?;
        }
        writeln!(f)?;

        for time in grid.times() {
            write!(f, "{time:<w$} ", w = CELL - 1)?;
            for slot in grid.row(time) {
                let cell = timetable
                    .item_at(slot)
                    .map(|i| i.code.as_str())
                    .unwrap_or(".");
                write!(f, "{cell:<w$} ", w = CELL - 1)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        for item in timetable.catalog().items() {
            writeln!(f, "{}", timetable.description(item))?;
        }
        Ok(())
    }
}

/// Renders the grid followed by the module list.
pub fn render_timetable(timetable: &Timetable) -> String {
    TimetableView(timetable).to_string()
}
