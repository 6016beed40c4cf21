//! Item (module) model.
//!
//! An item is a taught module that needs a room at some time. Its group
//! key is derived from the leading characters of its code (subject and
//! year, e.g. "CS1" for "CS1101"); two items of the same group may never
//! run at the same time-code.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A schedulable module.
///
/// Identity is the `code`. `name` is only used for output.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique module code (e.g., "CS1101").
    pub code: String,
    /// Conflict group derived from the code prefix.
    pub group_key: String,
    /// Number of students (minimum room capacity).
    pub size: u32,
    /// Display name.
    pub name: String,
}

impl Item {
    /// Creates an item, deriving the group key from the first
    /// `group_key_len` characters of `code`.
    ///
    /// Codes shorter than `group_key_len` use the whole code as group key.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        size: u32,
        group_key_len: usize,
    ) -> Self {
        let code = code.into();
        let group_key = group_key_of(&code, group_key_len);
        Self {
            code,
            group_key,
            size,
            name: name.into(),
        }
    }

    /// Whether this item shares a conflict group with `other`.
    #[inline]
    pub fn same_group(&self, other: &Item) -> bool {
        self.group_key == other.group_key
    }
}

/// Derives the group key for a code.
pub fn group_key_of(code: &str, group_key_len: usize) -> String {
    code.chars().take(group_key_len).collect()
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
