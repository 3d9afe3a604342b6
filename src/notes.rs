//! Timestamped append-only notes.
//!
//! Every entity carries a note log: user annotations plus automatic entries
//! (e.g. renames). Entries are never removed or edited after the fact.

use serde::{Deserialize, Serialize};

/// One note entry, timestamped at second precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notes {
    entries: Vec<Note>,
}

pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a timestamped note.
    pub fn add(&mut self, text: impl Into<String>) {
        self.entries.push(Note {
            date: timestamp(),
            text: text.into(),
        });
    }

    /// Text of the most recent note, if any.
    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(|n| n.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
