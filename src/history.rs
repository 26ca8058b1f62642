//! Session calculation history.

use chrono::{DateTime, Local};

/// Only this many recent calculations are kept.
pub const HISTORY_CAP: usize = 20;

#[derive(Debug, Clone)]
pub struct Entry {
    pub expression: String,
    pub result: String,
    pub timestamp: DateTime<Local>,
}

/// Recent calculations, newest first. Session-scoped, never persisted.
#[derive(Debug, Default)]
pub struct History(Vec<Entry>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a calculation, evicting the oldest past [`HISTORY_CAP`].
    pub fn push(&mut self, expression: &str, result: &str) {
        self.0.insert(
            0,
            Entry {
                expression: expression.to_string(),
                result: result.to_string(),
                timestamp: Local::now(),
            },
        );
        self.0.truncate(HISTORY_CAP);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.0.iter()
    }
}
