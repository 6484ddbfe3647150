//! Action log — an append-only, ordered record of what happened.

use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, now};

/// One recorded action. Renders as `"{source}: {message}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub source: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Append-only list of [`LogEntry`] values in observation order.
///
/// Unbounded by default. With a capacity, the oldest entry is evicted once
/// the log is full (FIFO); that eviction and an explicit [`clear`](Self::clear)
/// are the only ways entries disappear.
#[derive(Debug, Default, Clone)]
pub struct ActionLogger {
    entries: VecDeque<LogEntry>,
    capacity: Option<NonZeroUsize>,
}

impl ActionLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `capacity` entries.
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get()),
            capacity: Some(capacity),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Append an entry stamped with the current time and return a copy of it.
    pub fn log(&mut self, source: impl Into<String>, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            source: source.into(),
            message: message.into(),
            timestamp: now(),
        };
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity.get() {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(entry.clone());
        entry
    }

    /// Snapshot of the entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Snapshot of the formatted entries, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Nothing in the crate calls this implicitly; it exists
    /// for callers that explicitly want to reset the history.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
