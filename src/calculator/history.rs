//! Bounded, newest-first log of completed calculations.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

/// Default number of entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A completed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The left-hand side, e.g. `7 + 3` or `25%`.
    pub expression: String,
    /// The formatted result.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// History log. Index 0 is always the most recent entry.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    /// Create an empty log. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an entry as the newest, evicting the oldest on overflow.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry::new(format!("{n} + 0"), n.to_string())
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(HistoryEntry::new("7 + 3", "10").to_string(), "7 + 3 = 10");
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.latest(), Some(&entry(2)));
        assert_eq!(history.get(1), Some(&entry(1)));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::default();
        for n in 0..60 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history.latest(), Some(&entry(59)));
        assert_eq!(history.iter().last(), Some(&entry(10)));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::with_capacity(0);
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&entry(2)));
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push(entry(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.get(0), None);
    }
}
