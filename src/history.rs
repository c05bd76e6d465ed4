// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 50;

/// Full-text snapshots of a document with a cursor on the current one.
///
/// Recording after an undo discards the snapshots ahead of the cursor, and
/// once `capacity` is exceeded the oldest snapshot is dropped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct History {
    snapshots: Vec<String>,
    index: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: vec![],
            index: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.snapshots.get(self.index).map(String::as_str)
    }

    /// Returns `false` if `source` equals the current snapshot and nothing
    /// was recorded.
    pub fn record(&mut self, source: &str) -> bool {
        if self.current() == Some(source) {
            return false;
        }

        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push(source.to_string());
        self.index = self.snapshots.len() - 1;

        if self.snapshots.len() > self.capacity {
            let overflow = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..overflow);
            self.index -= overflow;
        }
        true
    }

    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity may change between runs through the config file.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        if self.snapshots.len() > self.capacity {
            let overflow = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..overflow);
            self.index = self.index.saturating_sub(overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut history = History::new(10);
        assert_eq!(history.undo(), None);

        history.record("a");
        history.record("ab");
        history.record("abc");

        assert_eq!(history.undo(), Some("ab"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some("a"));

        assert_eq!(history.redo(), Some("ab"));
        assert_eq!(history.redo(), Some("abc"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_discards_redo_tail() {
        let mut history = History::new(10);
        history.record("a");
        history.record("b");
        history.record("c");
        history.undo();
        history.undo();

        assert!(history.record("x"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some("a"));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::new(3);
        for s in ["1", "2", "3", "4", "5"] {
            history.record(s);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some("5"));
        assert_eq!(history.undo(), Some("4"));
        assert_eq!(history.undo(), Some("3"));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_default_capacity() {
        let mut history = History::default();
        for i in 0..60 {
            history.record(&i.to_string());
        }
        assert_eq!(history.len(), DEFAULT_CAPACITY);
        assert_eq!(history.capacity(), 50);
    }

    #[test]
    fn test_identical_snapshot_is_skipped() {
        let mut history = History::new(5);
        assert!(history.record("a"));
        assert!(!history.record("a"));
        assert!(history.record("b"));
        history.undo();

        // recording the current snapshot again keeps the redo tail
        assert!(!history.record("a"));
        assert!(history.can_redo());
    }

    #[test]
    fn test_shrink_capacity() {
        let mut history = History::new(5);
        for s in ["1", "2", "3", "4"] {
            history.record(s);
        }
        history.set_capacity(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some("4"));
        assert_eq!(history.undo(), Some("3"));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut history = History::new(4);
        history.record("x");
        history.record("y");
        history.undo();

        let json = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
        assert!(restored.can_redo());
    }
}
