//! Bounded command history with absolute numbering.

use std::collections::VecDeque;
use std::fmt;

/// Default number of retained history entries.
pub const DEFAULT_CAPACITY: usize = 10;

/// Why a recall request could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallError {
    /// Nothing has been logged yet.
    Empty,
    /// No retained entry starts with the requested character.
    NoMatch(char),
    /// The recall argument was not exactly one character.
    InvalidArgument(String),
}

impl fmt::Display for RecallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecallError::Empty => write!(f, "history is empty"),
            RecallError::NoMatch(c) => write!(f, "no history entry starting with '{}'", c),
            RecallError::InvalidArgument(arg) => {
                write!(f, "r: expected a single character, got '{}'", arg)
            }
        }
    }
}

impl std::error::Error for RecallError {}

/// A fixed-capacity FIFO ring of past command lines.
///
/// Entries keep their absolute, 1-based chronological number even after older
/// entries have been evicted: the 11th command is listed as `11` no matter how
/// small the ring is.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    /// Total commands ever appended. Monotonic, never reset.
    total: u64,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        // A zero-capacity ring would make every recall fail; clamp to one.
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    /// Log one command line, evicting the oldest entry when the ring is full.
    pub fn append(&mut self, text: impl Into<String>) {
        self.total += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(text.into());
    }

    /// Retained entries in chronological order, each with its absolute number.
    pub fn list(&self) -> Vec<(u64, &str)> {
        let first = self.total - self.entries.len() as u64 + 1;
        self.entries
            .iter()
            .enumerate()
            .map(|(i, text)| (first + i as u64, text.as_str()))
            .collect()
    }

    /// The most recently appended entry.
    pub fn recall_last(&self) -> Result<&str, RecallError> {
        self.entries
            .back()
            .map(String::as_str)
            .ok_or(RecallError::Empty)
    }

    /// The most recent entry whose first character is `c`.
    pub fn recall_by_prefix(&self, c: char) -> Result<&str, RecallError> {
        if self.entries.is_empty() {
            return Err(RecallError::Empty);
        }
        self.entries
            .iter()
            .rev()
            .find(|text| text.chars().next() == Some(c))
            .map(String::as_str)
            .ok_or(RecallError::NoMatch(c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total commands ever logged, including evicted ones.
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_in_chronological_order() {
        let mut history = History::new(10);
        history.append("echo one ");
        history.append("echo two ");
        history.append("echo three ");

        let listed = history.list();
        assert_eq!(
            listed,
            vec![(1, "echo one "), (2, "echo two "), (3, "echo three ")]
        );
    }

    #[test]
    fn test_eviction_keeps_absolute_numbers() {
        let mut history = History::new(3);
        for i in 1..=4 {
            history.append(format!("cmd{} ", i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.total(), 4);
        let listed: Vec<(u64, String)> = history
            .list()
            .into_iter()
            .map(|(n, t)| (n, t.to_string()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (2, "cmd2 ".to_string()),
                (3, "cmd3 ".to_string()),
                (4, "cmd4 ".to_string())
            ]
        );
    }

    #[test]
    fn test_overflow_by_one_retains_last_capacity_entries() {
        let capacity = 10;
        let mut history = History::new(capacity);
        for i in 1..=capacity + 1 {
            history.append(format!("c{} ", i));
        }
        let listed = history.list();
        assert_eq!(listed.len(), capacity);
        assert_eq!(listed[0].0, 2);
        assert_eq!(listed[capacity - 1].0, capacity as u64 + 1);
    }

    #[test]
    fn test_recall_last() {
        let mut history = History::new(10);
        history.append("pwd ");
        history.append("ls -l ");
        assert_eq!(history.recall_last(), Ok("ls -l "));
    }

    #[test]
    fn test_recall_last_empty() {
        let history = History::default();
        assert_eq!(history.recall_last(), Err(RecallError::Empty));
    }

    #[test]
    fn test_recall_by_prefix_prefers_newest() {
        let mut history = History::new(10);
        history.append("ls -l ");
        history.append("pwd ");
        history.append("ls /tmp ");
        assert_eq!(history.recall_by_prefix('l'), Ok("ls /tmp "));
        assert_eq!(history.recall_by_prefix('p'), Ok("pwd "));
    }

    #[test]
    fn test_recall_by_prefix_no_match() {
        let mut history = History::new(10);
        history.append("pwd ");
        assert_eq!(history.recall_by_prefix('x'), Err(RecallError::NoMatch('x')));
    }

    #[test]
    fn test_recall_by_prefix_empty() {
        let history = History::default();
        assert_eq!(history.recall_by_prefix('x'), Err(RecallError::Empty));
    }
}
