#![forbid(unsafe_code)]

//! The demo host: a list of labels with a single active entry.
//!
//! Clicking activates an entry, a reorder moves the label and its active flag
//! together, the remove button drops an entry, and submitting a non-empty
//! input line appends one.

use ftui_reorder::{ListOrder, OrderError};
use serde::Serialize;

/// Labels the demo starts with.
pub const DEMO_CONTENT: [&str; 5] = ["hallo", "world", "was", "geht", "ab"];

/// One row of the demo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoEntry {
    pub content: String,
    pub active: bool,
}

/// Host state driven by [`ListSignal`](ftui_reorder::ListSignal)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoList {
    entries: ListOrder<DemoEntry>,
    input: String,
}

impl Default for DemoList {
    fn default() -> Self {
        Self::new(DEMO_CONTENT)
    }
}

impl DemoList {
    /// A list with the given labels; the first one starts active.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| DemoEntry {
                content: label.into(),
                active: i == 0,
            })
            .collect();
        Self {
            entries,
            input: String::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[DemoEntry] {
        self.entries.as_slice()
    }

    /// Labels in display order.
    #[must_use]
    pub fn contents(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.content.clone()).collect()
    }

    /// Position of the active entry.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.active)
    }

    /// Pending input line.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Make the entry at `index` the only active one.
    pub fn click(&mut self, index: usize) -> Result<(), OrderError> {
        if let Some(current) = self.active_index() {
            self.entries.update(current, |e| e.active = false)?;
        }
        self.entries.update(index, |e| e.active = true)
    }

    /// Move the entry at `from` to `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), OrderError> {
        self.entries = std::mem::take(&mut self.entries).moved(from, to)?;
        Ok(())
    }

    /// Drop the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<DemoEntry, OrderError> {
        let (entries, removed) = std::mem::take(&mut self.entries).removed(index)?;
        self.entries = entries;
        Ok(removed)
    }

    /// Replace the pending input line.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append the input line as a new inactive entry. Empty input is ignored.
    pub fn submit(&mut self) -> bool {
        if self.input.is_empty() {
            return false;
        }
        let content = std::mem::take(&mut self.input);
        self.entries = std::mem::take(&mut self.entries).pushed(DemoEntry {
            content,
            active: false,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_starts_active() {
        let demo = DemoList::default();
        assert_eq!(demo.len(), 5);
        assert_eq!(demo.active_index(), Some(0));
    }

    #[test]
    fn click_moves_active_flag() {
        let mut demo = DemoList::default();
        demo.click(3).expect("in range");
        assert_eq!(demo.active_index(), Some(3));
        assert_eq!(demo.entries().iter().filter(|e| e.active).count(), 1);
        assert!(demo.click(9).is_err());
    }

    #[test]
    fn reorder_carries_active_flag() {
        let mut demo = DemoList::default();
        demo.reorder(0, 2).expect("in range");
        assert_eq!(demo.contents(), ["world", "was", "hallo", "geht", "ab"]);
        assert_eq!(demo.active_index(), Some(2));
    }

    #[test]
    fn remove_and_append() {
        let mut demo = DemoList::default();
        let removed = demo.remove(1).expect("in range");
        assert_eq!(removed.content, "world");

        assert!(!demo.submit());
        demo.set_input("neu");
        assert!(demo.submit());
        assert_eq!(demo.input(), "");
        assert_eq!(demo.contents(), ["hallo", "was", "geht", "ab", "neu"]);
        assert!(!demo.entries()[4].active);
    }

    #[test]
    fn removing_active_leaves_none_active() {
        let mut demo = DemoList::default();
        demo.remove(0).expect("in range");
        assert_eq!(demo.active_index(), None);
        demo.click(0).expect("in range");
        assert_eq!(demo.active_index(), Some(0));
    }
}
