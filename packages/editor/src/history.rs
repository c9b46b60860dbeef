//! # Undo/Redo History
//!
//! Linear snapshot history with a single current pointer.
//!
//! ## Design
//!
//! - Every committed edit pushes a full, immutable snapshot of the document
//! - Undo/redo only move the pointer; snapshots are never mutated
//! - Pushing after an undo discards the redo tail
//! - Entry 0 is the snapshot produced by the initial load and is never
//!   discarded, not by reset and not by the entry limit
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = HistoryStack::new(doc);
//!
//! history.push(HistoryEntry::new(edited));
//! assert!(history.can_undo());
//!
//! let previous = history.undo().unwrap();
//! let again = history.redo().unwrap();
//! ```

use std::sync::Arc;

use pagecraft_model::Document;
use tracing::debug;

/// Default number of retained entries, including the original
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Smallest non-zero entry limit
pub const MIN_MAX_ENTRIES: usize = 3;

/// Immutable snapshot of a document at one edit boundary
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Document state after the edit
    pub document: Arc<Document>,

    /// Optional description of the edit that produced this state
    pub label: Option<String>,
}

impl HistoryEntry {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(document),
            label: None,
        }
    }

    /// Add a description
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Snapshot history for one editor session
#[derive(Debug, Clone)]
pub struct HistoryStack {
    /// Snapshots in commit order; index 0 is the initial load
    entries: Vec<HistoryEntry>,

    /// Index of the current snapshot
    pointer: usize,

    /// Maximum number of retained entries (0 = unlimited)
    max_entries: usize,
}

impl HistoryStack {
    /// Create a history seeded with the initial document and the default limit
    pub fn new(initial: Document) -> Self {
        Self::with_max_entries(initial, DEFAULT_MAX_ENTRIES)
    }

    /// Create a history with a custom entry limit.
    ///
    /// A non-zero limit below [`MIN_MAX_ENTRIES`] is raised to it, so the
    /// original, the state before the newest edit and the newest edit are
    /// always kept and one undo after an edit returns the pre-edit state.
    pub fn with_max_entries(initial: Document, max_entries: usize) -> Self {
        let max_entries = if max_entries == 0 {
            0
        } else {
            max_entries.max(MIN_MAX_ENTRIES)
        };

        Self {
            entries: vec![HistoryEntry::new(initial).with_label("Initial load")],
            pointer: 0,
            max_entries,
        }
    }

    /// Record a new current state, discarding anything after the pointer
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.pointer + 1);
        self.entries.push(entry);

        // Trim the oldest edit, never the original
        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            self.entries.remove(1);
        }

        self.pointer = self.entries.len() - 1;
        debug!(pointer = self.pointer, len = self.entries.len(), "History push");
    }

    /// Step back one entry; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.pointer == 0 {
            return None;
        }

        self.pointer -= 1;
        debug!(pointer = self.pointer, len = self.entries.len(), "History undo");
        Some(&self.entries[self.pointer])
    }

    /// Step forward one entry; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.pointer + 1 >= self.entries.len() {
            return None;
        }

        self.pointer += 1;
        debug!(pointer = self.pointer, len = self.entries.len(), "History redo");
        Some(&self.entries[self.pointer])
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    /// Drop every entry except the original and point at it
    pub fn reset(&mut self) -> &HistoryEntry {
        self.entries.truncate(1);
        self.pointer = 0;
        debug!("History reset");
        &self.entries[0]
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.pointer]
    }

    /// The snapshot produced by the initial load
    pub fn original(&self) -> &HistoryEntry {
        &self.entries[0]
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the original snapshot is never removed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.pointer
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.pointer
    }

    /// Get description of the edit the next undo would revert
    pub fn undo_description(&self) -> Option<&str> {
        if self.can_undo() {
            self.entries[self.pointer].label.as_deref()
        } else {
            None
        }
    }

    /// Get description of the edit the next redo would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.pointer + 1)
            .and_then(|entry| entry.label.as_deref())
    }
}
