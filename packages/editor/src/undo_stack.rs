//! # Undo/Redo Stack
//!
//! Snapshot history for the builder store.
//!
//! ## Design
//!
//! - Documents are immutable snapshots, so history stores the document as
//!   it was *before* each change rather than inverse mutations
//! - Undo swaps the current snapshot for the previous one and parks the
//!   current one on the redo stack
//! - New changes clear the redo stack
//! - Batches collapse several changes into one undo step: only the first
//!   `before` snapshot of a batch is kept
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.record(before.clone(), "move_block");
//! let previous = stack.undo(current).unwrap();   // == before
//! let restored = stack.redo(previous).unwrap();  // == current
//! ```

use shopfront_model::Document;
use std::sync::Arc;

/// One undo step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Document before the step
    pub snapshot: Arc<Document>,

    pub description: Option<String>,
}

#[derive(Debug, Default)]
struct PendingBatch {
    before: Option<Arc<Document>>,
    description: Option<String>,
}

/// Undo/redo stack over document snapshots
#[derive(Debug)]
pub struct UndoStack {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recently undone last
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<PendingBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the document as it was before an applied change
    pub fn record(&mut self, before: Arc<Document>, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            if batch.before.is_none() {
                batch.before = Some(before);
            }
            batch.description.get_or_insert_with(|| description.into());
            return;
        }

        self.push_entry(HistoryEntry {
            snapshot: before,
            description: Some(description.into()),
        });
    }

    /// Start grouping changes into a single undo step
    pub fn begin_batch(&mut self) {
        if self.current_batch.is_none() {
            self.current_batch = Some(PendingBatch::default());
        }
    }

    /// Close the current batch. Empty batches leave no entry.
    pub fn end_batch(&mut self) {
        if let Some(PendingBatch {
            before: Some(snapshot),
            description,
        }) = self.current_batch.take()
        {
            self.push_entry(HistoryEntry { snapshot, description });
        }
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back. Returns the snapshot to restore, or `None` if there is no history.
    pub fn undo(&mut self, current: Arc<Document>) -> Option<Arc<Document>> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description.clone(),
        });
        Some(entry.snapshot)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Arc<Document>) -> Option<Arc<Document>> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            snapshot: current,
            description: entry.description.clone(),
        });
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_model::{Block, BlockType};

    fn snapshot(ids: &[&str]) -> Arc<Document> {
        Arc::new(
            ids.iter()
                .map(|id| Block::new(*id, BlockType::Hero))
                .collect(),
        )
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_and_redo_swap_snapshots() {
        let mut stack = UndoStack::new();
        let before = snapshot(&["a"]);
        let after = snapshot(&["a", "b"]);

        stack.record(before.clone(), "insert_block");
        assert_eq!(stack.undo_description(), Some("insert_block"));

        let undone = stack.undo(after.clone()).unwrap();
        assert!(Arc::ptr_eq(&undone, &before));
        assert!(stack.can_redo());

        let redone = stack.redo(undone).unwrap();
        assert!(Arc::ptr_eq(&redone, &after));
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_batch_keeps_first_snapshot() {
        let mut stack = UndoStack::new();
        let first = snapshot(&["a"]);

        stack.begin_batch();
        stack.set_batch_description("Move node");
        stack.record(first.clone(), "remove_component");
        stack.record(snapshot(&["b"]), "add_component");
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Move node"));
        let undone = stack.undo(snapshot(&["c"])).unwrap();
        assert!(Arc::ptr_eq(&undone, &first));
    }

    #[test]
    fn test_empty_batch_leaves_no_entry() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.end_batch();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(snapshot(&["a"]), "one");
        stack.undo(snapshot(&["b"]));
        assert_eq!(stack.redo_levels(), 1);

        stack.record(snapshot(&["a"]), "two");
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut stack = UndoStack::with_max_levels(2);
        for i in 0..3 {
            stack.record(snapshot(&[format!("b{}", i).as_str()]), format!("step {}", i));
        }
        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo_description(), Some("step 2"));
    }
}
