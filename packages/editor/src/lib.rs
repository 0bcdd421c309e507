//! # Shopfront Editor
//!
//! Document editing engine for the Shopfront page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Block / Component / RichContent      │
//! │ registry: defaults per type tag             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: one writer per editing session      │
//! │  - Locate nodes (tree)                      │
//! │  - Apply mutations to immutable snapshots   │
//! │  - Plan drag-and-drop and row wrapping      │
//! │  - Undo/redo, subscriptions, dirty state    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: load/save layouts via the API    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are values**: every edit produces a new `Document`
//! 2. **Edits are local**: nothing here talks to the backend
//! 3. **Stale references are normal**: unknown ids are no-ops, not errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_editor::{BuilderStore, Side};
//!
//! let mut store = BuilderStore::new(Arc::new(TypeRegistry::builtin()));
//! store.load(document);
//!
//! let hero = store.insert_block_at(0, BlockType::Hero).unwrap();
//! store.move_block(0, 2);
//! store.insert_beside("text-1", Side::Right, ComponentType::Button);
//!
//! let mut rx = store.subscribe();
//! rx.changed().await?;
//! ```

mod drag;
mod mutations;
mod row_wrap;
mod store;
mod tree;
mod undo_stack;

pub use drag::{plan_drop, DragController, DragState, DropEvent, DEFAULT_ACTIVATION_DISTANCE};
pub use mutations::{ComponentUpdate, Mutation, MutationError, TextOptions};
pub use row_wrap::{plan_insert_beside, InsertBeside, Side};
pub use store::{BuilderStore, MutationOutcome};
pub use tree::{find, find_in_block, Location, NodeRef};
pub use undo_stack::{HistoryEntry, UndoStack};
