//! # Builder Store
//!
//! The single writer for an editing session. Holds the current document
//! snapshot, applies mutations, records history and broadcasts every new
//! snapshot to subscribers.
//!
//! ```text
//!   UI event ──→ BuilderStore::update_* / drag_end / insert_beside
//!                     │
//!                     ├─ plan (drag, row wrap)  → Vec<Mutation>
//!                     ├─ apply on a copy        → Document
//!                     ├─ history.record(before)
//!                     └─ watch::Sender::send_replace(Arc<Document>)
//! ```
//!
//! Failed mutations never escape: unknown ids, malformed drops and
//! structural violations come back as [`MutationOutcome::Noop`] and leave
//! the document untouched.

use crate::drag::{plan_drop, DropEvent};
use crate::mutations::{ComponentUpdate, Mutation, MutationError, TextOptions};
use crate::row_wrap::{plan_insert_beside, Side};
use crate::undo_stack::UndoStack;
use shopfront_model::{BlockType, Component, ComponentType, Document, IdGenerator, Props, StyleMap};
use shopfront_registry::TypeRegistry;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Result of a store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new snapshot was published
    Applied { version: u64 },

    /// Nothing changed
    Noop { reason: String },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    fn noop(error: impl ToString) -> Self {
        MutationOutcome::Noop {
            reason: error.to_string(),
        }
    }
}

pub struct BuilderStore {
    document: Arc<Document>,
    sender: watch::Sender<Arc<Document>>,
    registry: Arc<TypeRegistry>,
    ids: IdGenerator,
    history: UndoStack,

    /// Bumped on every published snapshot
    version: u64,

    /// Last snapshot known to match the backend
    saved: Arc<Document>,
}

impl BuilderStore {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        let document = Arc::new(Document::new());
        let (sender, _) = watch::channel(document.clone());
        Self {
            saved: document.clone(),
            document,
            sender,
            registry,
            ids: IdGenerator::default(),
            history: UndoStack::new(),
            version: 0,
        }
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_undo_levels(mut self, max_levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(max_levels);
        self
    }

    /// Current snapshot
    pub fn document(&self) -> Arc<Document> {
        self.document.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Generator shared by every node this session creates
    pub fn id_generator(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<Document>> {
        self.sender.subscribe()
    }

    /// Replace the session document. Clears history and marks it saved.
    pub fn load(&mut self, document: Document) {
        let document = Arc::new(document);
        self.history.clear();
        self.saved = document.clone();
        self.publish(document);
    }

    /// True when the document differs from the last saved or loaded snapshot
    pub fn is_dirty(&self) -> bool {
        !Arc::ptr_eq(&self.document, &self.saved) && *self.document != *self.saved
    }

    /// Record `snapshot` as persisted. Edits made after it was taken stay dirty.
    pub fn mark_saved(&mut self, snapshot: &Arc<Document>) {
        self.saved = snapshot.clone();
    }

    // ---- dispatch ----------------------------------------------------

    pub fn dispatch(&mut self, mutation: Mutation) -> MutationOutcome {
        let description = mutation.name();
        match mutation.apply(&self.document) {
            Ok(next) => self.commit(next, description),
            Err(error) => self.reject(description, error),
        }
    }

    /// Apply several mutations as one step: all or nothing, one notification,
    /// one undo entry.
    pub fn dispatch_batch(&mut self, mutations: Vec<Mutation>, description: &str) -> MutationOutcome {
        if mutations.is_empty() {
            return MutationOutcome::noop("nothing to apply");
        }

        let mut next = (*self.document).clone();
        for mutation in &mutations {
            next = match mutation.apply(&next) {
                Ok(next) => next,
                Err(error) => return self.reject(mutation.name(), error),
            };
        }
        self.commit(next, description)
    }

    fn commit(&mut self, next: Document, description: &str) -> MutationOutcome {
        self.history.record(self.document.clone(), description);
        self.publish(Arc::new(next));
        MutationOutcome::Applied {
            version: self.version,
        }
    }

    fn reject(&self, operation: &str, error: MutationError) -> MutationOutcome {
        debug!(operation, error = %error, "Mutation ignored");
        MutationOutcome::noop(error)
    }

    fn publish(&mut self, document: Arc<Document>) {
        self.version += 1;
        self.document = document.clone();
        self.sender.send_replace(document);
    }

    // ---- mutation API -----------------------------------------------

    pub fn update_block_text(
        &mut self,
        block_id: &str,
        field: &str,
        value: &str,
        style: Option<StyleMap>,
        options: TextOptions,
    ) -> MutationOutcome {
        self.dispatch(Mutation::UpdateBlockText {
            block_id: block_id.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            style,
            options,
        })
    }

    pub fn update_block_props(&mut self, block_id: &str, props: Props) -> MutationOutcome {
        self.dispatch(Mutation::UpdateBlockProps {
            block_id: block_id.to_string(),
            props,
        })
    }

    pub fn update_component(&mut self, block_id: &str, component_id: &str, update: ComponentUpdate) -> MutationOutcome {
        self.dispatch(Mutation::UpdateComponent {
            block_id: block_id.to_string(),
            component_id: component_id.to_string(),
            update,
        })
    }

    pub fn add_component(&mut self, block_id: &str, component: Component, index: Option<usize>) -> MutationOutcome {
        self.dispatch(Mutation::AddComponent {
            block_id: block_id.to_string(),
            component,
            index,
        })
    }

    /// Materialize a component from registry defaults and add it to a block
    pub fn add_new_component(
        &mut self,
        block_id: &str,
        component_type: ComponentType,
        index: Option<usize>,
    ) -> Option<String> {
        let component = match self.registry.create_component(component_type, &mut self.ids) {
            Ok(component) => component,
            Err(error) => {
                self.reject("add_component", error.into());
                return None;
            }
        };
        let id = component.id.clone();
        self.add_component(block_id, component, index)
            .is_applied()
            .then_some(id)
    }

    pub fn remove_component(&mut self, block_id: &str, component_id: &str) -> MutationOutcome {
        self.dispatch(Mutation::RemoveComponent {
            block_id: block_id.to_string(),
            component_id: component_id.to_string(),
        })
    }

    pub fn set_block_children(&mut self, block_id: &str, children: Vec<Component>) -> MutationOutcome {
        self.dispatch(Mutation::SetBlockChildren {
            block_id: block_id.to_string(),
            children,
        })
    }

    /// Materialize a block from registry defaults and splice it in at `index`.
    /// Returns the new block id.
    pub fn insert_block_at(&mut self, index: usize, block_type: BlockType) -> Option<String> {
        let block = match self.registry.create_block(block_type, &mut self.ids) {
            Ok(block) => block,
            Err(error) => {
                self.reject("insert_block", error.into());
                return None;
            }
        };
        let id = block.id.clone();
        self.dispatch(Mutation::InsertBlock { index, block })
            .is_applied()
            .then_some(id)
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> MutationOutcome {
        self.dispatch(Mutation::MoveBlock { from, to })
    }

    pub fn remove_block(&mut self, block_id: &str) -> MutationOutcome {
        self.dispatch(Mutation::RemoveBlock {
            block_id: block_id.to_string(),
        })
    }

    // ---- structural gestures ----------------------------------------

    /// Place a new component beside `target_id`, wrapping it in a row if needed.
    /// Returns the new component id.
    pub fn insert_beside(&mut self, target_id: &str, side: Side, new_type: ComponentType) -> Option<String> {
        let plan = match plan_insert_beside(&self.document, &self.registry, &mut self.ids, target_id, side, new_type) {
            Ok(plan) => plan,
            Err(error) => {
                self.reject("insert_beside", error);
                return None;
            }
        };
        self.dispatch_batch(plan.mutations, "insert_beside")
            .is_applied()
            .then_some(plan.new_id)
    }

    /// Reconcile a finished drag
    pub fn drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> MutationOutcome {
        let Some(over_id) = over_id else {
            return MutationOutcome::noop("dropped outside any target");
        };
        match plan_drop(&self.document, active_id, over_id) {
            Ok(mutations) => self.dispatch_batch(mutations, "drag"),
            Err(error) => self.reject("drag", error),
        }
    }

    pub fn handle_drop(&mut self, event: &DropEvent) -> MutationOutcome {
        self.drag_end(&event.active_id, event.over_id.as_deref())
    }

    // ---- history ----------------------------------------------------

    /// Group subsequent dispatches into one undo step
    pub fn begin_batch(&mut self, description: &str) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.document.clone()) {
            Some(previous) => {
                self.publish(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.document.clone()) {
            Some(next) => {
                self.publish(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl std::fmt::Debug for BuilderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderStore")
            .field("blocks", &self.document.len())
            .field("version", &self.version)
            .field("undo_levels", &self.history.undo_levels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_model::Block;

    fn store() -> BuilderStore {
        let mut store = BuilderStore::new(Arc::new(TypeRegistry::builtin()));
        store.load(Document::from_blocks(vec![
            Block::new("home", BlockType::Hero),
            Block::new("catalog", BlockType::ProductList),
            Block::new("about", BlockType::Footer),
        ]));
        store
    }

    #[test]
    fn test_subscribers_see_every_snapshot() {
        let mut store = store();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        assert!(store.move_block(2, 0).is_applied());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().block_ids(), vec!["about", "home", "catalog"]);
    }

    #[test]
    fn test_noop_keeps_snapshot_and_version() {
        let mut store = store();
        let before = store.document();
        let version = store.version();

        let outcome = store.remove_block("missing");
        assert!(!outcome.is_applied());
        assert!(Arc::ptr_eq(&before, &store.document()));
        assert_eq!(store.version(), version);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_dirty_tracking_and_undo() {
        let mut store = store();
        assert!(!store.is_dirty());

        let id = store.insert_block_at(1, BlockType::Testimonials).unwrap();
        assert!(store.is_dirty());
        assert_eq!(store.document().position(&id), Some(1));

        assert!(store.undo());
        assert!(!store.is_dirty());
        assert!(store.redo());
        assert!(store.document().contains(&id));

        let saved = store.document();
        store.mark_saved(&saved);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut store = store();
        let before = store.document();

        let outcome = store.dispatch_batch(
            vec![
                Mutation::MoveBlock { from: 0, to: 1 },
                Mutation::RemoveBlock {
                    block_id: "missing".into(),
                },
            ],
            "broken",
        );
        assert!(!outcome.is_applied());
        assert_eq!(*store.document(), *before);
    }
}
