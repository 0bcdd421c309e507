//! # Drag-and-Drop
//!
//! Two halves:
//!
//! 1. [`DragController`]: the per-gesture state machine
//!
//! ```text
//!            pointer_down            move > threshold
//!   Idle ─────────────────→ Pressed ─────────────────→ Dragging
//!    ↑  ←── pointer_up (click) ──┘                        │
//!    └──────────────── drop / cancel ─────────────────────┘
//!    └── key_start ──────────────────────────────────────→ Dragging
//! ```
//!
//! 2. [`plan_drop`]: turns a `(active, over)` pair into the mutations that
//!    reorder or move the dragged node.
//!
//! ## Drop rules
//!
//! - Same parent: remove at the old index, reinsert at the over node's index
//! - Different parents: remove from source, insert into destination at the
//!   over node's index; both parents are written back
//! - Top-level blocks reorder with `MoveBlock`
//! - An empty row under the pointer receives the node as its first child
//! - Unresolvable ids, missing parents, cycles and rows-in-rows abort

use crate::mutations::{write_children, Mutation, MutationError};
use crate::tree::{self, Location};
use serde::{Deserialize, Serialize};
use shopfront_model::{Component, Document};
use tracing::debug;

/// Pointer travel (px) before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

/// Finished gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEvent {
    pub active_id: String,
    pub over_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Pressed {
        active_id: String,
        origin: (f64, f64),
    },
    Dragging {
        active_id: String,
        over_id: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    activation_distance: f64,
}

impl DragController {
    pub fn new() -> Self {
        Self::with_activation_distance(DEFAULT_ACTIVATION_DISTANCE)
    }

    pub fn with_activation_distance(activation_distance: f64) -> Self {
        Self {
            state: DragState::Idle,
            activation_distance,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Dragged node id while a drag is in progress
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active_id, .. } => Some(active_id),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, node_id: impl Into<String>, x: f64, y: f64) {
        if matches!(self.state, DragState::Idle) {
            self.state = DragState::Pressed {
                active_id: node_id.into(),
                origin: (x, y),
            };
        }
    }

    /// Returns true when this move activated the drag
    pub fn pointer_move(&mut self, x: f64, y: f64, over_id: Option<&str>) -> bool {
        match &mut self.state {
            DragState::Pressed { active_id, origin } => {
                let distance = ((x - origin.0).powi(2) + (y - origin.1).powi(2)).sqrt();
                if distance < self.activation_distance {
                    return false;
                }
                let active_id = std::mem::take(active_id);
                debug!(active_id = %active_id, distance, "Drag activated");
                self.state = DragState::Dragging {
                    active_id,
                    over_id: over_id.map(str::to_string),
                };
                true
            }
            DragState::Dragging { over_id: current, .. } => {
                *current = over_id.map(str::to_string);
                false
            }
            DragState::Idle => false,
        }
    }

    /// Keyboard drags start without a threshold
    pub fn key_start(&mut self, node_id: impl Into<String>) {
        if !self.is_dragging() {
            self.state = DragState::Dragging {
                active_id: node_id.into(),
                over_id: None,
            };
        }
    }

    /// Keyboard navigation over drop targets
    pub fn hover(&mut self, over_id: Option<&str>) {
        if let DragState::Dragging { over_id: current, .. } = &mut self.state {
            *current = over_id.map(str::to_string);
        }
    }

    /// End the gesture. Returns a drop only if a drag was active.
    pub fn drop(&mut self) -> Option<DropEvent> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { active_id, over_id } => Some(DropEvent { active_id, over_id }),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutations that realize dropping `active_id` onto `over_id`.
///
/// An empty plan means nothing to do (dropped onto itself).
pub fn plan_drop(doc: &Document, active_id: &str, over_id: &str) -> Result<Vec<Mutation>, MutationError> {
    if active_id == over_id {
        return Ok(Vec::new());
    }

    let active = tree::find(doc, active_id).ok_or_else(|| MutationError::NodeNotFound(active_id.to_string()))?;
    let over = tree::find(doc, over_id).ok_or_else(|| MutationError::NodeNotFound(over_id.to_string()))?;

    if over.is_within(active_id) {
        return Err(MutationError::CycleDetected);
    }

    // Empty rows act as insertion points; a dragged row is reordered beside them
    if over.node.is_row() && over.node.children().is_empty() && !active.node.is_row() {
        return plan_move(doc, &active, over.node.id(), 0);
    }

    match (active.parent, over.parent) {
        (None, None) => Ok(vec![Mutation::MoveBlock {
            from: active.index,
            to: over.index,
        }]),
        (None, Some(_)) => Err(MutationError::ParentNotFound(active_id.to_string())),
        (Some(_), None) => Err(MutationError::ParentNotFound(over_id.to_string())),
        (Some(source), Some(destination)) if source.id() == destination.id() => {
            let mut children = source.children().to_vec();
            let moved = children.remove(active.index);
            let at = over.index.min(children.len());
            children.insert(at, moved);
            Ok(vec![write_children(active.block_id(), source, children)])
        }
        (Some(_), Some(destination)) => plan_move(doc, &active, destination.id(), over.index),
    }
}

/// Cross-parent move of `active` into the children of `destination_id` at `index`.
///
/// The move is carried out on a scratch copy, then both parents are written
/// back from the result. The shallower parent is written first: its final
/// children already embed the final state of anything below it, so no
/// intermediate snapshot holds the node twice.
fn plan_move(
    doc: &Document,
    active: &Location<'_>,
    destination_id: &str,
    index: usize,
) -> Result<Vec<Mutation>, MutationError> {
    let moved: Component = active
        .node
        .as_component()
        .cloned()
        .ok_or_else(|| MutationError::ParentNotFound(active.node.id().to_string()))?;
    let source_id = active
        .parent_id()
        .ok_or_else(|| MutationError::ParentNotFound(moved.id.clone()))?;

    let removed = Mutation::RemoveComponent {
        block_id: active.block_id().to_string(),
        component_id: moved.id.clone(),
    }
    .apply(doc)?;

    let insert = {
        let target = tree::find(&removed, destination_id)
            .ok_or_else(|| MutationError::ParentNotFound(destination_id.to_string()))?;
        if moved.is_row() && target.node.is_row() {
            return Err(MutationError::InvalidStructure(format!(
                "row {} cannot be moved into row {}",
                moved.id, destination_id
            )));
        }
        let mut children = target.node.children().to_vec();
        children.insert(index.min(children.len()), moved);
        write_children(target.block_id(), target.node, children)
    };
    let scratch = insert.apply(&removed)?;

    let mut writes = Vec::with_capacity(2);
    for parent_id in [source_id, destination_id] {
        let parent = tree::find(&scratch, parent_id)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
        let children = parent.node.children().to_vec();
        writes.push((parent.depth(), write_children(parent.block_id(), parent.node, children)));
    }
    writes.sort_by_key(|(depth, _)| *depth);

    Ok(writes.into_iter().map(|(_, mutation)| mutation).collect())
}
