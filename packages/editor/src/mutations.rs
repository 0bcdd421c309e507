//! # Document Mutations
//!
//! Every structural or content edit is a [`Mutation`] value. Applying one
//! produces a **new** [`Document`]; the input snapshot is never modified.
//!
//! ## Copy-on-write
//!
//! A document holds its blocks behind `Arc`. Applying a mutation clones the
//! block list (cheap) and copies only the block being edited, so every
//! component array from the edited node up to its block is a fresh value
//! while untouched blocks stay shared with earlier snapshots.
//!
//! ## Semantics
//!
//! - Text and prop edits are atomic replacements: last write wins
//! - `UpdateComponent` and `UpdateBlockProps` are shallow merges
//! - Unknown ids are errors here; the store turns them into no-ops
//! - A `row` may never contain another `row`

use crate::tree::{self, NodeRef};
use serde::{Deserialize, Serialize};
use shopfront_model::{
    Block, Component, Document, Language, LocalizedText, PropValue, Props, StyleMap,
};
use shopfront_registry::RegistryError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Extra switches for [`Mutation::UpdateBlockText`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOptions {
    /// Edit language keys instead of the `text` fallback
    pub per_language: bool,

    /// Language being edited in the UI; with `per_language` and no
    /// `multilingual_content`, only this key is written
    pub active_language: Option<Language>,

    /// Complete replacement language map
    pub multilingual_content: Option<BTreeMap<Language, String>>,

    /// Link target for button fields; an existing href is kept when `None`
    pub href: Option<String>,
}

impl TextOptions {
    pub fn per_language(content: BTreeMap<Language, String>) -> Self {
        Self {
            per_language: true,
            multilingual_content: Some(content),
            ..Self::default()
        }
    }

    pub fn single_language(language: Language) -> Self {
        Self {
            per_language: true,
            active_language: Some(language),
            ..Self::default()
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Partial component update. Present fields replace the component's field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

impl ComponentUpdate {
    pub fn props(props: Props) -> Self {
        Self {
            props: Some(props),
            ..Self::default()
        }
    }

    pub fn style(style: StyleMap) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn children(children: Vec<Component>) -> Self {
        Self {
            children: Some(children),
            ..Self::default()
        }
    }
}

/// Semantic document edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Write a rich-content field on a block
    UpdateBlockText {
        block_id: String,
        field: String,
        value: String,
        style: Option<StyleMap>,
        options: TextOptions,
    },

    /// Shallow-merge props into a block
    UpdateBlockProps { block_id: String, props: Props },

    /// Shallow-merge into a component anywhere under a block
    UpdateComponent {
        block_id: String,
        component_id: String,
        update: ComponentUpdate,
    },

    /// Insert a component into a block's top-level children (append when no index)
    AddComponent {
        block_id: String,
        component: Component,
        index: Option<usize>,
    },

    /// Delete a component wherever it is nested under a block
    RemoveComponent { block_id: String, component_id: String },

    /// Replace a block's children wholesale
    SetBlockChildren {
        block_id: String,
        children: Vec<Component>,
    },

    /// Splice a fully formed block into the document
    InsertBlock { index: usize, block: Block },

    /// Array move: remove at `from`, then insert at `to`
    MoveBlock { from: usize, to: usize },

    RemoveBlock { block_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found for: {0}")]
    ParentNotFound(String),

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl Mutation {
    /// Apply to a snapshot, returning the new document
    pub fn apply(&self, doc: &Document) -> Result<Document, MutationError> {
        let mut next = doc.clone();

        match self {
            Mutation::UpdateBlockText {
                block_id,
                field,
                value,
                style,
                options,
            } => {
                let block = block_mut(&mut next, block_id)?;
                let previous = block.props.get(field.as_str());
                let content = merge_text(previous, value, style.as_ref(), options);
                block.props.insert(field.clone(), PropValue::Rich(content));
            }

            Mutation::UpdateBlockProps { block_id, props } => {
                let block = block_mut(&mut next, block_id)?;
                for (key, value) in props {
                    block.props.insert(key.clone(), value.clone());
                }
            }

            Mutation::UpdateComponent {
                block_id,
                component_id,
                update,
            } => {
                let component = component_mut(doc, &mut next, block_id, component_id)?;

                if let Some(children) = &update.children {
                    if !component.is_row() {
                        return Err(MutationError::InvalidStructure(format!(
                            "{} component cannot have children",
                            component.component_type
                        )));
                    }
                    check_rows(children, true)?;
                }

                if let Some(props) = &update.props {
                    component.props = props.clone();
                }
                if let Some(style) = &update.style {
                    component.style = style.clone();
                }
                if let Some(children) = &update.children {
                    component.children = Some(children.clone());
                }
            }

            Mutation::AddComponent {
                block_id,
                component,
                index,
            } => {
                ensure_new_ids(doc, component)?;
                check_rows(std::slice::from_ref(component), false)?;

                let block = block_mut(&mut next, block_id)?;
                let children = block.children.get_or_insert_with(Vec::new);
                let at = index.unwrap_or(children.len()).min(children.len());
                children.insert(at, component.clone());
            }

            Mutation::RemoveComponent {
                block_id,
                component_id,
            } => {
                let block = block_mut(&mut next, block_id)?;
                remove_component(block.children.as_mut(), component_id)
                    .ok_or_else(|| MutationError::NodeNotFound(component_id.clone()))?;
            }

            Mutation::SetBlockChildren { block_id, children } => {
                check_rows(children, false)?;
                let block = block_mut(&mut next, block_id)?;
                block.children = Some(children.clone());
            }

            Mutation::InsertBlock { index, block } => {
                if doc.contains(&block.id) {
                    return Err(MutationError::DuplicateId(block.id.clone()));
                }
                for component in block.children() {
                    ensure_new_ids(doc, component)?;
                }
                check_rows(block.children(), false)?;
                next.insert_block(*index, block.clone());
            }

            Mutation::MoveBlock { from, to } => {
                let len = next.len();
                for index in [*from, *to] {
                    if index >= len {
                        return Err(MutationError::IndexOutOfBounds { index, len });
                    }
                }
                if from != to {
                    let block = next
                        .remove_block_at(*from)
                        .ok_or(MutationError::IndexOutOfBounds { index: *from, len })?;
                    next.insert_block(*to, block);
                }
            }

            Mutation::RemoveBlock { block_id } => {
                let index = next
                    .position(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                next.remove_block_at(index);
            }
        }

        Ok(next)
    }

    /// Block this mutation targets, if any
    pub fn block_id(&self) -> Option<&str> {
        match self {
            Mutation::UpdateBlockText { block_id, .. }
            | Mutation::UpdateBlockProps { block_id, .. }
            | Mutation::UpdateComponent { block_id, .. }
            | Mutation::AddComponent { block_id, .. }
            | Mutation::RemoveComponent { block_id, .. }
            | Mutation::SetBlockChildren { block_id, .. }
            | Mutation::RemoveBlock { block_id } => Some(block_id),
            Mutation::InsertBlock { block, .. } => Some(&block.id),
            Mutation::MoveBlock { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::UpdateBlockText { .. } => "update_block_text",
            Mutation::UpdateBlockProps { .. } => "update_block_props",
            Mutation::UpdateComponent { .. } => "update_component",
            Mutation::AddComponent { .. } => "add_component",
            Mutation::RemoveComponent { .. } => "remove_component",
            Mutation::SetBlockChildren { .. } => "set_block_children",
            Mutation::InsertBlock { .. } => "insert_block",
            Mutation::MoveBlock { .. } => "move_block",
            Mutation::RemoveBlock { .. } => "remove_block",
        }
    }
}

/// Mutation that writes `children` back into `parent`, whichever kind it is
pub(crate) fn write_children(block_id: &str, parent: NodeRef<'_>, children: Vec<Component>) -> Mutation {
    match parent {
        NodeRef::Block(block) => Mutation::SetBlockChildren {
            block_id: block.id.clone(),
            children,
        },
        NodeRef::Component(component) => Mutation::UpdateComponent {
            block_id: block_id.to_string(),
            component_id: component.id.clone(),
            update: ComponentUpdate::children(children),
        },
    }
}

fn block_mut<'a>(doc: &'a mut Document, block_id: &str) -> Result<&'a mut Block, MutationError> {
    doc.block_mut(block_id)
        .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))
}

/// Locate a component with the tree lookup on `doc`, then follow the same
/// path through `next`
fn component_mut<'a>(
    doc: &Document,
    next: &'a mut Document,
    block_id: &str,
    component_id: &str,
) -> Result<&'a mut Component, MutationError> {
    let not_found = || MutationError::NodeNotFound(component_id.to_string());

    let block = doc
        .block(block_id)
        .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
    let path: Vec<String> = tree::find_in_block(block, component_id)
        .ok_or_else(not_found)?
        .path
        .iter()
        .skip(1)
        .map(|id| id.to_string())
        .collect();
    let (target, ancestors) = path.split_last().ok_or_else(not_found)?;

    let mut level: &'a mut [Component] = block_mut(next, block_id)?
        .children
        .as_deref_mut()
        .ok_or_else(not_found)?;
    for id in ancestors {
        let current = level;
        level = current
            .iter_mut()
            .find(|c| c.id == *id)
            .and_then(|c| c.children.as_deref_mut())
            .ok_or_else(not_found)?;
    }
    level.iter_mut().find(|c| c.id == *target).ok_or_else(not_found)
}

fn remove_component(components: Option<&mut Vec<Component>>, id: &str) -> Option<Component> {
    let components = components?;
    if let Some(pos) = components.iter().position(|c| c.id == id) {
        return Some(components.remove(pos));
    }
    components
        .iter_mut()
        .find_map(|child| remove_component(child.children.as_mut(), id))
}

/// Rows may hold leaves only
fn check_rows(components: &[Component], inside_row: bool) -> Result<(), MutationError> {
    for component in components {
        if component.is_row() && inside_row {
            return Err(MutationError::InvalidStructure(format!(
                "row {} cannot be nested inside a row",
                component.id
            )));
        }
        check_rows(component.children(), component.is_row())?;
    }
    Ok(())
}

fn ensure_new_ids(doc: &Document, component: &Component) -> Result<(), MutationError> {
    if tree::find(doc, &component.id).is_some() {
        return Err(MutationError::DuplicateId(component.id.clone()));
    }
    component
        .children()
        .iter()
        .try_for_each(|child| ensure_new_ids(doc, child))
}

/// Compute the new rich value for a text field.
///
/// - `per_language` + `multilingual_content`: the language map is replaced
/// - `per_language` + `active_language`: only that language key is written
/// - otherwise: the `text` fallback is written
///
/// A plain-string previous value is discarded in the per-language modes and
/// becomes the starting object in the fallback mode.
fn merge_text(
    previous: Option<&PropValue>,
    value: &str,
    style: Option<&StyleMap>,
    options: &TextOptions,
) -> LocalizedText {
    let mut content = match previous {
        Some(PropValue::Rich(existing)) => existing.clone(),
        _ => LocalizedText::new(),
    };

    if options.per_language {
        if let Some(languages) = &options.multilingual_content {
            content.set_languages(languages);
        } else if let Some(language) = options.active_language {
            content.set(language, value);
        } else {
            content.text = Some(value.to_string());
        }
    } else {
        content.text = Some(value.to_string());
    }

    if let Some(style) = style {
        content.style = Some(style.clone());
    }
    if let Some(href) = &options.href {
        content.href = Some(href.clone());
    }
    content
}
