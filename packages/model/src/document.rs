//! # Document
//!
//! Ordered sequence of blocks making up one page. Blocks are held behind
//! `Arc` so cloning a document is cheap and edits copy only the block they
//! touch; earlier snapshots stay valid and comparable.

use crate::{Block, Component, ModelError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Arc<Block>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().map(|b| b.as_ref())
    }

    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index).map(|b| b.as_ref())
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id).map(|b| b.as_ref())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn block_ids(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    /// Copy-on-write access to a block; other snapshots sharing it are untouched
    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == id)
            .map(Arc::make_mut)
    }

    /// Insert at `index`, clamped to the end
    pub fn insert_block(&mut self, index: usize, block: Block) {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, Arc::new(block));
    }

    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(Arc::new(block));
    }

    pub fn remove_block_at(&mut self, index: usize) -> Option<Block> {
        if index >= self.blocks.len() {
            return None;
        }
        let removed = self.blocks.remove(index);
        Some(Arc::try_unwrap(removed).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Blocks plus every nested component
    pub fn node_count(&self) -> usize {
        self.blocks.iter().map(|b| b.node_count()).sum()
    }

    /// True if any block or component carries `id`
    pub fn contains(&self, id: &str) -> bool {
        self.all_ids().iter().any(|existing| *existing == id)
    }

    /// Every node id in depth-first document order
    pub fn all_ids(&self) -> Vec<&str> {
        fn collect<'a>(components: &'a [Component], ids: &mut Vec<&'a str>) {
            for component in components {
                ids.push(&component.id);
                collect(component.children(), ids);
            }
        }

        let mut ids = Vec::new();
        for block in &self.blocks {
            ids.push(block.id.as_str());
            collect(block.children(), &mut ids);
        }
        ids
    }

    /// Check structural invariants: unique ids and no row directly inside a row
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for id in self.all_ids() {
            if !seen.insert(id) {
                return Err(ModelError::DuplicateId(id.to_string()));
            }
        }

        fn check_rows(components: &[Component], inside_row: bool) -> Result<(), ModelError> {
            for component in components {
                if component.is_row() && inside_row {
                    return Err(ModelError::NestedRow(component.id.clone()));
                }
                check_rows(component.children(), component.is_row())?;
            }
            Ok(())
        }

        for block in &self.blocks {
            check_rows(block.children(), false)?;
        }
        Ok(())
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter.into_iter().collect())
    }
}
