//! # Side-by-Side Insertion
//!
//! Dropping a new component beside an existing leaf:
//!
//! ```text
//! target already in a row          target directly under a block
//!
//! row [a, T, b]                    block [T, x]
//!   insert right of T                insert right of T
//!   → row [a, T, N, b]               → block [row [T, N], x]
//! ```
//!
//! The wrapping row takes the target's old slot. The target keeps its id.
//! Rows are never nested: inserting a row, or wrapping a row, is refused.

use crate::mutations::{write_children, Mutation, MutationError};
use crate::tree;
use serde::{Deserialize, Serialize};
use shopfront_model::{ComponentType, Document, IdGenerator};
use shopfront_registry::TypeRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Planned insertion: the write-back plus the id of the new component
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBeside {
    pub mutations: Vec<Mutation>,
    pub new_id: String,
    /// Id of the synthesized row, when the target had to be wrapped
    pub row_id: Option<String>,
}

pub fn plan_insert_beside(
    doc: &Document,
    registry: &TypeRegistry,
    ids: &mut IdGenerator,
    target_id: &str,
    side: Side,
    new_type: ComponentType,
) -> Result<InsertBeside, MutationError> {
    let target = tree::find(doc, target_id)
        .ok_or_else(|| MutationError::NodeNotFound(target_id.to_string()))?;
    let target_component = target.node.as_component().ok_or_else(|| {
        MutationError::InvalidStructure(format!("block {} cannot be placed in a row", target_id))
    })?;
    let parent = target
        .parent
        .ok_or_else(|| MutationError::ParentNotFound(target_id.to_string()))?;

    if new_type.is_container() {
        return Err(MutationError::InvalidStructure(
            "rows cannot be inserted beside a component".to_string(),
        ));
    }

    let new_component = registry.create_component(new_type, ids)?;
    let new_id = new_component.id.clone();
    let mut siblings = parent.children().to_vec();

    if parent.is_row() {
        let at = match side {
            Side::Left => target.index,
            Side::Right => target.index + 1,
        };
        siblings.insert(at, new_component);
        return Ok(InsertBeside {
            mutations: vec![write_children(target.block_id(), parent, siblings)],
            new_id,
            row_id: None,
        });
    }

    if target_component.is_row() {
        return Err(MutationError::InvalidStructure(format!(
            "row {} cannot be wrapped in another row",
            target_id
        )));
    }

    let pair = match side {
        Side::Left => vec![new_component, target_component.clone()],
        Side::Right => vec![target_component.clone(), new_component],
    };
    let row = registry.create_component(ComponentType::Row, ids)?.with_children(pair);
    let row_id = row.id.clone();
    siblings[target.index] = row;

    Ok(InsertBeside {
        mutations: vec![write_children(target.block_id(), parent, siblings)],
        new_id,
        row_id: Some(row_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_model::{Block, BlockType, Component};

    fn doc() -> Document {
        Document::from_blocks(vec![Block::new("b1", BlockType::Hero).with_children(vec![
            Component::new("t1", ComponentType::Text),
            Component::new("r1", ComponentType::Row)
                .with_children(vec![Component::new("t2", ComponentType::Text)]),
        ])])
    }

    #[test]
    fn test_wrap_produces_single_block_write() {
        let registry = TypeRegistry::builtin();
        let mut ids = IdGenerator::default();
        let plan = plan_insert_beside(&doc(), &registry, &mut ids, "t1", Side::Left, ComponentType::Image).unwrap();

        assert_eq!(plan.mutations.len(), 1);
        assert!(plan.row_id.is_some());
        match &plan.mutations[0] {
            Mutation::SetBlockChildren { block_id, children } => {
                assert_eq!(block_id, "b1");
                assert_eq!(children[0].children()[0].id, plan.new_id);
                assert_eq!(children[0].children()[1].id, "t1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_refuses_rows() {
        let registry = TypeRegistry::builtin();
        let mut ids = IdGenerator::default();

        let inserting_row = plan_insert_beside(&doc(), &registry, &mut ids, "t1", Side::Right, ComponentType::Row);
        assert!(matches!(inserting_row, Err(MutationError::InvalidStructure(_))));

        let wrapping_row = plan_insert_beside(&doc(), &registry, &mut ids, "r1", Side::Right, ComponentType::Text);
        assert!(matches!(wrapping_row, Err(MutationError::InvalidStructure(_))));
    }

    #[test]
    fn test_refuses_blocks_and_unknown_targets() {
        let registry = TypeRegistry::builtin();
        let mut ids = IdGenerator::default();

        let block = plan_insert_beside(&doc(), &registry, &mut ids, "b1", Side::Right, ComponentType::Text);
        assert!(matches!(block, Err(MutationError::InvalidStructure(_))));

        let missing = plan_insert_beside(&doc(), &registry, &mut ids, "zz", Side::Right, ComponentType::Text);
        assert_eq!(missing, Err(MutationError::NodeNotFound("zz".into())));
    }
}
