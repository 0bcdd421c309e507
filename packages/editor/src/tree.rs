//! # Tree Navigation
//!
//! Locates a node by id and reports its parent, sibling index and ancestor
//! path. Nodes do not store parent links; every lookup re-derives them.
//!
//! ```text
//! find(doc, "t2")
//!   block b1            path  = [b1, r1, t2]
//!    └─ row r1    ←──── parent
//!        ├─ t1
//!        └─ t2    ←──── node, index = 1
//! ```
//!
//! Top-level blocks are searched first, then each block's content tree in
//! depth-first document order. The first match wins.

use shopfront_model::{Block, Component, Document};

/// Borrowed view of either kind of node
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Block(&'a Block),
    Component(&'a Component),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            NodeRef::Block(block) => &block.id,
            NodeRef::Component(component) => &component.id,
        }
    }

    pub fn children(&self) -> &'a [Component] {
        match self {
            NodeRef::Block(block) => block.children(),
            NodeRef::Component(component) => component.children(),
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, NodeRef::Component(component) if component.is_row())
    }

    pub fn as_block(&self) -> Option<&'a Block> {
        match self {
            NodeRef::Block(block) => Some(block),
            NodeRef::Component(_) => None,
        }
    }

    pub fn as_component(&self) -> Option<&'a Component> {
        match self {
            NodeRef::Block(_) => None,
            NodeRef::Component(component) => Some(component),
        }
    }
}

/// Transient result of a lookup
#[derive(Debug, Clone)]
pub struct Location<'a> {
    pub node: NodeRef<'a>,

    /// Owning block or row; `None` for top-level blocks
    pub parent: Option<NodeRef<'a>>,

    /// Position among the parent's children, or among the document's blocks
    pub index: usize,

    /// Ancestor ids from the owning block down to the node itself
    pub path: Vec<&'a str>,
}

impl<'a> Location<'a> {
    /// Id of the block that owns this node (the node itself for blocks)
    pub fn block_id(&self) -> &'a str {
        self.path[0]
    }

    pub fn parent_id(&self) -> Option<&'a str> {
        self.parent.map(|p| p.id())
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// True if `id` is this node or one of its ancestors
    pub fn is_within(&self, id: &str) -> bool {
        self.path.iter().any(|p| *p == id)
    }
}

/// Find a node anywhere in the document
pub fn find<'a>(doc: &'a Document, target_id: &str) -> Option<Location<'a>> {
    if let Some((index, block)) = doc.blocks().enumerate().find(|(_, b)| b.id == target_id) {
        return Some(Location {
            node: NodeRef::Block(block),
            parent: None,
            index,
            path: vec![block.id.as_str()],
        });
    }

    doc.blocks().find_map(|block| find_in_block(block, target_id))
}

/// Find a component inside one block's content tree
pub fn find_in_block<'a>(block: &'a Block, target_id: &str) -> Option<Location<'a>> {
    let mut path = vec![block.id.as_str()];
    search(block.children(), NodeRef::Block(block), target_id, &mut path)
}

fn search<'a>(
    children: &'a [Component],
    parent: NodeRef<'a>,
    target_id: &str,
    path: &mut Vec<&'a str>,
) -> Option<Location<'a>> {
    for (index, child) in children.iter().enumerate() {
        if child.id == target_id {
            let mut found = path.clone();
            found.push(child.id.as_str());
            return Some(Location {
                node: NodeRef::Component(child),
                parent: Some(parent),
                index,
                path: found,
            });
        }

        if !child.children().is_empty() {
            path.push(child.id.as_str());
            let nested = search(child.children(), NodeRef::Component(child), target_id, path);
            path.pop();
            if nested.is_some() {
                return nested;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_model::{BlockType, ComponentType};

    fn doc() -> Document {
        Document::from_blocks(vec![
            Block::new("b1", BlockType::Hero).with_children(vec![
                Component::new("t1", ComponentType::Text),
                Component::new("r1", ComponentType::Row).with_children(vec![
                    Component::new("t2", ComponentType::Text),
                    Component::new("i1", ComponentType::Image),
                ]),
            ]),
            Block::new("b2", BlockType::Footer)
                .with_children(vec![Component::new("t3", ComponentType::Text)]),
        ])
    }

    #[test]
    fn test_find_top_level_block() {
        let doc = doc();
        let loc = find(&doc, "b2").unwrap();
        assert!(loc.parent.is_none());
        assert_eq!(loc.index, 1);
        assert_eq!(loc.path, vec!["b2"]);
        assert_eq!(loc.block_id(), "b2");
    }

    #[test]
    fn test_find_nested_component() {
        let doc = doc();
        let loc = find(&doc, "i1").unwrap();
        assert_eq!(loc.node.id(), "i1");
        assert_eq!(loc.parent_id(), Some("r1"));
        assert!(loc.parent.unwrap().is_row());
        assert_eq!(loc.index, 1);
        assert_eq!(loc.path, vec!["b1", "r1", "i1"]);
        assert!(loc.is_within("r1"));
    }

    #[test]
    fn test_find_direct_block_child() {
        let doc = doc();
        let loc = find(&doc, "t3").unwrap();
        assert_eq!(loc.parent_id(), Some("b2"));
        assert!(loc.parent.unwrap().as_block().is_some());
        assert_eq!(loc.index, 0);
        assert_eq!(loc.block_id(), "b2");
    }

    #[test]
    fn test_missing_id() {
        assert!(find(&doc(), "nope").is_none());
        assert!(find(&Document::new(), "b1").is_none());
    }

    #[test]
    fn test_find_in_block_is_scoped() {
        let doc = doc();
        let b1 = doc.block("b1").unwrap();
        assert!(find_in_block(b1, "t2").is_some());
        assert!(find_in_block(b1, "t3").is_none());
    }
}
