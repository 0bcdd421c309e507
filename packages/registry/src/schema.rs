use serde::{Deserialize, Serialize};
use shopfront_model::{ComponentType, Props, StyleMap};

/// How a block field is edited in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    RichText,
    RichButton,
    Text,
    Image,
    Number,
    Toggle,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
}

impl EditableField {
    pub fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        }
    }
}

/// Defaults for one block type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockSchema {
    pub default_props: Props,

    pub editable_fields: Vec<EditableField>,

    /// Components seeded into a new block. `None` marks a props-only block.
    pub default_children: Option<Vec<ChildSeed>>,
}

impl BlockSchema {
    pub fn supports_children(&self) -> bool {
        self.default_children.is_some()
    }
}

/// One component seeded into a new block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSeed {
    pub component_type: ComponentType,

    /// Block prop whose value becomes the child's `content`
    pub content_from: Option<String>,
}

impl ChildSeed {
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            content_from: None,
        }
    }

    pub fn content_from(mut self, field: &str) -> Self {
        self.content_from = Some(field.to_string());
        self
    }
}

/// Defaults for one component type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentSchema {
    pub default_props: Props,
    pub default_style: StyleMap,
}
