//! # Blocks and Components
//!
//! ```text
//! Document
//!  └─ Block (hero, footer, ...)            props, children?
//!      └─ Component (text/button/image)    props, style
//!      └─ Component (row)                  props, style, children
//!          └─ Component (text/button/image)
//! ```
//!
//! Nodes never store a reference to their parent. Parent, index and path are
//! derived on demand by tree navigation.

use crate::rich::StyleMap;
use crate::{ModelError, Props};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of top-level section kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Hero,
    HeroSplit,
    HeroCarousel,
    Testimonials,
    TestimonialsGrid,
    TestimonialsCarousel,
    Navigation,
    ProductList,
    Footer,
    FooterMinimal,
    ProductDetail,
    ProductDetailGallery,
}

impl BlockType {
    pub const ALL: [BlockType; 12] = [
        BlockType::Hero,
        BlockType::HeroSplit,
        BlockType::HeroCarousel,
        BlockType::Testimonials,
        BlockType::TestimonialsGrid,
        BlockType::TestimonialsCarousel,
        BlockType::Navigation,
        BlockType::ProductList,
        BlockType::Footer,
        BlockType::FooterMinimal,
        BlockType::ProductDetail,
        BlockType::ProductDetailGallery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::HeroSplit => "hero-split",
            BlockType::HeroCarousel => "hero-carousel",
            BlockType::Testimonials => "testimonials",
            BlockType::TestimonialsGrid => "testimonials-grid",
            BlockType::TestimonialsCarousel => "testimonials-carousel",
            BlockType::Navigation => "navigation",
            BlockType::ProductList => "product-list",
            BlockType::Footer => "footer",
            BlockType::FooterMinimal => "footer-minimal",
            BlockType::ProductDetail => "product-detail",
            BlockType::ProductDetailGallery => "product-detail-gallery",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownBlockType(s.to_string()))
    }
}

/// Closed set of component kinds. `Row` is the only container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Text,
    Button,
    Image,
    Row,
}

impl ComponentType {
    pub const ALL: [ComponentType; 4] = [
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Row,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Text => "text",
            ComponentType::Button => "button",
            ComponentType::Image => "image",
            ComponentType::Row => "row",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ComponentType::Row)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownComponentType(s.to_string()))
    }
}

/// Top-level page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    #[serde(default)]
    pub props: Props,

    /// Free-form content. `None` means the block renders from `props` alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            props: Props::new(),
            children: None,
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = Some(children);
        self
    }

    /// Child components, empty for legacy (props-only) blocks
    pub fn children(&self) -> &[Component] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_legacy(&self) -> bool {
        self.children.is_none()
    }

    /// This block plus every component below it
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Component::node_count).sum::<usize>()
    }
}

/// Node inside a block's content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: ComponentType,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub style: StyleMap,

    /// Present only on rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
}

impl Component {
    pub fn new(id: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            id: id.into(),
            component_type,
            props: Props::new(),
            style: StyleMap::new(),
            children: if component_type.is_container() {
                Some(Vec::new())
            } else {
                None
            },
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_row(&self) -> bool {
        self.component_type == ComponentType::Row
    }

    pub fn children(&self) -> &[Component] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Component::node_count).sum::<usize>()
    }
}
