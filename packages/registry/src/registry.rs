//! # Type Registry
//!
//! Maps block and component type tags to their schemas and display
//! functions. Every operation that manufactures a new node goes through
//! [`TypeRegistry::create_block`] or [`TypeRegistry::create_component`] so
//! defaults are defined in exactly one place.

use crate::builtin;
use crate::render::{OutlineRenderer, RenderContext, Renderer};
use crate::schema::{BlockSchema, ChildSeed, ComponentSchema};
use crate::RegistryError;
use shopfront_model::{Block, BlockType, Component, ComponentType, IdGenerator, Props};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct TypeRegistry {
    blocks: HashMap<BlockType, BlockSchema>,
    components: HashMap<ComponentType, ComponentSchema>,
    renderers: HashMap<BlockType, Arc<dyn Renderer>>,
    fallback_renderer: Arc<dyn Renderer>,
}

impl TypeRegistry {
    /// Empty registry (no types registered)
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            components: HashMap::new(),
            renderers: HashMap::new(),
            fallback_renderer: Arc::new(OutlineRenderer),
        }
    }

    /// Registry preloaded with the full built-in palette
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for block_type in BlockType::ALL {
            registry.register_block(block_type, builtin::block_schema(block_type));
        }
        for component_type in ComponentType::ALL {
            registry.register_component(component_type, builtin::component_schema(component_type));
        }
        registry
    }

    pub fn register_block(&mut self, block_type: BlockType, schema: BlockSchema) {
        self.blocks.insert(block_type, schema);
    }

    pub fn register_component(&mut self, component_type: ComponentType, schema: ComponentSchema) {
        self.components.insert(component_type, schema);
    }

    pub fn register_renderer(&mut self, block_type: BlockType, renderer: Arc<dyn Renderer>) {
        self.renderers.insert(block_type, renderer);
    }

    pub fn get_schema(&self, block_type: BlockType) -> Option<&BlockSchema> {
        self.blocks.get(&block_type)
    }

    pub fn get_component_schema(&self, component_type: ComponentType) -> Option<&ComponentSchema> {
        self.components.get(&component_type)
    }

    /// Default props for a block or component type tag (`"hero"`, `"button"`, ...)
    pub fn get_default_props(&self, type_tag: &str) -> Option<&Props> {
        if let Ok(block_type) = type_tag.parse::<BlockType>() {
            return self.get_schema(block_type).map(|s| &s.default_props);
        }
        type_tag
            .parse::<ComponentType>()
            .ok()
            .and_then(|t| self.get_component_schema(t))
            .map(|s| &s.default_props)
    }

    /// Materialize a new block with default props and seeded children
    pub fn create_block(&self, block_type: BlockType, ids: &mut IdGenerator) -> Result<Block, RegistryError> {
        let schema = self
            .get_schema(block_type)
            .ok_or(RegistryError::UnknownBlockType(block_type))?;

        let children = match &schema.default_children {
            Some(seeds) => Some(
                seeds
                    .iter()
                    .map(|seed| self.seed_component(seed, &schema.default_props, ids))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let block = Block {
            id: ids.new_id_for("block"),
            block_type,
            props: schema.default_props.clone(),
            children,
        };
        debug!(block_id = %block.id, block_type = %block_type, "Materialized block");
        Ok(block)
    }

    /// Materialize a new component with default props and style
    pub fn create_component(
        &self,
        component_type: ComponentType,
        ids: &mut IdGenerator,
    ) -> Result<Component, RegistryError> {
        let schema = self
            .get_component_schema(component_type)
            .ok_or(RegistryError::UnknownComponentType(component_type))?;

        Ok(Component::new(ids.new_id_for(component_type.as_str()), component_type)
            .with_props(schema.default_props.clone())
            .with_style(schema.default_style.clone()))
    }

    fn seed_component(
        &self,
        seed: &ChildSeed,
        block_props: &Props,
        ids: &mut IdGenerator,
    ) -> Result<Component, RegistryError> {
        let mut component = self.create_component(seed.component_type, ids)?;
        if let Some(value) = seed.content_from.as_deref().and_then(|key| block_props.get(key)) {
            component.props.insert("content".to_string(), value.clone());
        }
        Ok(component)
    }

    /// Render a block with its registered renderer, or the outline renderer
    pub fn render(&self, block: &Block, ctx: &RenderContext) -> String {
        self.renderers
            .get(&block.block_type)
            .unwrap_or(&self.fallback_renderer)
            .render_block(block, ctx)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("blocks", &self.blocks.len())
            .field("components", &self.components.len())
            .field("renderers", &self.renderers.len())
            .finish()
    }
}
