//! Display functions keyed by block type.
//!
//! Visual rendering belongs to the host application; the registry only needs
//! *some* function from a node to its display. `OutlineRenderer` is the
//! built-in one: a plain-text outline used for previews, logs and tests.

use shopfront_model::{Block, Component, ComponentType, Language, PropValue, PropsExt};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext {
    pub language: Language,
}

impl RenderContext {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

pub trait Renderer: Send + Sync {
    fn render_block(&self, block: &Block, ctx: &RenderContext) -> String;
}

/// Indented text outline of a block and its components.
///
/// Missing or mistyped props render as empty strings or are omitted.
#[derive(Debug, Default)]
pub struct OutlineRenderer;

impl OutlineRenderer {
    fn render_component(&self, component: &Component, depth: usize, ctx: &RenderContext, out: &mut String) {
        let indent = "  ".repeat(depth);
        let text = |key: &str| {
            component
                .props
                .get_rich(key)
                .map(|c| c.resolve(ctx.language, ""))
                .unwrap_or_default()
        };

        let _ = match component.component_type {
            ComponentType::Text => writeln!(out, "{}text {}: {:?}", indent, component.id, text("content")),
            ComponentType::Button => {
                let href = component
                    .props
                    .get_rich("content")
                    .and_then(|c| c.href().map(str::to_string))
                    .unwrap_or_default();
                writeln!(out, "{}button {}: {:?} -> {}", indent, component.id, text("content"), href)
            }
            ComponentType::Image => writeln!(
                out,
                "{}image {}: {}",
                indent,
                component.id,
                component.props.get_str("src").unwrap_or_default()
            ),
            ComponentType::Row => writeln!(out, "{}row {}", indent, component.id),
        };

        for child in component.children() {
            self.render_component(child, depth + 1, ctx, out);
        }
    }
}

impl Renderer for OutlineRenderer {
    fn render_block(&self, block: &Block, ctx: &RenderContext) -> String {
        let mut out = format!("[{} {}]\n", block.block_type, block.id);

        if block.is_legacy() {
            for (key, value) in &block.props {
                let shown = match value {
                    PropValue::Text(_) | PropValue::Rich(_) => value
                        .as_rich()
                        .map(|c| format!("{:?}", c.resolve(ctx.language, "")))
                        .unwrap_or_default(),
                    PropValue::Bool(b) => b.to_string(),
                    PropValue::Number(n) => n.to_string(),
                    PropValue::List(items) => format!("[{} items]", items.len()),
                    PropValue::Map(_) | PropValue::Null => continue,
                };
                let _ = writeln!(out, "  {}: {}", key, shown);
            }
        }

        for component in block.children() {
            self.render_component(component, 1, ctx, &mut out);
        }
        out
    }
}
