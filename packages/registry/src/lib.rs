//! # Shopfront Registry
//!
//! Block and component palette: default props, default styles, editable
//! fields and display functions, keyed by type tag.

mod builtin;
mod error;
mod registry;
mod render;
mod schema;

pub use error::RegistryError;
pub use registry::TypeRegistry;
pub use render::{OutlineRenderer, RenderContext, Renderer};
pub use schema::{BlockSchema, ChildSeed, ComponentSchema, EditableField, FieldKind};
