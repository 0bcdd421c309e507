//! # Shopfront Model
//!
//! Data shapes for pages assembled in the Shopfront builder. Pure data: no
//! editing behavior lives here.
//!
//! ```text
//! Document = [Block]
//! Block     { id, type, props, children? }
//! Component { id, type, props, style, children? }
//! ```
//!
//! The serialized form is the persisted layout format and must stay stable.

mod document;
mod error;
mod id_generator;
mod language;
mod node;
mod props;
mod rich;

pub use document::Document;
pub use error::ModelError;
pub use id_generator::IdGenerator;
pub use language::Language;
pub use node::{Block, BlockType, Component, ComponentType};
pub use props::{PropValue, Props, PropsExt};
pub use rich::{LocalizedText, RichContent, StyleMap};
