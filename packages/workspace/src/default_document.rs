use shopfront_model::{BlockType, Document, IdGenerator};
use shopfront_registry::TypeRegistry;
use tracing::warn;

/// Sections of the page shown when no layout can be loaded
pub const DEFAULT_SECTIONS: [BlockType; 5] = [
    BlockType::Navigation,
    BlockType::Hero,
    BlockType::ProductList,
    BlockType::Testimonials,
    BlockType::Footer,
];

/// Starter page built from registry defaults.
///
/// Block types the registry does not know are skipped.
pub fn default_document(registry: &TypeRegistry, ids: &mut IdGenerator) -> Document {
    DEFAULT_SECTIONS
        .into_iter()
        .filter_map(|block_type| match registry.create_block(block_type, ids) {
            Ok(block) => Some(block),
            Err(error) => {
                warn!(%error, "Skipping default section");
                None
            }
        })
        .collect()
}
