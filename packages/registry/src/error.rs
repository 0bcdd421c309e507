use shopfront_model::{BlockType, ComponentType};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("No schema registered for block type: {0}")]
    UnknownBlockType(BlockType),

    #[error("No schema registered for component type: {0}")]
    UnknownComponentType(ComponentType),
}
