use thiserror::Error;
use super::classify::ClassifyError;
use crate::world::EntityCategory;

/// Why a node was left out of the world
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("node '{name}': non-finite {field}")]
    InvalidTransform { name: String, field: &'static str },
    #[error("node '{name}' classified as {category} but has the wrong node kind")]
    KindMismatch { name: String, category: EntityCategory },
}

impl ExportError {
    /// True for the malformed-name case
    pub fn is_malformed_name(&self) -> bool {
        matches!(self, ExportError::Classify(ClassifyError::MalformedNodeName { .. }))
    }
}
