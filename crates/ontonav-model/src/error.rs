use thiserror::Error;

/// Errors raised when constructing model values from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("project id must not be empty")]
    EmptyProjectId,
    #[error("perspective id must not be empty")]
    EmptyPerspectiveId,
    #[error("entity IRI must not be empty")]
    EmptyEntityIri,
    #[error("unknown entity type tag: {0:?}")]
    UnknownEntityType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
