//! Error types for the document model

use crate::NodeId;
use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Malformed tag catalog: {0}")]
    CatalogFormat(String),

    #[error("Tag <{0}> is defined more than once in the catalog")]
    DuplicateTag(String),

    #[error("Tag <{0}> is not in the catalog")]
    UnknownTag(String),

    #[error("<{tag}> cannot be placed inside <{parent}>")]
    IllegalPlacement { tag: String, parent: String },

    #[error("<{tag}> has no attribute '{attribute}'")]
    UnknownAttribute { tag: String, attribute: String },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("The document root cannot be removed")]
    CannotRemoveRoot,
}
