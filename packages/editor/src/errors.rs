//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Document error: {0}")]
    Document(#[from] pagecraft_document::DocumentError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] pagecraft_serializer::SerializeError),

    #[error("Export error: {0}")]
    Export(#[from] pagecraft_compiler_html::CompileError),

    #[error("Config error: {0}")]
    Config(String),
}
