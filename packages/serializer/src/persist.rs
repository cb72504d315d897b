//! Durable storage of saved pages.
//!
//! The payload is rendered completely in memory and handed to the file
//! system in one atomic write, so a failed save leaves the previous copy
//! intact.

use crate::{deserialize, serialize, SerializeError, SerializeResult};
use pagecraft_common::{FileSystem, RealFileSystem};
use pagecraft_document::Document;
use std::path::Path;
use tracing::{info, instrument};

/// Save a document to `path` on the real file system
pub fn save(doc: &Document, path: impl AsRef<Path>) -> SerializeResult<()> {
    save_with(&RealFileSystem, doc, path.as_ref())
}

/// Load a document from `path` on the real file system
pub fn load(path: impl AsRef<Path>) -> SerializeResult<Document> {
    load_with(&RealFileSystem, path.as_ref())
}

#[instrument(skip(fs, doc, path), fields(path = %path.display()))]
pub fn save_with(fs: &dyn FileSystem, doc: &Document, path: &Path) -> SerializeResult<()> {
    let payload = serialize(doc)?;
    fs.write_atomic(path, payload.as_bytes())
        .map_err(|source| SerializeError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Saved {} nodes", doc.node_count());
    Ok(())
}

#[instrument(skip(fs, path), fields(path = %path.display()))]
pub fn load_with(fs: &dyn FileSystem, path: &Path) -> SerializeResult<Document> {
    let payload = fs
        .read_to_string(path)
        .map_err(|source| SerializeError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
    let doc = deserialize(&payload)?;

    info!("Loaded {} nodes", doc.node_count());
    Ok(doc)
}
