//! # Pagecraft Editor
//!
//! Editing interface the page-builder UI calls into.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI: palette, tree view, attribute editor    │
//! └─────────────────────────────────────────────┘
//!                     ↓ Mutation
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - catalog + document + selection           │
//! │  - apply mutations with validation          │
//! │  - save/load, export for preview            │
//! └─────────────────────────────────────────────┘
//!          ↓                        ↓
//!     serializer              compiler-html
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditSession, EditorConfig};
//!
//! let mut session = EditSession::from_config(EditorConfig::load(".")?)?;
//!
//! let body = session.document().body().unwrap();
//! let p = session.insert_child(body, "p")?;
//! session.set_attribute(p, "class", "lead")?;
//! session.set_stylesheet(".lead { font-weight: bold; }")?;
//!
//! session.export()?;
//! session.save("work/page.json")?;
//! ```

mod config;
mod errors;
mod mutations;
mod session;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationResult};
pub use session::EditSession;

// Re-export common types for convenience
pub use pagecraft_document::{Catalog, Document, DocumentNode, NodeId, TagPrototype};
