//! # Pagecraft Document
//!
//! In-memory model of a page under construction.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: tags.json → TagPrototype palette   │
//! └─────────────────────────────────────────────┘
//!                     ↓ instantiate
//! ┌─────────────────────────────────────────────┐
//! │ document: html tree + stylesheet text       │
//! │  - skeleton (html/head/title/link/body)     │
//! │  - insert with legal-parent checks          │
//! │  - attribute edits on fixed key sets        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//!        serializer / compiler-html crates
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_document::{Catalog, Document};
//!
//! let catalog = Catalog::builtin()?;
//! let mut doc = Document::new(&catalog);
//!
//! let body = doc.body().unwrap();
//! let p = doc.insert_child(&catalog, body, "p")?;
//! doc.set_attribute(p, "class", "lead")?;
//! ```

mod catalog;
mod document;
mod errors;
mod tag;

pub use catalog::{Catalog, BUILTIN_TAGS};
pub use document::{Document, DocumentNode, NodeId, Walk, DEFAULT_STYLESHEET_HREF};
pub use errors::{DocumentError, DocumentResult};
pub use tag::{TagPrototype, TAG_BODY, TAG_HEAD, TAG_HTML, TAG_LINK, TAG_TEXT, TAG_TITLE};
