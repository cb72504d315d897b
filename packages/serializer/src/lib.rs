//! # Pagecraft Serializer
//!
//! Flattens a [`Document`] into an index-addressed record list and rebuilds
//! it again.
//!
//! ## Encoding
//!
//! Nodes are visited in pre-order. Each visit takes the next index from a
//! counter starting at 0 and records the index its parent received, with the
//! root holding `-1`:
//!
//! ```text
//! html  (0, -1)
//! ├── head  (1, 0)
//! │   ├── title (2, 1)
//! │   └── link  (3, 1)
//! └── body  (4, 0)
//! ```
//!
//! Parents are always numbered before their children, so a decoder can
//! rebuild the tree in a single forward pass over the records.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_serializer::{save, load};
//!
//! save(&doc, "work/page.json")?;
//! let restored = load("work/page.json")?;
//! ```

mod decode;
mod encode;
mod errors;
mod persist;
mod records;

pub use decode::{deserialize, from_records};
pub use encode::{serialize, to_records};
pub use errors::{SerializeError, SerializeResult};
pub use persist::{load, load_with, save, save_with};
pub use records::{AttributeRecord, SavedDocument, TagRecord, NO_PARENT};

// Re-export for convenience
pub use pagecraft_document::Document;
