//! # Page Mutations
//!
//! Edit commands sent by the UI layer.
//!
//! ## Mutation Semantics
//!
//! ### InsertChild
//! - Appends a fresh catalog instance as the parent's last child
//! - Fails if the tag is unknown or may not nest under the parent
//!
//! ### SetAttribute
//! - Atomic replacement of one attribute value
//! - Only keys the tag was created with can be written
//!
//! ### SetStylesheet
//! - Replaces the whole stylesheet text
//!
//! ### RemoveNode
//! - Removes node and all descendants
//! - The root cannot be removed
//!
//! A failed mutation leaves the document exactly as it was.

use pagecraft_document::{Catalog, Document, DocumentError, NodeId};
use serde::{Deserialize, Serialize};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Add a new tag under a parent
    InsertChild { parent: NodeId, tag_name: String },

    /// Set an attribute value
    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },

    /// Replace the stylesheet text
    SetStylesheet { text: String },

    /// Remove a node from the tree
    RemoveNode { node: NodeId },
}

impl Mutation {
    /// Apply the mutation, returning the inserted node for `InsertChild`
    pub fn apply(
        &self,
        doc: &mut Document,
        catalog: &Catalog,
    ) -> Result<Option<NodeId>, DocumentError> {
        match self {
            Mutation::InsertChild { parent, tag_name } => {
                doc.insert_child(catalog, *parent, tag_name).map(Some)
            }

            Mutation::SetAttribute { node, name, value } => {
                doc.set_attribute(*node, name, value.as_str())?;
                Ok(None)
            }

            Mutation::SetStylesheet { text } => {
                doc.set_stylesheet_text(text.as_str());
                Ok(None)
            }

            Mutation::RemoveNode { node } => {
                doc.remove_node(*node)?;
                Ok(None)
            }
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Node created by an `InsertChild`
    pub inserted: Option<NodeId>,
}
