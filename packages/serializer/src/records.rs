//! On-disk shape of a saved page

use serde::{Deserialize, Serialize};

/// `parent_index` of the root record
pub const NO_PARENT: i64 = -1;

/// A whole saved page: flattened tag tree plus stylesheet text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDocument {
    pub tag_tree: Vec<TagRecord>,
    pub css_content: String,
}

/// One tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    pub has_closing_tag: bool,
    pub legal_parents: Vec<String>,
    pub attributes: Vec<AttributeRecord>,
    pub number_of_children: usize,
    pub node_index: i64,
    pub parent_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub attribute_name: String,
    pub attribute_value: String,
}
