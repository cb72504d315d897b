//! # Document Tree
//!
//! A [`Document`] is the page being edited: one tree of placed tags rooted at
//! `<html>`, plus the raw text of the page's stylesheet.
//!
//! ## Ownership
//!
//! Every [`DocumentNode`] owns its children outright. There are no parent
//! pointers; upward lookups ([`Document::parent_of`]) search from the root.
//! Callers hold [`NodeId`] handles rather than references, so a handle to a
//! removed node simply stops resolving.
//!
//! ## Skeleton
//!
//! ```text
//! html
//! ├── head
//! │   ├── title
//! │   └── link rel="stylesheet" type="text/css" href="./css/home.css"
//! └── body
//! ```

use crate::tag::{ATT_HREF, ATT_REL, ATT_TYPE, REL_STYLESHEET, TYPE_TEXT_CSS};
use crate::{
    Catalog, DocumentError, DocumentResult, TagPrototype, TAG_BODY, TAG_HEAD, TAG_HTML, TAG_LINK,
    TAG_TITLE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Stylesheet reference placed on the skeleton `<link>`
pub const DEFAULT_STYLESHEET_HREF: &str = "./css/home.css";

/// Editing handle for a placed node.
///
/// Handles are unique within one document for its whole lifetime (including
/// resets) and are never part of a saved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed tag and its children
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    id: NodeId,
    tag: TagPrototype,
    children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a detached node.
    ///
    /// Its id is a placeholder until the tree is adopted by
    /// [`Document::from_tree`].
    pub fn new(tag: TagPrototype) -> Self {
        Self {
            id: NodeId(0),
            tag,
            children: Vec::new(),
        }
    }

    pub fn push_child(&mut self, child: DocumentNode) {
        self.children.push(child);
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &TagPrototype {
        &self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }

    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    /// Pre-order traversal of this subtree, starting with `self`
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    fn find(&self, id: NodeId) -> Option<&DocumentNode> {
        self.walk().find(|node| node.id == id)
    }

    fn find_mut(&mut self, id: NodeId) -> Option<&mut DocumentNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn find_parent(&self, id: NodeId) -> Option<&DocumentNode> {
        self.walk()
            .find(|node| node.children.iter().any(|child| child.id == id))
    }

    fn remove_descendant(&mut self, id: NodeId) -> Option<DocumentNode> {
        if let Some(pos) = self.children.iter().position(|child| child.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    fn renumber(&mut self, next_id: &mut u64) {
        self.id = NodeId(*next_id);
        *next_id += 1;
        for child in &mut self.children {
            child.renumber(next_id);
        }
    }
}

/// Pre-order iterator over a subtree
pub struct Walk<'a> {
    stack: Vec<&'a DocumentNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DocumentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Editable page: tag tree plus stylesheet text
#[derive(Debug, Clone)]
pub struct Document {
    root: DocumentNode,
    css_text: String,
    next_id: u64,
}

impl Document {
    /// Create the minimal skeleton page with the default stylesheet link
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_stylesheet_href(catalog, DEFAULT_STYLESHEET_HREF)
    }

    /// Create the minimal skeleton page linking to `href`
    pub fn with_stylesheet_href(catalog: &Catalog, href: &str) -> Self {
        let mut next_id = 0;
        let root = skeleton(catalog, href, &mut next_id);
        Self {
            root,
            css_text: String::new(),
            next_id,
        }
    }

    /// Adopt a tree built elsewhere, assigning fresh handles in pre-order
    pub fn from_tree(mut root: DocumentNode, css_text: impl Into<String>) -> Self {
        let mut next_id = 0;
        root.renumber(&mut next_id);
        Self {
            root,
            css_text: css_text.into(),
            next_id,
        }
    }

    /// Discard the tree and stylesheet and rebuild the skeleton.
    ///
    /// Handles issued before the reset never resolve afterwards.
    pub fn reset(&mut self, catalog: &Catalog, href: &str) {
        self.root = skeleton(catalog, href, &mut self.next_id);
        self.css_text.clear();
        debug!("Document reset to skeleton");
    }

    /// Take over the tree and stylesheet of `other`.
    ///
    /// Handles continue from this document's counter, so handles issued
    /// before the swap never resolve afterwards.
    pub fn replace_with(&mut self, other: Document) {
        let Document {
            mut root, css_text, ..
        } = other;
        root.renumber(&mut self.next_id);
        self.root = root;
        self.css_text = css_text;
        debug!("Document replaced ({} nodes)", self.node_count());
    }

    pub fn root(&self) -> &DocumentNode {
        &self.root
    }

    /// The `<body>` directly under the root, if still present
    pub fn body(&self) -> Option<NodeId> {
        self.root_child(TAG_BODY)
    }

    /// The `<head>` directly under the root, if still present
    pub fn head(&self) -> Option<NodeId> {
        self.root_child(TAG_HEAD)
    }

    fn root_child(&self, name: &str) -> Option<NodeId> {
        self.root
            .children
            .iter()
            .find(|child| child.name() == name)
            .map(DocumentNode::id)
    }

    pub fn node(&self, id: NodeId) -> Option<&DocumentNode> {
        self.root.find(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Non-owning upward lookup; `None` for the root or an unknown handle
    pub fn parent_of(&self, id: NodeId) -> Option<&DocumentNode> {
        self.root.find_parent(id)
    }

    /// All nodes in pre-order
    pub fn nodes(&self) -> Walk<'_> {
        self.root.walk()
    }

    /// Number of nodes in the tree, root included
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Place a fresh instance of `tag_name` as the last child of `parent`.
    ///
    /// Fails without touching the tree if the tag is unknown, the parent is
    /// gone, or the tag may not be nested under the parent.
    pub fn insert_child(
        &mut self,
        catalog: &Catalog,
        parent: NodeId,
        tag_name: &str,
    ) -> DocumentResult<NodeId> {
        let prototype = catalog
            .get(tag_name)
            .ok_or_else(|| DocumentError::UnknownTag(tag_name.to_string()))?;

        let id = NodeId(self.next_id);
        let parent_node = self
            .root
            .find_mut(parent)
            .ok_or(DocumentError::NodeNotFound(parent))?;

        if !prototype.is_legal_parent(parent_node.name()) {
            return Err(DocumentError::IllegalPlacement {
                tag: tag_name.to_string(),
                parent: parent_node.name().to_string(),
            });
        }

        parent_node.children.push(DocumentNode {
            id,
            tag: prototype.instantiate(),
            children: Vec::new(),
        });
        self.next_id += 1;

        debug!("Inserted <{}> {} under {}", tag_name, id, parent);
        Ok(id)
    }

    /// Detach a node and its whole subtree
    pub fn remove_node(&mut self, id: NodeId) -> DocumentResult<DocumentNode> {
        if id == self.root.id {
            return Err(DocumentError::CannotRemoveRoot);
        }
        let removed = self
            .root
            .remove_descendant(id)
            .ok_or(DocumentError::NodeNotFound(id))?;

        debug!("Removed <{}> {}", removed.name(), id);
        Ok(removed)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> DocumentResult<&str> {
        let node = self.node(id).ok_or(DocumentError::NodeNotFound(id))?;
        node.tag
            .attribute(name)
            .ok_or_else(|| DocumentError::UnknownAttribute {
                tag: node.name().to_string(),
                attribute: name.to_string(),
            })
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DocumentResult<()> {
        let node = self
            .root
            .find_mut(id)
            .ok_or(DocumentError::NodeNotFound(id))?;
        node.tag.set_attribute(name, value)
    }

    pub fn stylesheet_text(&self) -> &str {
        &self.css_text
    }

    /// Replace the stylesheet text wholesale
    pub fn set_stylesheet_text(&mut self, text: impl Into<String>) {
        self.css_text = text.into();
    }
}

fn skeleton(catalog: &Catalog, href: &str, next_id: &mut u64) -> DocumentNode {
    let link = skeleton_tag(catalog, TAG_LINK, false)
        .with_attribute(ATT_REL, REL_STYLESHEET)
        .with_attribute(ATT_TYPE, TYPE_TEXT_CSS)
        .with_attribute(ATT_HREF, href);

    let mut head = DocumentNode::new(skeleton_tag(catalog, TAG_HEAD, true));
    head.push_child(DocumentNode::new(skeleton_tag(catalog, TAG_TITLE, true)));
    head.push_child(DocumentNode::new(link));

    let mut root = DocumentNode::new(TagPrototype::new(TAG_HTML, true));
    root.push_child(head);
    root.push_child(DocumentNode::new(skeleton_tag(catalog, TAG_BODY, true)));

    root.renumber(next_id);
    root
}

/// Catalog instance when the catalog defines the tag, bare tag otherwise
fn skeleton_tag(catalog: &Catalog, name: &str, has_closing_tag: bool) -> TagPrototype {
    catalog
        .get(name)
        .map(TagPrototype::instantiate)
        .unwrap_or_else(|| TagPrototype::new(name, has_closing_tag))
}
