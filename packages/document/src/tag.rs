//! # Tag Prototypes
//!
//! A [`TagPrototype`] describes one HTML element type: its name, whether it
//! needs an end tag, the attributes a user may edit and the tags it may be
//! nested under.
//!
//! Catalog entries are never placed into a document. New nodes are produced
//! with [`TagPrototype::instantiate`], which copies the attribute key set with
//! blank values, so edits to a placed node never reach the catalog or any
//! sibling instance.

use crate::{DocumentError, DocumentResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const TAG_HTML: &str = "html";
pub const TAG_HEAD: &str = "head";
pub const TAG_TITLE: &str = "title";
pub const TAG_LINK: &str = "link";
pub const TAG_BODY: &str = "body";

/// Pseudo-tag carrying character data in its `text` attribute
pub const TAG_TEXT: &str = "Text";

pub(crate) const ATT_REL: &str = "rel";
pub(crate) const REL_STYLESHEET: &str = "stylesheet";
pub(crate) const ATT_TYPE: &str = "type";
pub(crate) const TYPE_TEXT_CSS: &str = "text/css";
pub(crate) const ATT_HREF: &str = "href";

/// One HTML element type, or a placed instance of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPrototype {
    name: String,
    has_closing_tag: bool,
    attributes: BTreeMap<String, String>,
    legal_parents: Arc<[String]>,
}

impl TagPrototype {
    /// Create a prototype with no attributes and no legal parents
    pub fn new(name: impl Into<String>, has_closing_tag: bool) -> Self {
        Self {
            name: name.into(),
            has_closing_tag,
            attributes: BTreeMap::new(),
            legal_parents: Arc::from(Vec::new()),
        }
    }

    /// Add an attribute key with an initial value
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Replace the legal parent list
    pub fn with_legal_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parents: Vec<String> = parents.into_iter().map(Into::into).collect();
        self.legal_parents = Arc::from(parents);
        self
    }

    /// Spawn a new instance for placement in a document.
    ///
    /// The instance keeps the name, closing flag and attribute keys, with
    /// every value blanked. Legal parents are shared with the source since
    /// prototypes expose no way to mutate them.
    pub fn instantiate(&self) -> TagPrototype {
        TagPrototype {
            name: self.name.clone(),
            has_closing_tag: self.has_closing_tag,
            attributes: self
                .attributes
                .keys()
                .map(|key| (key.clone(), String::new()))
                .collect(),
            legal_parents: Arc::clone(&self.legal_parents),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_closing_tag(&self) -> bool {
        self.has_closing_tag
    }

    pub fn legal_parents(&self) -> &[String] {
        &self.legal_parents
    }

    /// Whether an instance of this tag may be nested under `parent`
    pub fn is_legal_parent(&self, parent: &str) -> bool {
        self.legal_parents.iter().any(|p| p == parent)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute name/value pairs, sorted by name
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Overwrite the value of an existing attribute.
    ///
    /// The key set is fixed once the tag exists; unknown names are rejected.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> DocumentResult<()> {
        match self.attributes.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DocumentError::UnknownAttribute {
                tag: self.name.clone(),
                attribute: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for TagPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }
}
