//! # Tag Catalog
//!
//! Loads the palette of tag prototypes from a JSON definition file:
//!
//! ```json
//! {
//!   "tags": [
//!     {
//!       "tag": "p",
//!       "has_closing_tag": "true",
//!       "attributes": ["class", "id"],
//!       "legal_parents": ["body", "div"]
//!     }
//!   ]
//! }
//! ```
//!
//! Each listed attribute becomes a key with an empty default value. The
//! closing-tag flag is written as a `"true"`/`"false"` token; plain JSON
//! booleans are accepted too.

use crate::{DocumentError, DocumentResult, TagPrototype};
use pagecraft_common::{FileSystem, RealFileSystem};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Default catalog shipped with the crate
pub const BUILTIN_TAGS: &str = include_str!("../data/tags.json");

#[derive(Debug, Deserialize)]
struct CatalogSource {
    tags: Vec<TagSource>,
}

#[derive(Debug, Deserialize)]
struct TagSource {
    tag: String,
    has_closing_tag: ClosingFlag,
    attributes: Vec<String>,
    legal_parents: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClosingFlag {
    Bool(bool),
    Token(String),
}

impl ClosingFlag {
    fn resolve(&self, tag: &str) -> DocumentResult<bool> {
        match self {
            ClosingFlag::Bool(flag) => Ok(*flag),
            ClosingFlag::Token(token) => match token.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(DocumentError::CatalogFormat(format!(
                    "tag <{}>: has_closing_tag must be \"true\" or \"false\", got {:?}",
                    tag, other
                ))),
            },
        }
    }
}

/// Ordered, name-indexed set of tag prototypes
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    prototypes: Vec<TagPrototype>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from JSON source text
    #[instrument(skip(source), fields(bytes = source.len()))]
    pub fn from_json(source: &str) -> DocumentResult<Self> {
        let parsed: CatalogSource = serde_json::from_str(source)
            .map_err(|e| DocumentError::CatalogFormat(e.to_string()))?;

        let mut catalog = Catalog::default();
        for entry in parsed.tags {
            let has_closing_tag = entry.has_closing_tag.resolve(&entry.tag)?;
            let prototype = entry
                .attributes
                .into_iter()
                .fold(TagPrototype::new(entry.tag, has_closing_tag), |proto, attribute| {
                    proto.with_attribute(attribute, "")
                })
                .with_legal_parents(entry.legal_parents);
            catalog.add(prototype)?;
        }

        debug!("Loaded {} tag prototypes", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog file from disk
    pub fn load(path: impl AsRef<Path>) -> DocumentResult<Self> {
        Self::load_with(&RealFileSystem, path.as_ref())
    }

    pub fn load_with(fs: &dyn FileSystem, path: &Path) -> DocumentResult<Self> {
        let source = fs.read_to_string(path).map_err(|e| {
            DocumentError::CatalogFormat(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }

    /// The catalog bundled with this crate
    pub fn builtin() -> DocumentResult<Self> {
        Self::from_json(BUILTIN_TAGS)
    }

    /// Register a prototype; names must be unique
    pub fn add(&mut self, prototype: TagPrototype) -> DocumentResult<()> {
        if self.by_name.contains_key(prototype.name()) {
            return Err(DocumentError::DuplicateTag(prototype.name().to_string()));
        }
        self.by_name
            .insert(prototype.name().to_string(), self.prototypes.len());
        self.prototypes.push(prototype);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TagPrototype> {
        self.by_name.get(name).map(|&index| &self.prototypes[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Prototypes in the order they were defined
    pub fn iter(&self) -> std::slice::Iter<'_, TagPrototype> {
        self.prototypes.iter()
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Spawn a fresh instance of the named prototype
    pub fn instantiate(&self, name: &str) -> DocumentResult<TagPrototype> {
        self.get(name)
            .map(TagPrototype::instantiate)
            .ok_or_else(|| DocumentError::UnknownTag(name.to_string()))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TagPrototype;
    type IntoIter = std::slice::Iter<'a, TagPrototype>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::MockFileSystem;
    use std::path::PathBuf;

    const SOURCE: &str = r#"{
        "tags": [
            {"tag": "p", "has_closing_tag": "true", "attributes": ["class", "id"], "legal_parents": ["body", "div"]},
            {"tag": "br", "has_closing_tag": "false", "attributes": [], "legal_parents": ["p"]},
            {"tag": "div", "has_closing_tag": true, "attributes": ["class"], "legal_parents": ["body", "div"]}
        ]
    }"#;

    #[test]
    fn test_load_preserves_order() {
        let catalog = Catalog::from_json(SOURCE).unwrap();
        let names: Vec<&str> = catalog.iter().map(TagPrototype::name).collect();
        assert_eq!(names, vec!["p", "br", "div"]);
    }

    #[test]
    fn test_load_fields() {
        let catalog = Catalog::from_json(SOURCE).unwrap();

        let p = catalog.get("p").unwrap();
        assert!(p.has_closing_tag());
        assert_eq!(p.attribute("class"), Some(""));
        assert_eq!(p.attribute("id"), Some(""));
        assert!(p.is_legal_parent("div"));

        let br = catalog.get("br").unwrap();
        assert!(!br.has_closing_tag());
        assert_eq!(br.attributes().count(), 0);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let source = r#"{"tags": [
            {"tag": "p", "has_closing_tag": "true", "attributes": [], "legal_parents": []},
            {"tag": "p", "has_closing_tag": "false", "attributes": [], "legal_parents": []}
        ]}"#;

        assert_eq!(
            Catalog::from_json(source).unwrap_err(),
            DocumentError::DuplicateTag("p".to_string())
        );
    }

    #[test]
    fn test_rejects_non_boolean_flag() {
        let source = r#"{"tags": [
            {"tag": "p", "has_closing_tag": "yes", "attributes": [], "legal_parents": []}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(source),
            Err(DocumentError::CatalogFormat(_))
        ));

        let source = r#"{"tags": [
            {"tag": "p", "has_closing_tag": 1, "attributes": [], "legal_parents": []}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(source),
            Err(DocumentError::CatalogFormat(_))
        ));
    }

    #[test]
    fn test_rejects_missing_field() {
        let source = r#"{"tags": [{"tag": "p", "has_closing_tag": "true", "attributes": []}]}"#;
        assert!(matches!(
            Catalog::from_json(source),
            Err(DocumentError::CatalogFormat(_))
        ));
    }

    #[test]
    fn test_instantiate_unknown_tag() {
        let catalog = Catalog::from_json(SOURCE).unwrap();
        assert_eq!(
            catalog.instantiate("marquee").unwrap_err(),
            DocumentError::UnknownTag("marquee".to_string())
        );
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.contains("p"));
        assert!(catalog.contains("Text"));
        assert!(!catalog.get("br").unwrap().has_closing_tag());
    }

    #[test]
    fn test_load_with_mock_file_system() {
        let mut fs = MockFileSystem::new();
        fs.add_file(PathBuf::from("tags.json"), SOURCE);

        let catalog = Catalog::load_with(&fs, Path::new("tags.json")).unwrap();
        assert_eq!(catalog.len(), 3);

        assert!(matches!(
            Catalog::load_with(&fs, Path::new("missing.json")),
            Err(DocumentError::CatalogFormat(_))
        ));
    }
}
