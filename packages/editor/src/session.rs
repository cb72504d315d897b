//! # Edit Session
//!
//! The narrow interface the UI layer drives.
//!
//! An [`EditSession`] owns the tag catalog, the page being edited, the
//! current selection and the editor configuration. It is the only mutator
//! of its document; every operation either completes or leaves the session
//! as it was.

use crate::{EditorConfig, EditorError, Mutation, MutationResult};
use pagecraft_common::{FileSystem, RealFileSystem};
use pagecraft_compiler_html::{export_css, export_site, CompileOptions, ExportedSite};
use pagecraft_document::{Catalog, Document, DocumentError, NodeId, TagPrototype};
use pagecraft_serializer as serializer;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub struct EditSession {
    catalog: Catalog,
    document: Document,
    config: EditorConfig,
    fs: Box<dyn FileSystem>,

    /// Node new tags are added under by `insert_at_selection`
    selection: Option<NodeId>,

    /// Current version number (increments on each applied mutation)
    version: u64,

    dirty: bool,

    compile_options: CompileOptions,
}

impl EditSession {
    /// Create a session with a fresh skeleton document
    pub fn new(catalog: Catalog, config: EditorConfig) -> Self {
        let document = Document::with_stylesheet_href(&catalog, &config.stylesheet_href);
        let selection = document.body();
        Self {
            catalog,
            document,
            config,
            fs: Box::new(RealFileSystem),
            selection,
            version: 0,
            dirty: false,
            compile_options: CompileOptions::default(),
        }
    }

    /// Create a session, loading the catalog named by the config
    pub fn from_config(config: EditorConfig) -> Result<Self, EditorError> {
        Self::from_config_with(config, Box::new(RealFileSystem))
    }

    /// Like [`EditSession::from_config`], reading the catalog through `fs`,
    /// which also serves the session's later saves, loads and exports
    pub fn from_config_with(
        config: EditorConfig,
        fs: Box<dyn FileSystem>,
    ) -> Result<Self, EditorError> {
        let catalog = Catalog::load_with(fs.as_ref(), &config.catalog_path())?;
        Ok(Self::new(catalog, config).with_file_system(fs))
    }

    /// Route saves, loads and exports through another file system
    pub fn with_file_system(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.compile_options = options;
        self
    }

    /// Discard the current page and start over from the skeleton
    pub fn new_document(&mut self) {
        self.document
            .reset(&self.catalog, &self.config.stylesheet_href);
        self.selection = self.document.body();
        self.version = 0;
        self.dirty = false;
        info!("Started new document");
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Catalog prototypes in palette order
    pub fn catalog(&self) -> impl Iterator<Item = &TagPrototype> {
        self.catalog.iter()
    }

    /// Names of the catalog tags that may be placed under `node`
    pub fn legal_tags_for(&self, node: NodeId) -> Result<Vec<&str>, EditorError> {
        let parent = self
            .document
            .node(node)
            .ok_or(DocumentError::NodeNotFound(node))?;

        Ok(self
            .catalog
            .iter()
            .filter(|tag| tag.is_legal_parent(parent.name()))
            .map(TagPrototype::name)
            .collect())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether there are edits since the last save, load or reset
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    pub fn select(&mut self, node: NodeId) -> Result<(), EditorError> {
        if !self.document.contains(node) {
            return Err(DocumentError::NodeNotFound(node).into());
        }
        self.selection = Some(node);
        Ok(())
    }

    /// Apply an edit command from the UI
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let removed_parent = match &mutation {
            Mutation::RemoveNode { node } => self.document.parent_of(*node).map(|p| p.id()),
            _ => None,
        };

        let inserted = mutation.apply(&mut self.document, &self.catalog)?;

        self.version += 1;
        self.dirty = true;

        if let Some(node) = inserted {
            self.selection = Some(node);
        } else if let Some(selected) = self.selection {
            if !self.document.contains(selected) {
                self.selection = removed_parent;
            }
        }

        debug!("Applied {:?} (version {})", mutation, self.version);
        Ok(MutationResult {
            version: self.version,
            inserted,
        })
    }

    /// Add `tag_name` under `parent`; the new node becomes the selection
    pub fn insert_child(&mut self, parent: NodeId, tag_name: &str) -> Result<NodeId, EditorError> {
        let result = self.apply(Mutation::InsertChild {
            parent,
            tag_name: tag_name.to_string(),
        })?;
        result
            .inserted
            .ok_or_else(|| DocumentError::NodeNotFound(parent).into())
    }

    /// Add `tag_name` under the current selection
    pub fn insert_at_selection(&mut self, tag_name: &str) -> Result<NodeId, EditorError> {
        let parent = self
            .selection
            .or_else(|| self.document.body())
            .unwrap_or_else(|| self.document.root().id());
        self.insert_child(parent, tag_name)
    }

    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        })?;
        Ok(())
    }

    pub fn set_stylesheet(&mut self, text: &str) -> Result<(), EditorError> {
        self.apply(Mutation::SetStylesheet {
            text: text.to_string(),
        })?;
        Ok(())
    }

    pub fn remove_node(&mut self, node: NodeId) -> Result<(), EditorError> {
        self.apply(Mutation::RemoveNode { node })?;
        Ok(())
    }

    /// Render the page as a saved-document payload
    pub fn serialize(&self) -> Result<String, EditorError> {
        Ok(serializer::serialize(&self.document)?)
    }

    /// Replace the page with a decoded payload.
    ///
    /// The current page is kept if the payload is rejected.
    pub fn deserialize(&mut self, payload: &str) -> Result<(), EditorError> {
        let document = serializer::deserialize(payload)?;
        self.replace_document(document);
        Ok(())
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        serializer::save_with(self.fs.as_ref(), &self.document, path.as_ref())?;
        self.dirty = false;
        Ok(())
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let document = serializer::load_with(self.fs.as_ref(), path.as_ref())?;
        self.replace_document(document);
        Ok(())
    }

    /// Write the page and its stylesheet to the configured export directory
    pub fn export(&self) -> Result<ExportedSite, EditorError> {
        let target = self.config.export_target();
        Ok(export_site(
            self.fs.as_ref(),
            &self.document,
            &target,
            &self.compile_options,
        )?)
    }

    /// Write only the stylesheet to the configured export directory
    pub fn export_stylesheet(&self) -> Result<PathBuf, EditorError> {
        let path = self.config.export_target().css_path();
        export_css(self.fs.as_ref(), self.document.stylesheet_text(), &path)?;
        Ok(path)
    }

    fn replace_document(&mut self, document: Document) {
        self.document.replace_with(document);
        self.selection = self.document.body();
        self.version = 0;
        self.dirty = false;
    }
}
