use crate::EditorError;
use pagecraft_compiler_html::ExportTarget;
use pagecraft_common::{FileSystem, RealFileSystem};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Tag catalog definition file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Directory the page is exported to for preview
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Stylesheet directory, relative to the export directory
    #[serde(default = "default_css_dir")]
    pub css_dir: String,

    #[serde(default = "default_css_file")]
    pub css_file: String,

    /// `href` placed on the skeleton `<link>` of new documents
    #[serde(default = "default_stylesheet_href")]
    pub stylesheet_href: String,
}

fn default_catalog_path() -> String {
    "data/tags.json".to_string()
}

fn default_export_dir() -> String {
    "./temp/".to_string()
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_css_dir() -> String {
    "css".to_string()
}

fn default_css_file() -> String {
    "home.css".to_string()
}

fn default_stylesheet_href() -> String {
    pagecraft_document::DEFAULT_STYLESHEET_HREF.to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: impl AsRef<Path>) -> Result<Self, EditorError> {
        Self::load_with(&RealFileSystem, cwd.as_ref())
    }

    pub fn load_with(fs: &dyn FileSystem, cwd: &Path) -> Result<Self, EditorError> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        match fs.read_to_string(&config_path) {
            Ok(content) => Self::from_json(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EditorConfig::default()),
            Err(e) => Err(EditorError::Config(format!(
                "cannot read {}: {}",
                config_path.display(),
                e
            ))),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, EditorError> {
        serde_json::from_str(content).map_err(|e| EditorError::Config(e.to_string()))
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog_path)
    }

    pub fn export_target(&self) -> ExportTarget {
        ExportTarget {
            dir: PathBuf::from(&self.export_dir),
            index_file: self.index_file.clone(),
            css_dir: self.css_dir.clone(),
            css_file: self.css_file.clone(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            export_dir: default_export_dir(),
            index_file: default_index_file(),
            css_dir: default_css_dir(),
            css_file: default_css_file(),
            stylesheet_href: default_stylesheet_href(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::MockFileSystem;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "catalogPath": "assets/tags.json",
            "exportDir": "preview",
            "stylesheetHref": "./styles/site.css"
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.catalog_path, "assets/tags.json");
        assert_eq!(config.export_dir, "preview");
        assert_eq!(config.stylesheet_href, "./styles/site.css");
        assert_eq!(config.index_file, "index.html");
        assert_eq!(config.css_file, "home.css");
    }

    #[test]
    fn test_export_target() {
        let config = EditorConfig::default();
        let target = config.export_target();

        assert_eq!(target.index_path(), PathBuf::from("./temp/index.html"));
        assert_eq!(target.css_path(), PathBuf::from("./temp/css/home.css"));
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();

        assert!(matches!(
            EditorConfig::load(dir.path()),
            Err(EditorError::Config(_))
        ));
    }

    #[test]
    fn test_load_with_mock_file_system() {
        let mut fs = MockFileSystem::new();
        fs.add_file(
            PathBuf::from("site").join(DEFAULT_CONFIG_NAME),
            r#"{"exportDir": "out"}"#,
        );

        let config = EditorConfig::load_with(&fs, Path::new("site")).unwrap();
        assert_eq!(config.export_dir, "out");

        let config = EditorConfig::load_with(&fs, Path::new("elsewhere")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
