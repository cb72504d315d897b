//! Writing compiled pages to a site directory

use crate::{compile_css, compile_to_html, CompileOptions};
use pagecraft_common::FileSystem;
use pagecraft_document::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

/// Errors that can occur while exporting a page
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where an exported page and its stylesheet land
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    pub dir: PathBuf,
    pub index_file: String,
    pub css_dir: String,
    pub css_file: String,
}

impl ExportTarget {
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index_file)
    }

    pub fn css_path(&self) -> PathBuf {
        self.dir.join(&self.css_dir).join(&self.css_file)
    }
}

impl Default for ExportTarget {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./temp/"),
            index_file: "index.html".to_string(),
            css_dir: "css".to_string(),
            css_file: "home.css".to_string(),
        }
    }
}

/// Paths written by [`export_site`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedSite {
    pub html_path: PathBuf,
    pub css_path: PathBuf,
}

/// Write the HTML page and its stylesheet under the target directory
#[instrument(skip(fs, document, options), fields(dir = %target.dir.display()))]
pub fn export_site(
    fs: &dyn FileSystem,
    document: &Document,
    target: &ExportTarget,
    options: &CompileOptions,
) -> Result<ExportedSite, CompileError> {
    let css_path = target.css_path();
    if let Some(css_dir) = css_path.parent() {
        fs.create_dir_all(css_dir).map_err(|source| CompileError::Io {
            path: css_dir.to_path_buf(),
            source,
        })?;
    }

    let html_path = target.index_path();
    write(fs, &html_path, &compile_to_html(document, options))?;
    export_css(fs, &compile_css(document), &css_path)?;

    info!("Exported page to {}", html_path.display());
    Ok(ExportedSite {
        html_path,
        css_path,
    })
}

/// Write only the stylesheet, for live CSS edits
pub fn export_css(fs: &dyn FileSystem, css: &str, path: &Path) -> Result<(), CompileError> {
    write(fs, path, css)
}

fn write(fs: &dyn FileSystem, path: &Path, contents: &str) -> Result<(), CompileError> {
    fs.write_atomic(path, contents.as_bytes())
        .map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })
}
