//! # Pagecraft HTML Compiler
//!
//! Renders a [`Document`](pagecraft_document::Document) into the files of a
//! static site: an HTML page mirroring the tag tree and the raw stylesheet.

mod compiler;
mod export;


pub use compiler::{compile_css, compile_to_html, CompileOptions};
pub use export::{export_css, export_site, CompileError, ExportTarget, ExportedSite};
