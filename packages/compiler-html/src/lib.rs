//! # Pagecraft HTML Compiler
//!
//! Turns a page's component list into static markup, and wraps finished
//! markup into a standalone page for the "view page" export.

mod compiler;
mod export;

#[cfg(test)]
mod tests;

pub use compiler::{compile_components, compile_document, escape_css_url, escape_html, CompileOptions};
pub use export::{export_page, ExportedPage, EXPORT_MIME_TYPE};
