//! # Save Reconciler
//!
//! Merges the current document with the values of the edit still open in the
//! visual editor and produces the single payload sent to the content service.
//!
//! ## Merge rules
//!
//! - Field by field, a value supplied by the active edit overrides the
//!   current document; absent fields keep the document's value
//! - Supplied `components` make the component list authoritative
//! - Supplied `html` without `components` makes the markup authoritative and
//!   is stored verbatim; `components` is kept unchanged
//! - Whenever the component list is authoritative the payload's `html` is
//!   regenerated from it, so the two never drift apart

use pagecraft_compiler_html::{compile_components, CompileOptions};
use pagecraft_model::{ComponentDescriptor, ContentSource, Document, SectionDescriptor};
use tracing::debug;

/// Uncommitted values held by the active visual edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEdit {
    pub components: Option<Vec<ComponentDescriptor>>,
    pub sections: Option<Vec<SectionDescriptor>>,
    pub html: Option<String>,
    pub css: Option<String>,
}

impl ActiveEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(mut self, components: Vec<ComponentDescriptor>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn sections(mut self, sections: Vec<SectionDescriptor>) -> Self {
        self.sections = Some(sections);
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_none() && self.sections.is_none() && self.html.is_none() && self.css.is_none()
    }
}

/// Build the save payload from the current document and the active edit
pub fn reconcile(current: &Document, active: Option<&ActiveEdit>, options: &CompileOptions) -> Document {
    let mut merged = current.clone();

    if let Some(active) = active {
        if let Some(sections) = &active.sections {
            merged.sections = sections.clone();
        }

        if let Some(css) = &active.css {
            merged.css = css.clone();
        }

        match (&active.components, &active.html) {
            (Some(components), html) => {
                if html.is_some() {
                    debug!("Active edit supplied both components and html; regenerating html");
                }
                merged.components = components.clone();
                merged.source = ContentSource::Components;
            }
            (None, Some(html)) => {
                merged.html = html.clone();
                merged.source = ContentSource::Markup;
            }
            (None, None) => {}
        }
    }

    if merged.renders_components() {
        merged.html = compile_components(&merged.components, options);
    }

    merged
}
