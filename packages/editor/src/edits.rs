//! # Page Edits
//!
//! High-level operations a store owner performs on a landing page.
//!
//! ## Design Principles
//!
//! 1. **Pure**: an edit maps the current document to a new one and never
//!    touches the input
//! 2. **Validated**: out-of-range indices are rejected before anything is
//!    produced, so a failed edit commits nothing
//! 3. **Whole-value**: text and markup edits replace the field outright
//!
//! ## Edit Semantics
//!
//! ### Move
//! - Remove-then-insert into the shortened list (not a swap)
//! - Both indices must refer to existing positions
//!
//! ### Add
//! - Inserts at `index`, clamped to the end of the list; appends when absent
//!
//! ### SetHtml / RegenerateHtml
//! - `SetHtml` stores hand-written markup and makes it authoritative
//! - `RegenerateHtml` hands authority back to the component list

use pagecraft_model::{ComponentDescriptor, ContentSource, Document, SectionDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::reorder::reorder;

/// Semantic edits on a page document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Insert a component at index (appends when no index is given)
    AddComponent {
        component: ComponentDescriptor,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Replace the component at index
    UpdateComponent {
        index: usize,
        component: ComponentDescriptor,
    },

    RemoveComponent {
        index: usize,
    },

    /// Move a component to a new position
    MoveComponent {
        from: usize,
        to: usize,
    },

    /// Insert a section at index (appends when no index is given)
    AddSection {
        section: SectionDescriptor,
        #[serde(default)]
        index: Option<usize>,
    },

    RemoveSection {
        index: usize,
    },

    /// Move a section to a new position
    MoveSection {
        from: usize,
        to: usize,
    },

    /// Append a feature item to a section's `items`
    AddFeatureItem {
        section: usize,
        item: Value,
    },

    /// Remove a feature item from a section's `items`
    RemoveFeatureItem {
        section: usize,
        item: usize,
    },

    /// Replace the markup with hand-written html
    SetHtml {
        html: String,
    },

    SetCss {
        css: String,
    },

    /// Make the component list authoritative again
    RegenerateHtml,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Component index {index} out of range (len {len})")]
    ComponentOutOfRange { index: usize, len: usize },

    #[error("Section index {index} out of range (len {len})")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Feature item {item} out of range in section {section} (len {len})")]
    FeatureItemOutOfRange { section: usize, item: usize, len: usize },
}

impl Edit {
    /// Apply the edit to a copy of the document
    pub fn apply(&self, doc: &Document) -> Result<Document, EditError> {
        // Validate first
        self.validate(doc)?;

        let mut next = doc.clone();

        match self {
            Edit::AddComponent { component, index } => {
                let at = index.unwrap_or(next.components.len()).min(next.components.len());
                next.components.insert(at, component.clone());
            }

            Edit::UpdateComponent { index, component } => {
                next.components[*index] = component.clone();
            }

            Edit::RemoveComponent { index } => {
                next.components.remove(*index);
            }

            Edit::MoveComponent { from, to } => {
                next.components = reorder(&next.components, *from, *to);
            }

            Edit::AddSection { section, index } => {
                let at = index.unwrap_or(next.sections.len()).min(next.sections.len());
                next.sections.insert(at, section.clone());
            }

            Edit::RemoveSection { index } => {
                next.sections.remove(*index);
            }

            Edit::MoveSection { from, to } => {
                next.sections = reorder(&next.sections, *from, *to);
            }

            Edit::AddFeatureItem { section, item } => {
                next.sections[*section].items.push(item.clone());
            }

            Edit::RemoveFeatureItem { section, item } => {
                next.sections[*section].items.remove(*item);
            }

            Edit::SetHtml { html } => {
                next.html = html.clone();
                next.source = ContentSource::Markup;
            }

            Edit::SetCss { css } => {
                next.css = css.clone();
            }

            Edit::RegenerateHtml => {
                next.source = ContentSource::Components;
            }
        }

        Ok(next)
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), EditError> {
        let components = doc.components.len();
        let sections = doc.sections.len();

        match self {
            Edit::UpdateComponent { index, .. } | Edit::RemoveComponent { index } => {
                check_component(*index, components)
            }

            Edit::MoveComponent { from, to } => {
                check_component(*from, components)?;
                check_component(*to, components)
            }

            Edit::RemoveSection { index } => check_section(*index, sections),

            Edit::MoveSection { from, to } => {
                check_section(*from, sections)?;
                check_section(*to, sections)
            }

            Edit::AddFeatureItem { section, .. } => check_section(*section, sections),

            Edit::RemoveFeatureItem { section, item } => {
                check_section(*section, sections)?;
                let len = doc.sections[*section].items.len();
                if *item < len {
                    Ok(())
                } else {
                    Err(EditError::FeatureItemOutOfRange {
                        section: *section,
                        item: *item,
                        len,
                    })
                }
            }

            Edit::AddComponent { .. }
            | Edit::AddSection { .. }
            | Edit::SetHtml { .. }
            | Edit::SetCss { .. }
            | Edit::RegenerateHtml => Ok(()),
        }
    }

    /// Short human-readable description, used as the history label
    pub fn describe(&self) -> String {
        match self {
            Edit::AddComponent { component, .. } => format!("Add {}", component.type_name()),
            Edit::UpdateComponent { component, .. } => format!("Edit {}", component.type_name()),
            Edit::RemoveComponent { .. } => "Remove component".to_string(),
            Edit::MoveComponent { .. } => "Move component".to_string(),
            Edit::AddSection { .. } => "Add section".to_string(),
            Edit::RemoveSection { .. } => "Remove section".to_string(),
            Edit::MoveSection { .. } => "Move section".to_string(),
            Edit::AddFeatureItem { .. } => "Add feature item".to_string(),
            Edit::RemoveFeatureItem { .. } => "Remove feature item".to_string(),
            Edit::SetHtml { .. } => "Edit HTML".to_string(),
            Edit::SetCss { .. } => "Edit CSS".to_string(),
            Edit::RegenerateHtml => "Regenerate HTML".to_string(),
        }
    }
}

fn check_component(index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::ComponentOutOfRange { index, len })
    }
}

fn check_section(index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::SectionOutOfRange { index, len })
    }
}
