//! # Document
//!
//! The canonical editable page. A page is described three ways at once:
//! the structured `components` list, the coarser `sections` list and the raw
//! `html` markup. [`ContentSource`] declares which of `components` and `html`
//! is authoritative, so the other can be derived instead of drifting.

use serde::{Deserialize, Serialize};

use crate::{ComponentDescriptor, ModelResult, SectionDescriptor};

/// Which representation of the page body is authoritative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// `components` is canonical; `html` is regenerated from it
    #[default]
    Components,

    /// `html` was written by hand and is stored as-is
    Markup,
}

/// Editable landing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDocument")]
pub struct Document {
    /// Render order equals list order
    pub components: Vec<ComponentDescriptor>,
    pub sections: Vec<SectionDescriptor>,
    /// Last generated or hand-edited markup
    pub html: String,
    pub css: String,
    pub source: ContentSource,
}

/// Wire shape: every field optional, `source` inferred when absent
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    components: Vec<ComponentDescriptor>,
    #[serde(default)]
    sections: Vec<SectionDescriptor>,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    css: Option<String>,
    #[serde(default)]
    source: Option<ContentSource>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let html = raw.html.unwrap_or_default();

        // Pages saved before components existed only carry markup
        let source = raw.source.unwrap_or(if raw.components.is_empty() && !html.is_empty() {
            ContentSource::Markup
        } else {
            ContentSource::Components
        });

        Self {
            components: raw.components,
            sections: raw.sections,
            html,
            css: raw.css.unwrap_or_default(),
            source,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(components: Vec<ComponentDescriptor>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    pub fn with_sections(sections: Vec<SectionDescriptor>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when `html` is derived from `components`
    pub fn renders_components(&self) -> bool {
        self.source == ContentSource::Components
    }
}
