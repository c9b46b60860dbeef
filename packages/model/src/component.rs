use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One visual building block of a landing page.
///
/// Known component types deserialize into [`Component`]; keys a known type
/// does not define land in its `extra` map. Any other `type` (including
/// records written by a newer dashboard) is kept verbatim as
/// [`ComponentDescriptor::Unrecognized`]. Either way the record survives a
/// load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentDescriptor {
    Known(Component),
    Unrecognized(Map<String, Value>),
}

/// Component types the generator knows how to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    /// Full-bleed banner with a single call to action
    #[serde(rename_all = "camelCase")]
    HeroHeader {
        #[serde(default)]
        headline: String,
        #[serde(default)]
        subheadline: String,
        #[serde(default)]
        cta_text: String,
        #[serde(default = "default_cta_url")]
        cta_url: String,
        #[serde(default)]
        background_image: String,
        /// Keys this editor does not interpret, kept for the round trip
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// Paragraph of body copy
    Text {
        #[serde(default)]
        content: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// Heading whose copy is filled in by the storefront
    DynamicText {
        #[serde(default)]
        content: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    /// Link styled as a button
    Button {
        #[serde(default)]
        url: String,
        #[serde(default)]
        text: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },

    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        alt: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

fn default_cta_url() -> String {
    "#".to_string()
}

impl ComponentDescriptor {
    pub fn hero_header(
        headline: impl Into<String>,
        subheadline: impl Into<String>,
        cta_text: impl Into<String>,
        background_image: impl Into<String>,
    ) -> Self {
        Self::Known(Component::HeroHeader {
            headline: headline.into(),
            subheadline: subheadline.into(),
            cta_text: cta_text.into(),
            cta_url: default_cta_url(),
            background_image: background_image.into(),
            extra: Map::new(),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Known(Component::Text {
            content: content.into(),
            extra: Map::new(),
        })
    }

    pub fn dynamic_text(content: impl Into<String>) -> Self {
        Self::Known(Component::DynamicText {
            content: content.into(),
            extra: Map::new(),
        })
    }

    pub fn button(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Known(Component::Button {
            url: url.into(),
            text: text.into(),
            extra: Map::new(),
        })
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::Known(Component::Image {
            src: src.into(),
            alt: alt.into(),
            extra: Map::new(),
        })
    }

    /// The wire `type` tag, or `"unknown"` when an unrecognized record has none
    pub fn type_name(&self) -> &str {
        match self {
            Self::Known(component) => component.type_name(),
            Self::Unrecognized(fields) => fields
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl Component {
    pub fn type_name(&self) -> &'static str {
        match self {
            Component::HeroHeader { .. } => "hero_header",
            Component::Text { .. } => "text",
            Component::DynamicText { .. } => "dynamic_text",
            Component::Button { .. } => "button",
            Component::Image { .. } => "image",
        }
    }
}

impl From<Component> for ComponentDescriptor {
    fn from(component: Component) -> Self {
        ComponentDescriptor::Known(component)
    }
}
