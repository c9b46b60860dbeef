use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse structural grouping of a page.
///
/// Sections are loosely typed: apart from `id` and the `items` list used by
/// feature-item edits, every key is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Feature items shown inside the section
    #[serde(default)]
    pub items: Vec<Value>,

    /// Everything else the section record carries
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SectionDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
