use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::element::kind::ElementKind;

/// Kind-specific attribute bag. Keys are the property names the kind's
/// bundle reads (`label`, `required`, `placeHolder`, ...).
pub type Attributes = Map<String, Value>;

/// One placed field: stable id, kind, and its attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInstance {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    #[serde(rename = "extraAttributes", default)]
    pub attributes: Attributes,
}

impl ElementInstance {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Missing or non-boolean values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.attributes
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(Value::as_i64)
    }

    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.attributes.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.flag("required")
    }

    /// The field's caption, for error notices and submission table headers.
    pub fn label(&self) -> Option<&str> {
        self.text("label")
    }
}
