use serde_json::Value;

use crate::{element::instance::Attributes, error::PropertyError};

/// Shape a single editable property must satisfy before a properties-editor
/// draft may be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySpec {
    /// String whose character count lies in `min..=max`.
    Text { min: usize, max: usize },
    Flag,
    Integer { min: i64, max: i64 },
    /// List of non-empty strings.
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRule {
    pub key: &'static str,
    pub caption: &'static str,
    pub spec: PropertySpec,
}

impl PropertyRule {
    pub const fn text(key: &'static str, caption: &'static str, min: usize, max: usize) -> Self {
        Self { key, caption, spec: PropertySpec::Text { min, max } }
    }

    pub const fn flag(key: &'static str, caption: &'static str) -> Self {
        Self { key, caption, spec: PropertySpec::Flag }
    }

    pub const fn integer(key: &'static str, caption: &'static str, min: i64, max: i64) -> Self {
        Self { key, caption, spec: PropertySpec::Integer { min, max } }
    }

    pub const fn options(key: &'static str, caption: &'static str) -> Self {
        Self { key, caption, spec: PropertySpec::Options }
    }

    pub fn check(&self, value: Option<&Value>) -> Result<(), PropertyError> {
        let value = value.ok_or_else(|| PropertyError::new(self.key, "is missing"))?;

        match self.spec {
            PropertySpec::Text { min, max } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| PropertyError::new(self.key, "must be text"))?;
                let len = text.chars().count();
                if len < min {
                    return Err(PropertyError::new(
                        self.key,
                        format!("must be at least {} characters", min),
                    ));
                }
                if len > max {
                    return Err(PropertyError::new(
                        self.key,
                        format!("must be at most {} characters", max),
                    ));
                }
                Ok(())
            }
            PropertySpec::Flag => match value {
                Value::Bool(_) => Ok(()),
                _ => Err(PropertyError::new(self.key, "must be true or false")),
            },
            PropertySpec::Integer { min, max } => {
                let n = value
                    .as_i64()
                    .ok_or_else(|| PropertyError::new(self.key, "must be a whole number"))?;
                if n < min || n > max {
                    return Err(PropertyError::new(
                        self.key,
                        format!("must be between {} and {}", min, max),
                    ));
                }
                Ok(())
            }
            PropertySpec::Options => {
                let items = value
                    .as_array()
                    .ok_or_else(|| PropertyError::new(self.key, "must be a list"))?;
                let all_filled = items
                    .iter()
                    .all(|item| item.as_str().is_some_and(|s| !s.trim().is_empty()));
                if !all_filled {
                    return Err(PropertyError::new(self.key, "options must be non-empty text"));
                }
                Ok(())
            }
        }
    }

    /// Coerce raw editor input into the JSON shape this rule expects.
    ///
    /// Editors hand over strings; flags accept `true`/`false`, integers parse
    /// as `i64`, options split on newlines. Text that fails to coerce is kept
    /// as a string so [`PropertyRule::check`] reports it.
    pub fn coerce(&self, raw: &str) -> Value {
        match self.spec {
            PropertySpec::Text { .. } => Value::String(raw.to_string()),
            PropertySpec::Flag => match raw.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => Value::String(other.to_string()),
            },
            PropertySpec::Integer { .. } => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(raw.to_string())),
            PropertySpec::Options => Value::Array(
                raw.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| Value::String(line.to_string()))
                    .collect(),
            ),
        }
    }
}

/// Check every rule against an attribute bag, collecting all violations.
pub fn check_properties(rules: &[PropertyRule], attributes: &Attributes) -> Result<(), Vec<PropertyError>> {
    let errors: Vec<PropertyError> = rules
        .iter()
        .filter_map(|rule| rule.check(attributes.get(rule.key)).err())
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
