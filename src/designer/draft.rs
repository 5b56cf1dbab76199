use crate::{
    element::{
        instance::{Attributes, ElementInstance},
        kind::ElementKind,
        properties::check_properties,
        registry::lookup,
    },
    error::PropertyError,
};

/// Local, uncommitted edits of one element's properties.
///
/// Keystrokes land here only. The store applies the draft on an explicit
/// commit (focus loss), so the element list is not rewritten per keystroke.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesDraft {
    element_id: String,
    kind: ElementKind,
    values: Attributes,
    dirty: bool,
}

impl PropertiesDraft {
    pub fn begin(instance: &ElementInstance) -> Self {
        Self {
            element_id: instance.id.clone(),
            kind: instance.kind,
            values: instance.attributes.clone(),
            dirty: false,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn values(&self) -> &Attributes {
        &self.values
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record raw editor input for `key`, coerced to the property's shape.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), PropertyError> {
        let rule = lookup(self.kind)
            .properties
            .iter()
            .find(|rule| rule.key == key)
            .ok_or_else(|| PropertyError::new(key, format!("is not a property of {}", self.kind)))?;

        self.values.insert(key.to_string(), rule.coerce(raw));
        self.dirty = true;
        Ok(())
    }

    pub fn check(&self) -> Result<(), Vec<PropertyError>> {
        check_properties(lookup(self.kind).properties, &self.values)
    }

    /// The instance this draft would commit, once it checks out.
    pub fn to_instance(&self) -> Result<ElementInstance, Vec<PropertyError>> {
        self.check()?;
        Ok(ElementInstance {
            id: self.element_id.clone(),
            kind: self.kind,
            attributes: self.values.clone(),
        })
    }
}
