use std::collections::BTreeMap;

use serde::Serialize;

use crate::element::{instance::ElementInstance, kind::ElementKind, registry};

/// Submission value map: element id to raw string value. Ordered so the
/// serialized payload is stable.
pub type Values = BTreeMap<String, String>;

/// Aggregate notice shown alongside per-field error state.
pub const INCOMPLETE_NOTICE: &str = "please complete required fields";

/// A field that failed its kind's acceptance rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ElementKind,
    pub label: Option<String>,
}

/// Verdict for one pass over a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors_by_element_id: BTreeMap<String, FieldError>,
}

impl ValidationReport {
    pub fn has_error(&self, element_id: &str) -> bool {
        self.errors_by_element_id.contains_key(element_id)
    }

    pub fn notice(&self) -> Option<&'static str> {
        (!self.ok).then_some(INCOMPLETE_NOTICE)
    }
}

/// Ask every element's kind to accept its current value (absent reads as
/// empty). Pure: the same list and values always give the same report.
///
/// Both the fillable form and any server-side re-check go through here.
pub fn validate(elements: &[ElementInstance], values: &Values) -> ValidationReport {
    let errors_by_element_id: BTreeMap<String, FieldError> = elements
        .iter()
        .filter(|el| {
            let value = values.get(&el.id).map(String::as_str).unwrap_or("");
            !registry::validate(el, value)
        })
        .map(|el| {
            (
                el.id.clone(),
                FieldError {
                    kind: el.kind,
                    label: el.label().map(str::to_string),
                },
            )
        })
        .collect();

    ValidationReport {
        ok: errors_by_element_id.is_empty(),
        errors_by_element_id,
    }
}
