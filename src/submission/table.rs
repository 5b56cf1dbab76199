use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::{
    content::form::SubmissionRecord,
    element::{instance::ElementInstance, kind::ElementKind, registry},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub submitted_at_ms: u128,
}

/// Submissions laid out one column per submittable element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl SubmissionTable {
    pub fn build<'a>(
        elements: &[ElementInstance],
        submissions: impl IntoIterator<Item = &'a SubmissionRecord>,
    ) -> Self {
        let columns: Vec<Column> = elements
            .iter()
            .filter(|el| registry::lookup(el.kind).is_submittable())
            .map(|el| Column {
                id: el.id.clone(),
                label: el.label().unwrap_or_default().to_string(),
                required: el.is_required(),
                kind: el.kind,
            })
            .collect();

        let rows = submissions
            .into_iter()
            .map(|submission| {
                let values: BTreeMap<String, String> = serde_json::from_str(&submission.content)
                    .unwrap_or_else(|e| {
                        warn!(form_id = submission.form_id, error = %e, "unreadable submission payload");
                        BTreeMap::new()
                    });
                Row {
                    cells: columns
                        .iter()
                        .map(|col| format_cell(col.kind, values.get(&col.id).map(String::as_str)))
                        .collect(),
                    submitted_at_ms: submission.submitted_at_ms,
                }
            })
            .collect();

        Self { columns, rows }
    }
}

fn format_cell(kind: ElementKind, value: Option<&str>) -> String {
    match (kind, value) {
        (ElementKind::CheckboxField, value) => {
            if value == Some("true") { "[x]".to_string() } else { "[ ]".to_string() }
        }
        (_, Some(value)) => value.to_string(),
        (_, None) => String::new(),
    }
}
