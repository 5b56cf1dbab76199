use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::{
    content::{
        codec,
        form::{FormRecord, SubmissionSink},
    },
    element::{
        instance::ElementInstance,
        registry,
        render::{FieldState, Widget},
    },
    error::{BoundaryError, ContentError},
    submission::validator::{ValidationReport, Values, validate},
};

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    /// Some fields failed; their error flags are now set. Nothing was sent.
    Rejected(ValidationReport),
    /// The submission endpoint failed. Values are kept for a retry.
    Failed(BoundaryError),
    AlreadySubmitted,
}

/// Value map and error flags behind one mounted fillable form.
#[derive(Debug, Clone)]
pub struct SubmissionCollector {
    share_url: String,
    elements: Vec<ElementInstance>,
    values: Values,
    invalid: BTreeSet<String>,
    submitted: bool,
}

impl SubmissionCollector {
    pub fn new(share_url: &str, elements: Vec<ElementInstance>) -> Self {
        Self {
            share_url: share_url.to_string(),
            elements,
            values: Values::new(),
            invalid: BTreeSet::new(),
            submitted: false,
        }
    }

    pub fn from_record(record: &FormRecord) -> Result<Self, ContentError> {
        Ok(Self::new(&record.share_url, codec::decode(&record.content)?))
    }

    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_invalid(&self, element_id: &str) -> bool {
        self.invalid.contains(element_id)
    }

    /// Record a field change and re-check just that field.
    pub fn set_value(&mut self, element_id: &str, value: &str) {
        if self.submitted {
            return;
        }
        let Some(element) = self.elements.iter().find(|el| el.id == element_id) else {
            warn!(element_id, "value for unknown element ignored");
            return;
        };

        if registry::validate(element, value) {
            self.invalid.remove(element_id);
        } else {
            self.invalid.insert(element_id.to_string());
        }
        self.values.insert(element_id.to_string(), value.to_string());
    }

    pub fn field_state(&self, element_id: &str) -> FieldState<'_> {
        FieldState {
            value: self.values.get(element_id).map(String::as_str),
            invalid: self.is_invalid(element_id),
        }
    }

    /// Fillable view of every element, in order.
    pub fn render(&self) -> Vec<(String, Vec<Widget>)> {
        self.elements
            .iter()
            .map(|el| {
                let view = registry::lookup(el.kind).views.form;
                (el.id.clone(), view(el, self.field_state(&el.id)))
            })
            .collect()
    }

    /// Validate everything and, if clean, hand the serialized values to the
    /// sink. Values are discarded only after the sink accepts them.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink) -> Result<SubmitOutcome, ContentError> {
        if self.submitted {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        let report = validate(&self.elements, &self.values);
        self.invalid = report.errors_by_element_id.keys().cloned().collect();
        if !report.ok {
            warn!(failed = report.errors_by_element_id.len(), "submission rejected");
            return Ok(SubmitOutcome::Rejected(report));
        }

        let payload = serde_json::to_string(&self.values).map_err(ContentError::Encode)?;
        match sink.submit_form(&self.share_url, payload) {
            Ok(()) => {
                info!(share_url = %self.share_url, "form submitted");
                self.values.clear();
                self.submitted = true;
                Ok(SubmitOutcome::Submitted)
            }
            Err(error) => {
                warn!(%error, "submission failed; values kept for retry");
                Ok(SubmitOutcome::Failed(error))
            }
        }
    }
}
