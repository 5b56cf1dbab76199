use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    designer::drag::{DragPayload, DropOutcome, HoverTarget},
    error::GestureAbort,
};

/// One line of the gesture trace: what was dropped where, and what it did.
#[derive(Debug, Serialize)]
pub struct GestureEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub list_len_before: usize,
    pub list_len_after: usize,

    pub active: Option<DragPayload>,
    pub over: Option<HoverTarget>,

    pub outcome: Option<DropOutcome>,
    pub abort_reason: Option<String>,
}

impl GestureEvent {
    pub fn now(step: u64, list_len_before: usize) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            list_len_before,
            list_len_after: list_len_before,
            active: None,
            over: None,
            outcome: None,
            abort_reason: None,
        }
    }

    pub fn with_signals(mut self, active: Option<&DragPayload>, over: Option<&HoverTarget>) -> Self {
        self.active = active.cloned();
        self.over = over.cloned();
        self
    }

    pub fn with_result(mut self, result: &Result<DropOutcome, GestureAbort>, list_len_after: usize) -> Self {
        self.list_len_after = list_len_after;
        match result {
            Ok(outcome) => self.outcome = Some(outcome.clone()),
            Err(abort) => self.abort_reason = Some(abort.to_string()),
        }
        self
    }
}
