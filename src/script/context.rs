use crate::{
    designer::drag::DropOutcome,
    error::{GestureAbort, PropertyError},
    script::script_model::AssertionResult,
};

/// Tracks replay progress and what the last drop and commit did.
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    /// Current step index (0-based)
    pub current_step: usize,

    pub assertion_results: Vec<AssertionResult>,

    pub last_drop: Option<Result<DropOutcome, GestureAbort>>,

    pub last_property_errors: Vec<PropertyError>,
}

impl ScriptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_assertions(&mut self, results: Vec<AssertionResult>) {
        self.assertion_results.extend(results);
    }

    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| !r.passed).count()
    }

    /// `created`, `moved`, `unchanged`, `aborted`, or `none` before any drop.
    pub fn last_drop_label(&self) -> &'static str {
        match &self.last_drop {
            None => "none",
            Some(Ok(DropOutcome::Created { .. })) => "created",
            Some(Ok(DropOutcome::Moved { .. })) => "moved",
            Some(Ok(DropOutcome::Unchanged)) => "unchanged",
            Some(Err(_)) => "aborted",
        }
    }
}
