use std::error::Error;

use tracing::debug;

use crate::{
    content::{codec, form::FormRepository},
    designer::{session::BuilderSession, store::DraftFlush},
    script::{
        context::ScriptContext,
        script_model::{AssertionResult, AssertionSpec, DesignerScript, ScriptResult, ScriptStep},
    },
};

/// Replays a [`DesignerScript`] against a builder session.
pub struct ScriptRunner;

impl ScriptRunner {
    /// Run every step, collecting assertion results. A step error (an edit
    /// of an unknown property, a failed save) stops the replay.
    pub fn run(script: &DesignerScript, session: &mut BuilderSession, repo: &mut dyn FormRepository) -> ScriptResult {
        let mut ctx = ScriptContext::new();

        for (i, step) in script.steps.iter().enumerate() {
            ctx.current_step = i;

            if let Err(e) = Self::execute_step(step, i, session, repo, &mut ctx) {
                return Self::finish(script, session, ctx, i + 1, Some(format!("Step {} failed: {}", i, e)));
            }
        }

        Self::finish(script, session, ctx, script.steps.len(), None)
    }

    fn finish(
        script: &DesignerScript,
        session: &BuilderSession,
        ctx: ScriptContext,
        steps_run: usize,
        error: Option<String>,
    ) -> ScriptResult {
        ScriptResult {
            script_name: script.name.clone(),
            passed: error.is_none() && ctx.all_passed(),
            steps_run,
            assertion_results: ctx.assertion_results,
            content: codec::encode(session.store().elements()).ok(),
            error,
        }
    }

    fn execute_step(
        step: &ScriptStep,
        step_index: usize,
        session: &mut BuilderSession,
        repo: &mut dyn FormRepository,
        ctx: &mut ScriptContext,
    ) -> Result<(), Box<dyn Error>> {
        match step {
            ScriptStep::Drag { active, over } => {
                if let Some(payload) = active {
                    // A malformed start is reported again, and recorded, at drag-end.
                    if let Err(abort) = session.drag_start(payload) {
                        debug!(step = step_index, %abort, "drag start rejected");
                    }
                }
                ctx.last_drop = Some(session.drag_end(active.as_ref(), over.as_ref()));
                Ok(())
            }

            ScriptStep::Cancel { active } => {
                session.drag_start(active)?;
                session.drag_cancel();
                Ok(())
            }

            ScriptStep::Select { element } => {
                if let DraftFlush::Discarded(errors) =
                    session.store_mut().set_selected_element(element.as_deref())
                {
                    ctx.last_property_errors = errors;
                }
                Ok(())
            }

            ScriptStep::Edit { property, value } => {
                session.store_mut().edit_property(property, value)?;
                Ok(())
            }

            ScriptStep::Commit => {
                ctx.last_property_errors = match session.store_mut().commit_properties() {
                    Ok(_) => Vec::new(),
                    Err(errors) => errors,
                };
                Ok(())
            }

            ScriptStep::Remove { element } => {
                session.store_mut().remove_element(element);
                Ok(())
            }

            ScriptStep::Save => {
                session.save(repo)?;
                Ok(())
            }

            ScriptStep::Assert { assertions } => {
                let results = assertions
                    .iter()
                    .map(|spec| Self::evaluate_one(spec, step_index, session, ctx))
                    .collect();
                ctx.record_assertions(results);
                Ok(())
            }
        }
    }

    fn evaluate_one(
        spec: &AssertionSpec,
        step_index: usize,
        session: &BuilderSession,
        ctx: &ScriptContext,
    ) -> AssertionResult {
        let store = session.store();

        let (passed, actual) = match spec {
            AssertionSpec::Order { expected } => {
                let ids: Vec<&str> = store.elements().iter().map(|el| el.id.as_str()).collect();
                (ids == *expected, format!("{:?}", ids))
            }

            AssertionSpec::Kinds { expected } => {
                let kinds: Vec<_> = store.elements().iter().map(|el| el.kind).collect();
                (kinds == *expected, format!("{:?}", kinds))
            }

            AssertionSpec::Length { expected } => (store.len() == *expected, store.len().to_string()),

            AssertionSpec::Selected { expected } => {
                let selected = store.selected_element().map(|el| el.id.clone());
                (selected == *expected, format!("{:?}", selected))
            }

            AssertionSpec::Attribute { element, key, expected } => {
                let value = store.get(element).and_then(|el| el.attributes.get(key));
                (value == Some(expected), format!("{:?}", value))
            }

            AssertionSpec::LastDrop { expected } => {
                let label = ctx.last_drop_label();
                (label == expected.as_str(), label.to_string())
            }

            AssertionSpec::PropertyErrors { expected } => {
                let count = ctx.last_property_errors.len();
                (count == *expected, count.to_string())
            }

            AssertionSpec::UnsavedChanges { expected } => {
                let unsaved = session.has_unsaved_changes();
                (unsaved == *expected, unsaved.to_string())
            }
        };

        AssertionResult {
            step_index,
            spec: spec.clone(),
            passed,
            message: if passed {
                None
            } else {
                Some(format!("expected {}, got {}", describe(spec), actual))
            },
            actual: Some(actual),
        }
    }
}

fn describe(spec: &AssertionSpec) -> String {
    match spec {
        AssertionSpec::Order { expected } => format!("{:?}", expected),
        AssertionSpec::Kinds { expected } => format!("{:?}", expected),
        AssertionSpec::Length { expected } => expected.to_string(),
        AssertionSpec::Selected { expected } => format!("{:?}", expected),
        AssertionSpec::Attribute { expected, .. } => expected.to_string(),
        AssertionSpec::LastDrop { expected } => expected.clone(),
        AssertionSpec::PropertyErrors { expected } => expected.to_string(),
        AssertionSpec::UnsavedChanges { expected } => expected.to_string(),
    }
}
