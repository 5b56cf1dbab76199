use std::io::Write;

use form_designer::{
    content::{
        codec,
        form::{FormRepository, MemoryFormStore},
    },
    designer::{ids::SequentialIds, session::BuilderSession},
    element::{kind::ElementKind, registry},
    error::ScriptError,
    script::{
        context::ScriptContext,
        runner::ScriptRunner,
        script_model::{AssertionSpec, DesignerScript, ScriptStep, load_script},
    },
};
use pretty_assertions::assert_eq;

// =========================================================================
// Helpers
// =========================================================================

const CONTACT_FORM: &str = r#"
name: Build a contact form
steps:
  - action: drag
    active: { isFromPalette: true, kind: TitleField }
    over: { isDropZone: true }
  - action: drag
    active: { isFromPalette: true, kind: TextField }
    over: { isDropZone: true }
  - action: drag
    active: { isFromPalette: true, kind: CheckboxField }
    over: { isTopHalf: true, elementId: el-2 }
  - action: assert
    assertions:
      - type: order
        expected: [el-1, el-3, el-2]
      - type: kinds
        expected: [TitleField, CheckboxField, TextField]
      - type: last_drop
        expected: created
  - action: select
    element: el-2
  - action: edit
    property: label
    value: Email
  - action: edit
    property: required
    value: "true"
  - action: commit
  - action: drag
    active: { isFromPalette: false, elementId: el-1 }
    over: { isBottomHalf: true, elementId: el-2 }
  - action: assert
    assertions:
      - type: order
        expected: [el-3, el-2, el-1]
      - type: attribute
        element: el-2
        key: label
        expected: Email
      - type: attribute
        element: el-2
        key: required
        expected: true
      - type: selected
        expected: el-2
      - type: unsaved_changes
        expected: true
  - action: save
  - action: assert
    assertions:
      - type: unsaved_changes
        expected: false
      - type: length
        expected: 3
"#;

fn new_session(repo: &mut MemoryFormStore) -> BuilderSession {
    let id = repo.create_form("Contact", "");
    BuilderSession::open(&*repo, id, Box::new(SequentialIds::new("el"))).unwrap()
}

fn parse(yaml: &str) -> DesignerScript {
    serde_yaml::from_str(yaml).unwrap()
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn script_parses_every_step_kind() {
    let script = parse(CONTACT_FORM);
    assert_eq!(script.name, "Build a contact form");
    assert_eq!(script.steps.len(), 12);
    assert!(matches!(script.steps[7], ScriptStep::Commit));
    assert!(matches!(script.steps[10], ScriptStep::Save));

    let ScriptStep::Assert { assertions } = &script.steps[3] else {
        panic!("expected an assert step");
    };
    assert_eq!(
        assertions[2],
        AssertionSpec::LastDrop {
            expected: "created".into()
        }
    );
}

#[test]
fn load_script_reads_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONTACT_FORM.as_bytes()).unwrap();

    let script = load_script(file.path().to_str().unwrap()).unwrap();
    assert_eq!(script, parse(CONTACT_FORM));
}

#[test]
fn load_script_reports_missing_and_malformed_files() {
    assert!(matches!(load_script("/nonexistent/script.yaml"), Err(ScriptError::Io { .. })));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"name: broken\nsteps:\n  - action: teleport\n").unwrap();
    assert!(matches!(
        load_script(file.path().to_str().unwrap()),
        Err(ScriptError::Parse { .. })
    ));
}

#[test]
fn unknown_kind_in_script_is_rejected() {
    let yaml = "name: x\nsteps:\n  - action: assert\n    assertions:\n      - type: kinds\n        expected: [Rocket]\n";
    assert!(serde_yaml::from_str::<DesignerScript>(yaml).is_err());
}

// =========================================================================
// Replay
// =========================================================================

#[test]
fn contact_form_script_passes_and_saves() {
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(CONTACT_FORM), &mut session, &mut repo);

    assert!(result.passed, "failures: {:?}", result.assertion_results);
    assert_eq!(result.error, None);
    assert_eq!(result.steps_run, 12);
    assert_eq!(result.assertion_results.len(), 10);

    let stored = codec::decode(&repo.fetch_form(session.form_id()).unwrap().content).unwrap();
    let order: Vec<&str> = stored.iter().map(|el| el.id.as_str()).collect();
    assert_eq!(order, vec!["el-3", "el-2", "el-1"]);
    assert_eq!(result.content, Some(codec::encode(&stored).unwrap()));
}

#[test]
fn failed_assertion_is_reported_with_actual_value() {
    let yaml = r#"
name: wrong length
steps:
  - action: drag
    active: { isFromPalette: true, kind: SpacerField }
    over: { isDropZone: true }
  - action: assert
    assertions:
      - type: length
        expected: 2
"#;
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);

    assert!(!result.passed);
    assert_eq!(result.error, None);
    let failed = &result.assertion_results[0];
    assert_eq!(failed.step_index, 1);
    assert_eq!(failed.actual.as_deref(), Some("1"));
    assert_eq!(failed.message.as_deref(), Some("expected 2, got 1"));
}

#[test]
fn aborted_drop_is_recorded_and_replay_continues() {
    let yaml = r#"
name: drop outside
steps:
  - action: drag
    active: { isFromPalette: true, kind: TextField }
  - action: assert
    assertions:
      - type: last_drop
        expected: aborted
      - type: length
        expected: 0
"#;
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);
    assert!(result.passed, "failures: {:?}", result.assertion_results);
}

#[test]
fn rejected_commit_is_counted() {
    let yaml = r#"
name: short label
steps:
  - action: drag
    active: { isFromPalette: true, kind: TextField }
    over: { isDropZone: true }
  - action: select
    element: el-1
  - action: edit
    property: label
    value: "x"
  - action: commit
  - action: assert
    assertions:
      - type: property_errors
        expected: 1
      - type: attribute
        element: el-1
        key: label
        expected: Text Field
"#;
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);
    assert!(result.passed, "failures: {:?}", result.assertion_results);
}

#[test]
fn step_error_stops_replay() {
    let yaml = r#"
name: bad edit
steps:
  - action: drag
    active: { isFromPalette: true, kind: TitleField }
    over: { isDropZone: true }
  - action: select
    element: el-1
  - action: edit
    property: rows
    value: "4"
  - action: assert
    assertions:
      - type: length
        expected: 1
"#;
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);

    assert!(!result.passed);
    assert_eq!(result.steps_run, 3);
    assert!(result.assertion_results.is_empty());
    assert!(result.error.as_deref().is_some_and(|e| e.starts_with("Step 2 failed")));
}

#[test]
fn cancel_and_remove_steps() {
    let yaml = r#"
name: cancel then remove
steps:
  - action: drag
    active: { isFromPalette: true, kind: DateField }
    over: { isDropZone: true }
  - action: cancel
    active: { isFromPalette: false, elementId: el-1 }
  - action: assert
    assertions:
      - type: length
        expected: 1
  - action: remove
    element: el-1
  - action: assert
    assertions:
      - type: length
        expected: 0
      - type: last_drop
        expected: created
"#;
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);
    assert!(result.passed, "failures: {:?}", result.assertion_results);
}

#[test]
fn malformed_drag_start_still_resolves_as_aborted_drop() {
    let yaml = r#"
name: palette drag without a kind
steps:
  - action: drag
    active: { isFromPalette: true }
    over: { isDropZone: true }
  - action: assert
    assertions:
      - type: last_drop
        expected: aborted
      - type: length
        expected: 0
"#;
    let mut repo = MemoryFormStore::new();
    let mut session = new_session(&mut repo);

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);
    assert!(result.passed, "failures: {:?}", result.assertion_results);
    assert_eq!(result.steps_run, 2);
}

#[test]
fn replay_over_saved_content_allocates_unused_ids() {
    let yaml = r#"
name: extend a saved form
steps:
  - action: drag
    active: { isFromPalette: true, kind: TextField }
    over: { isDropZone: true }
  - action: assert
    assertions:
      - type: last_drop
        expected: created
      - type: order
        expected: [el-1, el-2]
      - type: kinds
        expected: [TitleField, TextField]
"#;
    let mut repo = MemoryFormStore::new();
    let id = repo.create_form("Contact", "");
    let saved = vec![registry::construct(ElementKind::TitleField, "el-1".to_string())];
    repo.update_content(id, codec::encode(&saved).unwrap()).unwrap();
    let mut session = BuilderSession::open(&repo, id, Box::new(SequentialIds::new("el"))).unwrap();

    let result = ScriptRunner::run(&parse(yaml), &mut session, &mut repo);
    assert!(result.passed, "failures: {:?}", result.assertion_results);
}

// =========================================================================
// Context
// =========================================================================

#[test]
fn context_counts_and_labels() {
    let ctx = ScriptContext::new();
    assert_eq!(ctx.last_drop_label(), "none");
    assert!(ctx.all_passed());
    assert_eq!(ctx.pass_count(), 0);
    assert_eq!(ctx.fail_count(), 0);
}
