use form_designer::{
    content::form::FormStats,
    element::render::Widget,
    report::{
        console::{format_canvas, format_console_report, format_palette, format_stats, format_validation, format_widget},
        junit::{escape_xml, generate_junit_xml},
        report_model::ReplayReport,
    },
    script::script_model::{AssertionResult, AssertionSpec, ScriptResult},
    submission::validator::{INCOMPLETE_NOTICE, Values, validate},
};

use crate::common::element;
use form_designer::element::kind::ElementKind;

mod common;

// ============================================================================
// Helper builders
// ============================================================================

fn passing_result(name: &str) -> ScriptResult {
    ScriptResult {
        script_name: name.to_string(),
        passed: true,
        steps_run: 3,
        assertion_results: vec![AssertionResult {
            step_index: 2,
            spec: AssertionSpec::Length { expected: 2 },
            passed: true,
            actual: Some("2".into()),
            message: None,
        }],
        content: Some("[]".into()),
        error: None,
    }
}

fn failing_result(name: &str) -> ScriptResult {
    ScriptResult {
        script_name: name.to_string(),
        passed: false,
        steps_run: 4,
        assertion_results: vec![AssertionResult {
            step_index: 3,
            spec: AssertionSpec::Order {
                expected: vec!["b".into(), "a".into()],
            },
            passed: false,
            actual: Some(r#"["a", "b"]"#.into()),
            message: Some(r#"expected ["b", "a"], got ["a", "b"]"#.into()),
        }],
        content: None,
        error: None,
    }
}

fn errored_result(name: &str) -> ScriptResult {
    ScriptResult {
        script_name: name.to_string(),
        passed: false,
        steps_run: 2,
        assertion_results: Vec::new(),
        content: None,
        error: Some("Step 1 failed: rows: is not a property of TitleField".into()),
    }
}

fn mixed_report() -> ReplayReport {
    ReplayReport::from_results(
        "scripts",
        vec![
            passing_result("build contact form"),
            failing_result("reorder"),
            errored_result("bad edit"),
        ],
    )
}

// ============================================================================
// Report counts
// ============================================================================

#[test]
fn report_from_results_counts() {
    let report = mixed_report();
    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 2);
    assert!(!report.all_passed());
    assert!(report.duration_ms.is_none());
}

#[test]
fn empty_report_passes() {
    let report = ReplayReport::from_results("none", Vec::new());
    assert!(report.all_passed());
}

// ============================================================================
// Console
// ============================================================================

#[test]
fn console_report_lists_failures_and_errors() {
    let out = format_console_report(&mixed_report().with_duration(1500));

    assert!(out.starts_with("=== Replay: scripts ===\n"));
    assert!(out.contains("\u{2713} PASS  build contact form (3 steps, 1 assertions)"));
    assert!(out.contains("\u{2717} FAIL  reorder (4 steps, 1 assertions)"));
    assert!(out.contains(r#"[FAIL] Step 3: Order: expected ["b", "a"], got ["a", "b"]"#));
    assert!(out.contains("[ERROR] Step 1 failed"));
    assert!(out.contains("=== Results: 1 passed, 2 failed (3 total) in 1.5s ==="));
}

#[test]
fn palette_lists_both_groups() {
    let out = format_palette();
    let layout = out.find("Layout Elements").unwrap();
    let form = out.find("Form Elements").unwrap();
    assert!(layout < form);
    assert!(out.contains("TextField"));
    assert!(out.contains("SeparatorField"));
}

#[test]
fn empty_canvas_shows_drop_hint() {
    assert_eq!(format_canvas(&[]), "Drop here\n");
}

#[test]
fn widgets_render_as_text() {
    assert_eq!(
        format_widget(&Widget::Label {
            text: "Name".into(),
            required: true,
            invalid: true
        }),
        "Name* !"
    );
    assert_eq!(
        format_widget(&Widget::TextInput {
            placeholder: "type here".into(),
            value: String::new(),
            read_only: true,
            invalid: false
        }),
        "[type here] (read-only)"
    );
    assert_eq!(format_widget(&Widget::Spacer { height: 20 }), "<spacer 20px>");
}

#[test]
fn validation_output_carries_notice() {
    let elements = vec![element("name", ElementKind::TextField).with_attr("required", true)];

    let failed = format_validation(&validate(&elements, &Values::new()));
    assert!(failed.contains("name (TextField): Text Field"));
    assert!(failed.contains(INCOMPLETE_NOTICE));

    let mut values = Values::new();
    values.insert("name".into(), "Ada".into());
    assert!(format_validation(&validate(&elements, &values)).contains("all fields accepted"));
}

#[test]
fn stats_render_percentages() {
    let stats = FormStats {
        visits: 10,
        submissions: 3,
        submission_rate: 30.0,
        bounce_rate: 70.0,
    };
    let out = format_stats(&stats);
    assert!(out.contains("30.0%"));
    assert!(out.contains("70.0%"));
}

// ============================================================================
// JUnit
// ============================================================================

#[test]
fn junit_marks_failures_and_step_errors() {
    let xml = generate_junit_xml(&mixed_report().with_duration(2000));

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<testsuite name=\"scripts\" tests=\"3\" failures=\"2\" time=\"2.000\">"));
    assert!(xml.contains("<testcase name=\"build contact form\" classname=\"form-designer\" />"));
    assert!(xml.contains("message=\"1 assertion(s) failed\" type=\"AssertionFailure\""));
    assert!(xml.contains("message=\"replay stopped\" type=\"StepError\""));
    assert!(xml.contains("expected [&quot;b&quot;, &quot;a&quot;]"));
}

#[test]
fn escape_xml_special_chars() {
    assert_eq!(escape_xml("a < b & 'c' > \"d\""), "a &lt; b &amp; &apos;c&apos; &gt; &quot;d&quot;");
}
