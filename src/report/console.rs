use crate::{
    content::form::FormStats,
    element::{
        registry::{self, PaletteGroup},
        render::Widget,
    },
    report::report_model::ReplayReport,
    script::script_model::AssertionSpec,
    submission::{table::SubmissionTable, validator::ValidationReport},
};

// ============================================================================
// Palette
// ============================================================================

/// List every registered kind under its palette group.
pub fn format_palette() -> String {
    let mut out = String::new();
    let mut group = None;

    for bundle in registry::palette() {
        if group != Some(bundle.group) {
            group = Some(bundle.group);
            let heading = match bundle.group {
                PaletteGroup::Layout => "Layout Elements",
                PaletteGroup::Form => "Form Elements",
            };
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", heading));
        }

        out.push_str(&format!(
            "  {:<16} {:<16} [{}]\n",
            bundle.kind, bundle.palette.label, bundle.palette.icon
        ));
    }

    out
}

// ============================================================================
// Widgets
// ============================================================================

/// Render a canvas (element id plus its widgets) as indented text blocks.
pub fn format_canvas(canvas: &[(String, Vec<Widget>)]) -> String {
    if canvas.is_empty() {
        return "Drop here\n".to_string();
    }

    let mut out = String::new();
    for (id, widgets) in canvas {
        out.push_str(&format!("[{}]\n", id));
        for widget in widgets {
            out.push_str(&format!("  {}\n", format_widget(widget)));
        }
    }
    out
}

pub fn format_widget(widget: &Widget) -> String {
    match widget {
        Widget::Heading { level, text } => format!("{} {}", "#".repeat(*level as usize), text),
        Widget::Paragraph { text } => text.clone(),
        Widget::Label { text, required, invalid } => {
            format!("{}{}{}", text, if *required { "*" } else { "" }, error_mark(*invalid))
        }
        Widget::HelperText { text, invalid } => format!("({}){}", text, error_mark(*invalid)),
        Widget::TextInput { placeholder, value, read_only, invalid } => {
            format!("[{}]{}{}", shown(value, placeholder), lock_mark(*read_only), error_mark(*invalid))
        }
        Widget::NumberInput { placeholder, value, read_only, invalid } => {
            format!("[#{}]{}{}", shown(value, placeholder), lock_mark(*read_only), error_mark(*invalid))
        }
        Widget::TextArea { placeholder, value, rows, read_only, invalid } => format!(
            "[{} | {} rows]{}{}",
            shown(value, placeholder),
            rows,
            lock_mark(*read_only),
            error_mark(*invalid)
        ),
        Widget::DatePicker { value, read_only, invalid } => format!(
            "[date: {}]{}{}",
            value.as_deref().unwrap_or("pick a date"),
            lock_mark(*read_only),
            error_mark(*invalid)
        ),
        Widget::Checkbox { checked, read_only, invalid } => format!(
            "{}{}{}",
            if *checked { "[x]" } else { "[ ]" },
            lock_mark(*read_only),
            error_mark(*invalid)
        ),
        Widget::Select { placeholder, options, value, read_only, invalid } => format!(
            "[{} v] {{{}}}{}{}",
            value.as_deref().unwrap_or(placeholder),
            options.join(", "),
            lock_mark(*read_only),
            error_mark(*invalid)
        ),
        Widget::Separator => "----------------".to_string(),
        Widget::Spacer { height } => format!("<spacer {}px>", height),
        Widget::PropertyEditor { caption, value, .. } => format!("{}: {}", caption, value),
    }
}

fn shown<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

fn lock_mark(read_only: bool) -> &'static str {
    if read_only { " (read-only)" } else { "" }
}

fn error_mark(invalid: bool) -> &'static str {
    if invalid { " !" } else { "" }
}

// ============================================================================
// Validation, stats and submissions
// ============================================================================

pub fn format_validation(report: &ValidationReport) -> String {
    if report.ok {
        return "\u{2713} all fields accepted\n".to_string();
    }

    let mut out = String::new();
    for (id, error) in &report.errors_by_element_id {
        out.push_str(&format!(
            "\u{2717} {} ({}): {}\n",
            id,
            error.kind,
            error.label.as_deref().unwrap_or("unlabelled")
        ));
    }
    if let Some(notice) = report.notice() {
        out.push_str(&format!("\n{}\n", notice));
    }
    out
}

pub fn format_stats(stats: &FormStats) -> String {
    format!(
        "Total visits:     {}\nTotal submissions: {}\nSubmission rate:  {:.1}%\nBounce rate:      {:.1}%\n",
        stats.visits, stats.submissions, stats.submission_rate, stats.bounce_rate
    )
}

pub fn format_submission_table(table: &SubmissionTable) -> String {
    let mut out = String::new();

    let header: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{}{}", c.label, if c.required { "*" } else { "" }))
        .collect();
    out.push_str(&header.join(" | "));
    out.push_str(" | Submitted at\n");

    for row in &table.rows {
        out.push_str(&row.cells.join(" | "));
        out.push_str(&format!(" | {}\n", row.submitted_at_ms));
    }

    out
}

// ============================================================================
// Replay results
// ============================================================================

/// Format a replay report for the terminal.
///
/// ```text
/// === Replay: scripts ===
///
/// ✓ PASS  build contact form (6 steps, 3 assertions)
/// ✗ FAIL  reorder (4 steps, 1 assertions)
///     [FAIL] Step 3: Order: expected ["b", "a"], got ["a", "b"]
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &ReplayReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Replay: {} ===\n\n", report.suite_name));

    for result in &report.script_results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} assertions)\n",
            marker,
            result.script_name,
            result.steps_run,
            result.assertion_results.len()
        ));

        if let Some(error) = &result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            out.push_str(&format!(
                "    [FAIL] Step {}: {}: {}\n",
                ar.step_index,
                assertion_name(&ar.spec),
                ar.message.as_deref().unwrap_or("assertion failed")
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");
    out
}

fn assertion_name(spec: &AssertionSpec) -> &'static str {
    match spec {
        AssertionSpec::Order { .. } => "Order",
        AssertionSpec::Kinds { .. } => "Kinds",
        AssertionSpec::Length { .. } => "Length",
        AssertionSpec::Selected { .. } => "Selected",
        AssertionSpec::Attribute { .. } => "Attribute",
        AssertionSpec::LastDrop { .. } => "LastDrop",
        AssertionSpec::PropertyErrors { .. } => "PropertyErrors",
        AssertionSpec::UnsavedChanges { .. } => "UnsavedChanges",
    }
}
