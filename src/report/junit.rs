use crate::report::report_model::ReplayReport;

// ============================================================================
// JUnit XML reporter for CI
// ============================================================================

/// Render a replay report as a JUnit `<testsuite>`, one `<testcase>` per
/// script. A script fails on any failed assertion or on a step error.
pub fn generate_junit_xml(report: &ReplayReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.script_results {
        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"form-designer\" />\n",
                escape_xml(&result.script_name)
            ));
            continue;
        }

        let mut lines: Vec<String> = result
            .assertion_results
            .iter()
            .filter(|ar| !ar.passed)
            .map(|ar| {
                format!(
                    "Step {}: {}",
                    ar.step_index,
                    ar.message.as_deref().unwrap_or("assertion failed")
                )
            })
            .collect();
        let failure_count = lines.len();

        if let Some(error) = &result.error {
            lines.push(format!("Error: {}", error));
        }

        let (message, kind) = if failure_count > 0 {
            (format!("{} assertion(s) failed", failure_count), "AssertionFailure")
        } else {
            ("replay stopped".to_string(), "StepError")
        };

        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"form-designer\">\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
            name = escape_xml(&result.script_name),
            message = escape_xml(&message),
            kind = kind,
            body = escape_xml(&lines.join("\n")),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
