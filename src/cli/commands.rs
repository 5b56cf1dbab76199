use std::error::Error;

use tracing::{debug, info};

use crate::{
    cli::config::{AppConfig, resolve_format, resolve_output, resolve_trace},
    content::{
        codec,
        form::{FormRepository, FormStats, MemoryFormStore},
    },
    designer::{ids::id_source, session::BuilderSession},
    element::{
        instance::ElementInstance,
        registry,
        render::{FieldState, ViewKind, Widget},
    },
    report::{
        console::{format_canvas, format_console_report, format_palette, format_stats, format_submission_table, format_validation},
        junit::generate_junit_xml,
        report_model::ReplayReport,
    },
    script::{
        runner::ScriptRunner,
        script_model::{DesignerScript, load_script},
    },
    submission::{
        table::SubmissionTable,
        validator::{Values, validate},
    },
    trace::logger::TraceLogger,
};

// ============================================================================
// palette subcommand
// ============================================================================

pub fn cmd_palette() -> Result<(), Box<dyn Error>> {
    print!("{}", format_palette());
    Ok(())
}

// ============================================================================
// preview subcommand
// ============================================================================

pub fn cmd_preview(content_path: &str, view: &str) -> Result<(), Box<dyn Error>> {
    let elements = read_content(content_path)?;
    let view = parse_view(view)?;
    print!("{}", format_canvas(&render_all(&elements, view)));
    Ok(())
}

fn parse_view(name: &str) -> Result<ViewKind, Box<dyn Error>> {
    match name {
        "designer" => Ok(ViewKind::Designer),
        "form" => Ok(ViewKind::Form),
        "properties" => Ok(ViewKind::Properties),
        other => Err(format!("unknown view '{}' (expected designer, form or properties)", other).into()),
    }
}

/// Draw every element through one of its kind's views. The form view is
/// drawn empty and valid.
pub fn render_all(elements: &[ElementInstance], view: ViewKind) -> Vec<(String, Vec<Widget>)> {
    elements
        .iter()
        .map(|el| {
            let views = registry::lookup(el.kind).views;
            let widgets = match view {
                ViewKind::Designer => (views.designer)(el),
                ViewKind::Form => (views.form)(el, FieldState::default()),
                ViewKind::Properties => (views.properties)(el),
            };
            (el.id.clone(), widgets)
        })
        .collect()
}

// ============================================================================
// validate subcommand
// ============================================================================

/// Validate a stored value map and return whether every field was accepted.
pub fn cmd_validate(
    content_path: &str,
    values_path: &str,
    format: Option<&str>,
    config: &AppConfig,
) -> Result<bool, Box<dyn Error>> {
    let elements = read_content(content_path)?;
    let values: Values = serde_json::from_str(&std::fs::read_to_string(values_path)?)?;

    let report = validate(&elements, &values);
    debug!(ok = report.ok, errors = report.errors_by_element_id.len(), "validated submission");

    match resolve_format(format, config) {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", format_validation(&report)),
    }

    Ok(report.ok)
}

// ============================================================================
// replay subcommand
// ============================================================================

/// Replay scripts and return whether all passed.
pub fn cmd_replay(
    script_path: &str,
    content_path: Option<&str>,
    format: Option<&str>,
    output: Option<&str>,
    trace: Option<&str>,
    config: &AppConfig,
) -> Result<bool, Box<dyn Error>> {
    let scripts = load_scripts(script_path)?;

    if scripts.is_empty() {
        eprintln!("No designer scripts found at: {}", script_path);
        return Ok(true);
    }

    let initial = match content_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => "[]".to_string(),
    };
    let trace_path = resolve_trace(trace, config);

    info!(scripts = scripts.len(), "replaying designer scripts");
    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for script in &scripts {
        debug!(script = %script.name, "replaying");

        let mut repo = MemoryFormStore::new();
        let form_id = repo.create_form(&script.name, "");
        repo.update_content(form_id, initial.clone())?;

        let tracer = trace_path.map_or_else(TraceLogger::disabled, TraceLogger::new);
        let mut session = BuilderSession::open(&repo, form_id, id_source(&config.ids.strategy, &config.ids.prefix))?
            .with_tracer(tracer);

        results.push(ScriptRunner::run(script, &mut session, &mut repo));
    }

    let report = ReplayReport::from_results(script_path, results).with_duration(start.elapsed().as_millis());
    let all_passed = report.all_passed();

    let output_content = match resolve_format(format, config) {
        "junit" => generate_junit_xml(&report),
        "json" => serde_json::to_string_pretty(&report)?,
        _ => format_console_report(&report),
    };

    match resolve_output(output, config) {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Load scripts from a single YAML file or a directory of YAML files.
pub fn load_scripts(path: &str) -> Result<Vec<DesignerScript>, Box<dyn Error>> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_dir() {
        return Ok(vec![load_script(path)?]);
    }

    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            scripts.push(load_script(&p.to_string_lossy())?);
        }
    }
    scripts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scripts)
}

// ============================================================================
// stats subcommand
// ============================================================================

pub fn cmd_stats(forms_path: &str, form_id: Option<u64>) -> Result<(), Box<dyn Error>> {
    let store: MemoryFormStore = serde_json::from_str(&std::fs::read_to_string(forms_path)?)?;

    print!("{}", format_stats(&FormStats::from_records(store.forms())));

    if let Some(id) = form_id {
        let record = store.fetch_form(id)?;
        let elements = codec::decode(&record.content)?;
        let table = SubmissionTable::build(&elements, store.submissions_for(id));
        println!("\n{}", record.name);
        print!("{}", format_submission_table(&table));
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read_content(path: &str) -> Result<Vec<ElementInstance>, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(codec::decode(&content)?)
}
