use clap::Parser;
use form_designer::{
    cli::{
        commands::{cmd_replay, cmd_validate, load_scripts, render_all},
        config::{AppConfig, Cli, Commands, load_config, resolve_format, resolve_output, resolve_trace},
    },
    content::codec,
    element::{
        kind::ElementKind,
        render::{ViewKind, Widget},
    },
    verbosity_filter,
};

use crate::common::element;

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_palette() {
    let cli = Cli::parse_from(["form-designer", "palette"]);
    assert!(matches!(cli.command, Commands::Palette));
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    assert!(cli.trace.is_none());
}

#[test]
fn cli_parse_preview_defaults_to_designer_view() {
    let cli = Cli::parse_from(["form-designer", "preview", "--content", "form.json"]);
    match cli.command {
        Commands::Preview { content, view } => {
            assert_eq!(content, "form.json");
            assert_eq!(view, "designer");
        }
        _ => panic!("Expected Preview command"),
    }
}

#[test]
fn cli_parse_validate() {
    let cli = Cli::parse_from([
        "form-designer",
        "validate",
        "--content",
        "form.json",
        "--values",
        "values.json",
        "--format",
        "json",
    ]);
    match cli.command {
        Commands::Validate { content, values, format } => {
            assert_eq!(content, "form.json");
            assert_eq!(values, "values.json");
            assert_eq!(format.as_deref(), Some("json"));
        }
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn cli_parse_replay_all_args() {
    let cli = Cli::parse_from([
        "form-designer",
        "replay",
        "--script",
        "scripts/",
        "--content",
        "start.json",
        "--format",
        "junit",
        "-o",
        "report.xml",
    ]);
    match cli.command {
        Commands::Replay {
            script,
            content,
            format,
            output,
        } => {
            assert_eq!(script, "scripts/");
            assert_eq!(content.as_deref(), Some("start.json"));
            assert_eq!(format.as_deref(), Some("junit"));
            assert_eq!(output.as_deref(), Some("report.xml"));
        }
        _ => panic!("Expected Replay command"),
    }
}

#[test]
fn cli_parse_stats() {
    let cli = Cli::parse_from(["form-designer", "stats", "--forms", "forms.json", "--form-id", "3"]);
    match cli.command {
        Commands::Stats { forms, form_id } => {
            assert_eq!(forms, "forms.json");
            assert_eq!(form_id, Some(3));
        }
        _ => panic!("Expected Stats command"),
    }
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "form-designer",
        "palette",
        "-vv",
        "--config",
        "custom.yaml",
        "--trace",
        "gestures.jsonl",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    assert_eq!(cli.trace.as_deref(), Some("gestures.jsonl"));
}

#[test]
fn verbosity_raises_log_level() {
    assert_eq!(verbosity_filter(0), "form_designer=warn");
    assert_eq!(verbosity_filter(1), "form_designer=info");
    assert_eq!(verbosity_filter(2), "form_designer=debug");
    assert_eq!(verbosity_filter(9), "form_designer=trace");
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.output.format, "console");
    assert_eq!(config.ids.strategy, "uuid");
}

#[test]
fn config_default_values() {
    let config = AppConfig::default();
    assert_eq!(config.output.format, "console");
    assert!(config.output.path.is_none());
    assert!(config.trace.path.is_none());
    assert_eq!(config.ids.strategy, "uuid");
    assert_eq!(config.ids.prefix, "el");
}

#[test]
fn config_partial_yaml() {
    let yaml = r#"
ids:
  strategy: sequential
trace:
  path: "gestures.jsonl"
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.ids.strategy, "sequential");
    assert_eq!(config.ids.prefix, "el");
    assert_eq!(config.trace.path.as_deref(), Some("gestures.jsonl"));
    assert_eq!(config.output.format, "console");
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form-designer.yaml");
    std::fs::write(&path, "output: [not, a, map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.output.format, "console");
}

#[test]
fn cli_values_override_config() {
    let mut config = AppConfig::default();
    config.output.format = "junit".into();
    config.output.path = Some("from-config.xml".into());
    config.trace.path = Some("config.jsonl".into());

    assert_eq!(resolve_format(Some("json"), &config), "json");
    assert_eq!(resolve_format(None, &config), "junit");
    assert_eq!(resolve_output(Some("cli.xml"), &config), Some("cli.xml"));
    assert_eq!(resolve_output(None, &config), Some("from-config.xml"));
    assert_eq!(resolve_trace(None, &config), Some("config.jsonl"));
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn render_all_uses_requested_view() {
    let elements = vec![element("sp", ElementKind::SpacerField)];

    let form = render_all(&elements, ViewKind::Form);
    assert_eq!(form, vec![("sp".to_string(), vec![Widget::Spacer { height: 20 }])]);

    let properties = render_all(&elements, ViewKind::Properties);
    assert!(matches!(properties[0].1[0], Widget::PropertyEditor { .. }));
}

#[test]
fn validate_command_reports_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("form.json");
    let values = dir.path().join("values.json");

    let elements = vec![element("name", ElementKind::TextField).with_attr("required", true)];
    std::fs::write(&content, codec::encode(&elements).unwrap()).unwrap();

    std::fs::write(&values, r#"{"name": ""}"#).unwrap();
    let ok = cmd_validate(content.to_str().unwrap(), values.to_str().unwrap(), None, &AppConfig::default()).unwrap();
    assert!(!ok);

    std::fs::write(&values, r#"{"name": "Ada"}"#).unwrap();
    let ok = cmd_validate(content.to_str().unwrap(), values.to_str().unwrap(), None, &AppConfig::default()).unwrap();
    assert!(ok);
}

#[test]
fn load_scripts_reads_directory_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.yaml"), "name: zeta\nsteps: []\n").unwrap();
    std::fs::write(dir.path().join("a.yml"), "name: alpha\nsteps: []\n").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let scripts = load_scripts(dir.path().to_str().unwrap()).unwrap();
    let names: Vec<&str> = scripts.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[test]
fn replay_command_writes_report_and_trace() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.yaml");
    let start = dir.path().join("start.json");
    let report = dir.path().join("report.xml");
    let trace = dir.path().join("gestures.jsonl");

    std::fs::write(
        &start,
        codec::encode(&[element("existing", ElementKind::TitleField)]).unwrap(),
    )
    .unwrap();
    std::fs::write(
        &script,
        r#"
name: append one
steps:
  - action: drag
    active: { isFromPalette: true, kind: TextField }
    over: { isDropZone: true }
  - action: assert
    assertions:
      - type: order
        expected: [existing, f-1]
"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.ids.strategy = "sequential".into();
    config.ids.prefix = "f".into();

    let passed = cmd_replay(
        script.to_str().unwrap(),
        start.to_str(),
        Some("junit"),
        report.to_str(),
        trace.to_str(),
        &config,
    )
    .unwrap();

    assert!(passed);

    let xml = std::fs::read_to_string(&report).unwrap();
    assert!(xml.contains("tests=\"1\" failures=\"0\""));
    assert!(xml.contains("<testcase name=\"append one\""));

    let lines = std::fs::read_to_string(&trace).unwrap();
    assert_eq!(lines.lines().count(), 1);
}
