//! Core of a drag-and-drop form designer: the element kind registry, the
//! designer state store, the drag-interaction interpreter and the
//! submission validator, plus the persistence artifact and a replay harness.

pub mod cli;
pub mod content;
pub mod designer;
pub mod element;
pub mod error;
pub mod report;
pub mod script;
pub mod submission;
pub mod trace;

/// Install the stderr subscriber. `RUST_LOG` wins; otherwise each `-v`
/// raises the level one step from `warn`.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "form_designer=warn",
        1 => "form_designer=info",
        2 => "form_designer=debug",
        _ => "form_designer=trace",
    }
}
