use std::{fs::OpenOptions, io::Write, sync::Mutex};

use tracing::warn;

use crate::trace::trace::GestureEvent;

/// Appends gesture events as JSON lines. Any I/O failure degrades to a
/// warning; tracing never interrupts a gesture.
#[derive(Debug, Default)]
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!(path, error = %e, "could not open gesture trace file");
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &GestureEvent) {
        let Some(file_mutex) = &self.file else {
            return;
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!(error = %e, "failed to serialize gesture event");
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "gesture trace lock poisoned");
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            warn!(error = %e, "failed to write gesture event");
        }
    }
}
