use serde::{Deserialize, Serialize};

use crate::script::script_model::ScriptResult;

// ============================================================================
// Replay report: aggregates multiple ScriptResult instances
// ============================================================================

/// Aggregated outcome of replaying a batch of designer scripts.
///
/// Consumed by the console and JUnit reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub suite_name: String,

    pub total: usize,

    pub passed: usize,

    pub failed: usize,

    /// Wall-clock time for the whole batch in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub script_results: Vec<ScriptResult>,
}

impl ReplayReport {
    pub fn from_results(suite_name: &str, results: Vec<ScriptResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            suite_name: suite_name.to_string(),
            total,
            passed,
            failed: total - passed,
            duration_ms: None,
            script_results: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
