use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    designer::drag::{DragPayload, HoverTarget},
    element::kind::ElementKind,
    error::ScriptError,
};

/// A replayable designer session, written by hand or recorded, and kept as
/// YAML next to the form it exercises.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignerScript {
    /// Human-readable name for this script
    pub name: String,

    /// Ordered list of steps to replay
    pub steps: Vec<ScriptStep>,
}

/// A single designer interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Full gesture: drag-start with `active`, drag-end over `over`.
    /// Either side may be omitted to model a drop outside any target.
    Drag {
        #[serde(default)]
        active: Option<DragPayload>,
        #[serde(default)]
        over: Option<HoverTarget>,
    },

    /// Drag-start followed by drag-cancel
    Cancel { active: DragPayload },

    /// Click an element (or the bare canvas, with no element)
    Select {
        #[serde(default)]
        element: Option<String>,
    },

    /// Type into the properties editor of the selected element
    Edit { property: String, value: String },

    /// Focus leaves the properties editor
    Commit,

    /// Trash button on an element
    Remove { element: String },

    /// Save the current list to the form
    Save,

    /// Check the designer state
    Assert { assertions: Vec<AssertionSpec> },
}

/// A single check against the designer state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    /// Element ids, top to bottom
    Order { expected: Vec<String> },

    /// Element kinds, top to bottom
    Kinds { expected: Vec<ElementKind> },

    Length { expected: usize },

    Selected { expected: Option<String> },

    /// One attribute of one element
    Attribute { element: String, key: String, expected: Value },

    /// How the most recent drop resolved: created, moved, unchanged, aborted
    LastDrop { expected: String },

    /// Number of rule violations from the most recent commit
    PropertyErrors { expected: usize },

    UnsavedChanges { expected: bool },
}

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub spec: AssertionSpec,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    pub message: Option<String>,
}

/// Result of replaying a complete script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script_name: String,

    /// Whether every step ran and every assertion passed
    pub passed: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Final element list, encoded as form content
    pub content: Option<String>,

    /// Error that stopped the replay (not an assertion failure)
    pub error: Option<String>,
}

/// Load a script from a YAML file.
pub fn load_script(path: &str) -> Result<DesignerScript, ScriptError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_yaml::from_str(&yaml).map_err(|source| ScriptError::Parse {
        path: path.to_string(),
        source,
    })
}
