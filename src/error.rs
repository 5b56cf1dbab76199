use thiserror::Error;

// ============================================================================
// Configuration errors
// ============================================================================

/// A kind identifier that names no registered capability bundle.
///
/// Always fatal for the operation that hit it: callers never substitute a
/// default kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("element kind '{0}' is not registered")]
    UnregisteredKind(String),
}

// ============================================================================
// Drag gestures
// ============================================================================

/// Why a drag-end was discarded. The element list is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureAbort {
    #[error("drop had no active drag payload")]
    MissingActive,

    #[error("drop landed outside any droppable region")]
    MissingOver,

    #[error("malformed drag payload: {0}")]
    MalformedPayload(String),

    #[error("malformed hover target: {0}")]
    MalformedTarget(String),

    #[error("element '{0}' is not in the current list")]
    ElementNotFound(String),

    #[error("element id '{0}' is already in the list")]
    DuplicateId(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ============================================================================
// Persistence artifact
// ============================================================================

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("form content is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode form content: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("duplicate element id '{0}' in form content")]
    DuplicateId(String),
}

// ============================================================================
// External collaborators
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("form {0} was not found")]
    FormNotFound(u64),

    #[error("no form is shared at '{0}'")]
    ShareUrlNotFound(String),

    #[error("form {0} is published and can no longer be edited")]
    Published(u64),

    #[error("request to {operation} failed: {message}")]
    Transport { operation: String, message: String },
}

// ============================================================================
// Properties editor
// ============================================================================

/// One property rule violation from a properties-editor draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{key}: {message}")]
pub struct PropertyError {
    pub key: String,
    pub message: String,
}

impl PropertyError {
    pub fn new(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Replay scripts
// ============================================================================

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

// ============================================================================
// Builder session
// ============================================================================

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Content(#[from] ContentError),
}
