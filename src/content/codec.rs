use std::collections::HashSet;

use sha1::{Digest, Sha1};

use crate::{element::instance::ElementInstance, error::ContentError};

/// Encode the ordered element list as the persisted content artifact
/// (a JSON array of `{id, type, extraAttributes}`).
pub fn encode(elements: &[ElementInstance]) -> Result<String, ContentError> {
    serde_json::to_string(elements).map_err(ContentError::Encode)
}

/// Parse a content artifact back into an element list.
///
/// Blank content is an empty form. Unregistered kinds and duplicate ids are
/// rejected outright.
pub fn decode(content: &str) -> Result<Vec<ElementInstance>, ContentError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let elements: Vec<ElementInstance> = serde_json::from_str(content).map_err(ContentError::Decode)?;

    let mut seen = HashSet::new();
    for el in &elements {
        if !seen.insert(el.id.as_str()) {
            return Err(ContentError::DuplicateId(el.id.clone()));
        }
    }

    Ok(elements)
}

/// Stable digest of a list's encoded form, used to detect unsaved edits.
pub fn fingerprint(elements: &[ElementInstance]) -> Result<String, ContentError> {
    let encoded = encode(elements)?;

    let mut hasher = Sha1::new();
    hasher.update(encoded.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
