use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BoundaryError;

// ============================================================================
// Records
// ============================================================================

/// A stored form: metadata plus its content artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Encoded element list (see `content::codec`).
    #[serde(default = "empty_content")]
    pub content: String,

    #[serde(default)]
    pub published: bool,

    #[serde(rename = "shareURL")]
    pub share_url: String,

    #[serde(default, rename = "numVisits")]
    pub visits: u64,

    #[serde(default)]
    pub submissions: u64,
}

fn empty_content() -> String {
    "[]".to_string()
}

/// One stored submission: the serialized value map and when it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub form_id: u64,
    pub content: String,
    pub submitted_at_ms: u128,
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStats {
    pub visits: u64,
    pub submissions: u64,
    pub submission_rate: f64,
    pub bounce_rate: f64,
}

impl FormStats {
    /// Aggregate visits and submissions across forms.
    ///
    /// Submission rate is a percentage of visits (0 with no visits); bounce
    /// rate is its complement.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FormRecord>) -> Self {
        let (visits, submissions) = records
            .into_iter()
            .fold((0u64, 0u64), |(v, s), r| (v + r.visits, s + r.submissions));

        let submission_rate = if visits > 0 {
            submissions as f64 / visits as f64 * 100.0
        } else {
            0.0
        };

        Self {
            visits,
            submissions,
            submission_rate,
            bounce_rate: 100.0 - submission_rate,
        }
    }
}

// ============================================================================
// Collaborator boundaries
// ============================================================================

/// Where form records live. Implementations own the transport and storage.
pub trait FormRepository {
    fn fetch_form(&self, id: u64) -> Result<FormRecord, BoundaryError>;

    fn fetch_by_share_url(&self, share_url: &str) -> Result<FormRecord, BoundaryError>;

    fn update_content(&mut self, id: u64, content: String) -> Result<(), BoundaryError>;

    fn publish(&mut self, id: u64) -> Result<(), BoundaryError>;
}

/// Where filled-in submissions go. Success or failure only.
pub trait SubmissionSink {
    fn submit_form(&mut self, share_url: &str, content: String) -> Result<(), BoundaryError>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// Process-local store backing the CLI and tests. Also loadable from and
/// savable to a JSON file of records.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryFormStore {
    forms: BTreeMap<u64, FormRecord>,
    #[serde(default)]
    submissions: Vec<SubmissionRecord>,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_form(&mut self, name: &str, description: &str) -> u64 {
        let id = self.forms.keys().next_back().map_or(1, |last| last + 1);
        self.forms.insert(
            id,
            FormRecord {
                id,
                name: name.to_string(),
                description: description.to_string(),
                content: empty_content(),
                published: false,
                share_url: Uuid::new_v4().to_string(),
                visits: 0,
                submissions: 0,
            },
        );
        id
    }

    pub fn insert(&mut self, record: FormRecord) {
        self.forms.insert(record.id, record);
    }

    pub fn forms(&self) -> impl Iterator<Item = &FormRecord> {
        self.forms.values()
    }

    pub fn submissions_for(&self, form_id: u64) -> impl Iterator<Item = &SubmissionRecord> {
        self.submissions.iter().filter(move |s| s.form_id == form_id)
    }

    /// Count a visit to the public submission page.
    pub fn record_visit(&mut self, share_url: &str) -> Result<(), BoundaryError> {
        let form = self.by_share_url_mut(share_url)?;
        form.visits += 1;
        Ok(())
    }

    fn by_share_url_mut(&mut self, share_url: &str) -> Result<&mut FormRecord, BoundaryError> {
        self.forms
            .values_mut()
            .find(|f| f.share_url == share_url && f.published)
            .ok_or_else(|| BoundaryError::ShareUrlNotFound(share_url.to_string()))
    }

    fn editable(&mut self, id: u64) -> Result<&mut FormRecord, BoundaryError> {
        let form = self.forms.get_mut(&id).ok_or(BoundaryError::FormNotFound(id))?;
        if form.published {
            return Err(BoundaryError::Published(id));
        }
        Ok(form)
    }
}

impl FormRepository for MemoryFormStore {
    fn fetch_form(&self, id: u64) -> Result<FormRecord, BoundaryError> {
        self.forms.get(&id).cloned().ok_or(BoundaryError::FormNotFound(id))
    }

    /// Only published forms are reachable through their share url.
    fn fetch_by_share_url(&self, share_url: &str) -> Result<FormRecord, BoundaryError> {
        self.forms
            .values()
            .find(|f| f.share_url == share_url && f.published)
            .cloned()
            .ok_or_else(|| BoundaryError::ShareUrlNotFound(share_url.to_string()))
    }

    fn update_content(&mut self, id: u64, content: String) -> Result<(), BoundaryError> {
        self.editable(id)?.content = content;
        Ok(())
    }

    fn publish(&mut self, id: u64) -> Result<(), BoundaryError> {
        self.editable(id)?.published = true;
        Ok(())
    }
}

impl SubmissionSink for MemoryFormStore {
    fn submit_form(&mut self, share_url: &str, content: String) -> Result<(), BoundaryError> {
        let form = self.by_share_url_mut(share_url)?;
        form.submissions += 1;
        let form_id = form.id;

        let submitted_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        self.submissions.push(SubmissionRecord {
            form_id,
            content,
            submitted_at_ms,
        });
        Ok(())
    }
}
