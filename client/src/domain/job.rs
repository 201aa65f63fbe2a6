//! Job postings and job statistics.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::{JobId, wire};

/// Hiring state of a posting.
///
/// Any status string the client does not know decodes to
/// [`EmploymentStatus::Unknown`] rather than failing the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum EmploymentStatus {
    /// Open for applications.
    Active,
    /// Paused by the employer.
    Inactive,
    /// Position has been filled.
    Filled,
    /// Missing or unrecognised status.
    #[default]
    Unknown,
}

impl EmploymentStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Filled => "Filled",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a known status name, ignoring ASCII case.
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Active, Self::Inactive, Self::Filled]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Status an employer toggles to from the manage-jobs view.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive | Self::Filled | Self::Unknown => Self::Active,
        }
    }
}

impl<'de> Deserialize<'de> for EmploymentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Self::parse).unwrap_or_default())
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job posting fields supplied by an employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    /// Posting title.
    #[serde(default, deserialize_with = "wire::text")]
    pub title: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "wire::text")]
    pub description: String,
    /// Hiring company.
    #[serde(default, deserialize_with = "wire::text")]
    pub company_name: String,
    /// Where the work happens.
    #[serde(default, deserialize_with = "wire::text")]
    pub location: String,
    /// Salary band as displayed.
    #[serde(default, deserialize_with = "wire::text")]
    pub salary_range: String,
    /// Contract type, such as full-time.
    #[serde(default, deserialize_with = "wire::text")]
    pub job_type: String,
    /// Hiring state.
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    /// Comma-separated skills.
    #[serde(default, deserialize_with = "wire::text")]
    pub skills_required: String,
    /// Closing date as displayed.
    #[serde(default, deserialize_with = "wire::text")]
    pub application_deadline: String,
}

/// A stored job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Posting identifier.
    pub id: JobId,
    /// Posting fields.
    #[serde(flatten)]
    pub draft: JobDraft,
}

impl Job {
    /// Attach an identifier to posting fields.
    pub fn new(id: JobId, draft: JobDraft) -> Self {
        Self { id, draft }
    }

    /// Posting title.
    pub fn title(&self) -> &str {
        self.draft.title.as_str()
    }

    /// Hiring state.
    pub fn employment_status(&self) -> EmploymentStatus {
        self.draft.employment_status
    }
}

/// Site-wide job counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    /// Every posting on the board.
    pub total_jobs: u64,
    /// Postings currently open.
    pub active_jobs: u64,
}

/// Optional title and location terms for a job search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearch {
    /// Title fragment.
    pub title: Option<String>,
    /// Location fragment.
    pub location: Option<String>,
}

impl JobSearch {
    /// Query-string pairs for the non-empty terms, title first.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [("title", self.title.as_deref()), ("location", self.location.as_deref())]
            .into_iter()
            .filter_map(|(key, value)| value.filter(|term| !term.is_empty()).map(|term| (key, term)))
            .collect()
    }
}
