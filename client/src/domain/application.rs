//! Job applications and the per-job groups employers review.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::{ApplicationId, Candidate, CandidateId, Job, JobId, ResumeFile, wire};

/// Review state of an application.
///
/// Unrecognised states decode to [`ApplicationStatus::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ApplicationStatus {
    /// Not yet looked at.
    #[default]
    Pending,
    /// Seen by the employer.
    Reviewed,
    /// Moved to the shortlist.
    Shortlisted,
    /// Turned down.
    Rejected,
    /// Missing or unrecognised state.
    Unknown,
}

impl ApplicationStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Shortlisted => "Shortlisted",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a known status name, ignoring ASCII case.
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Pending, Self::Reviewed, Self::Shortlisted, Self::Rejected]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Self::parse).unwrap_or(Self::Unknown))
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored application with the job and candidate embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    /// Application identifier.
    pub id: ApplicationId,
    /// Job applied to.
    pub job: Job,
    /// Applicant.
    pub candidate: Candidate,
    /// Review state.
    #[serde(default)]
    pub status: ApplicationStatus,
    /// Location of the resume submitted with the application.
    #[serde(default, deserialize_with = "wire::text")]
    pub resume: String,
}

/// All applications received for one of an employer's jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationGroup {
    /// Title of the job.
    #[serde(default, deserialize_with = "wire::text")]
    pub job_title: String,
    /// Job identifier.
    pub job_id: JobId,
    /// Applications received.
    pub applications: Vec<JobApplication>,
    /// Number of applications, derived on receipt.
    #[serde(default)]
    pub applications_count: usize,
}

impl JobApplicationGroup {
    /// Recompute `applications_count` from the application list.
    #[must_use]
    pub fn with_derived_count(mut self) -> Self {
        self.applications_count = self.applications.len();
        self
    }

    /// Set the status of the application with `id`, if this group holds it.
    pub fn patch_status(&mut self, id: ApplicationId, status: ApplicationStatus) {
        self.applications
            .iter_mut()
            .filter(|application| application.id == id)
            .for_each(|application| application.status = status);
    }
}

/// Fields submitted with an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    /// Job applied to.
    pub job_id: JobId,
    /// Applicant profile.
    pub candidate_id: CandidateId,
    /// Initial review state, normally pending.
    pub status: ApplicationStatus,
    /// Resume uploaded with the application.
    pub resume: ResumeFile,
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Sample applications shared by tests.
    use super::*;
    use crate::domain::EmploymentStatus;
    use crate::domain::candidate::fixtures::candidate;
    use crate::domain::job::fixtures::job;

    pub(crate) fn application(id: u64, job_id: u64, title: &str, status: ApplicationStatus) -> JobApplication {
        JobApplication {
            id: ApplicationId::new(id),
            job: job(job_id, title, EmploymentStatus::Active),
            candidate: candidate(id, id, "Ada"),
            status,
            resume: String::new(),
        }
    }

    pub(crate) fn group(job_id: u64, title: &str, applications: Vec<JobApplication>) -> JobApplicationGroup {
        JobApplicationGroup {
            job_title: title.to_owned(),
            job_id: JobId::new(job_id),
            applications,
            applications_count: 0,
        }
        .with_derived_count()
    }
}
