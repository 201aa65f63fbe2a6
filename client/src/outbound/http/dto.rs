//! Wire envelopes for the job board REST API.
//!
//! Records are decoded straight into domain types; these structs only strip
//! the envelope each endpoint wraps them in.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ApplicationStatus, Candidate, EmploymentStatus, Job, JobApplication, JobApplicationGroup, Role,
    UserId, UserListItem,
};

#[derive(Debug, Deserialize)]
pub(super) struct TokenDto {
    pub(super) token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersDto {
    pub(super) users: Vec<UserListItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct NewEmailDto {
    #[serde(rename = "newEmail", default)]
    pub(super) new_email: Option<String>,
}

/// `{ "data": ... }`, the most common envelope.
#[derive(Debug, Deserialize)]
pub(super) struct DataDto<T> {
    pub(super) data: T,
}

/// Endpoints that answer with either `{ "data": record }` or the bare record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum MaybeEnveloped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub(super) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateCreatedDto {
    pub(super) candidate: Candidate,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResumeLinkDto {
    pub(super) resume_link: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct JobCreatedDto {
    pub(super) job: Job,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ActiveJobsDto {
    pub(super) total_active_jobs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JobApplicationDto {
    pub(super) job_application: JobApplication,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JobApplicationsDto {
    pub(super) job_applications: Vec<JobApplicationGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AppliedJobsDto {
    pub(super) applied_jobs: Vec<JobApplication>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TotalApplicationsDto {
    pub(super) total_applications: u64,
}

/// Error bodies: a JSON string, or an object carrying `message` or `error`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ErrorBodyDto {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    },
}

impl ErrorBodyDto {
    pub(super) fn into_message(self) -> Option<String> {
        match self {
            Self::Text(message) => Some(message),
            Self::Object { message, error } => message.or(error),
        }
        .filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterBody<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) role: Role,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginBody<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChangePasswordBody<'a> {
    pub(super) current_password: &'a str,
    pub(super) new_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateEmailBody<'a> {
    pub(super) new_email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DeleteAccountBody {
    pub(super) user_id: UserId,
}

#[derive(Debug, Serialize)]
pub(super) struct EmploymentStatusBody {
    pub(super) employment_status: EmploymentStatus,
}

#[derive(Debug, Serialize)]
pub(super) struct ApplicationStatusBody {
    pub(super) status: ApplicationStatus,
}
