//! Driven port for job application calls.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, BearerToken, CandidateId,
    JobApplication, JobApplicationGroup, UserId,
};

/// Backend job application endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    /// Submit an application with its resume upload.
    async fn apply(
        &self,
        token: &BearerToken,
        submission: &ApplicationSubmission,
    ) -> Result<JobApplication, GatewayError>;

    /// Applications received by the employer account, grouped per job.
    async fn list_for_employer(
        &self,
        token: &BearerToken,
        employer_id: UserId,
    ) -> Result<Vec<JobApplicationGroup>, GatewayError>;

    /// Applications a candidate has submitted.
    async fn list_for_candidate(
        &self,
        token: &BearerToken,
        candidate_id: CandidateId,
    ) -> Result<Vec<JobApplication>, GatewayError>;

    /// Move an application to a new review state.
    async fn update_status(
        &self,
        token: &BearerToken,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<JobApplication, GatewayError>;

    /// Board-wide application count.
    async fn total(&self, token: &BearerToken) -> Result<u64, GatewayError>;
}
