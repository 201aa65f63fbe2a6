//! Driven port for job posting calls.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::{BearerToken, EmploymentStatus, Job, JobDraft, JobId, JobSearch, JobStats, UserId};

/// Backend job endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Publish a posting.
    async fn create(&self, token: &BearerToken, draft: &JobDraft) -> Result<Job, GatewayError>;

    /// Every posting on the board. Public.
    async fn list_all(&self) -> Result<Vec<Job>, GatewayError>;

    /// Postings owned by the employer account `user_id`.
    async fn list_for_employer(
        &self,
        token: &BearerToken,
        user_id: UserId,
    ) -> Result<Vec<Job>, GatewayError>;

    /// Number of open postings owned by `user_id`.
    async fn count_active(&self, token: &BearerToken, user_id: UserId) -> Result<u64, GatewayError>;

    /// Replace a posting.
    async fn update(&self, token: &BearerToken, job: &Job) -> Result<Job, GatewayError>;

    /// Remove a posting.
    async fn delete(&self, token: &BearerToken, id: JobId) -> Result<(), GatewayError>;

    /// Postings matching the title and location terms.
    async fn search(&self, token: &BearerToken, search: &JobSearch) -> Result<Vec<Job>, GatewayError>;

    /// Change a posting's hiring state.
    async fn set_employment_status(
        &self,
        token: &BearerToken,
        id: JobId,
        status: EmploymentStatus,
    ) -> Result<Job, GatewayError>;

    /// Board-wide counters.
    async fn stats(&self, token: &BearerToken) -> Result<JobStats, GatewayError>;
}
