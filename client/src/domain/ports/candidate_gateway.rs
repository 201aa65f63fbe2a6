//! Driven port for candidate profile calls.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::{BearerToken, Candidate, CandidateProfile, ResumeFile, UserId};

/// Backend candidate endpoints. Profiles are addressed by owning account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateGateway: Send + Sync {
    /// Create the signed-in candidate's profile with a resume upload.
    async fn create(
        &self,
        token: &BearerToken,
        profile: &CandidateProfile,
        resume: &ResumeFile,
    ) -> Result<Candidate, GatewayError>;

    /// Fetch the profile owned by `user_id`.
    async fn fetch(&self, token: &BearerToken, user_id: UserId) -> Result<Candidate, GatewayError>;

    /// Replace the profile owned by `user_id`.
    async fn update(
        &self,
        token: &BearerToken,
        user_id: UserId,
        profile: &CandidateProfile,
    ) -> Result<Candidate, GatewayError>;

    /// Delete the profile owned by `user_id`.
    async fn delete(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError>;

    /// Location of the resume stored for `user_id`.
    async fn resume_link(&self, token: &BearerToken, user_id: UserId) -> Result<String, GatewayError>;

    /// Every candidate profile (admin view).
    async fn list(&self, token: &BearerToken) -> Result<Vec<Candidate>, GatewayError>;
}
