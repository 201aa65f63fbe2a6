//! Driven port for employer profile calls.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::{BearerToken, Employer, EmployerProfile, UserId};

/// Backend employer endpoints. Profiles are addressed by owning account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployerGateway: Send + Sync {
    /// Create a profile owned by `user_id`.
    async fn create(
        &self,
        token: &BearerToken,
        user_id: UserId,
        profile: &EmployerProfile,
    ) -> Result<Employer, GatewayError>;

    /// Fetch the profile owned by `user_id`.
    async fn fetch(&self, token: &BearerToken, user_id: UserId) -> Result<Employer, GatewayError>;

    /// Replace the profile owned by `user_id`.
    async fn update(
        &self,
        token: &BearerToken,
        user_id: UserId,
        profile: &EmployerProfile,
    ) -> Result<Employer, GatewayError>;

    /// Delete the profile owned by `user_id`.
    async fn delete(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError>;

    /// Every employer profile (admin view).
    async fn list(&self, token: &BearerToken) -> Result<Vec<Employer>, GatewayError>;
}
