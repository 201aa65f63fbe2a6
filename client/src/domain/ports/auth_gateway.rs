//! Driven port for account and authentication calls.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::{BearerToken, LoginCredentials, PasswordChange, Registration, UserId, UserListItem};

/// Backend account endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account and return its bearer token.
    async fn register(&self, registration: &Registration) -> Result<BearerToken, GatewayError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, GatewayError>;

    /// Change the signed-in user's password.
    async fn change_password(
        &self,
        token: &BearerToken,
        change: &PasswordChange,
    ) -> Result<(), GatewayError>;

    /// Change the signed-in user's email. Returns the email the backend
    /// confirmed, if it echoed one.
    async fn update_email(
        &self,
        token: &BearerToken,
        new_email: &str,
    ) -> Result<Option<String>, GatewayError>;

    /// Delete the signed-in user's own account.
    async fn delete_account(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError>;

    /// List every account (admin only).
    async fn list_users(&self, token: &BearerToken) -> Result<Vec<UserListItem>, GatewayError>;

    /// Delete another account (admin only).
    async fn delete_user(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError>;
}
