//! `users/*` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::HttpBackend;
use super::dto::{
    ChangePasswordBody, DeleteAccountBody, LoginBody, NewEmailDto, RegisterBody, TokenDto,
    UpdateEmailBody, UsersDto,
};
use super::transport::{fetch_json, fire};
use crate::domain::ports::{AuthGateway, GatewayError};
use crate::domain::{
    BearerToken, LoginCredentials, PasswordChange, Registration, UserId, UserListItem,
};

#[async_trait]
impl AuthGateway for HttpBackend {
    async fn register(&self, registration: &Registration) -> Result<BearerToken, GatewayError> {
        let body = RegisterBody {
            name: registration.name(),
            email: registration.email(),
            password: registration.password(),
            role: registration.role(),
        };
        let request = self.public(Method::POST, "users/register")?.json(&body);
        let decoded: TokenDto = fetch_json(request).await?;
        Ok(BearerToken::new(decoded.token))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, GatewayError> {
        let body = LoginBody {
            email: credentials.email(),
            password: credentials.password(),
        };
        let request = self.public(Method::POST, "users/login")?.json(&body);
        let decoded: TokenDto = fetch_json(request).await?;
        Ok(BearerToken::new(decoded.token))
    }

    async fn change_password(
        &self,
        token: &BearerToken,
        change: &PasswordChange,
    ) -> Result<(), GatewayError> {
        let body = ChangePasswordBody {
            current_password: change.current(),
            new_password: change.replacement(),
        };
        let request = self
            .authorised(Method::PUT, "users/change-password", token)?
            .json(&body);
        fire(request).await
    }

    async fn update_email(
        &self,
        token: &BearerToken,
        new_email: &str,
    ) -> Result<Option<String>, GatewayError> {
        let request = self
            .authorised(Method::PUT, "users/update-email", token)?
            .json(&UpdateEmailBody { new_email });
        let decoded: NewEmailDto = fetch_json(request).await?;
        Ok(decoded.new_email)
    }

    async fn delete_account(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError> {
        let request = self
            .authorised(Method::DELETE, "users/delete-account", token)?
            .json(&DeleteAccountBody { user_id });
        fire(request).await
    }

    async fn list_users(&self, token: &BearerToken) -> Result<Vec<UserListItem>, GatewayError> {
        let request = self.authorised(Method::GET, "users/all", token)?;
        let decoded: UsersDto = fetch_json(request).await?;
        Ok(decoded.users)
    }

    async fn delete_user(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError> {
        let request = self.authorised(Method::DELETE, &format!("users/{user_id}"), token)?;
        fire(request).await
    }
}
