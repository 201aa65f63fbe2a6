//! `employer/*` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::HttpBackend;
use super::dto::{DataDto, MaybeEnveloped};
use super::transport::{fetch_json, fire};
use crate::domain::ports::{EmployerGateway, GatewayError};
use crate::domain::{BearerToken, Employer, EmployerProfile, NewEmployer, UserId};

#[async_trait]
impl EmployerGateway for HttpBackend {
    async fn create(
        &self,
        token: &BearerToken,
        user_id: UserId,
        profile: &EmployerProfile,
    ) -> Result<Employer, GatewayError> {
        let request = self
            .authorised(Method::POST, "employer/information", token)?
            .json(&NewEmployer { user_id, profile });
        let decoded: MaybeEnveloped<Employer> = fetch_json(request).await?;
        Ok(decoded.into_inner())
    }

    async fn fetch(&self, token: &BearerToken, user_id: UserId) -> Result<Employer, GatewayError> {
        let request = self.authorised(
            Method::GET,
            &format!("employer/information/{user_id}"),
            token,
        )?;
        let decoded: DataDto<Employer> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn update(
        &self,
        token: &BearerToken,
        user_id: UserId,
        profile: &EmployerProfile,
    ) -> Result<Employer, GatewayError> {
        let request = self
            .authorised(
                Method::PUT,
                &format!("employer/information/{user_id}"),
                token,
            )?
            .json(profile);
        let decoded: DataDto<Employer> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn delete(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError> {
        let request = self.authorised(
            Method::DELETE,
            &format!("employer/information/{user_id}"),
            token,
        )?;
        fire(request).await
    }

    async fn list(&self, token: &BearerToken) -> Result<Vec<Employer>, GatewayError> {
        let request = self.authorised(Method::GET, "employer/all", token)?;
        let decoded: DataDto<Vec<Employer>> = fetch_json(request).await?;
        Ok(decoded.data)
    }
}
