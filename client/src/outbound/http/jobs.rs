//! `jobs/*` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::HttpBackend;
use super::dto::{ActiveJobsDto, DataDto, EmploymentStatusBody, JobCreatedDto, MaybeEnveloped};
use super::transport::{fetch_json, fire};
use crate::domain::ports::{GatewayError, JobGateway};
use crate::domain::{
    BearerToken, EmploymentStatus, Job, JobDraft, JobId, JobSearch, JobStats, UserId,
};

#[async_trait]
impl JobGateway for HttpBackend {
    async fn create(&self, token: &BearerToken, draft: &JobDraft) -> Result<Job, GatewayError> {
        let request = self.authorised(Method::POST, "jobs/create", token)?.json(draft);
        let decoded: JobCreatedDto = fetch_json(request).await?;
        Ok(decoded.job)
    }

    async fn list_all(&self) -> Result<Vec<Job>, GatewayError> {
        let request = self.public(Method::GET, "jobs/all")?;
        let decoded: DataDto<Vec<Job>> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn list_for_employer(
        &self,
        token: &BearerToken,
        user_id: UserId,
    ) -> Result<Vec<Job>, GatewayError> {
        let request = self.authorised(Method::GET, &format!("jobs/fetch/{user_id}"), token)?;
        let decoded: DataDto<Vec<Job>> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn count_active(&self, token: &BearerToken, user_id: UserId) -> Result<u64, GatewayError> {
        let request = self.authorised(Method::GET, &format!("jobs/ActiveJobs/{user_id}"), token)?;
        let decoded: ActiveJobsDto = fetch_json(request).await?;
        Ok(decoded.total_active_jobs)
    }

    async fn update(&self, token: &BearerToken, job: &Job) -> Result<Job, GatewayError> {
        let request = self
            .authorised(Method::PUT, &format!("jobs/update/{}", job.id), token)?
            .json(job);
        let decoded: MaybeEnveloped<Job> = fetch_json(request).await?;
        Ok(decoded.into_inner())
    }

    async fn delete(&self, token: &BearerToken, id: JobId) -> Result<(), GatewayError> {
        let request = self.authorised(Method::DELETE, &format!("jobs/delete/{id}"), token)?;
        fire(request).await
    }

    async fn search(&self, token: &BearerToken, search: &JobSearch) -> Result<Vec<Job>, GatewayError> {
        let request = self
            .authorised(Method::GET, "jobs/all/data", token)?
            .query(&search.query_pairs());
        let decoded: DataDto<Vec<Job>> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn set_employment_status(
        &self,
        token: &BearerToken,
        id: JobId,
        status: EmploymentStatus,
    ) -> Result<Job, GatewayError> {
        let request = self
            .authorised(
                Method::PUT,
                &format!("jobs/update/employment-status/{id}"),
                token,
            )?
            .json(&EmploymentStatusBody {
                employment_status: status,
            });
        let decoded: DataDto<Job> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn stats(&self, token: &BearerToken) -> Result<JobStats, GatewayError> {
        let request = self.authorised(Method::GET, "jobs/status", token)?;
        fetch_json(request).await
    }
}
