//! `jobapplication/*` endpoints.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::Form;

use super::HttpBackend;
use super::candidates::resume_part;
use super::dto::{
    AppliedJobsDto, ApplicationStatusBody, DataDto, JobApplicationDto, JobApplicationsDto,
    TotalApplicationsDto,
};
use super::transport::fetch_json;
use crate::domain::ports::{ApplicationGateway, GatewayError};
use crate::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, BearerToken, CandidateId,
    JobApplication, JobApplicationGroup, UserId,
};

fn submission_form(submission: &ApplicationSubmission) -> Result<Form, GatewayError> {
    Ok(Form::new()
        .part("resume", resume_part(&submission.resume)?)
        .text("job_id", submission.job_id.to_string())
        .text("candidate_id", submission.candidate_id.to_string())
        .text("status", submission.status.as_str()))
}

#[async_trait]
impl ApplicationGateway for HttpBackend {
    async fn apply(
        &self,
        token: &BearerToken,
        submission: &ApplicationSubmission,
    ) -> Result<JobApplication, GatewayError> {
        let request = self
            .authorised(
                Method::POST,
                &format!("jobapplication/apply/{}", submission.job_id),
                token,
            )?
            .multipart(submission_form(submission)?);
        let decoded: JobApplicationDto = fetch_json(request).await?;
        Ok(decoded.job_application)
    }

    async fn list_for_employer(
        &self,
        token: &BearerToken,
        employer_id: UserId,
    ) -> Result<Vec<JobApplicationGroup>, GatewayError> {
        let request = self
            .authorised(Method::GET, "jobapplication/fetchApplications", token)?
            .query(&[("employer_id", employer_id.get())]);
        let decoded: JobApplicationsDto = fetch_json(request).await?;
        Ok(decoded.job_applications)
    }

    async fn list_for_candidate(
        &self,
        token: &BearerToken,
        candidate_id: CandidateId,
    ) -> Result<Vec<JobApplication>, GatewayError> {
        let request = self
            .authorised(Method::GET, "jobapplication/fetchAppliedApplications", token)?
            .query(&[("candidate_id", candidate_id.get())]);
        let decoded: AppliedJobsDto = fetch_json(request).await?;
        Ok(decoded.applied_jobs)
    }

    async fn update_status(
        &self,
        token: &BearerToken,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<JobApplication, GatewayError> {
        let request = self
            .authorised(Method::PUT, &format!("jobapplication/updatestatus/{id}"), token)?
            .json(&ApplicationStatusBody { status });
        let decoded: DataDto<JobApplication> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn total(&self, token: &BearerToken) -> Result<u64, GatewayError> {
        let request = self.authorised(Method::GET, "jobapplication/all", token)?;
        let decoded: TotalApplicationsDto = fetch_json(request).await?;
        Ok(decoded.total_applications)
    }
}
