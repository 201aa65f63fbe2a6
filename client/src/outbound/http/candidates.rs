//! `candidate/*` endpoints.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::HttpBackend;
use super::dto::{CandidateCreatedDto, DataDto, ResumeLinkDto};
use super::transport::{fetch_json, fire};
use crate::domain::ports::{CandidateGateway, GatewayError};
use crate::domain::{BearerToken, Candidate, CandidateProfile, ResumeFile, UserId};

/// Multipart part for an uploaded resume.
pub(super) fn resume_part(resume: &ResumeFile) -> Result<Part, GatewayError> {
    Part::bytes(resume.bytes.clone())
        .file_name(resume.file_name.clone())
        .mime_str(&resume.content_type)
        .map_err(|err| GatewayError::invalid_request(format!("invalid resume type: {err}")))
}

fn profile_form(profile: &CandidateProfile, resume: &ResumeFile) -> Result<Form, GatewayError> {
    let form = profile
        .form_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value.to_owned()));
    Ok(form.part("resume", resume_part(resume)?))
}

#[async_trait]
impl CandidateGateway for HttpBackend {
    async fn create(
        &self,
        token: &BearerToken,
        profile: &CandidateProfile,
        resume: &ResumeFile,
    ) -> Result<Candidate, GatewayError> {
        let request = self
            .authorised(Method::POST, "candidate/information", token)?
            .multipart(profile_form(profile, resume)?);
        let decoded: CandidateCreatedDto = fetch_json(request).await?;
        Ok(decoded.candidate)
    }

    async fn fetch(&self, token: &BearerToken, user_id: UserId) -> Result<Candidate, GatewayError> {
        let request = self.authorised(
            Method::GET,
            &format!("candidate/information/{user_id}"),
            token,
        )?;
        let decoded: DataDto<Candidate> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn update(
        &self,
        token: &BearerToken,
        user_id: UserId,
        profile: &CandidateProfile,
    ) -> Result<Candidate, GatewayError> {
        let request = self
            .authorised(
                Method::PUT,
                &format!("candidate/information/{user_id}"),
                token,
            )?
            .json(profile);
        let decoded: DataDto<Candidate> = fetch_json(request).await?;
        Ok(decoded.data)
    }

    async fn delete(&self, token: &BearerToken, user_id: UserId) -> Result<(), GatewayError> {
        let request = self.authorised(
            Method::DELETE,
            &format!("candidate/information/{user_id}"),
            token,
        )?;
        fire(request).await
    }

    async fn resume_link(&self, token: &BearerToken, user_id: UserId) -> Result<String, GatewayError> {
        let request = self.authorised(Method::GET, &format!("candidate/resume/{user_id}"), token)?;
        let decoded: ResumeLinkDto = fetch_json(request).await?;
        Ok(decoded.resume_link)
    }

    async fn list(&self, token: &BearerToken) -> Result<Vec<Candidate>, GatewayError> {
        let request = self.authorised(Method::GET, "candidate/all", token)?;
        let decoded: DataDto<Vec<Candidate>> = fetch_json(request).await?;
        Ok(decoded.data)
    }
}
