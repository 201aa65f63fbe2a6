//! Job applications: submission, the employer's grouped inbox and the
//! candidate's own history.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::{Container, ContainerState, gateway_failure, resolve_owner};
use crate::domain::ports::ApplicationGateway;
use crate::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, CandidateId, Error, JobApplication,
    JobApplicationGroup, Session, UserId,
};

/// Data held by the applications container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsSnapshot {
    /// Most recent submission.
    pub job_application: Option<JobApplication>,
    /// Applications received by the employer, one group per job.
    pub job_applications: Vec<JobApplicationGroup>,
    /// Applications the candidate has submitted.
    pub applied_jobs: Vec<JobApplication>,
    /// Board-wide application count.
    pub total_applications: u64,
}

/// Job application operations.
pub struct ApplicationsStore {
    container: Container<ApplicationsSnapshot>,
    gateway: Arc<dyn ApplicationGateway>,
}

impl ApplicationsStore {
    /// Empty store driving `gateway`.
    pub fn new(gateway: Arc<dyn ApplicationGateway>) -> Self {
        Self {
            container: Container::new("applications"),
            gateway,
        }
    }

    /// Current applications state.
    pub fn state(&self) -> ContainerState<ApplicationsSnapshot> {
        self.container.state()
    }

    /// Receiver notified on every applications state change.
    pub fn subscribe(&self) -> watch::Receiver<ContainerState<ApplicationsSnapshot>> {
        self.container.subscribe()
    }

    /// Submit an application with its resume.
    pub async fn apply(
        &self,
        session: &Session,
        submission: &ApplicationSubmission,
    ) -> Result<JobApplication, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .apply(token, submission)
                .await
                .map_err(gateway_failure("apply", "Failed to apply for job"))
        };
        self.container
            .run("apply", work, |snapshot, application| {
                snapshot.job_application = Some(application.clone());
                application
            })
            .await
    }

    /// Load the applications received by `employer_id`, or by the signed-in
    /// account. Group counts are recomputed on receipt.
    pub async fn fetch_employer_applications(
        &self,
        session: &Session,
        employer_id: Option<UserId>,
    ) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            let owner = resolve_owner(session, employer_id)?;
            self.gateway
                .list_for_employer(token, owner)
                .await
                .map_err(gateway_failure(
                    "fetch_employer_applications",
                    "Failed to fetch job applications",
                ))
        };
        self.container
            .run("fetch_employer_applications", work, |snapshot, groups| {
                snapshot.job_applications = groups
                    .into_iter()
                    .map(JobApplicationGroup::with_derived_count)
                    .collect();
                snapshot.job_applications.len()
            })
            .await
    }

    /// Load the applications submitted by `candidate_id`.
    pub async fn fetch_applied_jobs(
        &self,
        session: &Session,
        candidate_id: CandidateId,
    ) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .list_for_candidate(token, candidate_id)
                .await
                .map_err(gateway_failure(
                    "fetch_applied_jobs",
                    "Failed to fetch applied job applications",
                ))
        };
        self.container
            .run("fetch_applied_jobs", work, |snapshot, applications| {
                snapshot.applied_jobs = applications;
                snapshot.applied_jobs.len()
            })
            .await
    }

    /// Move an application to `status` and patch it in every group.
    pub async fn update_status(
        &self,
        session: &Session,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<JobApplication, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .update_status(token, id, status)
                .await
                .map_err(gateway_failure(
                    "update_status",
                    "Failed to update job application status",
                ))
        };
        self.container
            .run("update_status", work, |snapshot, updated| {
                snapshot
                    .job_applications
                    .iter_mut()
                    .for_each(|group| group.patch_status(updated.id, updated.status));
                updated
            })
            .await
    }

    /// Load the board-wide application count.
    pub async fn fetch_total(&self, session: &Session) -> Result<u64, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .total(token)
                .await
                .map_err(gateway_failure("fetch_total", "Failed to fetch total applications"))
        };
        self.container
            .run("fetch_total", work, |snapshot, total| {
                snapshot.total_applications = total;
                total
            })
            .await
    }
}
