//! Shared helpers for the client's integration tests.
//!
//! Port mocks are only generated for unit tests, so behaviour tests drive the
//! store through [`ScriptedBackend`], a hand-written gateway that answers job
//! listings and sign-ins from a script and counts every call it receives.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jobboard::domain::ports::{
    ApplicationGateway, AuthGateway, CandidateGateway, EmployerGateway, GatewayError, JobGateway,
};
use jobboard::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, BearerToken, Candidate,
    CandidateId, CandidateProfile, Employer, EmployerProfile, EmploymentStatus, Job,
    JobApplication, JobApplicationGroup, JobDraft, JobId, JobSearch, JobStats, LoginCredentials,
    PasswordChange, Registration, ResumeFile, UserId, UserListItem,
};
use serde_json::json;

/// Mint an unsigned bearer token carrying `userId` and `role` claims.
pub fn mint_token(user_id: u64, role: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "userId": user_id, "role": role }).to_string());
    format!("{header}.{payload}.signature")
}

/// A posting with placeholder fields.
pub fn posting(id: u64) -> Job {
    Job::new(
        JobId::new(id),
        JobDraft {
            title: format!("Posting {id}"),
            description: "Keep the lights on".to_owned(),
            company_name: "Acme".to_owned(),
            location: "Remote".to_owned(),
            salary_range: "40k-60k".to_owned(),
            job_type: "Full-time".to_owned(),
            employment_status: EmploymentStatus::Active,
            skills_required: "rust".to_owned(),
            application_deadline: "2026-12-31".to_owned(),
        },
    )
}

/// Gateway answering from a script.
///
/// Job deletes always succeed.
#[derive(Debug)]
pub struct ScriptedBackend {
    jobs: Mutex<Result<Vec<Job>, GatewayError>>,
    token: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            jobs: Mutex::new(Ok(Vec::new())),
            token: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl ScriptedBackend {
    /// Answer job listings with `jobs`.
    pub fn list_jobs(&self, jobs: Vec<Job>) {
        *self.jobs.lock().unwrap_or_else(PoisonError::into_inner) = Ok(jobs);
    }

    /// Answer job listings with `error`.
    pub fn reject_jobs(&self, error: GatewayError) {
        *self.jobs.lock().unwrap_or_else(PoisonError::into_inner) = Err(error);
    }

    /// Answer sign-ins with `token`.
    pub fn issue_token(&self, token: String) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Answer sign-ins with a 401 rejection.
    pub fn refuse_sign_ins(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Number of gateway calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn scripted_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        self.record();
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn scripted_token(&self) -> Result<BearerToken, GatewayError> {
        self.record();
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .map(BearerToken::new)
            .ok_or_else(|| GatewayError::rejected(401_u16, "Invalid credentials"))
    }

    fn unscripted<T>(&self) -> Result<T, GatewayError> {
        self.record();
        Err(GatewayError::invalid_request("not scripted"))
    }
}

#[async_trait]
impl AuthGateway for ScriptedBackend {
    async fn register(&self, _registration: &Registration) -> Result<BearerToken, GatewayError> {
        self.scripted_token()
    }

    async fn login(&self, _credentials: &LoginCredentials) -> Result<BearerToken, GatewayError> {
        self.scripted_token()
    }

    async fn change_password(
        &self,
        _token: &BearerToken,
        _change: &PasswordChange,
    ) -> Result<(), GatewayError> {
        self.unscripted()
    }

    async fn update_email(
        &self,
        _token: &BearerToken,
        _new_email: &str,
    ) -> Result<Option<String>, GatewayError> {
        self.unscripted()
    }

    async fn delete_account(&self, _token: &BearerToken, _user_id: UserId) -> Result<(), GatewayError> {
        self.unscripted()
    }

    async fn list_users(&self, _token: &BearerToken) -> Result<Vec<UserListItem>, GatewayError> {
        self.unscripted()
    }

    async fn delete_user(&self, _token: &BearerToken, _user_id: UserId) -> Result<(), GatewayError> {
        self.unscripted()
    }
}

#[async_trait]
impl JobGateway for ScriptedBackend {
    async fn create(&self, _token: &BearerToken, _draft: &JobDraft) -> Result<Job, GatewayError> {
        self.unscripted()
    }

    async fn list_all(&self) -> Result<Vec<Job>, GatewayError> {
        self.scripted_jobs()
    }

    async fn list_for_employer(
        &self,
        _token: &BearerToken,
        _user_id: UserId,
    ) -> Result<Vec<Job>, GatewayError> {
        self.scripted_jobs()
    }

    async fn count_active(&self, _token: &BearerToken, _user_id: UserId) -> Result<u64, GatewayError> {
        self.unscripted()
    }

    async fn update(&self, _token: &BearerToken, _job: &Job) -> Result<Job, GatewayError> {
        self.unscripted()
    }

    async fn delete(&self, _token: &BearerToken, _id: JobId) -> Result<(), GatewayError> {
        self.record();
        Ok(())
    }

    async fn search(&self, _token: &BearerToken, _search: &JobSearch) -> Result<Vec<Job>, GatewayError> {
        self.scripted_jobs()
    }

    async fn set_employment_status(
        &self,
        _token: &BearerToken,
        _id: JobId,
        _status: EmploymentStatus,
    ) -> Result<Job, GatewayError> {
        self.unscripted()
    }

    async fn stats(&self, _token: &BearerToken) -> Result<JobStats, GatewayError> {
        self.unscripted()
    }
}

#[async_trait]
impl CandidateGateway for ScriptedBackend {
    async fn create(
        &self,
        _token: &BearerToken,
        _profile: &CandidateProfile,
        _resume: &ResumeFile,
    ) -> Result<Candidate, GatewayError> {
        self.unscripted()
    }

    async fn fetch(&self, _token: &BearerToken, _user_id: UserId) -> Result<Candidate, GatewayError> {
        self.unscripted()
    }

    async fn update(
        &self,
        _token: &BearerToken,
        _user_id: UserId,
        _profile: &CandidateProfile,
    ) -> Result<Candidate, GatewayError> {
        self.unscripted()
    }

    async fn delete(&self, _token: &BearerToken, _user_id: UserId) -> Result<(), GatewayError> {
        self.unscripted()
    }

    async fn resume_link(&self, _token: &BearerToken, _user_id: UserId) -> Result<String, GatewayError> {
        self.unscripted()
    }

    async fn list(&self, _token: &BearerToken) -> Result<Vec<Candidate>, GatewayError> {
        self.unscripted()
    }
}

#[async_trait]
impl EmployerGateway for ScriptedBackend {
    async fn create(
        &self,
        _token: &BearerToken,
        _user_id: UserId,
        _profile: &EmployerProfile,
    ) -> Result<Employer, GatewayError> {
        self.unscripted()
    }

    async fn fetch(&self, _token: &BearerToken, _user_id: UserId) -> Result<Employer, GatewayError> {
        self.unscripted()
    }

    async fn update(
        &self,
        _token: &BearerToken,
        _user_id: UserId,
        _profile: &EmployerProfile,
    ) -> Result<Employer, GatewayError> {
        self.unscripted()
    }

    async fn delete(&self, _token: &BearerToken, _user_id: UserId) -> Result<(), GatewayError> {
        self.unscripted()
    }

    async fn list(&self, _token: &BearerToken) -> Result<Vec<Employer>, GatewayError> {
        self.unscripted()
    }
}

#[async_trait]
impl ApplicationGateway for ScriptedBackend {
    async fn apply(
        &self,
        _token: &BearerToken,
        _submission: &ApplicationSubmission,
    ) -> Result<JobApplication, GatewayError> {
        self.unscripted()
    }

    async fn list_for_employer(
        &self,
        _token: &BearerToken,
        _employer_id: UserId,
    ) -> Result<Vec<JobApplicationGroup>, GatewayError> {
        self.unscripted()
    }

    async fn list_for_candidate(
        &self,
        _token: &BearerToken,
        _candidate_id: CandidateId,
    ) -> Result<Vec<JobApplication>, GatewayError> {
        self.unscripted()
    }

    async fn update_status(
        &self,
        _token: &BearerToken,
        _id: ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<JobApplication, GatewayError> {
        self.unscripted()
    }

    async fn total(&self, _token: &BearerToken) -> Result<u64, GatewayError> {
        self.unscripted()
    }
}
