//! Job postings: the board listing, an employer's own postings and the
//! board-wide counters.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::{Container, ContainerState, gateway_failure, resolve_owner};
use crate::domain::ports::JobGateway;
use crate::domain::{Error, EmploymentStatus, Job, JobDraft, JobId, JobSearch, JobStats, Session, UserId};

const FETCH_FAILED: &str = "Failed to fetch jobs";

/// Data held by the jobs container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsSnapshot {
    /// Postings from the most recent list, search or employer fetch.
    pub jobs: Vec<Job>,
    /// Open postings owned by the signed-in employer.
    pub total_active_jobs: u64,
    /// Board-wide posting count.
    pub total_jobs: u64,
    /// Board-wide open posting count.
    pub active_jobs: u64,
}

impl JobsSnapshot {
    fn replace_job(&mut self, job: &Job) {
        if let Some(slot) = self.jobs.iter_mut().find(|existing| existing.id == job.id) {
            slot.clone_from(job);
        }
    }
}

/// Job posting operations.
pub struct JobsStore {
    container: Container<JobsSnapshot>,
    gateway: Arc<dyn JobGateway>,
}

impl JobsStore {
    /// Empty store driving `gateway`.
    pub fn new(gateway: Arc<dyn JobGateway>) -> Self {
        Self {
            container: Container::new("jobs"),
            gateway,
        }
    }

    /// Current jobs state.
    pub fn state(&self) -> ContainerState<JobsSnapshot> {
        self.container.state()
    }

    /// Receiver notified on every jobs state change.
    pub fn subscribe(&self) -> watch::Receiver<ContainerState<JobsSnapshot>> {
        self.container.subscribe()
    }

    /// Publish a posting and append it to the list.
    pub async fn create_job(&self, session: &Session, draft: &JobDraft) -> Result<Job, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .create(token, draft)
                .await
                .map_err(gateway_failure("create_job", "Job creation failed"))
        };
        self.container
            .run("create_job", work, |snapshot, job| {
                snapshot.jobs.push(job.clone());
                job
            })
            .await
    }

    /// Load every posting on the board. No session is needed.
    pub async fn fetch_all_jobs(&self) -> Result<usize, Error> {
        let work = async {
            self.gateway
                .list_all()
                .await
                .map_err(gateway_failure("fetch_all_jobs", FETCH_FAILED))
        };
        self.container
            .run("fetch_all_jobs", work, |snapshot, jobs| {
                snapshot.jobs = jobs;
                snapshot.jobs.len()
            })
            .await
    }

    /// Load the postings owned by `user_id`, or by the signed-in account.
    pub async fn fetch_employer_jobs(
        &self,
        session: &Session,
        user_id: Option<UserId>,
    ) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            let owner = resolve_owner(session, user_id)?;
            self.gateway
                .list_for_employer(token, owner)
                .await
                .map_err(gateway_failure("fetch_employer_jobs", FETCH_FAILED))
        };
        self.container
            .run("fetch_employer_jobs", work, |snapshot, jobs| {
                snapshot.jobs = jobs;
                snapshot.jobs.len()
            })
            .await
    }

    /// Count the open postings owned by `user_id`, or by the signed-in
    /// account.
    pub async fn fetch_total_active_jobs(
        &self,
        session: &Session,
        user_id: Option<UserId>,
    ) -> Result<u64, Error> {
        let work = async {
            let token = session.require_token()?;
            let owner = resolve_owner(session, user_id)?;
            self.gateway
                .count_active(token, owner)
                .await
                .map_err(gateway_failure("fetch_total_active_jobs", FETCH_FAILED))
        };
        self.container
            .run("fetch_total_active_jobs", work, |snapshot, total| {
                snapshot.total_active_jobs = total;
                total
            })
            .await
    }

    /// Replace a posting and swap it into the list by id.
    pub async fn update_job(&self, session: &Session, job: &Job) -> Result<Job, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .update(token, job)
                .await
                .map_err(gateway_failure("update_job", "Failed to update job"))
        };
        self.container
            .run("update_job", work, |snapshot, updated| {
                snapshot.replace_job(&updated);
                updated
            })
            .await
    }

    /// Remove a posting and drop it from the list.
    pub async fn delete_job(&self, session: &Session, id: JobId) -> Result<(), Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .delete(token, id)
                .await
                .map_err(gateway_failure("delete_job", "Failed to delete job"))
        };
        self.container
            .run("delete_job", work, |snapshot, ()| {
                snapshot.jobs.retain(|job| job.id != id);
            })
            .await
    }

    /// Replace the list with the postings matching `search`.
    pub async fn search_jobs(&self, session: &Session, search: &JobSearch) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .search(token, search)
                .await
                .map_err(gateway_failure("search_jobs", "Failed to search jobs"))
        };
        self.container
            .run("search_jobs", work, |snapshot, jobs| {
                snapshot.jobs = jobs;
                snapshot.jobs.len()
            })
            .await
    }

    /// Change a posting's hiring state and swap the result into the list.
    pub async fn update_employment_status(
        &self,
        session: &Session,
        id: JobId,
        status: EmploymentStatus,
    ) -> Result<Job, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .set_employment_status(token, id, status)
                .await
                .map_err(gateway_failure(
                    "update_employment_status",
                    "Failed to update employment status",
                ))
        };
        self.container
            .run("update_employment_status", work, |snapshot, updated| {
                snapshot.replace_job(&updated);
                updated
            })
            .await
    }

    /// Load the board-wide counters.
    pub async fn fetch_stats(&self, session: &Session) -> Result<JobStats, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .stats(token)
                .await
                .map_err(gateway_failure("fetch_stats", "Failed to fetch jobs stats"))
        };
        self.container
            .run("fetch_stats", work, |snapshot, stats| {
                snapshot.total_jobs = stats.total_jobs;
                snapshot.active_jobs = stats.active_jobs;
                stats
            })
            .await
    }

    /// Replace the list without contacting the backend.
    pub fn set_jobs(&self, jobs: Vec<Job>) {
        self.container.update(|snapshot| snapshot.jobs = jobs);
    }
}

#[cfg(test)]
mod tests {
    //! Jobs store behaviour against a mocked gateway.
    use super::*;
    use crate::domain::job::fixtures::job;
    use crate::domain::ports::{GatewayError, MockJobGateway};
    use crate::domain::{ErrorCode, NOT_AUTHENTICATED};
    use crate::store::test_sessions::{signed_in, without_user_id};
    use rstest::rstest;

    fn store(gateway: MockJobGateway) -> JobsStore {
        JobsStore::new(Arc::new(gateway))
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_all_jobs_replaces_the_list() {
        let mut gateway = MockJobGateway::new();
        gateway.expect_list_all().times(1).returning(|| {
            Ok(vec![
                job(1, "Rust", EmploymentStatus::Active),
                job(2, "Go", EmploymentStatus::Filled),
            ])
        });
        let jobs = store(gateway);
        jobs.set_jobs(vec![job(9, "Stale", EmploymentStatus::Inactive)]);

        let count = jobs.fetch_all_jobs().await.expect("fetch succeeds");

        assert_eq!(count, 2);
        let state = jobs.state();
        assert!(!state.pending);
        assert!(state.error.is_none());
        assert_eq!(
            state.snapshot.jobs.iter().map(|j| j.id.get()).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn employer_fetch_without_token_never_calls_the_backend() {
        let mut gateway = MockJobGateway::new();
        gateway.expect_list_for_employer().never();
        let jobs = store(gateway);

        let err = jobs
            .fetch_employer_jobs(&Session::anonymous(), None)
            .await
            .expect_err("no token");

        assert_eq!(err.message(), NOT_AUTHENTICATED);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        let state = jobs.state();
        assert!(!state.pending);
        assert_eq!(state.error.as_deref(), Some(NOT_AUTHENTICATED));
    }

    #[rstest]
    #[tokio::test]
    async fn employer_fetch_uses_the_token_owner_by_default() {
        let mut gateway = MockJobGateway::new();
        gateway
            .expect_list_for_employer()
            .withf(|_, owner| *owner == UserId::new(7))
            .times(1)
            .returning(|_, _| Ok(vec![job(3, "Rust", EmploymentStatus::Active)]));
        let jobs = store(gateway);

        jobs.fetch_employer_jobs(&signed_in(7, "employer"), None)
            .await
            .expect("fetch succeeds");

        assert_eq!(jobs.state().snapshot.jobs.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_user_id_rejects_before_any_call() {
        let mut gateway = MockJobGateway::new();
        gateway.expect_count_active().never();
        let jobs = store(gateway);

        let err = jobs
            .fetch_total_active_jobs(&without_user_id(), None)
            .await
            .expect_err("no user id");

        assert_eq!(err.message(), crate::domain::MISSING_USER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn rejected_fetches_keep_the_previous_list() {
        let mut gateway = MockJobGateway::new();
        gateway
            .expect_search()
            .returning(|_, _| Err(GatewayError::status(500_u16)));
        let jobs = store(gateway);
        jobs.set_jobs(vec![job(1, "Rust", EmploymentStatus::Active)]);

        let err = jobs
            .search_jobs(&signed_in(7, "candidate"), &JobSearch::default())
            .await
            .expect_err("backend fails");

        assert_eq!(err.message(), "Failed to search jobs");
        let state = jobs.state();
        assert_eq!(state.snapshot.jobs.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Failed to search jobs"));
    }

    #[rstest]
    #[tokio::test]
    async fn create_appends_and_delete_removes() {
        let mut gateway = MockJobGateway::new();
        gateway
            .expect_create()
            .returning(|_, draft| Ok(Job::new(JobId::new(5), draft.clone())));
        gateway
            .expect_delete()
            .withf(|_, id| *id == JobId::new(1))
            .returning(|_, _| Ok(()));
        let jobs = store(gateway);
        let session = signed_in(7, "employer");
        jobs.set_jobs(vec![job(1, "Rust", EmploymentStatus::Active)]);

        let created = jobs
            .create_job(&session, &crate::domain::job::fixtures::draft("Zig", EmploymentStatus::Active))
            .await
            .expect("create succeeds");
        assert_eq!(created.id, JobId::new(5));
        jobs.delete_job(&session, JobId::new(1)).await.expect("delete succeeds");

        let ids: Vec<u64> = jobs.state().snapshot.jobs.iter().map(|j| j.id.get()).collect();
        assert_eq!(ids, vec![5]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_an_unlisted_id_leaves_the_list_unchanged() {
        let mut gateway = MockJobGateway::new();
        gateway
            .expect_delete()
            .withf(|_, id| *id == JobId::new(99))
            .times(1)
            .returning(|_, _| Ok(()));
        let jobs = store(gateway);
        let listed = vec![job(1, "Rust", EmploymentStatus::Active)];
        jobs.set_jobs(listed.clone());

        jobs.delete_job(&signed_in(7, "employer"), JobId::new(99))
            .await
            .expect("delete succeeds");

        let state = jobs.state();
        assert_eq!(state.snapshot.jobs, listed);
        assert!(!state.pending);
        assert!(state.error.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn status_updates_replace_the_job_in_place() {
        let mut gateway = MockJobGateway::new();
        gateway
            .expect_set_employment_status()
            .returning(|_, id, status| Ok(job(id.get(), "Rust", status)));
        let jobs = store(gateway);
        jobs.set_jobs(vec![
            job(1, "Rust", EmploymentStatus::Active),
            job(2, "Go", EmploymentStatus::Active),
        ]);

        jobs.update_employment_status(&signed_in(7, "employer"), JobId::new(1), EmploymentStatus::Filled)
            .await
            .expect("update succeeds");

        let statuses: Vec<EmploymentStatus> = jobs
            .state()
            .snapshot
            .jobs
            .iter()
            .map(Job::employment_status)
            .collect();
        assert_eq!(statuses, vec![EmploymentStatus::Filled, EmploymentStatus::Active]);
    }

    #[rstest]
    #[tokio::test]
    async fn updates_for_unknown_jobs_leave_the_list_alone() {
        let mut gateway = MockJobGateway::new();
        gateway.expect_update().returning(|_, job| Ok(job.clone()));
        let jobs = store(gateway);
        jobs.set_jobs(vec![job(1, "Rust", EmploymentStatus::Active)]);

        jobs.update_job(&signed_in(7, "employer"), &job(42, "Elsewhere", EmploymentStatus::Active))
            .await
            .expect("update succeeds");

        assert_eq!(jobs.state().snapshot.jobs, vec![job(1, "Rust", EmploymentStatus::Active)]);
    }

    #[rstest]
    #[tokio::test]
    async fn stats_and_active_counts_are_recorded() {
        let mut gateway = MockJobGateway::new();
        gateway.expect_stats().returning(|_| {
            Ok(JobStats {
                total_jobs: 12,
                active_jobs: 4,
            })
        });
        gateway.expect_count_active().returning(|_, _| Ok(3));
        let jobs = store(gateway);
        let session = signed_in(7, "admin");

        jobs.fetch_stats(&session).await.expect("stats succeed");
        jobs.fetch_total_active_jobs(&session, Some(UserId::new(2)))
            .await
            .expect("count succeeds");

        let snapshot = jobs.state().snapshot;
        assert_eq!((snapshot.total_jobs, snapshot.active_jobs), (12, 4));
        assert_eq!(snapshot.total_active_jobs, 3);
    }
}
