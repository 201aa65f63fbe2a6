//! Candidate profiles: the signed-in candidate's own record and the admin
//! listing.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::{Container, ContainerState, gateway_failure};
use crate::domain::ports::CandidateGateway;
use crate::domain::{Candidate, CandidateProfile, Error, ResumeFile, Session, UserId};

/// Data held by the candidates container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidatesSnapshot {
    /// The signed-in candidate's profile.
    pub candidate: Option<Candidate>,
    /// Every candidate profile, from the admin listing.
    pub candidates: Vec<Candidate>,
}

/// Candidate profile operations.
pub struct CandidatesStore {
    container: Container<CandidatesSnapshot>,
    gateway: Arc<dyn CandidateGateway>,
}

impl CandidatesStore {
    /// Empty store driving `gateway`.
    pub fn new(gateway: Arc<dyn CandidateGateway>) -> Self {
        Self {
            container: Container::new("candidates"),
            gateway,
        }
    }

    /// Current candidates state.
    pub fn state(&self) -> ContainerState<CandidatesSnapshot> {
        self.container.state()
    }

    /// Receiver notified on every candidates state change.
    pub fn subscribe(&self) -> watch::Receiver<ContainerState<CandidatesSnapshot>> {
        self.container.subscribe()
    }

    /// Create the signed-in candidate's profile with a resume upload.
    pub async fn create_profile(
        &self,
        session: &Session,
        profile: &CandidateProfile,
        resume: &ResumeFile,
    ) -> Result<Candidate, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .create(token, profile, resume)
                .await
                .map_err(gateway_failure("create_profile", "Failed to create candidate"))
        };
        self.container
            .run("create_profile", work, |snapshot, candidate| {
                snapshot.candidate = Some(candidate.clone());
                candidate
            })
            .await
    }

    /// Load the signed-in candidate's profile.
    pub async fn fetch_profile(&self, session: &Session) -> Result<Candidate, Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .fetch(token, user_id)
                .await
                .map_err(gateway_failure("fetch_profile", "Failed to fetch candidate details"))
        };
        self.container
            .run("fetch_profile", work, |snapshot, candidate| {
                snapshot.candidate = Some(candidate.clone());
                candidate
            })
            .await
    }

    /// Replace the signed-in candidate's profile.
    pub async fn update_profile(
        &self,
        session: &Session,
        profile: &CandidateProfile,
    ) -> Result<Candidate, Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .update(token, user_id, profile)
                .await
                .map_err(gateway_failure("update_profile", "Failed to update candidate details"))
        };
        self.container
            .run("update_profile", work, |snapshot, candidate| {
                snapshot.candidate = Some(candidate.clone());
                candidate
            })
            .await
    }

    /// Delete the profile owned by `user_id`.
    ///
    /// The profile is dropped from the listing; the single record is cleared
    /// when it belongs to `user_id` or has no recorded owner.
    pub async fn delete_profile(&self, session: &Session, user_id: UserId) -> Result<(), Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .delete(token, user_id)
                .await
                .map_err(gateway_failure("delete_profile", "Failed to delete candidate details"))
        };
        self.container
            .run("delete_profile", work, |snapshot, ()| {
                snapshot
                    .candidates
                    .retain(|candidate| candidate.user_id != Some(user_id));
                if snapshot
                    .candidate
                    .as_ref()
                    .is_some_and(|candidate| candidate.user_id.is_none_or(|owner| owner == user_id))
                {
                    snapshot.candidate = None;
                }
            })
            .await
    }

    /// Load the resume location and patch it into the held profile.
    pub async fn fetch_resume_link(&self, session: &Session) -> Result<String, Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .resume_link(token, user_id)
                .await
                .map_err(gateway_failure("fetch_resume_link", "Failed to fetch candidate resume"))
        };
        self.container
            .run("fetch_resume_link", work, |snapshot, link| {
                if let Some(candidate) = snapshot.candidate.as_mut() {
                    candidate.resume_link.clone_from(&link);
                }
                link
            })
            .await
    }

    /// Load every candidate profile.
    pub async fn fetch_all(&self, session: &Session) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .list(token)
                .await
                .map_err(gateway_failure("fetch_all_candidates", "Failed to fetch all candidates"))
        };
        self.container
            .run("fetch_all_candidates", work, |snapshot, candidates| {
                snapshot.candidates = candidates;
                snapshot.candidates.len()
            })
            .await
    }

    /// Replace the held profile without contacting the backend.
    pub fn set_candidate(&self, candidate: Option<Candidate>) {
        self.container.update(|snapshot| snapshot.candidate = candidate);
    }

    /// Drop the held profile and clear the error slot.
    pub fn reset(&self) {
        self.container.reset(|snapshot| snapshot.candidate = None);
    }
}

#[cfg(test)]
mod tests {
    //! Candidates store behaviour against a mocked gateway.
    use super::*;
    use crate::domain::candidate::fixtures::{candidate, profile};
    use crate::domain::ports::{GatewayError, MockCandidateGateway};
    use crate::domain::NOT_AUTHENTICATED;
    use crate::store::test_sessions::signed_in;
    use rstest::rstest;

    fn store(gateway: MockCandidateGateway) -> CandidatesStore {
        CandidatesStore::new(Arc::new(gateway))
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_profile_uses_the_token_owner() {
        let mut gateway = MockCandidateGateway::new();
        gateway
            .expect_fetch()
            .withf(|_, user_id| *user_id == UserId::new(4))
            .times(1)
            .returning(|_, _| Ok(candidate(1, 4, "Ada")));
        let candidates = store(gateway);

        candidates
            .fetch_profile(&signed_in(4, "candidate"))
            .await
            .expect("fetch succeeds");

        assert_eq!(
            candidates.state().snapshot.candidate.map(|c| c.profile.fullname),
            Some("Ada".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn resume_links_patch_the_held_profile() {
        let mut gateway = MockCandidateGateway::new();
        gateway
            .expect_resume_link()
            .returning(|_, _| Ok("https://files.example/cv.pdf".to_owned()));
        let candidates = store(gateway);
        candidates.set_candidate(Some(candidate(1, 4, "Ada")));

        candidates
            .fetch_resume_link(&signed_in(4, "candidate"))
            .await
            .expect("link succeeds");

        assert_eq!(
            candidates.state().snapshot.candidate.map(|c| c.resume_link),
            Some("https://files.example/cv.pdf".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn resume_links_without_a_profile_change_nothing() {
        let mut gateway = MockCandidateGateway::new();
        gateway
            .expect_resume_link()
            .returning(|_, _| Ok("https://files.example/cv.pdf".to_owned()));
        let candidates = store(gateway);

        let link = candidates
            .fetch_resume_link(&signed_in(4, "candidate"))
            .await
            .expect("link succeeds");

        assert_eq!(link, "https://files.example/cv.pdf");
        assert!(candidates.state().snapshot.candidate.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_clears_the_owned_profile_and_listing_entry() {
        let mut gateway = MockCandidateGateway::new();
        gateway.expect_list().returning(|_| {
            Ok(vec![candidate(1, 4, "Ada"), candidate(2, 5, "Grace")])
        });
        gateway.expect_delete().returning(|_, _| Ok(()));
        let candidates = store(gateway);
        let session = signed_in(1, "admin");
        candidates.fetch_all(&session).await.expect("list succeeds");
        candidates.set_candidate(Some(candidate(1, 4, "Ada")));

        candidates
            .delete_profile(&session, UserId::new(4))
            .await
            .expect("delete succeeds");

        let snapshot = candidates.state().snapshot;
        assert!(snapshot.candidate.is_none());
        assert_eq!(
            snapshot.candidates.iter().map(|c| c.id.get()).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn failed_creates_keep_the_snapshot() {
        let mut gateway = MockCandidateGateway::new();
        gateway
            .expect_create()
            .returning(|_, _, _| Err(GatewayError::timeout("slow")));
        let candidates = store(gateway);
        candidates.set_candidate(Some(candidate(1, 4, "Ada")));

        let err = candidates
            .create_profile(
                &signed_in(4, "candidate"),
                &profile("Grace"),
                &ResumeFile::new("cv.pdf", Vec::new()),
            )
            .await
            .expect_err("timeout");

        assert_eq!(err.message(), "Failed to create candidate");
        assert_eq!(candidates.state().snapshot.candidate, Some(candidate(1, 4, "Ada")));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_without_token_is_rejected_and_reset_clears_it() {
        let mut gateway = MockCandidateGateway::new();
        gateway.expect_list().never();
        let candidates = store(gateway);

        let err = candidates
            .fetch_all(&Session::anonymous())
            .await
            .expect_err("no token");
        assert_eq!(err.message(), NOT_AUTHENTICATED);
        assert_eq!(candidates.state().error.as_deref(), Some(NOT_AUTHENTICATED));

        candidates.reset();
        let state = candidates.state();
        assert!(state.error.is_none());
        assert!(!state.pending);
    }
}
