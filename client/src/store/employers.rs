//! Employer profiles.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::{Container, ContainerState, gateway_failure};
use crate::domain::ports::EmployerGateway;
use crate::domain::{Employer, EmployerProfile, Error, Session, UserId};

/// Data held by the employers container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployersSnapshot {
    /// The signed-in employer's profile.
    pub employer: Option<Employer>,
    /// Every employer profile, from the admin listing.
    pub employers: Vec<Employer>,
}

/// Employer profile operations.
pub struct EmployersStore {
    container: Container<EmployersSnapshot>,
    gateway: Arc<dyn EmployerGateway>,
}

impl EmployersStore {
    /// Empty store driving `gateway`.
    pub fn new(gateway: Arc<dyn EmployerGateway>) -> Self {
        Self {
            container: Container::new("employers"),
            gateway,
        }
    }

    /// Current employers state.
    pub fn state(&self) -> ContainerState<EmployersSnapshot> {
        self.container.state()
    }

    /// Receiver notified on every employers state change.
    pub fn subscribe(&self) -> watch::Receiver<ContainerState<EmployersSnapshot>> {
        self.container.subscribe()
    }

    /// Create a profile owned by the signed-in account.
    pub async fn create_profile(
        &self,
        session: &Session,
        profile: &EmployerProfile,
    ) -> Result<Employer, Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .create(token, user_id, profile)
                .await
                .map_err(gateway_failure("create_profile", "Failed to save employer details"))
        };
        self.container
            .run("create_profile", work, |snapshot, employer| {
                snapshot.employer = Some(employer.clone());
                employer
            })
            .await
    }

    /// Load the signed-in account's profile.
    pub async fn fetch_profile(&self, session: &Session) -> Result<Employer, Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .fetch(token, user_id)
                .await
                .map_err(gateway_failure("fetch_profile", "Failed to fetch employer details"))
        };
        self.container
            .run("fetch_profile", work, |snapshot, employer| {
                snapshot.employer = Some(employer.clone());
                employer
            })
            .await
    }

    /// Replace the signed-in account's profile.
    pub async fn update_profile(
        &self,
        session: &Session,
        profile: &EmployerProfile,
    ) -> Result<Employer, Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .update(token, user_id, profile)
                .await
                .map_err(gateway_failure("update_profile", "Failed to update employer details"))
        };
        self.container
            .run("update_profile", work, |snapshot, employer| {
                snapshot.employer = Some(employer.clone());
                employer
            })
            .await
    }

    /// Delete the profile owned by `user_id`.
    pub async fn delete_profile(&self, session: &Session, user_id: UserId) -> Result<(), Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .delete(token, user_id)
                .await
                .map_err(gateway_failure("delete_profile", "Failed to delete employer details"))
        };
        self.container
            .run("delete_profile", work, |snapshot, ()| {
                snapshot.employers.retain(|employer| employer.user_id != user_id);
                if snapshot
                    .employer
                    .as_ref()
                    .is_some_and(|employer| employer.user_id == user_id)
                {
                    snapshot.employer = None;
                }
            })
            .await
    }

    /// Load every employer profile.
    pub async fn fetch_all(&self, session: &Session) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .list(token)
                .await
                .map_err(gateway_failure("fetch_all_employers", "Failed to fetch all employers"))
        };
        self.container
            .run("fetch_all_employers", work, |snapshot, employers| {
                snapshot.employers = employers;
                snapshot.employers.len()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Employers store behaviour against a mocked gateway.
    use super::*;
    use crate::domain::employer::fixtures::{employer, profile};
    use crate::domain::ports::{GatewayError, MockEmployerGateway};
    use crate::store::test_sessions::{signed_in, without_user_id};
    use rstest::rstest;

    fn store(gateway: MockEmployerGateway) -> EmployersStore {
        EmployersStore::new(Arc::new(gateway))
    }

    #[rstest]
    #[tokio::test]
    async fn create_takes_the_owner_from_the_token() {
        let mut gateway = MockEmployerGateway::new();
        gateway
            .expect_create()
            .withf(|_, user_id, _| *user_id == UserId::new(8))
            .times(1)
            .returning(|_, user_id, profile| {
                Ok(Employer {
                    user_id,
                    user: None,
                    profile: profile.clone(),
                })
            });
        let employers = store(gateway);

        let created = employers
            .create_profile(&signed_in(8, "employer"), &profile("Acme"))
            .await
            .expect("create succeeds");

        assert_eq!(created.user_id, UserId::new(8));
        assert_eq!(employers.state().snapshot.employer, Some(created));
    }

    #[rstest]
    #[tokio::test]
    async fn create_without_user_id_is_rejected_locally() {
        let mut gateway = MockEmployerGateway::new();
        gateway.expect_create().never();
        let employers = store(gateway);

        let err = employers
            .create_profile(&without_user_id(), &profile("Acme"))
            .await
            .expect_err("no user id");

        assert_eq!(err.message(), crate::domain::MISSING_USER_ID);
        assert!(employers.state().snapshot.employer.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_clears_matching_records() {
        let mut gateway = MockEmployerGateway::new();
        gateway
            .expect_list()
            .returning(|_| Ok(vec![employer(8, "Acme"), employer(9, "Globex")]));
        gateway.expect_fetch().returning(|_, _| Ok(employer(8, "Acme")));
        gateway.expect_delete().returning(|_, _| Ok(()));
        let employers = store(gateway);
        let session = signed_in(8, "employer");
        employers.fetch_all(&session).await.expect("list succeeds");
        employers.fetch_profile(&session).await.expect("fetch succeeds");

        employers
            .delete_profile(&session, UserId::new(8))
            .await
            .expect("delete succeeds");

        let snapshot = employers.state().snapshot;
        assert!(snapshot.employer.is_none());
        assert_eq!(snapshot.employers, vec![employer(9, "Globex")]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_failures_report_the_fallback() {
        let mut gateway = MockEmployerGateway::new();
        gateway
            .expect_update()
            .returning(|_, _, _| Err(GatewayError::status(500_u16)));
        let employers = store(gateway);

        let err = employers
            .update_profile(&signed_in(8, "employer"), &profile("Acme"))
            .await
            .expect_err("backend fails");

        assert_eq!(err.message(), "Failed to update employer details");
        assert_eq!(
            employers.state().error.as_deref(),
            Some("Failed to update employer details")
        );
    }
}
