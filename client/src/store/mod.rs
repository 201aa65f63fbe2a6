//! Application store: one lifecycle container per resource family.
//!
//! Each family store wraps a [`Container`] and the gateway port it drives.
//! Operations take the [`Session`](crate::domain::Session) explicitly,
//! run through the shared pending/fulfilled/rejected lifecycle and merge
//! their results into the family snapshot.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{
    ApplicationGateway, AuthGateway, CandidateGateway, EmployerGateway, GatewayError, JobGateway,
    SessionStore,
};
use crate::domain::{Error, ErrorCode, Session, UserId};

mod applications;
mod auth;
mod candidates;
mod container;
mod employers;
mod jobs;

pub use applications::{ApplicationsSnapshot, ApplicationsStore};
pub use auth::{AuthSnapshot, AuthStore};
pub use candidates::{CandidatesSnapshot, CandidatesStore};
pub use container::{Container, ContainerState};
pub use employers::{EmployersSnapshot, EmployersStore};
pub use jobs::{JobsSnapshot, JobsStore};

/// Gateway adapters handed to [`AppStore::new`].
#[derive(Clone)]
pub struct Gateways {
    /// Account endpoints.
    pub auth: Arc<dyn AuthGateway>,
    /// Candidate profile endpoints.
    pub candidates: Arc<dyn CandidateGateway>,
    /// Employer profile endpoints.
    pub employers: Arc<dyn EmployerGateway>,
    /// Job posting endpoints.
    pub jobs: Arc<dyn JobGateway>,
    /// Job application endpoints.
    pub applications: Arc<dyn ApplicationGateway>,
}

impl Gateways {
    /// Use one backend adapter for every resource family.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: AuthGateway
            + CandidateGateway
            + EmployerGateway
            + JobGateway
            + ApplicationGateway
            + 'static,
    {
        Self {
            auth: backend.clone(),
            candidates: backend.clone(),
            employers: backend.clone(),
            jobs: backend.clone(),
            applications: backend,
        }
    }
}

/// The five family stores, each shareable across tasks.
#[derive(Clone)]
pub struct AppStore {
    /// Authentication and account management.
    pub auth: Arc<AuthStore>,
    /// Candidate profiles.
    pub candidates: Arc<CandidatesStore>,
    /// Employer profiles.
    pub employers: Arc<EmployersStore>,
    /// Job postings.
    pub jobs: Arc<JobsStore>,
    /// Job applications.
    pub applications: Arc<ApplicationsStore>,
}

impl AppStore {
    /// Wire every family store to its gateway.
    pub fn new(gateways: Gateways, sessions: Arc<dyn SessionStore>) -> Self {
        let Gateways {
            auth,
            candidates,
            employers,
            jobs,
            applications,
        } = gateways;
        Self {
            auth: Arc::new(AuthStore::new(auth, sessions)),
            candidates: Arc::new(CandidatesStore::new(candidates)),
            employers: Arc::new(EmployersStore::new(employers)),
            jobs: Arc::new(JobsStore::new(jobs)),
            applications: Arc::new(ApplicationsStore::new(applications)),
        }
    }
}

/// Map a gateway failure to the user-facing error for `operation`.
///
/// The backend's own message wins; otherwise `fallback` is used.
pub(crate) fn gateway_failure(
    operation: &'static str,
    fallback: &'static str,
) -> impl FnOnce(GatewayError) -> Error {
    move |err| {
        warn!(operation, error = %err, "backend call failed");
        let message = err
            .server_message()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback);
        Error::new(error_code(&err), message)
    }
}

/// Explicit owner id, or the one carried in the session token.
pub(crate) fn resolve_owner(session: &Session, user_id: Option<UserId>) -> Result<UserId, Error> {
    user_id.map_or_else(|| session.require_user_id(), Ok)
}

fn error_code(err: &GatewayError) -> ErrorCode {
    match err.http_status() {
        Some(401) => ErrorCode::Unauthorized,
        Some(403) => ErrorCode::Forbidden,
        Some(404) => ErrorCode::NotFound,
        Some(400..=499) => ErrorCode::InvalidRequest,
        Some(_) => ErrorCode::ServiceUnavailable,
        None => match err {
            GatewayError::Decode { .. } => ErrorCode::InternalError,
            GatewayError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            _ => ErrorCode::ServiceUnavailable,
        },
    }
}


#[cfg(test)]
mod tests {
    //! Gateway failure mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::server_message(GatewayError::rejected(400_u16, "Email already used"), "Email already used", ErrorCode::InvalidRequest)]
    #[case::blank_server_message(GatewayError::rejected(401_u16, "  "), "Login failed", ErrorCode::Unauthorized)]
    #[case::bare_status(GatewayError::status(503_u16), "Login failed", ErrorCode::ServiceUnavailable)]
    #[case::not_found(GatewayError::status(404_u16), "Login failed", ErrorCode::NotFound)]
    #[case::transport(GatewayError::transport("reset"), "Login failed", ErrorCode::ServiceUnavailable)]
    #[case::decode(GatewayError::decode("eof"), "Login failed", ErrorCode::InternalError)]
    fn gateway_failures_prefer_the_server_message(
        #[case] failure: GatewayError,
        #[case] message: &str,
        #[case] code: ErrorCode,
    ) {
        let err = gateway_failure("login", "Login failed")(failure);
        assert_eq!(err.message(), message);
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn explicit_owner_ids_win_over_the_token() {
        let session = test_sessions::signed_in(7, "employer");
        assert_eq!(resolve_owner(&session, Some(UserId::new(9))).ok(), Some(UserId::new(9)));
        assert_eq!(resolve_owner(&session, None).ok(), Some(UserId::new(7)));
    }

    #[rstest]
    fn missing_owner_ids_are_reported() {
        let err = resolve_owner(&test_sessions::without_user_id(), None).expect_err("no id");
        assert_eq!(err.message(), crate::domain::MISSING_USER_ID);
    }
}
