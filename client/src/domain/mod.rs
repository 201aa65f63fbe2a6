//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed records for the job board and the rules
//! that operate on already-loaded data (role routing, list filters,
//! dashboard figures). Types here never perform I/O; driven ports in
//! [`ports`] describe the I/O the store needs.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload surfaced by every operation.
//! - Session / SessionUser / BearerToken / TokenClaims: explicit auth context.
//! - Job, Candidate, Employer, JobApplication, UserListItem: resource records.
//! - LandingRoute / RoutingGate: post-authentication navigation.
//! - UserFilter / StatusFilter / ApplicationFilter: in-memory filters.

pub mod application;
pub mod auth;
pub mod candidate;
pub mod dashboard;
pub mod employer;
pub mod error;
pub mod filters;
pub mod ids;
pub mod job;
pub mod ports;
pub mod routing;
pub mod session;
pub mod user;
mod wire;

pub use self::application::{
    ApplicationStatus, ApplicationSubmission, JobApplication, JobApplicationGroup,
};
pub use self::auth::{
    BearerToken, CredentialsValidationError, LoginCredentials, PasswordChange, Registration,
    Role, TokenClaims, TokenDecodeError,
};
pub use self::candidate::{Candidate, CandidateProfile, ResumeFile};
pub use self::dashboard::{AdminDashboard, EmployerDashboard};
pub use self::employer::{Employer, EmployerAccount, EmployerProfile, NewEmployer};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filters::{ApplicationFilter, RoleFilter, StatusFilter, UserFilter};
pub use self::ids::{ApplicationId, CandidateId, JobId, UserId};
pub use self::job::{EmploymentStatus, Job, JobDraft, JobSearch, JobStats};
pub use self::routing::{FALLBACK_PATH, GateOutcome, LandingRoute, RoutingGate};
pub use self::session::{MISSING_USER_ID, NOT_AUTHENTICATED, Session, SessionUser};
pub use self::user::UserListItem;

/// Convenient operation result alias.
///
/// # Examples
/// ```
/// use jobboard::domain::{Error, OpResult};
///
/// fn guarded() -> OpResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(guarded().is_err());
/// ```
pub type OpResult<T> = Result<T, Error>;
