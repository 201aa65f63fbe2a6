//! Role-based landing routes.
//!
//! After sign-in or sign-up the view layer asks the gate where to send the
//! user. Known roles map to their landing area; anything else lands on the
//! generic page with a notice the view must show.

use tracing::warn;

use super::{NOT_AUTHENTICATED, Role, Session};

/// Generic landing page used when no role-specific route applies.
pub const FALLBACK_PATH: &str = "/";

/// Role-specific landing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingRoute {
    /// Employer dashboard.
    EmployerDashboard,
    /// Admin dashboard.
    AdminDashboard,
    /// Candidate home.
    CandidateHome,
}

impl LandingRoute {
    /// Route for a known role.
    pub const fn for_known_role(role: Role) -> Self {
        match role {
            Role::Employer => Self::EmployerDashboard,
            Role::Admin => Self::AdminDashboard,
            Role::Candidate => Self::CandidateHome,
        }
    }

    /// Route for a raw role claim. Unknown roles are logged and yield `None`.
    ///
    /// # Examples
    /// ```
    /// use jobboard::domain::LandingRoute;
    ///
    /// assert_eq!(
    ///     LandingRoute::for_role("admin").map(LandingRoute::path),
    ///     Some("/pages/admin/dashboard")
    /// );
    /// assert!(LandingRoute::for_role("recruiter").is_none());
    /// ```
    pub fn for_role(raw: &str) -> Option<Self> {
        let route = Role::parse(raw).map(Self::for_known_role);
        if route.is_none() {
            warn!(role = raw, "no landing route for role");
        }
        route
    }

    /// Path of the landing area.
    pub const fn path(self) -> &'static str {
        match self {
            Self::EmployerDashboard => "/pages/employer/dashboard",
            Self::AdminDashboard => "/pages/admin/dashboard",
            Self::CandidateHome => "/pages/candidate",
        }
    }
}

/// Where the gate sends the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The role's landing area.
    Landing(LandingRoute),
    /// The generic page, with a notice explaining why.
    Fallback {
        /// Path to navigate to.
        path: &'static str,
        /// Message the view must display.
        notice: String,
    },
}

impl GateOutcome {
    fn fallback(notice: impl Into<String>) -> Self {
        Self::Fallback {
            path: FALLBACK_PATH,
            notice: notice.into(),
        }
    }

    /// Path to navigate to.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing(route) => route.path(),
            Self::Fallback { path, .. } => *path,
        }
    }

    /// Notice to show, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Landing(_) => None,
            Self::Fallback { notice, .. } => Some(notice.as_str()),
        }
    }
}

/// Post-authentication navigation decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingGate;

impl RoutingGate {
    /// Decide where to go once `session` has been authenticated.
    ///
    /// The role is read from the token's claims, never from the stored
    /// identity, so a stale identity cannot misroute the user.
    pub fn after_authentication(session: &Session) -> GateOutcome {
        let Some(token) = session.token() else {
            return GateOutcome::fallback(NOT_AUTHENTICATED);
        };
        let claims = match token.claims() {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "could not decode role from token");
                return GateOutcome::fallback("Could not read your account role. Please sign in again.");
            }
        };
        match LandingRoute::for_role(&claims.role) {
            Some(route) => GateOutcome::Landing(route),
            None => GateOutcome::fallback(format!(
                "Your account role \"{}\" has no home page. Please contact support.",
                claims.role
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::auth::test_tokens::token_with_payload;
    use crate::domain::{BearerToken, SessionUser};
    use rstest::rstest;
    use serde_json::json;

    fn session_with_role(role: &str) -> Session {
        let token = token_with_payload(&json!({ "userId": 1, "role": role }));
        Session::authenticated(token, SessionUser::default())
    }

    #[rstest]
    #[case("employer", "/pages/employer/dashboard")]
    #[case("admin", "/pages/admin/dashboard")]
    #[case("candidate", "/pages/candidate")]
    fn known_roles_route_to_their_landing_area(#[case] role: &str, #[case] expected: &str) {
        assert_eq!(LandingRoute::for_role(role).map(LandingRoute::path), Some(expected));
        let outcome = RoutingGate::after_authentication(&session_with_role(role));
        assert_eq!(outcome.path(), expected);
        assert!(outcome.notice().is_none());
    }

    #[rstest]
    #[case("recruiter")]
    #[case("")]
    #[case("ADMIN")]
    fn unknown_roles_have_no_route_but_the_gate_falls_back(#[case] role: &str) {
        assert!(LandingRoute::for_role(role).is_none());
        let outcome = RoutingGate::after_authentication(&session_with_role(role));
        assert_eq!(outcome.path(), FALLBACK_PATH);
        assert!(outcome.notice().is_some_and(|notice| notice.contains("no home page")));
    }

    #[rstest]
    fn undecodable_tokens_fall_back_with_a_notice() {
        let session = Session::authenticated(BearerToken::new("nope"), SessionUser::default());
        let outcome = RoutingGate::after_authentication(&session);
        assert_eq!(outcome.path(), FALLBACK_PATH);
        assert!(outcome.notice().is_some());
    }

    #[rstest]
    fn anonymous_sessions_fall_back() {
        let outcome = RoutingGate::after_authentication(&Session::anonymous());
        assert_eq!(outcome.notice(), Some(NOT_AUTHENTICATED));
    }
}
