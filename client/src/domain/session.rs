//! Explicit session handed to every store operation.
//!
//! The session replaces any ambient credential lookup: callers load it from
//! a [`SessionStore`](crate::domain::ports::SessionStore), pass it by
//! reference into operations and save or clear it when authentication
//! changes.

use serde::{Deserialize, Serialize};

use super::{BearerToken, Error, Role, TokenClaims, UserId};

/// Message used whenever an operation needs a token and none is present.
pub const NOT_AUTHENTICATED: &str = "User not authenticated";
/// Message used when the token carries no usable user id.
pub const MISSING_USER_ID: &str = "User ID is missing in token";

/// Minimal identity kept alongside the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Email used to sign in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name from the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw role claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionUser {
    /// Build the identity record stored after a successful sign-in.
    pub fn from_claims(email: &str, claims: &TokenClaims) -> Self {
        Self {
            email: Some(email.to_owned()),
            name: claims.name.clone(),
            role: Some(claims.role.clone()),
        }
    }

    /// Parsed role, if it is one the client knows.
    pub fn known_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Token and identity for the current user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<BearerToken>,
    user: Option<SessionUser>,
}

impl Session {
    /// A session with no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session holding `token` and `user`.
    pub fn authenticated(token: BearerToken, user: SessionUser) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    /// Rebuild a session from persisted parts.
    pub fn from_parts(token: Option<BearerToken>, user: Option<SessionUser>) -> Self {
        Self { token, user }
    }

    /// Bearer token, if signed in.
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Stored identity, if signed in.
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token or the `"User not authenticated"` rejection.
    pub fn require_token(&self) -> Result<&BearerToken, Error> {
        self.token
            .as_ref()
            .ok_or_else(|| Error::unauthorized(NOT_AUTHENTICATED))
    }

    /// Decode the token's user id.
    ///
    /// Fails with `"User not authenticated"` without a token and with
    /// `"User ID is missing in token"` when the claims cannot supply one.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        let token = self.require_token()?;
        token
            .claims()
            .ok()
            .and_then(|claims| claims.user_id)
            .ok_or_else(|| Error::unauthorized(MISSING_USER_ID))
    }

    /// Replace the stored role, keeping the rest of the identity.
    pub fn set_role(&mut self, role: &str) {
        self.user.get_or_insert_with(SessionUser::default).role = Some(role.to_owned());
    }

    /// Replace the stored email, keeping the rest of the identity.
    pub fn set_email(&mut self, email: &str) {
        if let Some(user) = self.user.as_mut() {
            user.email = Some(email.to_owned());
        }
    }
}
