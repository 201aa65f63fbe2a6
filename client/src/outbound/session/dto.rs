//! On-disk shape of the persisted session.

use serde::{Deserialize, Serialize};

use crate::domain::{BearerToken, Session, SessionUser};

/// `{ "token": ..., "user": { ... }, "role": ... }`.
///
/// `role` mirrors `user.role` so older documents that only carried the
/// top-level key still restore a role.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct StoredSessionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<SessionUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

impl StoredSessionDto {
    pub(super) fn from_session(session: &Session) -> Self {
        let user = session.user().cloned();
        Self {
            token: session.token().map(|token| token.expose().to_owned()),
            role: user.as_ref().and_then(|user| user.role.clone()),
            user,
        }
    }

    pub(super) fn into_session(self) -> Session {
        let Self { token, user, role } = self;
        let user = match (user, role) {
            (Some(mut user), Some(role)) if user.role.is_none() => {
                user.role = Some(role);
                Some(user)
            }
            (None, Some(role)) => Some(SessionUser {
                role: Some(role),
                ..SessionUser::default()
            }),
            (user, _) => user,
        };
        Session::from_parts(token.filter(|raw| !raw.is_empty()).map(BearerToken::new), user)
    }
}
