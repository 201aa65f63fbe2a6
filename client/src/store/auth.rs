//! Authentication and account management.
//!
//! Sign-in operations replace the caller's [`Session`] and persist it
//! through the [`SessionStore`] before they are considered fulfilled, so a
//! failed save rejects the operation and leaves the caller signed out.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::{Container, ContainerState, gateway_failure};
use crate::domain::ports::{AuthGateway, SessionStore, SessionStoreError};
use crate::domain::{
    BearerToken, Error, LoginCredentials, PasswordChange, Registration, Session, SessionUser,
    UserId, UserListItem,
};

/// Data held by the auth container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthSnapshot {
    /// Identity of the signed-in user.
    pub user: Option<SessionUser>,
    /// Every account, from the admin listing.
    pub users: Vec<UserListItem>,
}

/// Authentication and account operations.
pub struct AuthStore {
    container: Container<AuthSnapshot>,
    gateway: Arc<dyn AuthGateway>,
    sessions: Arc<dyn SessionStore>,
}

fn session_failure(
    operation: &'static str,
    fallback: &'static str,
) -> impl FnOnce(SessionStoreError) -> Error {
    move |err| {
        warn!(operation, error = %err, "session storage failed");
        Error::internal(fallback)
    }
}

impl AuthStore {
    /// Empty store driving `gateway` and persisting through `sessions`.
    pub fn new(gateway: Arc<dyn AuthGateway>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            container: Container::new("auth"),
            gateway,
            sessions,
        }
    }

    /// Current auth state.
    pub fn state(&self) -> ContainerState<AuthSnapshot> {
        self.container.state()
    }

    /// Receiver notified on every auth state change.
    pub fn subscribe(&self) -> watch::Receiver<ContainerState<AuthSnapshot>> {
        self.container.subscribe()
    }

    /// Load the persisted session and seed the held identity from it.
    pub fn restore_session(&self) -> Result<Session, Error> {
        let session = self
            .sessions
            .load()
            .map_err(session_failure("restore_session", "Failed to read saved session"))?;
        let user = session.user().cloned();
        self.container.update(|snapshot| snapshot.user = user);
        Ok(session)
    }

    /// Create an account and sign in as it.
    pub async fn register(
        &self,
        session: &mut Session,
        registration: &Registration,
    ) -> Result<SessionUser, Error> {
        let work = async {
            let token = self
                .gateway
                .register(registration)
                .await
                .map_err(gateway_failure("register", "Signup failed"))?;
            self.establish(token, registration.email(), "register", "Signup failed")
        };
        let (user, established) = self.container.run("register", work, Self::merge_sign_in).await?;
        *session = established;
        Ok(user)
    }

    /// Exchange credentials for a session.
    pub async fn login(
        &self,
        session: &mut Session,
        credentials: &LoginCredentials,
    ) -> Result<SessionUser, Error> {
        let work = async {
            let token = self
                .gateway
                .login(credentials)
                .await
                .map_err(gateway_failure("login", "Login failed"))?;
            self.establish(token, credentials.email(), "login", "Login failed")
        };
        let (user, established) = self.container.run("login", work, Self::merge_sign_in).await?;
        *session = established;
        info!(role = user.role.as_deref().unwrap_or_default(), "signed in");
        Ok(user)
    }

    fn establish(
        &self,
        token: BearerToken,
        email: &str,
        operation: &'static str,
        fallback: &'static str,
    ) -> Result<Session, Error> {
        let claims = token.claims().map_err(|err| {
            warn!(operation, error = %err, "token claims unreadable");
            Error::unauthorized(fallback)
        })?;
        let established = Session::authenticated(token, SessionUser::from_claims(email, &claims));
        self.sessions
            .save(&established)
            .map_err(session_failure(operation, fallback))?;
        Ok(established)
    }

    fn merge_sign_in(snapshot: &mut AuthSnapshot, established: Session) -> (SessionUser, Session) {
        let user = established.user().cloned().unwrap_or_default();
        snapshot.user = Some(user.clone());
        (user, established)
    }

    /// Change the signed-in user's password.
    pub async fn change_password(&self, session: &Session, change: &PasswordChange) -> Result<(), Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .change_password(token, change)
                .await
                .map_err(gateway_failure("change_password", "Failed to change password"))
        };
        self.container.run("change_password", work, |_, ()| ()).await
    }

    /// Change the signed-in user's email and persist it.
    ///
    /// The email echoed by the backend wins; the requested one is kept when
    /// nothing is echoed.
    pub async fn update_email(&self, session: &mut Session, new_email: &str) -> Result<String, Error> {
        let work = async {
            let token = session.require_token()?;
            let echoed = self
                .gateway
                .update_email(token, new_email)
                .await
                .map_err(gateway_failure("update_email", "Failed to update email"))?;
            let confirmed = echoed.unwrap_or_else(|| new_email.to_owned());
            let mut updated = session.clone();
            updated.set_email(&confirmed);
            self.sessions
                .save(&updated)
                .map_err(session_failure("update_email", "Failed to update email"))?;
            Ok((confirmed, updated))
        };
        let (confirmed, updated) = self
            .container
            .run("update_email", work, |snapshot, (confirmed, updated)| {
                if let Some(user) = snapshot.user.as_mut() {
                    user.email = Some(confirmed.clone());
                }
                (confirmed, updated)
            })
            .await?;
        *session = updated;
        Ok(confirmed)
    }

    /// Delete the signed-in user's account and sign out.
    pub async fn delete_account(&self, session: &mut Session) -> Result<(), Error> {
        let work = async {
            let token = session.require_token()?;
            let user_id = session.require_user_id()?;
            self.gateway
                .delete_account(token, user_id)
                .await
                .map_err(gateway_failure("delete_account", "Failed to delete account"))?;
            self.sessions
                .clear()
                .map_err(session_failure("delete_account", "Failed to delete account"))
        };
        self.container
            .run("delete_account", work, |snapshot, ()| snapshot.user = None)
            .await?;
        *session = Session::anonymous();
        Ok(())
    }

    /// Load every account.
    pub async fn fetch_users(&self, session: &Session) -> Result<usize, Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .list_users(token)
                .await
                .map_err(gateway_failure("fetch_users", "Failed to fetch users"))
        };
        self.container
            .run("fetch_users", work, |snapshot, users| {
                snapshot.users = users;
                snapshot.users.len()
            })
            .await
    }

    /// Delete another account and drop it from the listing.
    pub async fn delete_user(&self, session: &Session, user_id: UserId) -> Result<(), Error> {
        let work = async {
            let token = session.require_token()?;
            self.gateway
                .delete_user(token, user_id)
                .await
                .map_err(gateway_failure("delete_user", "Failed to delete user"))
        };
        self.container
            .run("delete_user", work, |snapshot, ()| {
                snapshot.users.retain(|user| user.id != user_id);
            })
            .await
    }

    /// Sign out: drop the identity, the caller's session and the stored copy.
    ///
    /// The in-memory session is cleared even when the stored copy cannot be
    /// removed.
    pub fn logout(&self, session: &mut Session) -> Result<(), Error> {
        *session = Session::anonymous();
        self.container.update(|snapshot| snapshot.user = None);
        self.sessions
            .clear()
            .map_err(session_failure("logout", "Failed to clear saved session"))
    }

    /// Replace the held role without contacting the backend.
    pub fn set_user_role(&self, role: &str) {
        self.container.update(|snapshot| {
            snapshot.user.get_or_insert_with(SessionUser::default).role = Some(role.to_owned());
        });
    }
}
