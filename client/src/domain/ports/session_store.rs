//! Driven port for persisting the session between runs.
//!
//! Only one session is stored; the last writer wins.

use super::define_port_error;
use crate::domain::Session;

define_port_error! {
    /// Errors surfaced while reading or writing the stored session.
    pub enum SessionStoreError {
        /// The storage medium failed.
        Io { message: String } =>
            "session storage failed: {message}",
        /// The stored document could not be decoded.
        Corrupt { message: String } =>
            "stored session is corrupt: {message}",
    }
}

/// Load, save and clear the persisted session.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read the stored session, or an anonymous one when nothing is stored.
    fn load(&self) -> Result<Session, SessionStoreError>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionStoreError>;
}
