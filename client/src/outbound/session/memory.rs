//! Process-local session store for tests and one-shot runs.

use std::sync::{Mutex, PoisonError};

use crate::domain::Session;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// Session store held in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl InMemorySessionStore {
    /// Store preloaded with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    /// Whether a session is currently stored.
    pub fn is_saved(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Session, SessionStoreError> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Last writer wins.
    use super::*;
    use crate::domain::{BearerToken, SessionUser};
    use rstest::rstest;

    #[rstest]
    fn saves_replace_and_clear_removes() {
        let store = InMemorySessionStore::default();
        assert!(!store.is_saved());

        let session = Session::authenticated(BearerToken::new("a.b.c"), SessionUser::default());
        store.save(&session).expect("save");
        assert_eq!(store.load().expect("load"), session);

        store.clear().expect("clear");
        assert!(!store.is_saved());
        assert_eq!(store.load().expect("load"), Session::anonymous());
    }
}
