//! Session persisted as a JSON document in a capability-scoped directory.
//!
//! Writes go to a hidden temporary file that is renamed over the target, so
//! a crash mid-write never leaves a truncated session behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::{Dir, OpenOptions};
use cap_std::ambient_authority;
use tracing::debug;

use super::dto::StoredSessionDto;
use crate::domain::Session;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// File name used inside the session directory.
pub const SESSION_FILE_NAME: &str = "session.json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Session store backed by `<dir>/session.json`.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
    location: Utf8PathBuf,
}

impl FileSessionStore {
    /// Open (creating if needed) the session directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SessionStoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error(path))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error(path))?;
        Ok(Self {
            dir,
            location: path.join(SESSION_FILE_NAME),
        })
    }

    /// Full path of the session document.
    pub fn location(&self) -> &Utf8Path {
        &self.location
    }
}

fn io_error(path: &Utf8Path) -> impl FnOnce(io::Error) -> SessionStoreError + '_ {
    move |err| SessionStoreError::io(format!("{path}: {err}"))
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, SessionStoreError> {
        let contents = match self.dir.read_to_string(SESSION_FILE_NAME) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Session::anonymous()),
            Err(err) => return Err(io_error(&self.location)(err)),
        };
        let stored: StoredSessionDto = serde_json::from_str(&contents)
            .map_err(|err| SessionStoreError::corrupt(format!("{}: {err}", self.location)))?;
        Ok(stored.into_session())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let contents = serde_json::to_string_pretty(&StoredSessionDto::from_session(session))
            .map_err(|err| SessionStoreError::corrupt(err.to_string()))?;
        write_atomic(&self.dir, SESSION_FILE_NAME, &contents)
            .map_err(io_error(&self.location))?;
        debug!(path = %self.location, "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match self.dir.remove_file(SESSION_FILE_NAME) {
            Ok(()) => {
                debug!(path = %self.location, "session cleared");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.location)(err)),
        }
    }
}

fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    if let Err(err) = write_temp_file(dir, &tmp_name, contents)
        .and_then(|()| replace_target(dir, &tmp_name, file_name))
    {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        debug!("session directory sync skipped");
    }
}
