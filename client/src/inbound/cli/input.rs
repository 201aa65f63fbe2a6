//! Input documents named on the command line.
//!
//! Files are opened through a capability handle on their parent directory.

use std::io::Read;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::de::DeserializeOwned;

use super::CliError;
use crate::domain::{EmploymentStatus, JobDraft, ResumeFile};

fn read_bytes(path: &Utf8Path) -> Result<(String, Vec<u8>), CliError> {
    let failure = |source| CliError::Read {
        path: path.to_owned(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        failure(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "input path must be a file",
        ))
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(failure)?;
    let mut file = directory.open(file_name).map_err(failure)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(failure)?;
    Ok((file_name.to_owned(), bytes))
}

/// Decode the JSON document at `path`.
pub(super) fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let (_, bytes) = read_bytes(path)?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Decode a job posting document, which must name a known status.
pub(super) fn read_draft(path: &Utf8Path) -> Result<JobDraft, CliError> {
    let draft: JobDraft = read_json(path)?;
    if draft.employment_status == EmploymentStatus::Unknown {
        return Err(CliError::UnknownStatus {
            path: path.to_owned(),
        });
    }
    Ok(draft)
}

/// Load a resume for upload, keeping its file name.
pub(super) fn read_resume(path: &Utf8Path) -> Result<ResumeFile, CliError> {
    let (file_name, bytes) = read_bytes(path)?;
    Ok(ResumeFile::new(file_name, bytes))
}
