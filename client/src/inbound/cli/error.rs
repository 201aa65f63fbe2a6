//! Failures surfaced by the command-line front end.

use std::io;

use camino::Utf8PathBuf;
use pagination::PageRequestError;

use crate::domain::{CredentialsValidationError, Error};

/// Why a command could not complete.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A store operation was rejected.
    #[error(transparent)]
    Operation(#[from] Error),
    /// Sign-in or sign-up fields failed validation.
    #[error(transparent)]
    Credentials(#[from] CredentialsValidationError),
    /// The page size was zero.
    #[error(transparent)]
    Paging(#[from] PageRequestError),
    /// An input file could not be read.
    #[error("read {path}: {source}")]
    Read {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// An input file did not hold the expected JSON document.
    #[error("parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// A job posting document did not name a known employment status.
    #[error("{path}: employment_status must be Active, Inactive or Filled")]
    UnknownStatus {
        /// File that failed.
        path: Utf8PathBuf,
    },
    /// A record the command works on is not in the fetched listing.
    #[error("{0}")]
    Missing(String),
    /// Writing the rendered output failed.
    #[error("write output: {0}")]
    Output(#[from] io::Error),
}
