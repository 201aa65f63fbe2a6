//! Reqwest-backed adapter for the job board REST API.
//!
//! One [`HttpBackend`] implements every gateway port. The adapter owns
//! transport details only: endpoint paths, bearer headers, multipart
//! encoding, status mapping and envelope decoding.

use std::time::Duration;

use reqwest::{Client, Url};

mod applications;
mod auth;
mod candidates;
mod dto;
mod employers;
mod jobs;
mod transport;

/// Gateway adapter for one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// Endpoint paths are joined onto `base`, so a missing trailing slash is
    /// added.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base))
    }

    /// Build an adapter around an existing client.
    pub fn with_client(client: Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    /// Base URL every endpoint is resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }
}
