//! Request plumbing shared by every resource adapter: URL joining, bearer
//! headers, status mapping and body decoding.

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::HttpBackend;
use super::dto::ErrorBodyDto;
use crate::domain::BearerToken;
use crate::domain::ports::GatewayError;

impl HttpBackend {
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::invalid_request(format!("invalid endpoint {path}: {err}")))
    }

    /// Unauthenticated request.
    pub(super) fn public(&self, method: Method, path: &str) -> Result<RequestBuilder, GatewayError> {
        Ok(self
            .client
            .request(method, self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Request carrying `Authorization: Bearer <token>`.
    pub(super) fn authorised(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
    ) -> Result<RequestBuilder, GatewayError> {
        Ok(self.public(method, path)?.bearer_auth(token.expose()))
    }
}

/// Send `request` and decode a successful body as `T`.
pub(super) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, GatewayError> {
    let body = send(request).await?;
    decode(&body)
}

/// Send `request`, ignoring the body of a successful response.
pub(super) async fn fire(request: RequestBuilder) -> Result<(), GatewayError> {
    send(request).await.map(drop)
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

pub(super) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|error| {
        GatewayError::decode(format!(
            "unexpected response payload: {error} (body: {})",
            body_preview(body)
        ))
    })
}

pub(super) fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout(error.to_string())
    } else {
        GatewayError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let code = status.as_u16();
    if let Some(message) = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message)
    {
        return GatewayError::rejected(code, message);
    }

    debug!(status = code, body = %body_preview(body), "error response without a message");
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GatewayError::timeout(format!("status {code}"))
        }
        _ => GatewayError::status(code),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
