//! Shared HTTP plumbing for the source clients.

use crate::error::ChainError;

use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default timeout for source requests.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .build()
        .unwrap_or_default()
}

pub(crate) fn classify(e: reqwest::Error) -> ChainError {
    if e.is_timeout() {
        ChainError::Unreachable(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ChainError::Unreachable(format!("connection failed: {e}"))
    } else {
        ChainError::RequestFailed(e.to_string())
    }
}

/// Send a prepared request and decode a successful JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ChainError> {
    let response = request.send().await.map_err(classify)?;

    if !response.status().is_success() {
        return Err(ChainError::RequestFailed(format!(
            "HTTP status {}",
            response.status()
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ChainError::InvalidResponse(format!("failed to parse response: {e}")))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
