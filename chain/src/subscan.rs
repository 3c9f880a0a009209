//! Client for a subscan-style indexer.

use crate::error::ChainError;
use crate::http::{build_client, fetch_json, join_url, DEFAULT_TIMEOUT};
use crate::source::IndexerSource;
use crate::wire::IndexerReferendum;

use govtally_types::Network;
use serde::Deserialize;
use std::time::Duration;

const REFERENDUM_PATH: &str = "api/scan/democracy/referendum";

/// Client for the indexer's democracy endpoints.
///
/// Sends `POST {base}/api/scan/democracy/referendum` with
/// `{"referendum_index": n}` and unwraps the `{code, message, data}` envelope.
pub struct SubscanClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

impl SubscanClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: build_client(timeout),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Client for the network's public indexer host.
    pub fn for_network(network: Network, api_key: Option<String>) -> Self {
        Self::new(network.indexer_url(), api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<Option<T>, ChainError> {
    if envelope.code != 0 {
        return Err(ChainError::RequestFailed(format!(
            "indexer error {}: {}",
            envelope.code, envelope.message
        )));
    }
    Ok(envelope.data)
}

impl IndexerSource for SubscanClient {
    async fn referendum(&self, index: u32) -> Result<Option<IndexerReferendum>, ChainError> {
        let mut request = self
            .http_client
            .post(join_url(&self.base_url, REFERENDUM_PATH))
            .json(&serde_json::json!({ "referendum_index": index }));
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let envelope: Envelope<IndexerReferendum> = fetch_json(request).await?;
        unwrap_envelope(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_network_uses_public_host() {
        let client = SubscanClient::for_network(Network::Kusama, None);
        assert_eq!(client.base_url(), "https://kusama.api.subscan.io");
    }

    #[test]
    fn test_envelope_success() {
        let json = r#"{"code":0,"message":"Success","data":{"info":{"aye_amount":"10","nay_amount":"2","abstain_amount":"0","turnout":"12"}}}"#;
        let envelope: Envelope<IndexerReferendum> = serde_json::from_str(json).unwrap();
        let data = unwrap_envelope(envelope).unwrap().unwrap();
        assert!(data.has_amounts());
    }

    #[test]
    fn test_envelope_error_code() {
        let json = r#"{"code":10004,"message":"Record Not Found","data":null}"#;
        let envelope: Envelope<IndexerReferendum> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            unwrap_envelope(envelope),
            Err(ChainError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_envelope_empty_data() {
        let json = r#"{"code":0,"message":"Success","data":null}"#;
        let envelope: Envelope<IndexerReferendum> = serde_json::from_str(json).unwrap();
        assert!(unwrap_envelope(envelope).unwrap().is_none());
    }
}
