//! Chain storage client over a sidecar-style REST endpoint.
//!
//! Storage items are read with
//! `GET /pallets/{pallet}/storage/{item}?keys[]=..&at=..`, which returns the
//! decoded storage value as JSON under `value` (`null` when empty).

use crate::error::ChainError;
use crate::http::{build_client, fetch_json, join_url, DEFAULT_TIMEOUT};
use crate::source::ChainSource;
use crate::wire::{Issuance, ReferendumInfo};

use govtally_types::{IssuanceModule, RawAmount};
use serde::Deserialize;
use std::time::Duration;

/// Client for a chain node's REST sidecar.
pub struct SidecarClient {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct StorageResponse<T> {
    value: Option<T>,
}

#[derive(Debug, Deserialize)]
struct BlockResponse {
    hash: String,
}

impl SidecarClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http_client: build_client(timeout),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn storage_url(&self, pallet: &str, item: &str) -> String {
        join_url(&self.base_url, &format!("pallets/{pallet}/storage/{item}"))
    }

    async fn storage_value<T: serde::de::DeserializeOwned>(
        &self,
        pallet: &str,
        item: &str,
        keys: &[String],
        at: Option<&str>,
    ) -> Result<Option<T>, ChainError> {
        let mut query: Vec<(&str, &str)> = keys.iter().map(|k| ("keys[]", k.as_str())).collect();
        if let Some(at) = at {
            query.push(("at", at));
        }

        let request = self
            .http_client
            .get(self.storage_url(pallet, item))
            .query(&query);
        let response: StorageResponse<T> = fetch_json(request).await?;
        Ok(response.value)
    }
}

impl ChainSource for SidecarClient {
    async fn referendum_info(
        &self,
        index: u32,
        at: Option<&str>,
    ) -> Result<Option<ReferendumInfo>, ChainError> {
        tracing::debug!(index, at, "querying referendumInfoFor");
        self.storage_value("referenda", "referendumInfoFor", &[index.to_string()], at)
            .await
    }

    async fn block_hash(&self, number: u64) -> Result<String, ChainError> {
        let url = join_url(&self.base_url, &format!("blocks/{number}"));
        let block: BlockResponse = fetch_json(self.http_client.get(url)).await?;
        Ok(block.hash)
    }

    async fn issuance(&self, module: IssuanceModule) -> Result<Issuance, ChainError> {
        let pallet = module.pallet();
        let total: Option<RawAmount> = self
            .storage_value(pallet, "totalIssuance", &[], None)
            .await?;
        let inactive: Option<RawAmount> = self
            .storage_value(pallet, "inactiveIssuance", &[], None)
            .await?;

        let total = total.ok_or_else(|| {
            ChainError::InvalidResponse(format!("{pallet}.totalIssuance is empty"))
        })?;
        Ok(Issuance {
            total,
            inactive: inactive.unwrap_or(RawAmount::Int(0)),
        })
    }
}
