//! Client for the governance dashboard API.

use crate::error::ChainError;
use crate::http::{build_client, fetch_json, join_url, DEFAULT_TIMEOUT};
use crate::source::VotesSource;
use crate::wire::{DecisionCounts, DecisionCountsResponse, TipList, VoteList};

use govtally_types::{Network, ProposalType, TipRecord, TipStatus, VotingType};
use serde::Serialize;
use std::time::Duration;

/// Every request is scoped to one network via the `x-network` header.
pub struct GovernanceApiClient {
    http_client: reqwest::Client,
    base_url: String,
    network: Network,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteTotalsRequest<'a> {
    post_id: u32,
    vote_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecisionCountsRequest<'a> {
    post_id: u32,
    proposal_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserTipsRequest<'a> {
    addresses: Vec<&'a str>,
    tip_status: &'a str,
}

impl GovernanceApiClient {
    pub fn new(base_url: impl Into<String>, network: Network) -> Self {
        Self::with_timeout(base_url, network, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, network: Network, timeout: Duration) -> Self {
        Self {
            http_client: build_client(timeout),
            base_url: base_url.into(),
            network,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> reqwest::RequestBuilder {
        self.http_client
            .post(join_url(&self.base_url, path))
            .header("x-network", self.network.as_str())
            .json(body)
    }
}

/// Trimmed, de-duplicated, non-empty address list.
fn tip_addresses(addresses: &[String]) -> Result<Vec<&str>, ChainError> {
    let mut out: Vec<&str> = Vec::with_capacity(addresses.len());
    for address in addresses.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        if !out.contains(&address) {
            out.push(address);
        }
    }
    if out.is_empty() {
        return Err(ChainError::InvalidRequest(
            "at least one address is required".to_string(),
        ));
    }
    Ok(out)
}

/// Tips on `network` whose `status` side is one of `wanted`. The API filters
/// the same way; anything that slipped through is dropped.
fn own_tips(tips: TipList, wanted: &[&str], status: TipStatus, network: Network) -> Vec<TipRecord> {
    let network = network.as_str();
    tips.into_iter()
        .filter(|t| t.network == network && wanted.contains(&t.own_address(status)))
        .collect()
}

impl VotesSource for GovernanceApiClient {
    async fn vote_totals(
        &self,
        post_id: u32,
        voting_type: VotingType,
    ) -> Result<VoteList, ChainError> {
        let body = VoteTotalsRequest {
            post_id,
            vote_type: voting_type.as_str(),
        };
        fetch_json(self.post("api/v1/votes/total", &body)).await
    }

    async fn decision_counts(
        &self,
        post_id: u32,
        proposal_type: ProposalType,
    ) -> Result<DecisionCounts, ChainError> {
        let body = DecisionCountsRequest {
            post_id,
            proposal_type: proposal_type.indexer_name(),
        };
        let response: DecisionCountsResponse =
            fetch_json(self.post("api/v1/votes/ayeNayTotalCount", &body)).await?;
        Ok(response.into())
    }

    async fn user_tips(
        &self,
        addresses: &[String],
        status: TipStatus,
    ) -> Result<Vec<TipRecord>, ChainError> {
        let wanted = tip_addresses(addresses)?;
        let body = UserTipsRequest {
            addresses: wanted.clone(),
            tip_status: status.as_str(),
        };
        let tips: TipList = fetch_json(self.post("api/v1/tipping/get-user-tips", &body)).await?;
        Ok(own_tips(tips, &wanted, status, self.network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies_are_camel_case() {
        let body = VoteTotalsRequest {
            post_id: 7,
            vote_type: VotingType::ReferendumV2.as_str(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"postId": 7, "voteType": "ReferendumV2"})
        );

        let body = UserTipsRequest {
            addresses: vec!["a"],
            tip_status: TipStatus::Received.as_str(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"addresses": ["a"], "tipStatus": "Received"})
        );
    }

    #[test]
    fn test_tip_addresses_dedup() {
        let input = vec![" a ".to_string(), "b".to_string(), "a".to_string(), "".to_string()];
        assert_eq!(tip_addresses(&input).unwrap(), vec!["a", "b"]);
    }

    fn tip(from: &str, to: &str, network: &str) -> TipRecord {
        TipRecord {
            created_at: "2024-03-01T10:00:00.000Z".into(),
            remark: String::new(),
            network: network.into(),
            tip_from: from.into(),
            tip_to: to.into(),
            user_id: None,
            amount: 1.0,
            token: "DOT".into(),
            extrinsic_hash: None,
        }
    }

    #[test]
    fn test_own_tips_match_the_requested_side() {
        let tips = vec![
            tip("alice", "bob", "polkadot"),
            tip("bob", "alice", "polkadot"),
            tip("alice", "carol", "kusama"),
        ];

        let given = own_tips(tips.clone(), &["alice"], TipStatus::Given, Network::Polkadot);
        assert_eq!(given, vec![tip("alice", "bob", "polkadot")]);

        let received = own_tips(tips, &["alice"], TipStatus::Received, Network::Polkadot);
        assert_eq!(received, vec![tip("bob", "alice", "polkadot")]);
    }

    #[tokio::test]
    async fn test_user_tips_rejects_empty_addresses() {
        let client = GovernanceApiClient::new("http://127.0.0.1:1", Network::Polkadot);
        let err = client
            .user_tips(&[" ".to_string()], TipStatus::Given)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidRequest(_)));
    }
}
