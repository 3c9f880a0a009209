//! Traits over the external vote data sources.

use crate::error::ChainError;
use crate::wire::{DecisionCounts, IndexerReferendum, Issuance, ReferendumInfo, VoteList};

use govtally_types::{IssuanceModule, ProposalType, TipRecord, TipStatus, VotingType};
use std::future::Future;

/// Live chain storage.
pub trait ChainSource: Send + Sync {
    /// `referenda.referendumInfoFor(index)`, optionally at a historical block
    /// hash. `None` when the storage entry is empty.
    fn referendum_info(
        &self,
        index: u32,
        at: Option<&str>,
    ) -> impl Future<Output = Result<Option<ReferendumInfo>, ChainError>> + Send;

    /// Hash of the block with the given number.
    fn block_hash(&self, number: u64) -> impl Future<Output = Result<String, ChainError>> + Send;

    /// Total and inactive issuance, read from `module`.
    fn issuance(
        &self,
        module: IssuanceModule,
    ) -> impl Future<Output = Result<Issuance, ChainError>> + Send;
}

/// Pre-aggregated historical referendum data.
pub trait IndexerSource: Send + Sync {
    fn referendum(
        &self,
        index: u32,
    ) -> impl Future<Output = Result<Option<IndexerReferendum>, ChainError>> + Send;
}

/// Governance API: vote lists, per-decision counts and tips.
pub trait VotesSource: Send + Sync {
    fn vote_totals(
        &self,
        post_id: u32,
        voting_type: VotingType,
    ) -> impl Future<Output = Result<VoteList, ChainError>> + Send;

    fn decision_counts(
        &self,
        post_id: u32,
        proposal_type: ProposalType,
    ) -> impl Future<Output = Result<DecisionCounts, ChainError>> + Send;

    fn user_tips(
        &self,
        addresses: &[String],
        status: TipStatus,
    ) -> impl Future<Output = Result<Vec<TipRecord>, ChainError>> + Send;
}
