//! Vote data sources.
//!
//! The tally aggregator reads from three external collaborators, each behind a
//! trait so tests can swap in the in-memory doubles from `govtally-nullables`:
//!
//! - [`ChainSource`]: live chain storage (referendum state, issuance, block hashes),
//!   served over a sidecar-style REST endpoint by [`SidecarClient`].
//! - [`IndexerSource`]: pre-aggregated referendum data from a subscan-style
//!   indexer, served by [`SubscanClient`].
//! - [`VotesSource`]: vote lists, per-decision counts and tips from the
//!   governance API, served by [`GovernanceApiClient`].

pub mod api;
pub mod error;
mod http;
pub mod sidecar;
pub mod source;
pub mod subscan;
pub mod wire;

pub use api::GovernanceApiClient;
pub use error::ChainError;
pub use sidecar::SidecarClient;
pub use source::{ChainSource, IndexerSource, VotesSource};
pub use subscan::SubscanClient;
pub use wire::{
    DecisionCounts, IndexerReferendum, IndexerReferendumInfo, Issuance, OngoingReferendum,
    RawTally, RawVote, RawVoteBalance, ReferendumInfo, VoteList,
};
