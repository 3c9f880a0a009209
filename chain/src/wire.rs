//! Response shapes of the external vote data sources.
//!
//! Amounts stay as [`RawAmount`] here; normalization into balances happens in
//! the tally crate so every source goes through the same decoder.

use govtally_types::{RawAmount, TipRecord};
use serde::{Deserialize, Serialize};

/// Aye/nay/abstain amounts as encoded by the source (hex or decimal).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTally {
    #[serde(default)]
    pub ayes: Option<RawAmount>,
    #[serde(default)]
    pub nays: Option<RawAmount>,
    #[serde(default)]
    pub abstain: Option<RawAmount>,
}

/// `referenda.referendumInfoFor` storage value.
///
/// Only the ongoing state carries a tally; approved, rejected, cancelled,
/// timed-out and killed states deserialize with `ongoing: None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferendumInfo {
    #[serde(default)]
    pub ongoing: Option<OngoingReferendum>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OngoingReferendum {
    #[serde(default)]
    pub track: Option<u16>,
    #[serde(default)]
    pub tally: Option<RawTally>,
}

/// Total and inactive issuance of the native token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issuance {
    pub total: RawAmount,
    pub inactive: RawAmount,
}

/// Indexer view of a legacy referendum.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerReferendum {
    #[serde(default)]
    pub ayes_count: Option<u64>,
    #[serde(default)]
    pub turnout: Option<RawAmount>,
    #[serde(default)]
    pub info: Option<IndexerReferendumInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerReferendumInfo {
    #[serde(default)]
    pub aye_amount: Option<RawAmount>,
    #[serde(default)]
    pub nay_amount: Option<RawAmount>,
    #[serde(default)]
    pub abstain_amount: Option<RawAmount>,
    #[serde(default)]
    pub turnout: Option<RawAmount>,
}

impl IndexerReferendum {
    /// Turnout, preferring the figure nested in `info`.
    pub fn turnout(&self) -> Option<&RawAmount> {
        self.info
            .as_ref()
            .and_then(|info| info.turnout.as_ref())
            .or(self.turnout.as_ref())
    }

    /// Whether the payload carries any aggregate amount at all.
    pub fn has_amounts(&self) -> bool {
        self.info.as_ref().is_some_and(|info| {
            info.aye_amount.is_some() || info.nay_amount.is_some() || info.abstain_amount.is_some()
        })
    }
}

/// Balance field of a vote as the governance API returns it: a bare amount
/// for standard votes, or an object for split votes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawVoteBalance {
    Flat(RawAmount),
    Parts {
        #[serde(default)]
        value: Option<RawAmount>,
        #[serde(default)]
        aye: Option<RawAmount>,
        #[serde(default)]
        nay: Option<RawAmount>,
        #[serde(default)]
        abstain: Option<RawAmount>,
    },
}

/// A vote as listed by the governance API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawVote {
    #[serde(default)]
    pub voter: Option<String>,
    pub decision: String,
    #[serde(default)]
    pub balance: Option<RawVoteBalance>,
    #[serde(default, rename = "lockPeriod")]
    pub lock_period: Option<u32>,
}

/// Vote list for one proposal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteList {
    #[serde(default)]
    pub data: Vec<RawVote>,
    #[serde(default, rename = "totalCount")]
    pub total_count: u64,
}

/// Number of accounts per decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionCounts {
    pub ayes: u64,
    pub nays: u64,
    pub abstain: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TotalCount {
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
}

/// `ayeNayTotalCount` response: `{aye: {totalCount}, nay: {...}, abstain: {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DecisionCountsResponse {
    pub aye: TotalCount,
    pub nay: TotalCount,
    pub abstain: TotalCount,
}

impl From<DecisionCountsResponse> for DecisionCounts {
    fn from(r: DecisionCountsResponse) -> Self {
        Self {
            ayes: r.aye.total_count,
            nays: r.nay.total_count,
            abstain: r.abstain.total_count,
        }
    }
}

pub(crate) type TipList = Vec<TipRecord>;
