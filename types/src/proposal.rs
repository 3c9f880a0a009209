//! Proposal types and status history.

use crate::error::TypesError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of governance post a tally is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalType {
    /// Legacy democracy referendum, tallied by the indexer.
    Referendums,
    /// OpenGov referendum, tallied from live chain storage.
    #[serde(rename = "referendums_v2")]
    ReferendumV2,
    FellowshipReferendums,
    DemocracyProposals,
    CouncilMotions,
    TechCommitteeProposals,
    TreasuryProposals,
    Tips,
    Bounties,
}

/// Vote list category understood by the governance API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VotingType {
    Referendum,
    ReferendumV2,
    Fellowship,
    DemocracyProposal,
    Motion,
}

impl VotingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Referendum => "Referendum",
            Self::ReferendumV2 => "ReferendumV2",
            Self::Fellowship => "Fellowship",
            Self::DemocracyProposal => "DemocracyProposal",
            Self::Motion => "Motion",
        }
    }
}

impl ProposalType {
    pub const ALL: [ProposalType; 9] = [
        Self::Referendums,
        Self::ReferendumV2,
        Self::FellowshipReferendums,
        Self::DemocracyProposals,
        Self::CouncilMotions,
        Self::TechCommitteeProposals,
        Self::TreasuryProposals,
        Self::Tips,
        Self::Bounties,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Referendums => "referendums",
            Self::ReferendumV2 => "referendums_v2",
            Self::FellowshipReferendums => "fellowship_referendums",
            Self::DemocracyProposals => "democracy_proposals",
            Self::CouncilMotions => "council_motions",
            Self::TechCommitteeProposals => "tech_committee_proposals",
            Self::TreasuryProposals => "treasury_proposals",
            Self::Tips => "tips",
            Self::Bounties => "bounties",
        }
    }

    /// Name of the proposal type in the indexer's schema.
    pub fn indexer_name(&self) -> &'static str {
        match self {
            Self::Referendums => "Referendum",
            Self::ReferendumV2 => "ReferendumV2",
            Self::FellowshipReferendums => "FellowshipReferendum",
            Self::DemocracyProposals => "DemocracyProposal",
            Self::CouncilMotions => "CouncilMotion",
            Self::TechCommitteeProposals => "TechCommitteeProposal",
            Self::TreasuryProposals => "TreasuryProposal",
            Self::Tips => "Tip",
            Self::Bounties => "Bounty",
        }
    }

    /// The vote list this proposal type is voted through, if any.
    pub fn voting_type(&self) -> Option<VotingType> {
        match self {
            Self::Referendums => Some(VotingType::Referendum),
            Self::ReferendumV2 => Some(VotingType::ReferendumV2),
            Self::FellowshipReferendums => Some(VotingType::Fellowship),
            Self::DemocracyProposals => Some(VotingType::DemocracyProposal),
            Self::CouncilMotions | Self::TechCommitteeProposals => Some(VotingType::Motion),
            Self::TreasuryProposals | Self::Tips | Self::Bounties => None,
        }
    }

    /// Whether the tally is read from live chain storage.
    pub fn reads_tally_on_chain(&self) -> bool {
        matches!(self, Self::ReferendumV2)
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| TypesError::UnknownProposalType(s.to_string()))
    }
}

/// One entry of a proposal's on-chain status history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: String,
    #[serde(default)]
    pub block: Option<u64>,
}

impl StatusEntry {
    pub const TERMINAL: [&'static str; 3] = ["Rejected", "TimedOut", "Confirmed"];

    pub fn is_terminal(&self) -> bool {
        Self::TERMINAL.contains(&self.status.as_str())
    }

    /// Block at which a finished referendum's final tally was last visible.
    ///
    /// The tally is cleared in the block that concludes the referendum, so the
    /// snapshot is taken one block earlier.
    pub fn snapshot_block(history: &[StatusEntry]) -> Option<u64> {
        history
            .iter()
            .find(|entry| entry.is_terminal())
            .and_then(|entry| entry.block)
            .filter(|block| *block > 0)
            .map(|block| block - 1)
    }
}
