//! Everything a proposal's stats view needs, collected in one pass.

use crate::cache::{CacheKey, StatsCache};
use crate::issuance::active_issuance_or_none;
use crate::normalize::{self, normalize_opt};
use crate::power::{PowerMode, VotingPowerCalculator, VotingPowerEntry};
use crate::resolver::{fetch_referendum_info, resolve, TallyInputs, TallySource};

use govtally_chain::{
    ChainSource, DecisionCounts, IndexerReferendum, IndexerSource, RawTally, VoteList, VotesSource,
};
use govtally_types::{Balance, Network, ProposalType, StatusEntry, Tally, VoteRecord};
use serde::Serialize;
use std::sync::Arc;

/// One stats query.
#[derive(Clone, Debug)]
pub struct StatsRequest {
    pub proposal_id: u32,
    pub proposal_type: ProposalType,
    pub network: Network,
    /// Tally already attached to the post payload, if any.
    pub inline_tally: Option<RawTally>,
    pub status_history: Vec<StatusEntry>,
}

impl StatsRequest {
    pub fn new(proposal_id: u32, proposal_type: ProposalType, network: Network) -> Self {
        Self {
            proposal_id,
            proposal_type,
            network,
            inline_tally: None,
            status_history: Vec::new(),
        }
    }

    pub fn with_inline_tally(mut self, tally: RawTally) -> Self {
        self.inline_tally = Some(tally);
        self
    }

    pub fn with_status_history(mut self, history: Vec<StatusEntry>) -> Self {
        self.status_history = history;
        self
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.proposal_id, self.network)
    }
}

/// What the stats view should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// Issuance not known yet: skeleton.
    Loading,
    /// The vote list is empty.
    NoVotes,
    Ready,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostStats {
    pub proposal_id: u32,
    pub proposal_type: ProposalType,
    pub network: Network,
    pub tally: Tally,
    pub tally_source: TallySource,
    /// Sum of every vote balance except plain nays.
    pub support: Balance,
    pub active_issuance: Option<Balance>,
    /// Only reported for legacy referenda.
    pub turnout: Option<Balance>,
    pub vote_counts: DecisionCounts,
    pub voting_power: Vec<VotingPowerEntry>,
    pub no_votes: bool,
}

impl PostStats {
    pub fn display_state(&self) -> DisplayState {
        match (&self.active_issuance, self.no_votes) {
            (None, _) => DisplayState::Loading,
            (Some(_), true) => DisplayState::NoVotes,
            (Some(_), false) => DisplayState::Ready,
        }
    }
}

/// Sum of support over a vote list.
pub fn support(records: &[VoteRecord]) -> Balance {
    records.iter().map(VoteRecord::support_amount).sum()
}

/// Collects [`PostStats`] from the three sources concurrently.
pub struct StatsAggregator<C, I, V> {
    chain: C,
    indexer: I,
    votes: V,
    power_mode: PowerMode,
}

impl<C, I, V> StatsAggregator<C, I, V>
where
    C: ChainSource,
    I: IndexerSource,
    V: VotesSource,
{
    pub fn new(chain: C, indexer: I, votes: V) -> Self {
        Self {
            chain,
            indexer,
            votes,
            power_mode: PowerMode::default(),
        }
    }

    pub fn with_power_mode(mut self, mode: PowerMode) -> Self {
        self.power_mode = mode;
        self
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn indexer(&self) -> &I {
        &self.indexer
    }

    pub fn votes(&self) -> &V {
        &self.votes
    }

    async fn indexer_referendum(&self, index: u32) -> Option<IndexerReferendum> {
        match self.indexer.referendum(index).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(index, error = %e, "indexer referendum unavailable");
                None
            }
        }
    }

    async fn vote_list(&self, request: &StatsRequest) -> Option<VoteList> {
        let voting_type = request.proposal_type.voting_type()?;
        match self.votes.vote_totals(request.proposal_id, voting_type).await {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!(proposal = request.proposal_id, error = %e, "vote list unavailable");
                None
            }
        }
    }

    async fn decision_counts(&self, request: &StatsRequest) -> DecisionCounts {
        self.votes
            .decision_counts(request.proposal_id, request.proposal_type)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(proposal = request.proposal_id, error = %e, "vote counts unavailable");
                DecisionCounts::default()
            })
    }

    /// Query every source and assemble the stats. Never fails; unavailable
    /// sources degrade to zero, empty or `None`.
    pub async fn collect(&self, request: &StatsRequest) -> PostStats {
        let on_chain = async {
            if request.proposal_type.reads_tally_on_chain() {
                fetch_referendum_info(&self.chain, request.proposal_id, &request.status_history)
                    .await
            } else {
                None
            }
        };

        let (on_chain, indexer, vote_list, vote_counts, active_issuance) = tokio::join!(
            on_chain,
            self.indexer_referendum(request.proposal_id),
            self.vote_list(request),
            self.decision_counts(request),
            active_issuance_or_none(&self.chain, request.network),
        );

        let resolution = resolve(TallyInputs {
            proposal_type: request.proposal_type,
            on_chain: on_chain.as_ref(),
            inline: request.inline_tally.as_ref(),
            indexer: indexer.as_ref(),
        });
        if !resolution.is_available() {
            tracing::info!(
                proposal = request.proposal_id,
                network = %request.network,
                "no tally available"
            );
        }

        let turnout = match request.proposal_type {
            ProposalType::Referendums => indexer
                .as_ref()
                .and_then(|r| normalize_opt(r.turnout(), "turnout")),
            _ => None,
        };

        let no_votes = vote_list.as_ref().is_some_and(|l| l.total_count == 0);
        let records: Vec<VoteRecord> = vote_list
            .as_ref()
            .map(|l| l.data.iter().filter_map(normalize::vote_record).collect())
            .unwrap_or_default();

        let calculator = VotingPowerCalculator::new(request.network, self.power_mode);

        PostStats {
            proposal_id: request.proposal_id,
            proposal_type: request.proposal_type,
            network: request.network,
            tally: resolution.tally,
            tally_source: resolution.source,
            support: support(&records),
            active_issuance,
            turnout,
            vote_counts,
            voting_power: calculator.entries(&records),
            no_votes,
        }
    }

    /// Collect and store the result, unless a newer request for the same
    /// proposal was started meanwhile. Returns the stored stats.
    pub async fn refresh(
        &self,
        cache: &StatsCache,
        request: &StatsRequest,
    ) -> Option<Arc<PostStats>> {
        let ticket = cache.begin(request.cache_key()).await;
        let stats = self.collect(request).await;
        cache.complete(ticket, stats).await
    }
}
