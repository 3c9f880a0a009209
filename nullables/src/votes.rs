//! Nullable governance API: configured vote lists, counts and tips.

use govtally_chain::{ChainError, DecisionCounts, VoteList, VotesSource};
use govtally_types::{ProposalType, TipRecord, TipStatus, VotingType};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct NullVotes {
    vote_lists: Mutex<HashMap<u32, VoteList>>,
    counts: Mutex<HashMap<u32, DecisionCounts>>,
    tips: Mutex<Vec<(TipStatus, TipRecord)>>,
    unreachable: Mutex<bool>,
    voting_types: Mutex<Vec<VotingType>>,
}

impl NullVotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vote_list(&self, post_id: u32, list: VoteList) {
        self.vote_lists.lock().unwrap().insert(post_id, list);
    }

    pub fn set_decision_counts(&self, post_id: u32, counts: DecisionCounts) {
        self.counts.lock().unwrap().insert(post_id, counts);
    }

    pub fn add_tip(&self, status: TipStatus, tip: TipRecord) {
        self.tips.lock().unwrap().push((status, tip));
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    /// Voting types the vote list was requested with, in order.
    pub fn requested_voting_types(&self) -> Vec<VotingType> {
        self.voting_types.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ChainError> {
        if *self.unreachable.lock().unwrap() {
            return Err(ChainError::Unreachable("null governance api".into()));
        }
        Ok(())
    }
}

impl VotesSource for NullVotes {
    async fn vote_totals(
        &self,
        post_id: u32,
        voting_type: VotingType,
    ) -> Result<VoteList, ChainError> {
        self.voting_types.lock().unwrap().push(voting_type);
        self.check()?;
        Ok(self
            .vote_lists
            .lock()
            .unwrap()
            .get(&post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn decision_counts(
        &self,
        post_id: u32,
        _proposal_type: ProposalType,
    ) -> Result<DecisionCounts, ChainError> {
        self.check()?;
        Ok(self
            .counts
            .lock()
            .unwrap()
            .get(&post_id)
            .copied()
            .unwrap_or_default())
    }

    async fn user_tips(
        &self,
        addresses: &[String],
        status: TipStatus,
    ) -> Result<Vec<TipRecord>, ChainError> {
        self.check()?;
        Ok(self
            .tips
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, tip)| {
                *s == status && addresses.iter().any(|a| a == tip.own_address(status))
            })
            .map(|(_, tip)| tip.clone())
            .collect())
    }
}
