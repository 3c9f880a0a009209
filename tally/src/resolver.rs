//! Tally source resolution.
//!
//! Exactly one source provides the tally, in this order:
//! 1. live chain storage, for referendum v2 posts whose referendum is ongoing;
//! 2. the inline tally attached to the post;
//! 3. the indexer's aggregate amounts;
//! 4. nothing: the zero tally, flagged unavailable.

use crate::normalize;

use govtally_chain::{ChainSource, IndexerReferendum, RawTally, ReferendumInfo};
use govtally_types::{ProposalType, StatusEntry, Tally};
use serde::Serialize;

/// Where a resolved tally came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TallySource {
    OnChain,
    Inline,
    Indexer,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub tally: Tally,
    pub source: TallySource,
}

impl Resolution {
    pub fn unavailable() -> Self {
        Self {
            tally: Tally::zero(),
            source: TallySource::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.source != TallySource::Unavailable
    }
}

/// Everything the resolver may pick from. Absent sources are `None`.
#[derive(Clone, Copy, Debug)]
pub struct TallyInputs<'a> {
    pub proposal_type: ProposalType,
    pub on_chain: Option<&'a ReferendumInfo>,
    pub inline: Option<&'a RawTally>,
    pub indexer: Option<&'a IndexerReferendum>,
}

/// Pick the tally from the highest-precedence source that has one.
pub fn resolve(inputs: TallyInputs<'_>) -> Resolution {
    if inputs.proposal_type.reads_tally_on_chain() {
        let ongoing_tally = inputs
            .on_chain
            .and_then(|info| info.ongoing.as_ref())
            .and_then(|ongoing| ongoing.tally.as_ref());
        if let Some(raw) = ongoing_tally {
            return Resolution {
                tally: normalize::tally(raw),
                source: TallySource::OnChain,
            };
        }
    }

    if let Some(raw) = inputs.inline {
        return Resolution {
            tally: normalize::tally(raw),
            source: TallySource::Inline,
        };
    }

    if let Some(info) = inputs
        .indexer
        .filter(|r| r.has_amounts())
        .and_then(|r| r.info.as_ref())
    {
        let raw = RawTally {
            ayes: info.aye_amount.clone(),
            nays: info.nay_amount.clone(),
            abstain: info.abstain_amount.clone(),
        };
        return Resolution {
            tally: normalize::tally(&raw),
            source: TallySource::Indexer,
        };
    }

    Resolution::unavailable()
}

/// Read a referendum's state from chain storage.
///
/// Finished referenda are read one block before they concluded, when the
/// final tally was still stored. Failures are logged and yield `None`.
pub async fn fetch_referendum_info<C: ChainSource>(
    chain: &C,
    index: u32,
    status_history: &[StatusEntry],
) -> Option<ReferendumInfo> {
    let at = match StatusEntry::snapshot_block(status_history) {
        Some(block) => match chain.block_hash(block).await {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(index, block, error = %e, "block hash lookup failed, reading head state");
                None
            }
        },
        None => None,
    };

    match chain.referendum_info(index, at.as_deref()).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(index, error = %e, "referendum query failed");
            None
        }
    }
}
