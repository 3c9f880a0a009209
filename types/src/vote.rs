//! Vote records and conviction.

use crate::amount::Balance;
use crate::error::TypesError;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The decision recorded for a cast vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Yes,
    No,
    Abstain,
}

impl FromStr for Decision {
    type Err = TypesError;

    /// Accepts the vote list spellings (`yes`/`no`/`abstain`) and the
    /// on-chain ones (`aye`/`nay`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "aye" => Ok(Self::Yes),
            "no" | "nay" => Ok(Self::No),
            "abstain" => Ok(Self::Abstain),
            _ => Err(TypesError::UnknownDecision(s.to_string())),
        }
    }
}

/// Balances attached to a vote. Standard votes carry `value`; split and
/// split-abstain votes carry the per-side amounts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteBalance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Balance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aye: Option<Balance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nay: Option<Balance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstain: Option<Balance>,
}

/// One voter's cast vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    #[serde(default)]
    pub voter: Option<String>,
    pub decision: Decision,
    #[serde(default)]
    pub balance: VoteBalance,
    #[serde(default, rename = "lockPeriod")]
    pub lock_period: Option<u8>,
}

/// Conviction multiplier chosen by a voter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Conviction {
    /// No lock: 0.1x.
    None,
    /// Locked for a number of periods, 1x..=6x.
    Locked(u8),
}

impl Conviction {
    pub const MAX_LOCK: u8 = 6;

    /// Lock period 0 is the unlocked 0.1x vote. Larger periods are capped at 6x.
    pub fn from_lock_period(lock_period: u8) -> Self {
        match lock_period {
            0 => Self::None,
            n => Self::Locked(n.min(Self::MAX_LOCK)),
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::None => Decimal::new(1, 1),
            Self::Locked(n) => Decimal::from(*n),
        }
    }
}

impl fmt::Display for Conviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

/// A vote viewed by its shape rather than its raw decision.
///
/// An `abstain` decision with no abstain balance is a split vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteKind {
    Aye {
        amount: Option<Balance>,
        conviction: Option<Conviction>,
    },
    Nay {
        amount: Option<Balance>,
        conviction: Option<Conviction>,
    },
    Split {
        aye: Option<Balance>,
        nay: Option<Balance>,
    },
    Abstain {
        abstain: Balance,
        aye: Option<Balance>,
        nay: Option<Balance>,
    },
}

impl VoteKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aye { .. } => "Aye",
            Self::Nay { .. } => "Nay",
            Self::Split { .. } => "Split",
            Self::Abstain { .. } => "Abstain",
        }
    }

    /// Multiplier applied to the counted amount. Split and abstain votes are
    /// always counted at 0.1x.
    pub fn conviction(&self) -> Option<Conviction> {
        match self {
            Self::Aye { conviction, .. } | Self::Nay { conviction, .. } => *conviction,
            Self::Split { .. } | Self::Abstain { .. } => Some(Conviction::None),
        }
    }

    /// The balance that voting power is computed from: the standard vote
    /// value for aye/nay, the abstain balance for abstain-decision votes.
    pub fn counted_amount(&self) -> Option<&Balance> {
        match self {
            Self::Aye { amount, .. } | Self::Nay { amount, .. } => amount.as_ref(),
            Self::Split { .. } => None,
            Self::Abstain { abstain, .. } => Some(abstain),
        }
    }

    /// Whether the row shows a lock multiplier column.
    pub fn shows_conviction(&self) -> bool {
        matches!(self, Self::Aye { .. } | Self::Nay { .. })
    }
}

impl VoteRecord {
    pub fn kind(&self) -> VoteKind {
        let conviction = self.lock_period.map(Conviction::from_lock_period);
        match self.decision {
            Decision::Yes => VoteKind::Aye {
                amount: self.balance.value.clone(),
                conviction,
            },
            Decision::No => VoteKind::Nay {
                amount: self.balance.value.clone(),
                conviction,
            },
            Decision::Abstain => match &self.balance.abstain {
                Some(abstain) => VoteKind::Abstain {
                    abstain: abstain.clone(),
                    aye: self.balance.aye.clone(),
                    nay: self.balance.nay.clone(),
                },
                None => VoteKind::Split {
                    aye: self.balance.aye.clone(),
                    nay: self.balance.nay.clone(),
                },
            },
        }
    }

    /// Total balance the vote puts behind the proposal's passing side(s).
    ///
    /// Everything except a plain `no` counts towards support.
    pub fn support_amount(&self) -> Balance {
        match self.decision {
            Decision::No => Balance::zero(),
            Decision::Yes => self.balance.value.clone().unwrap_or_default(),
            Decision::Abstain => [&self.balance.value, &self.balance.aye, &self.balance.abstain]
                .into_iter()
                .flatten()
                .cloned()
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(decision: Decision, balance: VoteBalance, lock_period: Option<u8>) -> VoteRecord {
        VoteRecord {
            voter: None,
            decision,
            balance,
            lock_period,
        }
    }

    #[test]
    fn test_decision_from_str() {
        assert_eq!("Aye".parse::<Decision>().unwrap(), Decision::Yes);
        assert_eq!(" no ".parse::<Decision>().unwrap(), Decision::No);
        assert_eq!("abstain".parse::<Decision>().unwrap(), Decision::Abstain);
        assert!("maybe".parse::<Decision>().is_err());
    }

    #[test]
    fn test_conviction_multiplier() {
        assert_eq!(Conviction::from_lock_period(0).multiplier(), dec!(0.1));
        for n in 1..=6u8 {
            assert_eq!(Conviction::from_lock_period(n).multiplier(), Decimal::from(n));
        }
        assert_eq!(Conviction::from_lock_period(9), Conviction::Locked(6));
    }

    #[test]
    fn test_conviction_display() {
        assert_eq!(Conviction::None.to_string(), "0.1x");
        assert_eq!(Conviction::Locked(3).to_string(), "3x");
    }

    #[test]
    fn test_kind_dispatch() {
        let aye = record(
            Decision::Yes,
            VoteBalance { value: Some(Balance::from(5u64)), ..Default::default() },
            Some(2),
        );
        assert_eq!(aye.kind().label(), "Aye");
        assert_eq!(aye.kind().conviction(), Some(Conviction::Locked(2)));

        let split = record(
            Decision::Abstain,
            VoteBalance {
                aye: Some(Balance::from(1u64)),
                nay: Some(Balance::from(2u64)),
                ..Default::default()
            },
            None,
        );
        assert_eq!(split.kind().label(), "Split");
        assert_eq!(split.kind().counted_amount(), None);
        assert!(!split.kind().shows_conviction());

        let abstain = record(
            Decision::Abstain,
            VoteBalance { abstain: Some(Balance::from(7u64)), ..Default::default() },
            Some(4),
        );
        assert_eq!(abstain.kind().label(), "Abstain");
        assert_eq!(abstain.kind().conviction(), Some(Conviction::None));
        assert_eq!(abstain.kind().counted_amount(), Some(&Balance::from(7u64)));
    }

    #[test]
    fn test_missing_lock_period_has_no_conviction() {
        let nay = record(Decision::No, VoteBalance::default(), None);
        assert_eq!(nay.kind().conviction(), None);
    }

    #[test]
    fn test_support_amount() {
        let no = record(
            Decision::No,
            VoteBalance { value: Some(Balance::from(9u64)), ..Default::default() },
            Some(1),
        );
        assert!(no.support_amount().is_zero());

        let split_abstain = record(
            Decision::Abstain,
            VoteBalance {
                aye: Some(Balance::from(1u64)),
                nay: Some(Balance::from(2u64)),
                abstain: Some(Balance::from(3u64)),
                ..Default::default()
            },
            None,
        );
        assert_eq!(split_abstain.support_amount(), Balance::from(4u64));
    }

    #[test]
    fn test_deserialize_vote_record() {
        let json = r#"{"decision":"yes","balance":{"value":"500000000000"},"lockPeriod":3}"#;
        let v: VoteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(v.decision, Decision::Yes);
        assert_eq!(v.lock_period, Some(3));
        assert_eq!(v.balance.value, Some(Balance::from(500_000_000_000u64)));
    }
}
