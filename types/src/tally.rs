//! Aggregated vote weight for a proposal.

use crate::amount::Balance;

use serde::{Deserialize, Serialize};

/// Aye/nay/abstain weight for a single proposal at a point in time.
///
/// Built fresh from one source per query and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub ayes: Balance,
    pub nays: Balance,
    pub abstain: Balance,
}

impl Tally {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(ayes: Balance, nays: Balance, abstain: Balance) -> Self {
        Self { ayes, nays, abstain }
    }

    pub fn is_zero(&self) -> bool {
        self.ayes.is_zero() && self.nays.is_zero() && self.abstain.is_zero()
    }

    pub fn total(&self) -> Balance {
        self.ayes.clone() + &self.nays + &self.abstain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_tally() {
        assert!(Tally::zero().is_zero());
        assert!(Tally::zero().total().is_zero());
    }

    #[test]
    fn test_total() {
        let t = Tally::new(16u64.into(), 5u64.into(), 1u64.into());
        assert!(!t.is_zero());
        assert_eq!(t.total(), Balance::from(22u64));
    }

    #[test]
    fn test_serde_shape() {
        let t = Tally::new(64u64.into(), 32u64.into(), 0u64.into());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ayes": "64", "nays": "32", "abstain": "0"})
        );
    }
}
