//! Amount normalization.
//!
//! Every source encodes amounts its own way: chain storage uses `0x` hex for
//! wide integers and plain numbers for small ones, the indexer uses decimal
//! strings, the vote list mixes both. All of them go through [`normalize`].

use crate::error::TallyError;

use govtally_chain::{RawTally, RawVote, RawVoteBalance};
use govtally_types::{Balance, Decision, RawAmount, Tally, TypesError, VoteBalance, VoteRecord};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_FLOAT: f64 = 9_007_199_254_740_991.0;

/// Decode one amount. Absent input is zero.
pub fn normalize(value: Option<&RawAmount>) -> Result<Balance, TallyError> {
    match value {
        None => Ok(Balance::zero()),
        Some(RawAmount::Int(v)) => Ok(Balance::from(*v)),
        Some(RawAmount::Text(s)) => normalize_str(s),
        Some(RawAmount::Float(f)) => {
            if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= MAX_SAFE_FLOAT {
                Ok(Balance::from(*f as u64))
            } else {
                Err(TypesError::NotAnInteger(f.to_string()).into())
            }
        }
    }
}

fn normalize_str(s: &str) -> Result<Balance, TallyError> {
    let s = s.trim();
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return Ok(Balance::from_hex(digits)?);
    }
    if s.is_empty() {
        return Ok(Balance::zero());
    }
    Ok(Balance::from_decimal(s)?)
}

/// Decode one amount, logging and zeroing anything unparsable.
pub fn normalize_or_zero(value: Option<&RawAmount>, field: &str) -> Balance {
    normalize(value).unwrap_or_else(|e| {
        tracing::warn!(field, error = %e, "treating unparsable amount as zero");
        Balance::zero()
    })
}

/// Decode an optional amount, keeping absence distinct from zero.
pub fn normalize_opt(value: Option<&RawAmount>, field: &str) -> Option<Balance> {
    value.map(|v| normalize_or_zero(Some(v), field))
}

/// Decode all three sides of a tally; missing sides are zero.
pub fn tally(raw: &RawTally) -> Tally {
    Tally {
        ayes: normalize_or_zero(raw.ayes.as_ref(), "ayes"),
        nays: normalize_or_zero(raw.nays.as_ref(), "nays"),
        abstain: normalize_or_zero(raw.abstain.as_ref(), "abstain"),
    }
}

/// Convert a listed vote into a [`VoteRecord`].
///
/// Returns `None` for decisions other than `yes`/`no`/`abstain`.
pub fn vote_record(raw: &RawVote) -> Option<VoteRecord> {
    let decision = match raw.decision.parse::<Decision>() {
        Ok(decision) => decision,
        Err(e) => {
            tracing::debug!(error = %e, "skipping vote");
            return None;
        }
    };

    let balance = match &raw.balance {
        None => VoteBalance::default(),
        Some(RawVoteBalance::Flat(amount)) => VoteBalance {
            value: normalize_opt(Some(amount), "value"),
            ..Default::default()
        },
        Some(RawVoteBalance::Parts {
            value,
            aye,
            nay,
            abstain,
        }) => VoteBalance {
            value: normalize_opt(value.as_ref(), "value"),
            aye: normalize_opt(aye.as_ref(), "aye"),
            nay: normalize_opt(nay.as_ref(), "nay"),
            abstain: normalize_opt(abstain.as_ref(), "abstain"),
        },
    };

    Some(VoteRecord {
        voter: raw.voter.clone(),
        decision,
        balance,
        lock_period: raw
            .lock_period
            .map(|p| u8::try_from(p).unwrap_or(u8::MAX)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawAmount {
        RawAmount::Text(s.to_string())
    }

    #[test]
    fn test_hex_prefix() {
        assert_eq!(normalize(Some(&text("0x10"))).unwrap(), Balance::from(16u64));
        assert_eq!(normalize(Some(&text("0X0a"))).unwrap(), Balance::from(10u64));
        assert_eq!(normalize(Some(&text("0x"))).unwrap(), Balance::zero());
    }

    #[test]
    fn test_decimal_and_numbers() {
        assert_eq!(normalize(Some(&text("64"))).unwrap(), Balance::from(64u64));
        assert_eq!(normalize(Some(&RawAmount::Int(32))).unwrap(), Balance::from(32u64));
        assert_eq!(
            normalize(Some(&RawAmount::Float(5.0))).unwrap(),
            Balance::from(5u64)
        );
    }

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(normalize(None).unwrap(), Balance::zero());
        assert_eq!(normalize(Some(&text(""))).unwrap(), Balance::zero());
    }

    #[test]
    fn test_no_float_precision_loss() {
        // 2^64 + 1 survives as a string.
        let b = normalize(Some(&text("18446744073709551617"))).unwrap();
        assert_eq!(b.to_u128(), Some(18_446_744_073_709_551_617));
        assert!(normalize(Some(&RawAmount::Float(1e30))).is_err());
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            normalize(Some(&text("ten"))),
            Err(TallyError::ParseFailure(_))
        ));
        assert!(normalize(Some(&text("0xzz"))).is_err());
        assert!(normalize(Some(&RawAmount::Float(-1.0))).is_err());
        assert!(normalize(Some(&RawAmount::Float(1.5))).is_err());
        assert_eq!(normalize_or_zero(Some(&text("ten")), "ayes"), Balance::zero());
    }

    #[test]
    fn test_tally_from_json_wider_than_u64() {
        let raw: RawTally =
            serde_json::from_str(r#"{"ayes":100000000000000000000,"nays":5,"abstain":0}"#)
                .unwrap();
        assert_eq!(
            tally(&raw),
            Tally::new(
                Balance::from(100_000_000_000_000_000_000u128),
                5u64.into(),
                Balance::zero()
            )
        );
    }

    #[test]
    fn test_float_rejection_is_parse_failure() {
        assert!(matches!(
            normalize(Some(&RawAmount::Float(2.5))),
            Err(TallyError::ParseFailure(msg)) if msg.contains("non-negative integer")
        ));
    }

    #[test]
    fn test_tally_defaults_missing_sides() {
        let raw = RawTally {
            ayes: Some(text("0x10")),
            nays: None,
            abstain: Some(RawAmount::Int(3)),
        };
        assert_eq!(
            tally(&raw),
            Tally::new(16u64.into(), Balance::zero(), 3u64.into())
        );
    }

    #[test]
    fn test_vote_record_flat_balance() {
        let raw = RawVote {
            voter: Some("a".into()),
            decision: "yes".into(),
            balance: Some(RawVoteBalance::Flat(text("500000000000"))),
            lock_period: Some(3),
        };
        let record = vote_record(&raw).unwrap();
        assert_eq!(record.decision, Decision::Yes);
        assert_eq!(record.balance.value, Some(Balance::from(500_000_000_000u64)));
        assert_eq!(record.lock_period, Some(3));
    }

    #[test]
    fn test_vote_record_unknown_decision() {
        let raw = RawVote {
            voter: None,
            decision: "maybe".into(),
            balance: None,
            lock_period: None,
        };
        assert!(vote_record(&raw).is_none());
    }
}
