use proptest::prelude::*;

use govtally_chain::RawTally;
use govtally_tally::normalize::{self, normalize};
use govtally_tally::{format_balance, PowerMode, VotingPowerCalculator};
use govtally_types::{Balance, Decision, Network, RawAmount, VoteBalance, VoteRecord};
use rust_decimal::Decimal;

proptest! {
    /// `0x`-prefixed strings decode as hex.
    #[test]
    fn normalize_hex_prefix(v in any::<u128>()) {
        let raw = RawAmount::Text(format!("0x{v:x}"));
        prop_assert_eq!(normalize(Some(&raw)).unwrap(), Balance::from(v));
    }

    /// Unprefixed strings decode as decimal, even when they look like hex.
    #[test]
    fn normalize_decimal_string(v in any::<u128>()) {
        let raw = RawAmount::Text(v.to_string());
        prop_assert_eq!(normalize(Some(&raw)).unwrap(), Balance::from(v));
    }

    /// Plain numbers decode to themselves.
    #[test]
    fn normalize_integer(v in any::<u64>()) {
        prop_assert_eq!(normalize(Some(&RawAmount::Int(v))).unwrap(), Balance::from(v));
    }

    /// Garbage never fails a tally; it becomes zero.
    #[test]
    fn tally_never_fails(s in "\\PC*") {
        let raw = RawTally {
            ayes: Some(RawAmount::Text(s.clone())),
            nays: Some(RawAmount::Text(s)),
            abstain: None,
        };
        let t = normalize::tally(&raw);
        prop_assert!(t.abstain.is_zero());
    }

    /// Power is never negative and never exceeds 6x the token amount.
    #[test]
    fn power_bounded(value in any::<u64>(), lock in 0u32..=10) {
        let calc = VotingPowerCalculator::new(Network::Polkadot, PowerMode::Exact);
        let record = VoteRecord {
            voter: None,
            decision: Decision::Yes,
            balance: VoteBalance { value: Some(Balance::from(value)), ..Default::default() },
            lock_period: Some(u8::try_from(lock).unwrap()),
        };
        let power = calc.power(&record);
        let tokens = Balance::from(value).to_token_decimal(10).unwrap();
        prop_assert!(power >= Decimal::ZERO);
        prop_assert!(power <= tokens * Decimal::from(6));
    }

    /// The formatted amount always ends with the token symbol.
    #[test]
    fn format_has_symbol(v in any::<u128>()) {
        let s = format_balance(&Balance::from(v), Network::Kusama, 2, true);
        prop_assert!(s.ends_with(" KSM"));
    }
}
