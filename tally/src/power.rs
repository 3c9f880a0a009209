//! Voting power: conviction × balance per vote record.

use crate::error::TallyError;
use crate::format::{first_number, format_balance};

use govtally_types::{Balance, Network, VoteKind, VoteRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fractional digits of the amount column.
const DISPLAY_FRACTION_DIGITS: u32 = 2;

/// How the amount entering the power product is obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerMode {
    /// Scale the raw balance by the token decimals exactly.
    #[default]
    Exact,
    /// Re-parse the rounded, abbreviated amount column, as the dashboard
    /// historically did. `1.5K DOT` counts as `1.5`.
    DisplayRounded,
}

impl FromStr for PowerMode {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "exact" => Ok(Self::Exact),
            "display_rounded" => Ok(Self::DisplayRounded),
            _ => Err(TallyError::InvalidOption(format!("power mode {s:?}"))),
        }
    }
}

/// One row of the voting power table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VotingPowerEntry {
    pub voter: Option<String>,
    pub kind: &'static str,
    pub amount: Balance,
    pub amount_display: String,
    /// `None` when the row has no conviction column (split, abstain, or a
    /// network without conviction locks).
    pub conviction: Option<Decimal>,
    pub power: Decimal,
}

#[derive(Clone, Copy, Debug)]
pub struct VotingPowerCalculator {
    network: Network,
    mode: PowerMode,
}

impl VotingPowerCalculator {
    pub fn new(network: Network, mode: PowerMode) -> Self {
        Self { network, mode }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    /// Multiplier for `kind`, or `None` when the lock period is missing.
    ///
    /// Networks without conviction locks count aye/nay votes at 1x.
    pub fn conviction(&self, kind: &VoteKind) -> Option<Decimal> {
        if !self.network.has_conviction_locks() && kind.shows_conviction() {
            return Some(Decimal::ONE);
        }
        kind.conviction().map(|c| c.multiplier())
    }

    /// Display string of the counted amount.
    pub fn amount_display(&self, kind: &VoteKind) -> String {
        let zero = Balance::zero();
        let amount = kind.counted_amount().unwrap_or(&zero);
        format_balance(amount, self.network, DISPLAY_FRACTION_DIGITS, true)
    }

    fn amount_numeric(&self, amount: &Balance, display: &str) -> Option<Decimal> {
        match self.mode {
            PowerMode::Exact => {
                let n = amount.to_token_decimal(self.network.token_decimals());
                if n.is_none() {
                    tracing::warn!(%amount, "balance too large for voting power, counting zero");
                }
                n
            }
            PowerMode::DisplayRounded => first_number(display),
        }
    }

    /// Voting power of a single record. Zero when the balance or the lock
    /// period is missing.
    pub fn power(&self, record: &VoteRecord) -> Decimal {
        self.entry(record).power
    }

    pub fn entry(&self, record: &VoteRecord) -> VotingPowerEntry {
        let kind = record.kind();
        let amount_display = self.amount_display(&kind);
        let conviction = self.conviction(&kind);

        let power = match (kind.counted_amount(), conviction) {
            (Some(amount), Some(multiplier)) => self
                .amount_numeric(amount, &amount_display)
                .and_then(|n| multiplier.checked_mul(n))
                .unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        };

        let shows_conviction = kind.shows_conviction() && self.network.has_conviction_locks();
        VotingPowerEntry {
            voter: record.voter.clone(),
            kind: kind.label(),
            amount: kind.counted_amount().cloned().unwrap_or_default(),
            amount_display,
            conviction: conviction.filter(|_| shows_conviction),
            power,
        }
    }

    pub fn entries(&self, records: &[VoteRecord]) -> Vec<VotingPowerEntry> {
        records.iter().map(|r| self.entry(r)).collect()
    }
}
