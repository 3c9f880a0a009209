//! Tip records kept by the dashboard's document store.

use crate::error::TypesError;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which side of a tip a user is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipStatus {
    Given,
    Received,
}

impl TipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::Received => "Received",
        }
    }
}

impl FromStr for TipStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "given" => Ok(Self::Given),
            "received" => Ok(Self::Received),
            _ => Err(TypesError::UnknownTipStatus(s.to_string())),
        }
    }
}

/// A single on-chain tip with its off-chain remark.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TipRecord {
    pub created_at: String,
    #[serde(default)]
    pub remark: String,
    pub network: String,
    pub tip_from: String,
    pub tip_to: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub amount: f64,
    pub token: String,
    #[serde(default)]
    pub extrinsic_hash: Option<String>,
}

impl TipRecord {
    /// The address a user must own for this tip to count as `status`:
    /// the sender for given tips, the recipient for received ones.
    pub fn own_address(&self, status: TipStatus) -> &str {
        match status {
            TipStatus::Given => &self.tip_from,
            TipStatus::Received => &self.tip_to,
        }
    }
}
