//! Vote tally aggregation.
//!
//! Combines vote data from live chain storage, an inline tally attached to the
//! proposal, an indexer, and the governance API's vote list into one normalized
//! [`Tally`](govtally_types::Tally) plus per-vote voting power.
//!
//! - [`normalize`]: hex/decimal/number amounts into arbitrary-precision balances.
//! - [`resolver`]: which tally source wins (on-chain > inline > indexer > none).
//! - [`power`]: conviction × balance per vote record.
//! - [`stats`]: concurrent collection of everything a proposal's stats view needs.
//! - [`cache`]: per-(proposal, network) results with stale-response rejection.
//!
//! Nothing here fails a stats request: unreachable sources and unparsable
//! amounts are logged and degrade to zero or "unavailable".

pub mod cache;
pub mod error;
pub mod format;
pub mod issuance;
pub mod normalize;
pub mod power;
pub mod resolver;
pub mod stats;

pub use cache::{CacheKey, StatsCache, Ticket};
pub use error::TallyError;
pub use format::format_balance;
pub use normalize::normalize;
pub use power::{PowerMode, VotingPowerCalculator, VotingPowerEntry};
pub use resolver::{resolve, Resolution, TallyInputs, TallySource};
pub use stats::{DisplayState, PostStats, StatsAggregator, StatsRequest};
