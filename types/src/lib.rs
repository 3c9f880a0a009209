//! Fundamental types for govtally.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! arbitrary-precision balances, networks and their chain properties, proposal
//! types, vote records, tallies and tip records.

pub mod amount;
pub mod error;
pub mod network;
pub mod proposal;
pub mod tally;
pub mod tip;
pub mod vote;

pub use amount::{Balance, RawAmount};
pub use error::TypesError;
pub use network::{IssuanceModule, Network};
pub use proposal::{ProposalType, StatusEntry, VotingType};
pub use tally::Tally;
pub use tip::{TipRecord, TipStatus};
pub use vote::{Conviction, Decision, VoteBalance, VoteKind, VoteRecord};
