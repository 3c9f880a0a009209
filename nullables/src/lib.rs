//! Nullable vote data sources for deterministic testing.
//!
//! Each external collaborator of the tally aggregator (chain storage, the
//! indexer, the governance API) has an in-memory stand-in here that:
//! - Returns exactly what the test configured
//! - Can be told to fail, to exercise degraded paths
//! - Records the queries it received, for assertions
//! - Never touches the network
//!
//! Usage: build a `StatsAggregator` from these instead of the HTTP clients.

pub mod chain;
pub mod indexer;
pub mod votes;

pub use chain::{ChainQuery, NullChain};
pub use indexer::NullIndexer;
pub use votes::NullVotes;
