//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while decoding the fundamental types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid hex amount: {0:?}")]
    InvalidHex(String),

    #[error("invalid decimal amount: {0:?}")]
    InvalidDecimal(String),

    #[error("amount must be a non-negative integer, got {0}")]
    NotAnInteger(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("unknown proposal type: {0}")]
    UnknownProposalType(String),

    #[error("unknown vote decision: {0}")]
    UnknownDecision(String),

    #[error("unknown tip status: {0}")]
    UnknownTipStatus(String),
}
