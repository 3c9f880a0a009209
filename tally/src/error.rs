use govtally_chain::ChainError;
use govtally_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TallyError {
    /// A query or fetch failed or returned no usable shape.
    #[error("tally source unavailable: {0}")]
    SourceUnavailable(String),

    /// An amount could not be decoded.
    #[error("unparsable amount: {0}")]
    ParseFailure(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl From<ChainError> for TallyError {
    fn from(e: ChainError) -> Self {
        Self::SourceUnavailable(e.to_string())
    }
}

impl From<TypesError> for TallyError {
    fn from(e: TypesError) -> Self {
        Self::ParseFailure(e.to_string())
    }
}
