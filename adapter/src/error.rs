use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] encoding::error::Error),
    #[error("invalid condition structure: {0}")]
    InvalidConditionStructure(#[from] condition::error::Error),
}
