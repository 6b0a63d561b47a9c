//! Errors raised when bytes do not form a well-structured condition.

use der::Tag;
use thiserror::Error;

use crate::types::ConditionType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid DER encoding: {0}")]
    FailedToDecodeDer(#[source] der::error::Error),
    #[error("expected a single condition element, found {0}")]
    ElementCount(usize),
    #[error("unexpected tag {0}")]
    UnexpectedTag(Tag),
    #[error("unknown condition type {0}")]
    UnknownConditionType(u8),
    #[error("{0}: missing")]
    MissingField(&'static str),

    // Fingerprint errors
    #[error("fingerprint: expected 32 bytes, got {0}")]
    FingerprintLength(usize),

    // Cost errors
    #[error("cost: no data")]
    CostNoData,
    #[error("cost: negative value")]
    CostNegative,
    #[error("cost: value out of range for u32")]
    CostOutOfRange,

    // Subtypes errors
    #[error("subtypes: no data")]
    SubtypesNoData,
    #[error("subtypes: unused bits {0} out of range")]
    SubtypesUnusedBitsOutOfRange(u8),
    #[error("subtypes: unused bits are not zero")]
    SubtypesNonZeroPadding,
    #[error("subtypes: unknown condition type at bit {0}")]
    UnknownSubtype(usize),
    #[error("{0} conditions do not carry subtypes")]
    UnexpectedSubtypes(ConditionType),

    #[error("encoding is valid BER but not canonical DER")]
    NonCanonical,
}
