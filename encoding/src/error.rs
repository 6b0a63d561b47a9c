use thiserror::Error;

use crate::kind::EncodingKind;

/// Errors raised while decoding text or resolving an encoding name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The text was decoded as `kind` but breaks that encoding's rules.
    #[error("malformed {kind} text: {reason}")]
    Malformed { kind: EncodingKind, reason: Malformed },

    /// No supported encoding accepts the text.
    #[error("text of length {length} does not match any supported encoding")]
    Unrecognized { length: usize },

    /// The name does not denote one of the supported encodings.
    #[error("unsupported encoding kind: {0:?}")]
    UnsupportedEncodingKind(String),
}

/// The rule a malformed text violates.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    #[error("invalid character {character:?} at offset {offset}")]
    InvalidCharacter { character: char, offset: usize },

    #[error("invalid length {0}")]
    InvalidLength(usize),

    /// Padding is missing, unexpected, too long, or not at the end.
    #[error("invalid padding")]
    InvalidPadding,

    /// The final symbol carries non-zero bits that no byte sequence produces.
    #[error("non-canonical final symbol at offset {offset}")]
    NonCanonical { offset: usize },
}

impl From<base64::DecodeError> for Malformed {
    fn from(err: base64::DecodeError) -> Self {
        match err {
            base64::DecodeError::InvalidByte(offset, byte) => Malformed::InvalidCharacter {
                character: char::from(byte),
                offset,
            },
            base64::DecodeError::InvalidLength(length) => Malformed::InvalidLength(length),
            base64::DecodeError::InvalidLastSymbol(offset, _) => Malformed::NonCanonical { offset },
            base64::DecodeError::InvalidPadding => Malformed::InvalidPadding,
        }
    }
}
