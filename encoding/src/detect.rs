//! Recognising which supported encoding a text is written in.
//!
//! Candidates are tried in [`EncodingKind::ALL`] order and the first kind
//! that decodes the whole text wins. Some texts are valid in more than one
//! encoding:
//!
//! - an even-length text made only of `0-9A-Fa-f` is taken as hex, even when
//!   it was produced as base64 (`"ABCD"` is both `AB CD` in hex and
//!   `00 10 83` in base64), so the bytes differ from the producer's;
//! - a base64url text without `-` or `_` is taken as standard base64 with
//!   the same padding policy, which yields the same bytes;
//! - an unpadded base64 text whose length is a multiple of four is taken as
//!   the padded variant, which yields the same bytes.

use std::str::FromStr;

use crate::codec::{EncodedText, decode};
use crate::error::Error;
use crate::kind::EncodingKind;

/// Returns the first encoding in detection order that accepts `text`.
///
/// The empty string is valid in every encoding and is reported as hex.
pub fn detect(text: &str) -> Result<EncodingKind, Error> {
    decode_any(text).map(|(kind, _)| kind)
}

/// Detects the encoding of `text` and returns it with the decoded bytes.
pub fn decode_any(text: &str) -> Result<(EncodingKind, Vec<u8>), Error> {
    EncodingKind::ALL
        .into_iter()
        .find_map(|kind| decode(text, kind).ok().map(|bytes| (kind, bytes)))
        .ok_or(Error::Unrecognized { length: text.len() })
}

impl FromStr for EncodedText {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = detect(s)?;
        Ok(EncodedText::new(kind, s.to_string()))
    }
}
