//! The closed set of supported text encodings.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

pub const PAD: char = '=';

const HEX: &str = "hex";
const BASE64: &str = "base64";
const BASE64_NO_PADDING: &str = "base64-no-padding";
const BASE64URL: &str = "base64url";
const BASE64URL_NO_PADDING: &str = "base64url-no-padding";

/// A text encoding for binary condition data.
///
/// Hex is written in uppercase and read in either case. The base64 family
/// follows RFC 4648: the standard alphabet uses `+` and `/`, the URL-safe
/// alphabet uses `-` and `_`, and the padded variants always end on a
/// multiple of four characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    #[default]
    Hex,
    Base64,
    Base64NoPadding,
    Base64Url,
    Base64UrlNoPadding,
}

impl EncodingKind {
    /// Every kind, in the order detection tries them.
    ///
    /// Hex comes first because its alphabet is a subset of base64's, and each
    /// padded variant precedes its unpadded twin.
    pub const ALL: [EncodingKind; 5] = [
        EncodingKind::Hex,
        EncodingKind::Base64,
        EncodingKind::Base64NoPadding,
        EncodingKind::Base64Url,
        EncodingKind::Base64UrlNoPadding,
    ];

    pub const fn alphabet(self) -> Alphabet {
        match self {
            EncodingKind::Hex => Alphabet::Hex,
            EncodingKind::Base64 | EncodingKind::Base64NoPadding => Alphabet::Standard,
            EncodingKind::Base64Url | EncodingKind::Base64UrlNoPadding => Alphabet::UrlSafe,
        }
    }

    pub const fn padding(self) -> Padding {
        match self {
            EncodingKind::Base64 | EncodingKind::Base64Url => Padding::Required,
            EncodingKind::Hex
            | EncodingKind::Base64NoPadding
            | EncodingKind::Base64UrlNoPadding => Padding::Absent,
        }
    }

    /// Whether decoding distinguishes upper and lower case letters.
    pub const fn is_case_sensitive(self) -> bool {
        !matches!(self, EncodingKind::Hex)
    }

    pub const fn name(self) -> &'static str {
        match self {
            EncodingKind::Hex => HEX,
            EncodingKind::Base64 => BASE64,
            EncodingKind::Base64NoPadding => BASE64_NO_PADDING,
            EncodingKind::Base64Url => BASE64URL,
            EncodingKind::Base64UrlNoPadding => BASE64URL_NO_PADDING,
        }
    }
}

impl Display for EncodingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EncodingKind {
    type Err = Error;

    /// Accepts the canonical names as well as `UPPER_SNAKE` spellings such as
    /// `BASE64URL_WITHOUT_PADDING`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace('_', "-")
            .replace("-without-", "-no-");
        match normalized.as_str() {
            HEX => Ok(EncodingKind::Hex),
            BASE64 => Ok(EncodingKind::Base64),
            BASE64_NO_PADDING => Ok(EncodingKind::Base64NoPadding),
            BASE64URL => Ok(EncodingKind::Base64Url),
            BASE64URL_NO_PADDING => Ok(EncodingKind::Base64UrlNoPadding),
            _ => Err(Error::UnsupportedEncodingKind(s.to_string())),
        }
    }
}

impl Serialize for EncodingKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EncodingKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The symbol set an encoding draws from, padding excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// `0-9`, `A-F`, `a-f`
    Hex,
    /// `A-Z`, `a-z`, `0-9`, `+`, `/`
    Standard,
    /// `A-Z`, `a-z`, `0-9`, `-`, `_`
    UrlSafe,
}

impl Alphabet {
    pub fn contains(self, symbol: u8) -> bool {
        match self {
            Alphabet::Hex => symbol.is_ascii_hexdigit(),
            Alphabet::Standard => symbol.is_ascii_alphanumeric() || symbol == b'+' || symbol == b'/',
            Alphabet::UrlSafe => symbol.is_ascii_alphanumeric() || symbol == b'-' || symbol == b'_',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// Text is padded with `=` to a multiple of four characters.
    Required,
    /// No `=` may appear.
    Absent,
}
