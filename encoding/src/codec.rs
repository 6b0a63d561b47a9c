//! Conversion between binary data and each supported text encoding.

use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::GeneralPurpose;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use condtext::decoder::{DecodableFrom, Decoder};

use crate::error::{Error, Malformed};
use crate::kind::{Alphabet, EncodingKind, PAD, Padding};

/// Text produced by [`encode`], tagged with the encoding it is written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedText {
    kind: EncodingKind,
    text: String,
}

impl EncodedText {
    pub(crate) fn new(kind: EncodingKind, text: String) -> Self {
        EncodedText { kind, text }
    }

    pub fn kind(&self) -> EncodingKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Display for EncodedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for EncodedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl DecodableFrom<EncodedText> for Vec<u8> {}

impl Decoder<EncodedText, Vec<u8>> for EncodedText {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>, Self::Error> {
        decode(&self.text, self.kind)
    }
}

/// Encodes `binary` as `kind`. Never fails.
pub fn encode(binary: &[u8], kind: EncodingKind) -> EncodedText {
    let text = match engine(kind) {
        Some(engine) => engine.encode(binary),
        None => hex::encode_upper(binary),
    };
    EncodedText::new(kind, text)
}

/// Decodes `text`, which must be written exactly in `kind`.
///
/// Hex accepts either letter case. The base64 variants accept only their own
/// alphabet and padding policy, and reject a final symbol whose unused bits
/// are not zero.
pub fn decode(text: &str, kind: EncodingKind) -> Result<Vec<u8>, Error> {
    let malformed = |reason| Error::Malformed { kind, reason };

    check_framing(text, kind).map_err(malformed)?;
    match engine(kind) {
        Some(engine) => engine
            .decode(text)
            .map_err(|e| malformed(Malformed::from(e))),
        None => hex::decode(text).map_err(|e| malformed(from_hex_error(e, text.len()))),
    }
}

fn engine(kind: EncodingKind) -> Option<&'static GeneralPurpose> {
    match kind {
        EncodingKind::Hex => None,
        EncodingKind::Base64 => Some(&STANDARD),
        EncodingKind::Base64NoPadding => Some(&STANDARD_NO_PAD),
        EncodingKind::Base64Url => Some(&URL_SAFE),
        EncodingKind::Base64UrlNoPadding => Some(&URL_SAFE_NO_PAD),
    }
}

/// Checks the alphabet, padding and length rules of `kind`.
fn check_framing(text: &str, kind: EncodingKind) -> Result<(), Malformed> {
    let alphabet = kind.alphabet();
    let payload_len = match kind.padding() {
        Padding::Required => text.find(PAD).unwrap_or(text.len()),
        Padding::Absent => text.len(),
    };

    for (offset, character) in text[..payload_len].char_indices() {
        if character == PAD && alphabet != Alphabet::Hex {
            return Err(Malformed::InvalidPadding);
        }
        if !character.is_ascii() || !alphabet.contains(character as u8) {
            return Err(Malformed::InvalidCharacter { character, offset });
        }
    }

    if alphabet == Alphabet::Hex {
        if text.len() % 2 != 0 {
            return Err(Malformed::InvalidLength(text.len()));
        }
        return Ok(());
    }

    if payload_len % 4 == 1 {
        return Err(Malformed::InvalidLength(text.len()));
    }

    if kind.padding() == Padding::Absent {
        return Ok(());
    }

    let padding = &text[payload_len..];
    if let Some((offset, character)) = padding.char_indices().find(|(_, c)| *c != PAD) {
        // symbols after `=` mean the padding sits in the wrong place
        if character.is_ascii() && alphabet.contains(character as u8) {
            return Err(Malformed::InvalidPadding);
        }
        return Err(Malformed::InvalidCharacter {
            character,
            offset: payload_len + offset,
        });
    }
    if padding.len() != (4 - payload_len % 4) % 4 {
        return Err(Malformed::InvalidPadding);
    }
    Ok(())
}

fn from_hex_error(err: hex::FromHexError, length: usize) -> Malformed {
    match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => Malformed::InvalidCharacter {
            character: c,
            offset: index,
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            Malformed::InvalidLength(length)
        }
    }
}

#[cfg(test)]
mod tests {
    use condtext::decoder::Decoder;
    use rstest::rstest;

    use super::{EncodedText, decode, encode};
    use crate::error::{Error, Malformed};
    use crate::kind::EncodingKind;

    const PREFIX_CONDITION_HEX: &str =
        "A12A8020E9241D95AD4FC17A373E609BB69FF0263C83597DD6BC758F162BF0D9D15F09EA8102046682020780";
    const PREFIX_CONDITION_BASE64: &str =
        "oSqAIOkkHZWtT8F6Nz5gm7af8CY8g1l91rx1jxYr8NnRXwnqgQIEZoICB4A=";
    const PREFIX_CONDITION_BASE64_NO_PADDING: &str =
        "oSqAIOkkHZWtT8F6Nz5gm7af8CY8g1l91rx1jxYr8NnRXwnqgQIEZoICB4A";

    fn prefix_condition() -> Vec<u8> {
        hex::decode(PREFIX_CONDITION_HEX).unwrap()
    }

    #[rstest(
        kind,
        expected,
        case(EncodingKind::Hex, PREFIX_CONDITION_HEX),
        case(EncodingKind::Base64, PREFIX_CONDITION_BASE64),
        case(EncodingKind::Base64NoPadding, PREFIX_CONDITION_BASE64_NO_PADDING),
        case(EncodingKind::Base64Url, PREFIX_CONDITION_BASE64),
        case(EncodingKind::Base64UrlNoPadding, PREFIX_CONDITION_BASE64_NO_PADDING)
    )]
    fn test_encode_prefix_condition(kind: EncodingKind, expected: &str) {
        let encoded = encode(&prefix_condition(), kind);
        assert_eq!(expected, encoded.as_str());
        assert_eq!(kind, encoded.kind());

        let decoded = decode(expected, kind).unwrap();
        assert_eq!(prefix_condition(), decoded);
    }

    #[rstest(
        input,
        kind,
        expected,
        case(vec![0xfb, 0xff], EncodingKind::Hex, "FBFF"),
        case(vec![0xfb, 0xff], EncodingKind::Base64, "+/8="),
        case(vec![0xfb, 0xff], EncodingKind::Base64NoPadding, "+/8"),
        case(vec![0xfb, 0xff], EncodingKind::Base64Url, "-_8="),
        case(vec![0xfb, 0xff], EncodingKind::Base64UrlNoPadding, "-_8"),
        case(vec![0xff], EncodingKind::Base64, "/w=="),
        case(vec![0xff], EncodingKind::Base64UrlNoPadding, "_w"),
        case(vec![], EncodingKind::Base64, ""),
        case(vec![], EncodingKind::Hex, "")
    )]
    fn test_encode_alphabet_and_padding(input: Vec<u8>, kind: EncodingKind, expected: &str) {
        assert_eq!(expected, encode(&input, kind).as_str());
        assert_eq!(input, decode(expected, kind).unwrap());
    }

    #[test]
    fn test_decode_hex_is_case_insensitive() {
        let lower = PREFIX_CONDITION_HEX.to_ascii_lowercase();
        assert_eq!(prefix_condition(), decode(&lower, EncodingKind::Hex).unwrap());
        assert_eq!(vec![0xab, 0xcd], decode("aBcD", EncodingKind::Hex).unwrap());
    }

    #[rstest(
        input,
        kind,
        expected,
        case("ABC", EncodingKind::Hex, Malformed::InvalidLength(3)),
        case("0G", EncodingKind::Hex, Malformed::InvalidCharacter { character: 'G', offset: 1 }),
        case("AB==", EncodingKind::Hex, Malformed::InvalidCharacter { character: '=', offset: 2 }),
        case("+/8=", EncodingKind::Base64Url, Malformed::InvalidCharacter { character: '+', offset: 0 }),
        case("-_8=", EncodingKind::Base64, Malformed::InvalidCharacter { character: '-', offset: 0 }),
        case("AA€A", EncodingKind::Base64NoPadding, Malformed::InvalidCharacter { character: '€', offset: 2 }),
        case("+/8", EncodingKind::Base64, Malformed::InvalidPadding),
        case("+/8=", EncodingKind::Base64NoPadding, Malformed::InvalidPadding),
        case("AA==AAAA", EncodingKind::Base64, Malformed::InvalidPadding),
        case("AAAA====", EncodingKind::Base64, Malformed::InvalidPadding),
        case("AAA==", EncodingKind::Base64, Malformed::InvalidPadding),
        case("AA=!", EncodingKind::Base64, Malformed::InvalidCharacter { character: '!', offset: 3 }),
        case("AAAAA", EncodingKind::Base64NoPadding, Malformed::InvalidLength(5)),
        case("AAAAA===", EncodingKind::Base64Url, Malformed::InvalidLength(8)),
        case("/x==", EncodingKind::Base64, Malformed::NonCanonical { offset: 1 }),
        case("_x", EncodingKind::Base64UrlNoPadding, Malformed::NonCanonical { offset: 1 })
    )]
    fn test_decode_malformed(input: &str, kind: EncodingKind, expected: Malformed) {
        assert_eq!(
            Err(Error::Malformed {
                kind,
                reason: expected
            }),
            decode(input, kind)
        );
    }

    #[test]
    fn test_roundtrip_every_kind() {
        let samples: Vec<Vec<u8>> = (0..=64u8).map(|n| (0..n).map(|b| b.wrapping_mul(37)).collect()).collect();
        for kind in EncodingKind::ALL {
            for sample in &samples {
                let encoded = encode(sample, kind);
                let decoded: Vec<u8> = encoded.decode().unwrap();
                assert_eq!(sample, &decoded, "{kind} roundtrip of {} bytes", sample.len());
            }
        }
    }

    #[test]
    fn test_encoded_text_display() {
        let encoded: EncodedText = encode(&[0x01, 0x02], EncodingKind::Hex);
        assert_eq!("0102", encoded.to_string());
        assert_eq!("0102", encoded.into_string());
    }

    #[test]
    fn test_error_names_the_encoding() {
        let err = decode("+/8", EncodingKind::Base64).unwrap_err();
        assert_eq!("malformed base64 text: invalid padding", err.to_string());
    }
}
