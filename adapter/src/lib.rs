//! # adapter
//!
//! Stores a [`ConditionValue`] as text in any supported encoding and reads
//! it back from text in any supported encoding.
//!
//! Fields opt in with one of the hook modules:
//!
//! ```
//! use condition::ConditionValue;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Escrow {
//!     #[serde(with = "adapter::base64url")]
//!     condition: ConditionValue,
//! }
//! ```
//!
//! Every hook writes its own encoding and accepts all of them when reading.
//! Human-readable formats get text, binary formats get the raw DER bytes.

#![forbid(unsafe_code)]

use std::fmt::Formatter;
use std::str::FromStr;

use condition::ConditionValue;
use encoding::{EncodedText, EncodingKind};
use error::Error;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod error;

/// Converts conditions to text in one fixed encoding, and from text in any.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConditionTextAdapter {
    output: EncodingKind,
}

impl ConditionTextAdapter {
    pub const fn new(output: EncodingKind) -> Self {
        ConditionTextAdapter { output }
    }

    pub fn output_encoding(&self) -> EncodingKind {
        self.output
    }

    pub fn serialize(&self, condition: &ConditionValue) -> EncodedText {
        encoding::encode(condition.as_der(), self.output)
    }

    /// Detects the encoding of `raw`, decodes it and rebuilds the condition.
    pub fn deserialize(&self, raw: &str) -> Result<ConditionValue, Error> {
        deserialize_detected(raw).map(|(_, condition)| condition)
    }

    pub fn serialize_field<S>(&self, condition: &ConditionValue, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.serialize(condition).as_str())
        } else {
            serializer.serialize_bytes(condition.as_der())
        }
    }

    pub fn deserialize_field<'de, D>(&self, deserializer: D) -> Result<ConditionValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let raw = String::deserialize(deserializer)?;
            self.deserialize(&raw).map_err(serde::de::Error::custom)
        } else {
            let der = deserializer.deserialize_byte_buf(DerVisitor)?;
            ConditionValue::from_der(&der).map_err(serde::de::Error::custom)
        }
    }
}

fn deserialize_detected(raw: &str) -> Result<(EncodingKind, ConditionValue), Error> {
    let (kind, der) = encoding::decode_any(raw)?;
    let condition = ConditionValue::from_der(&der)?;
    Ok((kind, condition))
}

struct DerVisitor;

impl<'de> Visitor<'de> for DerVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("DER encoded condition bytes")
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element()? {
            bytes.push(b);
        }
        Ok(bytes)
    }
}

macro_rules! hooks {
    ($($(#[$doc:meta])* $name:ident => $kind:expr;)+) => {
        $(
            $(#[$doc])*
            pub mod $name {
                use condition::ConditionValue;
                use serde::{Deserializer, Serializer};

                use crate::ConditionTextAdapter;

                const ADAPTER: ConditionTextAdapter = ConditionTextAdapter::new($kind);

                pub fn serialize<S>(condition: &ConditionValue, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    ADAPTER.serialize_field(condition, serializer)
                }

                pub fn deserialize<'de, D>(deserializer: D) -> Result<ConditionValue, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    ADAPTER.deserialize_field(deserializer)
                }
            }
        )+
    };
}

hooks! {
    /// Writes uppercase hex.
    hex => encoding::EncodingKind::Hex;
    /// Writes padded standard base64.
    base64 => encoding::EncodingKind::Base64;
    base64_no_padding => encoding::EncodingKind::Base64NoPadding;
    /// Writes padded URL-safe base64.
    base64url => encoding::EncodingKind::Base64Url;
    base64url_no_padding => encoding::EncodingKind::Base64UrlNoPadding;
}

/// The persisted form of a condition: `{"condition": "<text>"}`.
///
/// A document read from text remembers the encoding it was written in, so
/// writing it back yields the same text. Binary formats store the DER bytes
/// and the encoding name instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    condition: ConditionValue,
    adapter: ConditionTextAdapter,
}

impl Document {
    pub fn new(condition: ConditionValue, output: EncodingKind) -> Self {
        Document {
            condition,
            adapter: ConditionTextAdapter::new(output),
        }
    }

    pub fn condition(&self) -> &ConditionValue {
        &self.condition
    }

    pub fn into_condition(self) -> ConditionValue {
        self.condition
    }

    pub fn encoding(&self) -> EncodingKind {
        self.adapter.output_encoding()
    }

    pub fn with_encoding(self, output: EncodingKind) -> Self {
        Document::new(self.condition, output)
    }

    pub fn text(&self) -> EncodedText {
        self.adapter.serialize(&self.condition)
    }
}

impl FromStr for Document {
    type Err = Error;

    /// Reads condition text in any supported encoding and keeps that
    /// encoding for output.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, condition) = deserialize_detected(raw)?;
        Ok(Document::new(condition, kind))
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let mut state = serializer.serialize_struct("Document", 1)?;
            state.serialize_field("condition", &Field(self))?;
            state.end()
        } else {
            // the DER bytes carry no encoding, so it is stored next to them
            let mut state = serializer.serialize_struct("Document", 2)?;
            state.serialize_field("condition", &Field(self))?;
            state.serialize_field("encoding", &self.encoding())?;
            state.end()
        }
    }
}

struct Field<'a>(&'a Document);

impl Serialize for Field<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.adapter.serialize_field(&self.0.condition, serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Text {
            condition: String,
        }

        #[derive(Deserialize)]
        struct Binary {
            #[serde(deserialize_with = "crate::hex::deserialize")]
            condition: ConditionValue,
            encoding: EncodingKind,
        }

        if deserializer.is_human_readable() {
            let text = Text::deserialize(deserializer)?;
            text.condition.parse().map_err(serde::de::Error::custom)
        } else {
            let binary = Binary::deserialize(deserializer)?;
            Ok(Document::new(binary.condition, binary.encoding))
        }
    }
}
