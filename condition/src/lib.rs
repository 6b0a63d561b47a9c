//! # condition
//!
//! Crypto-condition values reconstructed from, and rendered to, their
//! canonical DER form.
//!
//! ```asn1
//! Condition ::= CHOICE {
//!   preimageSha256   [0] SimpleSha256Condition,
//!   prefixSha256     [1] CompoundSha256Condition,
//!   thresholdSha256  [2] CompoundSha256Condition,
//!   rsaSha256        [3] SimpleSha256Condition,
//!   ed25519Sha256    [4] SimpleSha256Condition
//! }
//!
//! SimpleSha256Condition ::= SEQUENCE {
//!   fingerprint  OCTET STRING (SIZE(32)),
//!   cost         INTEGER (0..4294967295)
//! }
//!
//! CompoundSha256Condition ::= SEQUENCE {
//!   fingerprint  OCTET STRING (SIZE(32)),
//!   cost         INTEGER (0..4294967295),
//!   subtypes     ConditionTypes
//! }
//! ```
//!
//! The module uses automatic tagging, so every field is an implicit
//! context-specific primitive (`[0]`, `[1]`, `[2]`).
//!
//! Only the structure is checked here. Whether the fingerprint matches any
//! fulfillment is not this crate's concern.

#![forbid(unsafe_code)]

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use condtext::decoder::{DecodableFrom, Decoder};
use condtext::encoder::{EncodableTo, Encoder};
use der::{Der, Tag, TagClass, Tlv};
use encoding::EncodingKind;
use error::Error;

pub mod error;
pub mod types;

pub use types::{ConditionType, ConditionTypes};

pub const FINGERPRINT_LENGTH: usize = 32;

const FINGERPRINT_TAG: Tag = Tag::context_specific(0, false).unwrap();
const COST_TAG: Tag = Tag::context_specific(1, false).unwrap();
const SUBTYPES_TAG: Tag = Tag::context_specific(2, false).unwrap();

// indexed by `ConditionType::id`
const CONDITION_TAGS: [Tag; ConditionType::ALL.len()] = [
    Tag::context_specific(0, true).unwrap(),
    Tag::context_specific(1, true).unwrap(),
    Tag::context_specific(2, true).unwrap(),
    Tag::context_specific(3, true).unwrap(),
    Tag::context_specific(4, true).unwrap(),
];

/// A crypto-condition together with the exact bytes it was built from.
///
/// Two values are equal when their DER bytes are equal.
#[derive(Debug, Clone)]
pub struct ConditionValue {
    der: Vec<u8>,
    condition_type: ConditionType,
    fingerprint: [u8; FINGERPRINT_LENGTH],
    cost: u32,
    subtypes: ConditionTypes,
}

impl ConditionValue {
    /// Builds a condition and its DER encoding from its fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedSubtypes`] when `subtypes` is non-empty for
    /// a simple (non-compound) condition type.
    pub fn new(
        condition_type: ConditionType,
        fingerprint: [u8; FINGERPRINT_LENGTH],
        cost: u32,
        subtypes: ConditionTypes,
    ) -> Result<Self, Error> {
        if !condition_type.is_compound() && !subtypes.is_empty() {
            return Err(Error::UnexpectedSubtypes(condition_type));
        }
        let der = to_tlv(condition_type, &fingerprint, cost, subtypes).to_bytes();
        Ok(ConditionValue {
            der,
            condition_type,
            fingerprint,
            cost,
            subtypes,
        })
    }

    /// Reconstructs a condition from its DER bytes.
    ///
    /// The input must be a single, canonically encoded condition with no
    /// trailing bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self, Error> {
        let der: Der = bytes.decode().map_err(Error::FailedToDecodeDer)?;
        let value = parse_condition(&der)?;
        if value.der != bytes {
            return Err(Error::NonCanonical);
        }
        Ok(value)
    }

    pub fn condition_type(&self) -> ConditionType {
        self.condition_type
    }

    pub fn fingerprint(&self) -> &[u8; FINGERPRINT_LENGTH] {
        &self.fingerprint
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Always empty for simple condition types.
    pub fn subtypes(&self) -> ConditionTypes {
        self.subtypes
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn into_der(self) -> Vec<u8> {
        self.der
    }

    /// The named-information URI of the condition, e.g.
    /// `ni:///sha-256;<fingerprint>?fpt=prefix-sha-256&cost=1126&subtypes=preimage-sha-256`.
    pub fn uri(&self) -> String {
        let fingerprint = encoding::encode(&self.fingerprint, EncodingKind::Base64UrlNoPadding);
        let mut uri = format!(
            "ni:///sha-256;{}?fpt={}&cost={}",
            fingerprint, self.condition_type, self.cost
        );
        if !self.subtypes.is_empty() {
            uri.push_str(&format!("&subtypes={}", self.subtypes));
        }
        uri
    }
}

impl PartialEq for ConditionValue {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for ConditionValue {}

impl Hash for ConditionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.der.hash(state);
    }
}

impl Display for ConditionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri())
    }
}

impl TryFrom<&[u8]> for ConditionValue {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        ConditionValue::from_der(value)
    }
}

impl DecodableFrom<Vec<u8>> for ConditionValue {}

impl Decoder<Vec<u8>, ConditionValue> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<ConditionValue, Self::Error> {
        ConditionValue::from_der(self)
    }
}

impl DecodableFrom<Der> for ConditionValue {}

impl Decoder<Der, ConditionValue> for Der {
    type Error = Error;

    fn decode(&self) -> Result<ConditionValue, Self::Error> {
        let value = parse_condition(self)?;
        if value.der != self.to_bytes() {
            return Err(Error::NonCanonical);
        }
        Ok(value)
    }
}

impl EncodableTo<ConditionValue> for Der {}

impl Encoder<ConditionValue, Der> for ConditionValue {
    type Error = Infallible;

    fn encode(&self) -> Result<Der, Self::Error> {
        Ok(Der::new(vec![to_tlv(
            self.condition_type,
            &self.fingerprint,
            self.cost,
            self.subtypes,
        )]))
    }
}

fn parse_condition(der: &Der) -> Result<ConditionValue, Error> {
    let [element] = der.elements() else {
        return Err(Error::ElementCount(der.elements().len()));
    };

    let tag = element.tag();
    if tag.class() != TagClass::ContextSpecific || !tag.is_constructed() {
        return Err(Error::UnexpectedTag(tag));
    }
    let condition_type = ConditionType::try_from(tag.number())?;

    let mut fields = element.children().unwrap_or_default().iter();

    let fingerprint = expect_field(fields.next(), FINGERPRINT_TAG, "fingerprint")?;
    let fingerprint = <[u8; FINGERPRINT_LENGTH]>::try_from(fingerprint)
        .map_err(|_| Error::FingerprintLength(fingerprint.len()))?;

    let cost = parse_cost(expect_field(fields.next(), COST_TAG, "cost")?)?;

    let subtypes = if condition_type.is_compound() {
        ConditionTypes::from_bit_string(expect_field(fields.next(), SUBTYPES_TAG, "subtypes")?)?
    } else {
        ConditionTypes::empty()
    };

    if let Some(extra) = fields.next() {
        return Err(Error::UnexpectedTag(extra.tag()));
    }

    ConditionValue::new(condition_type, fingerprint, cost, subtypes)
}

fn expect_field<'a>(field: Option<&'a Tlv>, expected: Tag, name: &'static str) -> Result<&'a [u8], Error> {
    let field = field.ok_or(Error::MissingField(name))?;
    if field.tag() != expected {
        return Err(Error::UnexpectedTag(field.tag()));
    }
    field.data().ok_or(Error::UnexpectedTag(field.tag()))
}

fn parse_cost(data: &[u8]) -> Result<u32, Error> {
    let first = data.first().ok_or(Error::CostNoData)?;
    if first & 0x80 != 0 {
        return Err(Error::CostNegative);
    }
    let significant = &data[data.iter().take_while(|&&b| b == 0).count()..];
    if significant.len() > size_of::<u32>() {
        return Err(Error::CostOutOfRange);
    }
    Ok(significant.iter().fold(0u32, |n, &b| (n << 8) | b as u32))
}

fn encode_cost(cost: u32) -> Vec<u8> {
    let bytes = cost.to_be_bytes();
    // keep at least one octet, and a leading zero when the high bit is set
    let skip = bytes.iter().take_while(|&&b| b == 0).count().min(bytes.len() - 1);
    let mut out = Vec::with_capacity(bytes.len() + 1);
    if bytes[skip] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(&bytes[skip..]);
    out
}

fn to_tlv(
    condition_type: ConditionType,
    fingerprint: &[u8; FINGERPRINT_LENGTH],
    cost: u32,
    subtypes: ConditionTypes,
) -> Tlv {
    let mut fields = vec![
        Tlv::primitive(FINGERPRINT_TAG, fingerprint.to_vec()),
        Tlv::primitive(COST_TAG, encode_cost(cost)),
    ];
    if condition_type.is_compound() {
        fields.push(Tlv::primitive(
            SUBTYPES_TAG,
            subtypes.to_bit_string(),
        ));
    }
    Tlv::constructed(CONDITION_TAGS[condition_type.id() as usize], fields)
}
