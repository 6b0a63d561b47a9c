use std::convert::Infallible;
use std::fmt::{Display, Formatter};

use condtext::decoder::{DecodableFrom, Decoder};
use condtext::encoder::{EncodableTo, Encoder};
use error::Error;
use nom::{IResult, Parser};

pub mod error;

pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_NUMBER_MASK: u8 = 0x1f;
const LENGTH_LONG_FORM: u8 = 0x80;

/// Constructed elements may be nested at most this deep.
pub const MAX_DEPTH: usize = 32;

/*
ref: X.690 8.1.2 identifier octets

  8 7 | 6 | 5 4 3 2 1
 class| P/C| tag number (0-30, 31 means high tag number form)
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    const fn bits(self) -> u8 {
        match self {
            TagClass::Universal => 0,
            TagClass::Application => 1,
            TagClass::ContextSpecific => 2,
            TagClass::Private => 3,
        }
    }
}

/// A single-octet identifier.
///
/// Only the low tag number form is supported, which covers every tag used by
/// crypto-conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    class: TagClass,
    constructed: bool,
    number: u8,
}

impl Tag {
    /// Returns `None` when `number` needs the high tag number form (31 and
    /// above).
    pub const fn new(class: TagClass, constructed: bool, number: u8) -> Option<Self> {
        if number >= TAG_NUMBER_MASK {
            return None;
        }
        Some(Tag {
            class,
            constructed,
            number,
        })
    }

    pub const fn context_specific(number: u8, constructed: bool) -> Option<Self> {
        Tag::new(TagClass::ContextSpecific, constructed, number)
    }

    pub fn class(&self) -> TagClass {
        self.class
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub const fn to_byte(self) -> u8 {
        let constructed = if self.constructed { TAG_CONSTRUCTED } else { 0 };
        (self.class.bits() << 6) | constructed | self.number
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let number = value & TAG_NUMBER_MASK;
        if number == TAG_NUMBER_MASK {
            return Err(Error::HighTagNumber);
        }
        Ok(Tag {
            class: TagClass::from_bits(value >> 6),
            constructed: value & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            number,
        })
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.class {
            TagClass::Universal => write!(f, "UNIVERSAL {}", self.number)?,
            TagClass::Application => write!(f, "APPLICATION {}", self.number)?,
            TagClass::ContextSpecific => write!(f, "[{}]", self.number)?,
            TagClass::Private => write!(f, "PRIVATE {}", self.number)?,
        }
        if self.constructed {
            write!(f, " (constructed)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Primitive(Vec<u8>),
    Constructed(Vec<Tlv>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

impl Tlv {
    pub fn primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            value: Value::Primitive(data),
        }
    }

    pub fn constructed(tag: Tag, children: Vec<Tlv>) -> Self {
        Tlv {
            tag,
            value: Value::Constructed(children),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Content octets of a primitive element.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Primitive(data) => Some(data),
            Value::Constructed(_) => None,
        }
    }

    /// Nested elements of a constructed element.
    pub fn children(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Primitive(_) => None,
            Value::Constructed(children) => Some(children),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.tag.to_byte());
        match &self.value {
            Value::Primitive(data) => {
                write_length(data.len(), out);
                out.extend_from_slice(data);
            }
            Value::Constructed(children) => {
                let mut content = Vec::new();
                for child in children {
                    child.write(&mut content);
                }
                write_length(content.len(), out);
                out.extend_from_slice(&content);
            }
        }
    }

    fn parse(input: &[u8], depth: usize) -> IResult<&[u8], Tlv, Error> {
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = nom::bytes::complete::take::<_, _, Error>(length).parse(input)?;

        if tag.is_constructed() {
            if depth >= MAX_DEPTH {
                return Err(nom::Err::Failure(Error::TooDeep(MAX_DEPTH)));
            }
            // parse TLV recursively.
            let mut children = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, child) = Self::parse(data, depth + 1)?;
                data = rest;
                children.push(child);
            }
            return Ok((input, Tlv::constructed(tag, children)));
        }

        Ok((input, Tlv::primitive(tag, data.to_vec())))
    }
}

/// A sequence of top-level DER elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Tlv> {
        self.elements
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for element in &self.elements {
            element.write(&mut out);
        }
        out
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        parse_der(self)
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        parse_der(self)
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Infallible;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.to_bytes())
    }
}

fn parse_der(mut input: &[u8]) -> Result<Der, Error> {
    let mut elements = Vec::new();
    while !input.is_empty() {
        let (rest, tlv) = Tlv::parse(input, 0)?;
        input = rest;
        elements.push(tlv);
    }
    Ok(Der { elements })
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag, Error> {
    let (input, n) = nom::number::complete::be_u8::<_, Error>(input)?;
    let tag = Tag::try_from(n).map_err(nom::Err::Failure)?;
    Ok((input, tag))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize, Error> {
    let (input, n) = nom::number::complete::be_u8::<_, Error>(input)?;
    if n & LENGTH_LONG_FORM == 0 {
        // short form: 0-127
        return Ok((input, n as usize));
    }

    // long form
    // First 1 bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let octets = (n & !LENGTH_LONG_FORM) as usize;
    if octets == 0 {
        return Err(nom::Err::Failure(Error::IndefiniteLength));
    }
    if octets > size_of::<usize>() {
        return Err(nom::Err::Failure(Error::LengthOverflow(octets)));
    }
    let (input, bs) = nom::bytes::complete::take::<_, _, Error>(octets).parse(input)?;
    if bs[0] == 0 {
        return Err(nom::Err::Failure(Error::NonMinimalLength));
    }
    let length = bs.iter().fold(0usize, |n, &b| (n << 8) | b as usize);
    if length < LENGTH_LONG_FORM as usize {
        return Err(nom::Err::Failure(Error::NonMinimalLength));
    }
    Ok((input, length))
}

fn write_length(length: usize, out: &mut Vec<u8>) {
    if length < LENGTH_LONG_FORM as usize {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(LENGTH_LONG_FORM | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}
