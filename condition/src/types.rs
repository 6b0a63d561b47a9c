//! Condition types and the subtype set carried by compound conditions.
//!
//! ```asn1
//! ConditionTypes ::= BIT STRING {
//!   preImageSha256   (0),
//!   prefixSha256     (1),
//!   thresholdSha256  (2),
//!   rsaSha256        (3),
//!   ed25519Sha256    (4)
//! }
//! ```

use std::fmt::{Display, Formatter};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionType {
    PreimageSha256,
    PrefixSha256,
    ThresholdSha256,
    RsaSha256,
    Ed25519Sha256,
}

impl ConditionType {
    pub const ALL: [ConditionType; 5] = [
        ConditionType::PreimageSha256,
        ConditionType::PrefixSha256,
        ConditionType::ThresholdSha256,
        ConditionType::RsaSha256,
        ConditionType::Ed25519Sha256,
    ];

    /// The registered type id, also used as the CHOICE tag number and the
    /// bit position in `ConditionTypes`.
    pub const fn id(self) -> u8 {
        match self {
            ConditionType::PreimageSha256 => 0,
            ConditionType::PrefixSha256 => 1,
            ConditionType::ThresholdSha256 => 2,
            ConditionType::RsaSha256 => 3,
            ConditionType::Ed25519Sha256 => 4,
        }
    }

    pub fn from_id(id: usize) -> Option<Self> {
        ConditionType::ALL.get(id).copied()
    }

    /// Compound conditions reference other conditions and carry subtypes.
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            ConditionType::PrefixSha256 | ConditionType::ThresholdSha256
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            ConditionType::PreimageSha256 => "preimage-sha-256",
            ConditionType::PrefixSha256 => "prefix-sha-256",
            ConditionType::ThresholdSha256 => "threshold-sha-256",
            ConditionType::RsaSha256 => "rsa-sha-256",
            ConditionType::Ed25519Sha256 => "ed25519-sha-256",
        }
    }
}

impl TryFrom<u8> for ConditionType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ConditionType::from_id(value as usize).ok_or(Error::UnknownConditionType(value))
    }
}

impl Display for ConditionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A set of condition types, stored as one bit per type id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionTypes(u8);

impl ConditionTypes {
    pub const fn empty() -> Self {
        ConditionTypes(0)
    }

    pub fn insert(&mut self, condition_type: ConditionType) {
        self.0 |= 1 << condition_type.id();
    }

    pub fn contains(&self, condition_type: ConditionType) -> bool {
        self.0 & (1 << condition_type.id()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = ConditionType> + use<> {
        let set = *self;
        ConditionType::ALL
            .into_iter()
            .filter(move |t| set.contains(*t))
    }

    /// Content octets of the DER BIT STRING: the unused-bit count followed by
    /// the bits with trailing zero bits removed.
    pub(crate) fn to_bit_string(self) -> Vec<u8> {
        let Some(highest) = self.iter().last() else {
            return vec![0x00];
        };
        let bits = self.iter().fold(0u8, |acc, t| acc | (0x80 >> t.id()));
        vec![7 - highest.id(), bits]
    }

    pub(crate) fn from_bit_string(data: &[u8]) -> Result<Self, Error> {
        let (&unused, bits) = data.split_first().ok_or(Error::SubtypesNoData)?;
        if unused > 7 || (bits.is_empty() && unused != 0) {
            return Err(Error::SubtypesUnusedBitsOutOfRange(unused));
        }

        let total_bits = bits.len() * 8 - unused as usize;
        let mut set = ConditionTypes::empty();
        for (index, byte) in bits.iter().enumerate() {
            for offset in 0..8 {
                if byte & (0x80 >> offset) == 0 {
                    continue;
                }
                let position = index * 8 + offset;
                if position >= total_bits {
                    return Err(Error::SubtypesNonZeroPadding);
                }
                let condition_type =
                    ConditionType::from_id(position).ok_or(Error::UnknownSubtype(position))?;
                set.insert(condition_type);
            }
        }
        Ok(set)
    }
}

impl FromIterator<ConditionType> for ConditionTypes {
    fn from_iter<I: IntoIterator<Item = ConditionType>>(iter: I) -> Self {
        let mut set = ConditionTypes::empty();
        for condition_type in iter {
            set.insert(condition_type);
        }
        set
    }
}

impl Display for ConditionTypes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = self.iter().map(ConditionType::name).collect::<Vec<_>>();
        write!(f, "{}", names.join(","))
    }
}
