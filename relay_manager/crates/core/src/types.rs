use crate::errors::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

pub type Amount = u128;
pub type Nonce = u128;
pub type ChainId = u64;
pub type Digest = [u8; 32];

pub const ADDRESS_LENGTH: usize = 20;
pub const SIGNATURE_LENGTH: usize = 65;

/// 20-byte account identifier.
///
/// Ordering follows the numeric value of the address read as a big-endian integer, which is what the ascending
/// signature rule is defined against.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0; ADDRESS_LENGTH]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let array: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| ParseError::InvalidLength {
            expected: ADDRESS_LENGTH,
            got: bytes.len(),
        })?;
        Ok(Self(array))
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        Self::from_slice(&bytes)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// 65-byte recoverable ECDSA signature laid out as `r || s || v`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelaySignature(pub [u8; SIGNATURE_LENGTH]);

impl RelaySignature {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let array: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| ParseError::InvalidLength {
            expected: SIGNATURE_LENGTH,
            got: bytes.len(),
        })?;
        Ok(Self(array))
    }

    pub fn from_parts(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[0..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = v;
        Self(bytes)
    }

    pub fn compact(&self) -> &[u8] {
        &self.0[0..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl FromStr for RelaySignature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        Self::from_slice(&bytes)
    }
}

impl Display for RelaySignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for RelaySignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for RelaySignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RelaySignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RelaySignature::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Replay-protection key of an outbound transfer. The whole tuple is the key, a bare nonce is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransferKey {
    pub source: Address,
    pub dest: Address,
    #[serde(with = "serde_str")]
    pub amount: Amount,
    #[serde(with = "serde_str")]
    pub nonce: Nonce,
}

impl Display for TransferKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(source: {}, dest: {}, amount: {}, nonce: {})",
            self.source, self.dest, self.amount, self.nonce
        )
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, ParseError> {
    let trimmed = s.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(stripped)?)
}
