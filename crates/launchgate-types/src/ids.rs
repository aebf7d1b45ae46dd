//! Identifiers used throughout Launchgate.
//!
//! Addresses and remote contract identifiers are fixed-size byte arrays that
//! render (and serialize) as `0x`-prefixed lowercase hex. Ledger records use
//! UUIDv7 for time-ordered sorting.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use uuid::Uuid;

use crate::{LaunchgateError, Result};

/// Decode `0x`-prefixed (or bare) hex into a fixed-size array.
fn parse_hex_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let stripped = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(stripped)
        .map_err(|e| LaunchgateError::Serialization(format!("invalid hex {s:?}: {e}")))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        LaunchgateError::Serialization(format!("expected {N} bytes, got {len} in {s:?}"))
    })
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account or contract address on a single domain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Address controlled by an ed25519 public key: the low 20 bytes of
    /// `keccak256(public_key)`.
    #[must_use]
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        let hash = Keccak256::digest(public_key);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash[12..32]);
        Self(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = LaunchgateError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_array(s).map(Self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// DomainId
// ---------------------------------------------------------------------------

/// Identifier of an independent execution domain (chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DomainId(pub u32);

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "domain:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// DomainContractId
// ---------------------------------------------------------------------------

/// The asset's contract identifier on a remote domain.
///
/// Remote domains may use wider address formats, so the identifier is a full
/// 32-byte word. Local 20-byte addresses are left-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct DomainContractId(pub [u8; 32]);

impl DomainContractId {
    #[must_use]
    pub fn from_address(address: Address) -> Self {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(address.as_bytes());
        Self(word)
    }

    /// The embedded 20-byte address, if the upper 12 bytes are zero.
    #[must_use]
    pub fn to_address(&self) -> Option<Address> {
        if self.0[..12].iter().any(|&b| b != 0) {
            return None;
        }
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&self.0[12..]);
        Some(Address(addr))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<Address> for DomainContractId {
    fn from(address: Address) -> Self {
        Self::from_address(address)
    }
}

impl fmt::Display for DomainContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for DomainContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainContractId({self})")
    }
}

impl FromStr for DomainContractId {
    type Err = LaunchgateError;

    fn from_str(s: &str) -> Result<Self> {
        parse_hex_array(s).map(Self)
    }
}

impl Serialize for DomainContractId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DomainContractId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// Relay-assigned identifier of one outbound cross-domain transfer attempt.
///
/// The relay never reuses a nonce for the same asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Nonce(pub u64);

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nonce:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Unique identifier for a ledger notification. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
