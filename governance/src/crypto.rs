//! Digests and constant-time comparison
//!
//! One hash primitive (SHA-256) backs both transaction signatures and the
//! ledger chain. Comparisons used for tamper detection go through
//! [`subtle::ConstantTimeEq`] so a short-circuiting `==` can never leak
//! how far a forged digest matched.

use crate::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// 256-bit content digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Genesis digest: the well-known previous-hash of entry 0
    pub const GENESIS: Digest = Digest([0u8; 32]);

    /// Wrap raw digest bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Constant-time equality; use this for every tamper check
    pub fn ct_eq(&self, other: &Digest) -> bool {
        self.0.ct_eq(&other.0).into()
    }

    /// Hex text form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex text
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).ok_or_else(|| D::Error::custom("expected 64 hex characters"))
    }
}

/// Hash arbitrary bytes with SHA-256
pub fn hash_bytes(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Digest(hasher.finalize().into())
}

/// Hash a canonical view of a value.
///
/// The value is serialized to compact JSON; struct fields serialize in
/// declaration order, which makes the byte stream deterministic for the
/// canonical-view structs used by transactions and ledger entries.
pub fn hash_canonical<T: Serialize>(value: &T) -> Result<Digest> {
    let bytes = serde_json::to_vec(value)?;
    Ok(hash_bytes(&bytes))
}
