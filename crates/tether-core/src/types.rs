use derive_more::{Deref, Display, FromStr};
use serde::{Deserialize, Serialize, Serializer, de::Deserializer};
use thiserror::Error as ThisError;
use ulid::Ulid as WrappedUlid;

///
/// UlidError
///

#[derive(Debug, ThisError)]
pub enum UlidError {
    #[error("invalid ulid string")]
    InvalidString,
}

///
/// Ulid
///
/// Identity-friendly ULID newtype. Wraps the `ulid` crate so key values can
/// carry their own ordering, hashing, and string form without pulling the
/// crate's RNG machinery into the dependency tree.
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Ulid(WrappedUlid);

impl Ulid {
    #[must_use]
    pub const fn nil() -> Self {
        Self(WrappedUlid::nil())
    }

    /// from_bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedUlid::from_bytes(bytes))
    }

    /// from_u128
    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(WrappedUlid::from_bytes(n.to_be_bytes()))
    }

    /// from_str
    #[expect(clippy::should_implement_trait)]
    pub fn from_str(encoded: &str) -> Result<Self, UlidError> {
        let this = WrappedUlid::from_string(encoded).map_err(|_| UlidError::InvalidString)?;

        Ok(Self(this))
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.0 == 0
    }
}

impl Default for Ulid {
    fn default() -> Self {
        Self(WrappedUlid::nil())
    }
}

impl From<WrappedUlid> for Ulid {
    fn from(ulid: WrappedUlid) -> Self {
        Self(ulid)
    }
}

// The ulid crate's serde impls are gated behind its `serde` feature.
// With default-features disabled (to avoid pulling in `rand`), we implement
// Serialize/Deserialize here explicitly.
impl Serialize for Ulid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buffer = [0; ::ulid::ULID_LEN];
        let text = self.array_to_str(&mut buffer);
        text.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ulid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let deserialized_str = String::deserialize(deserializer)?;
        match WrappedUlid::from_string(&deserialized_str) {
            Ok(u) => Ok(Self(u)),
            Err(_) => Err(serde::de::Error::custom("invalid ulid string")),
        }
    }
}

///
/// TESTS
///
