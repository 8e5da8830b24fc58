//! Serde implementations for `VisitedSet`.
//!
//! By default a set serializes as `{ "capacity": 112, "token": "1.0.1" }`.
//! Deserialization is as tolerant as [`VisitedSet::parse`]: a missing or
//! corrupted token yields the empty set rather than an error.

use alloc::string::String;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{DEFAULT_CAPACITY, VisitedSet};

/// Largest capacity accepted when deserializing, which bounds the allocation
/// an untrusted document can request.
pub const MAX_CAPACITY: usize = 1 << 16;

#[derive(Serialize)]
struct ReprRef<'a> {
    capacity: usize,
    token: &'a str,
}

#[derive(Deserialize)]
struct Repr {
    capacity: usize,
    #[serde(default)]
    token: Option<String>,
}

impl Serialize for VisitedSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ReprRef {
            capacity: self.capacity,
            token: &self.serialize(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VisitedSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Repr::deserialize(deserializer)?;
        if repr.capacity > MAX_CAPACITY {
            return Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(repr.capacity as u64),
                &"a capacity of at most 65536",
            ));
        }
        Ok(Self::parse(repr.token.as_deref(), repr.capacity))
    }
}

/// Serde implementation storing the set as a bare token string at
/// [`DEFAULT_CAPACITY`].
///
/// Use with `#[serde(with = "summit_stamp::serde::token")]`. A null, missing
/// or malformed token deserializes to the empty set.
pub mod token {
    use super::*;

    /// Serialize the set as its token string.
    pub fn serialize<S>(b: &VisitedSet, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&b.serialize())
    }

    /// Deserialize the set from a token string, degrading to empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<VisitedSet, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TokenVisitor;

        impl<'de> Visitor<'de> for TokenVisitor {
            type Value = VisitedSet;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a visited-set token string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(VisitedSet::parse(Some(v), DEFAULT_CAPACITY))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(VisitedSet::default())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(VisitedSet::default())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }
        }

        deserializer.deserialize_option(TokenVisitor)
    }
}
