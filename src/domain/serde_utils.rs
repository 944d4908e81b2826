//! Serde helpers for snowflake ids.
//!
//! Discord sends ids as decimal strings; the snapshot and tests may use
//! plain integers. Both are accepted, strings are written.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a snowflake as a string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

/// A single snowflake.
#[derive(Deserialize)]
#[serde(transparent)]
struct Raw(#[serde(deserialize_with = "string_to_u64::deserialize")] u64);

/// `#[serde(with = "string_to_u64")]` for `u64` ids.
pub mod string_to_u64 {
    use super::{Deserializer, Serializer, SnowflakeVisitor};

    /// # Errors
    /// Returns an error if the serializer fails.
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// # Errors
    /// Returns an error for anything but a non-negative integer or numeric
    /// string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }

    /// `#[serde(with = "string_to_u64::option")]` for `Option<u64>` ids.
    pub mod option {
        use super::super::Raw;
        use serde::{Deserialize, Deserializer, Serializer};

        /// # Errors
        /// Returns an error if the serializer fails.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(id) => super::serialize(id, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// # Errors
        /// Returns an error if a present value is not a snowflake.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            Ok(Option::<Raw>::deserialize(deserializer)?.map(|Raw(id)| id))
        }
    }
}

/// `#[serde(with = "vec_string_to_u64")]` for lists of ids.
pub mod vec_string_to_u64 {
    use super::Raw;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    /// Returns an error if the serializer fails.
    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer>(value: &Vec<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(ToString::to_string))
    }

    /// # Errors
    /// Returns an error if any element is not a snowflake.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        let raw = Vec::<Raw>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|Raw(id)| id).collect())
    }
}
