//! Serde support for [`SnowgenId`].
//!
//! By default an ID serializes as its native `u64`. Use the [`as_native`] or
//! [`as_base32`] helpers with `#[serde(with = "...")]` to pick a
//! representation per field.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::SnowgenId;

impl Serialize for SnowgenId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        as_native::serialize(self, s)
    }
}

impl<'de> Deserialize<'de> for SnowgenId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        as_native::deserialize(d)
    }
}

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer, de};
    use crate::SnowgenId;

    /// Serialize an ID as its native `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowgenId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its native `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value sets
    /// the reserved bit.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowgenId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(d)?;
        SnowgenId::try_from(raw).map_err(de::Error::custom)
    }
}

#[cfg(feature = "base32")]
pub mod as_base32 {
    use super::{Base32Visitor, Deserializer, Serializer};
    use crate::{BASE32_LEN, SnowgenId};

    /// Serialize an ID as a Crockford Base32 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowgenId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0_u8; BASE32_LEN];
        s.serialize_str(id.encode_to_buf(&mut buf))
    }

    /// Deserialize an ID from a Crockford Base32 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails, the string is
    /// not valid Crockford Base32, or the value sets the reserved bit.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowgenId, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(Base32Visitor)
    }
}

#[cfg(feature = "base32")]
struct Base32Visitor;

#[cfg(feature = "base32")]
impl de::Visitor<'_> for Base32Visitor {
    type Value = SnowgenId;

    fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter.write_str("a Crockford base32 encoded string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        SnowgenId::decode(v).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        event_id: SnowgenId,
    }

    #[test]
    fn native_by_default() {
        let row = Row {
            event_id: SnowgenId::from_raw(42),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"event_id":42}"#);
        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn native_rejects_reserved_bit() {
        let json = json!({ "event_id": u64::MAX });
        let err = serde_json::from_value::<Row>(json).unwrap_err();
        assert!(err.to_string().contains("reserved bit"), "{err}");
    }

    #[test]
    fn native_helper_matches_default() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Explicit {
            #[serde(with = "as_native")]
            event_id: SnowgenId,
        }
        let id = SnowgenId::from_components(123_456, 5, 9, 7);
        let explicit = serde_json::to_string(&Explicit { event_id: id }).unwrap();
        let implicit = serde_json::to_string(&Row { event_id: id }).unwrap();
        assert_eq!(explicit, implicit);
        assert_eq!(explicit, format!(r#"{{"event_id":{}}}"#, id.to_raw()));
    }

    #[cfg(feature = "base32")]
    mod base32 {
        use serde::{Deserialize, Serialize};
        use serde_json::json;

        use crate::{SnowgenId, serde::as_base32};

        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_base32")]
            event_id: SnowgenId,
        }

        #[test]
        fn encodes_as_string() {
            let row = Row {
                event_id: SnowgenId::from_raw(42),
            };
            let json = serde_json::to_string(&row).unwrap();
            assert_eq!(json, r#"{"event_id":"000000000001A"}"#);
            let back: Row = serde_json::from_str(&json).unwrap();
            assert_eq!(back, row);
        }

        #[test]
        fn rejects_bad_strings() {
            for bad in ["short", "00000000000!0", "FZZZZZZZZZZZZ"] {
                let json = json!({ "event_id": bad });
                assert!(serde_json::from_value::<Row>(json).is_err(), "{bad}");
            }
        }

        #[test]
        fn rejects_numbers() {
            let json = json!({ "event_id": 42 });
            assert!(serde_json::from_value::<Row>(json).is_err());
        }
    }
}
