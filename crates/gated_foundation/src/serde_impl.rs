//! Serde support for [`Value`] and [`Key`].
//!
//! Scalars map onto their natural serde forms. Date-times and objects are
//! tagged maps:
//!
//! ```text
//! {"@datetime": "2024-01-02T03:04:05+00:00"}
//! {"@type": "Point", "x": 1, "y": 2}
//! ```
//!
//! Deserializing an object resolves its class in the process-wide registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::key::Key;
use crate::object::Object;
use crate::registry;
use crate::value::Value;

const DATETIME_TAG: &str = "@datetime";
const TYPE_TAG: &str = "@type";

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::DateTime(dt) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(DATETIME_TAG, &dt.to_rfc3339())?;
                map.end()
            }
            Self::Object(o) => {
                let fields: Vec<_> = o.fields().collect();
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry(TYPE_TAG, o.type_name())?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, a tagged date-time or a tagged object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| E::custom(format!("integer {n} does not fit in i64")))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Float(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::from(s))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let Some(tag) = map.next_key::<String>()? else {
            return Err(de::Error::custom("empty map is not a value"));
        };
        match tag.as_str() {
            DATETIME_TAG => {
                let text: String = map.next_value()?;
                let dt = DateTime::parse_from_rfc3339(&text).map_err(de::Error::custom)?;
                Ok(Value::DateTime(dt.with_timezone(&Utc)))
            }
            TYPE_TAG => {
                let name: String = map.next_value()?;
                let class = registry::resolve(&name)
                    .ok_or_else(|| de::Error::custom(format!("unknown type {name}")))?;
                let mut fields = BTreeMap::new();
                while let Some((field, value)) = map.next_entry::<String, Value>()? {
                    fields.insert(Arc::<str>::from(field), value);
                }
                Object::with_fields(class, fields)
                    .map(Value::Object)
                    .map_err(de::Error::custom)
            }
            other => Err(de::Error::custom(format!(
                "expected {DATETIME_TAG} or {TYPE_TAG}, found {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Integer keys serialize as integers and string keys as strings.
///
/// Text formats such as JSON stringify map keys, and deserializing maps a
/// canonical integer string back to [`Key::Int`]. A string key that looks
/// like a canonical integer, such as `"42"`, therefore comes back as
/// `Key::Int(42)` after a text round trip. Self-describing formats that keep
/// integer map keys are unaffected.
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string key")
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Key, E> {
        Ok(Key::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Key, E> {
        i64::try_from(n)
            .map(Key::Int)
            .map_err(|_| E::custom(format!("key {n} does not fit in i64")))
    }

    // Text formats stringify map keys; canonical integers come back as ints.
    fn visit_str<E: de::Error>(self, s: &str) -> Result<Key, E> {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Ok(Key::Int(n)),
            _ => Ok(Key::from(s)),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}
