//! Serde support for [`Collection`].
//!
//! A collection serializes as a map in iteration order. Deserializing runs the
//! same validation as [`Collection::new`], so a payload can never produce a
//! collection holding values its policy rejects.

use std::fmt;
use std::marker::PhantomData;

use gated_foundation::{Key, OrderedMap, Value};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collection::Collection;
use crate::policy::AcceptancePolicy;

/// Serializes as a map in iteration order.
///
/// Keys follow [`Key`]'s serde rules: through a text format, a string key
/// spelled as a canonical integer is read back as an integer key.
impl<P: AcceptancePolicy> Serialize for Collection<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.count()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct CollectionVisitor<P>(PhantomData<fn() -> P>);

impl<'de, P: AcceptancePolicy> Visitor<'de> for CollectionVisitor<P> {
    type Value = Collection<P>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of values for {}", Collection::<P>::type_label())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            entries.set(key, value);
        }
        Collection::from_map(entries).map_err(|e| de::Error::custom(e.report()))
    }
}

impl<'de, P: AcceptancePolicy> Deserialize<'de> for Collection<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionVisitor(PhantomData))
    }
}
