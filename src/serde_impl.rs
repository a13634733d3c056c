use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::item::Item;
use crate::map::OrderedMap;
use crate::sequence::SortedSequence;

/// Serializes as a map in ascending key order.
impl<K, V, S> Serialize for OrderedMap<K, V, S>
where
    K: Ord + Serialize,
    V: Serialize,
    S: SortedSequence<Item<K, V>>,
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

struct OrderedMapVisitor<K, V, S> {
    marker: PhantomData<fn() -> OrderedMap<K, V, S>>,
}

impl<'de, K, V, S> Visitor<'de> for OrderedMapVisitor<K, V, S>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
    S: SortedSequence<Item<K, V>>,
{
    type Value = OrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap::default();
        while let Some((key, value)) = access.next_entry()? {
            let _ignore = map.insert(key, value);
        }
        Ok(map)
    }
}

/// Later duplicates of a key overwrite earlier ones.
impl<'de, K, V, S> Deserialize<'de> for OrderedMap<K, V, S>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
    S: SortedSequence<Item<K, V>>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}
