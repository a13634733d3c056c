use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::item::Item;
use crate::iter::Keys as MapKeys;
use crate::map::OrderedMap;
use crate::sequence::SortedSequence;

/// A source that can enumerate its keys and look values up by key.
///
/// `OrderedMap::update_from` walks `keys()` in the source's own order and
/// copies `lookup(key)` for each of them.
pub trait Mapping<K, V> {
    /// Iterator over the keys of the source
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Enumerate the keys of the source.
    fn keys(&self) -> Self::Keys<'_>;

    /// Look up the value stored for `key`.
    fn lookup(&self, key: &K) -> Option<&V>;
}

impl<K, V, S> Mapping<K, V> for OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    type Keys<'a>
        = MapKeys<'a, K, V, S>
    where
        Self: 'a,
        K: 'a;

    #[inline]
    fn keys(&self) -> Self::Keys<'_> {
        OrderedMap::keys(self)
    }

    #[inline]
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key).ok()
    }
}

impl<K, V> Mapping<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    type Keys<'a>
        = btree_map::Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    #[inline]
    fn keys(&self) -> Self::Keys<'_> {
        BTreeMap::keys(self)
    }

    #[inline]
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

impl<K, V, H> Mapping<K, V> for HashMap<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher,
{
    type Keys<'a>
        = hash_map::Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    #[inline]
    fn keys(&self) -> Self::Keys<'_> {
        HashMap::keys(self)
    }

    #[inline]
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}
