use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;

use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::error::{Error, Result};
use crate::item::Item;
use crate::iter::{Cursor, IntoIter, Iter, Keys, Values};
use crate::mapping::Mapping;
use crate::sequence::{SortedSequence, SortedVec};
use crate::tree::OrderStatisticTree;

/// A map whose entries are kept in ascending key order inside a [`SortedSequence`].
///
/// Every operation starts with a lower-bound search for the requested key
/// and then inspects the item found there, so the cost of a lookup is the
/// cost of the sequence's `lower_bound`. The default backing is an
/// [`OrderStatisticTree`], which makes lookups, inserts, removals and
/// positional access O(log n).
pub struct OrderedMap<K, V, S = OrderStatisticTree<Item<K, V>>> {
    /// Items in ascending key order
    pub(crate) seq: S,
    /// Bumped on every insert of a new key and every removal
    pub(crate) version: u64,
    marker: PhantomData<Item<K, V>>,
}

/// An `OrderedMap` backed by a sorted `Vec`.
pub type VecOrderedMap<K, V> = OrderedMap<K, V, SortedVec<Item<K, V>>>;

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Create an empty `OrderedMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `OrderedMap` holding a copy of every entry of `source`.
    ///
    /// # Example
    /// ```rust
    /// use std::collections::HashMap;
    /// use sorted_map::OrderedMap;
    ///
    /// let source = HashMap::from([("c", 1), ("b", 2)]);
    /// let map = OrderedMap::from_mapping(&source);
    /// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&"b", &"c"]);
    /// ```
    #[inline]
    pub fn from_mapping<M>(source: &M) -> Self
    where
        M: Mapping<K, V> + ?Sized,
        K: Clone,
        V: Clone,
    {
        let mut map = Self::new();
        map.update_from(source);
        map
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    /// Return the position of `key` in ascending key order, if it is stored.
    #[inline]
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.seq.lower_bound(key);
        self.seq
            .get(position)
            .filter(|item| key.cmp(item.key.borrow()).is_eq())
            .map(|_| position)
    }

    /// Return a reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the map.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.get("a"), Ok(&1));
    /// assert_eq!(map.get("b"), Err(Error::KeyNotFound));
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Return the stored key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the map.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(key)
            .and_then(|position| self.seq.get(position))
            .map(Item::as_pair)
            .ok_or(Error::KeyNotFound)
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the map.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(3, 0);
    /// if let Ok(v) = map.get_mut(&3) {
    ///     *v += 1;
    /// }
    /// assert_eq!(map.get(&3), Ok(&1));
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.position(key).ok_or(Error::KeyNotFound)?;
        self.seq
            .get_mut(position)
            .map(|item| &mut item.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Return the value corresponding to the key, or `default` if it is absent.
    #[inline]
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Return `true` if the map contains a value for the key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Insert a key-value pair into the map.
    /// If the key exists, overwrite the value in place and return the previous one.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// assert_eq!(map.insert("a", 2), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(position) => self
                .seq
                .get_mut(position)
                .map(|item| mem::replace(&mut item.value, value)),
            None => {
                let _position = self.push_item(Item::new(key, value));
                None
            }
        }
    }

    /// Remove a key from the map, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] and leaves the map untouched if the key is absent.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert_eq!(map.remove("c"), Err(Error::KeyNotFound));
    /// assert_eq!(map.remove("b"), Ok(2));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove a key from the map, returning the stored key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.position(key).ok_or(Error::KeyNotFound)?;
        self.pop_index(position).ok_or(Error::KeyNotFound)
    }

    /// Remove a key from the map, returning its value or `default` if it was absent.
    #[inline]
    pub fn pop<Q>(&mut self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).unwrap_or(default)
    }

    /// Remove and return the entry with the smallest key.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.pop_index(0)
    }

    /// Remove and return the entry with the largest key.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.len().checked_sub(1)?;
        self.pop_index(last)
    }

    /// Return the entry with the smallest key.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.get_index(0)
    }

    /// Return the entry with the largest key.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.get_index(self.len().checked_sub(1)?)
    }

    /// Return the entry at `position` in ascending key order.
    #[inline]
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
        self.seq.get(position).map(Item::as_pair)
    }

    /// Get the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert!(matches!(map.entry("a"), Entry::Vacant(_)));
    /// map.entry("a").or_insert(0);
    /// assert!(matches!(map.entry("a"), Entry::Occupied(_)));
    /// map.entry("a").and_modify(|v| *v += 1);
    /// assert_eq!(map.get("a"), Ok(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        match self.position(&key) {
            Some(position) => Entry::Occupied(OccupiedEntry {
                map_ref: self,
                position,
            }),
            None => Entry::Vacant(VacantEntry { map_ref: self, key }),
        }
    }

    /// Insert every pair in order, later pairs overwriting earlier ones.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.update([("b", 1), ("a", 2), ("b", 3)]);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&"a", &2), (&"b", &3)]);
    /// ```
    #[inline]
    pub fn update<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            let _ignore = self.insert(key, value);
        }
    }

    /// Copy every entry of `source` into the map, walking the source's keys in
    /// its own enumeration order.
    #[inline]
    pub fn update_from<M>(&mut self, source: &M)
    where
        M: Mapping<K, V> + ?Sized,
        K: Clone,
        V: Clone,
    {
        for key in source.keys() {
            if let Some(value) = source.lookup(key) {
                let _ignore = self.insert(key.clone(), value.clone());
            }
        }
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        self.seq.clear();
        self.bump_version();
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get an iterator over the entries of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(&self.seq)
    }

    /// Get an iterator over the keys of the map, in ascending order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        Keys { inner: self.iter() }
    }

    /// Get an iterator over the values of the map, in ascending key order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, S> {
        Values { inner: self.iter() }
    }

    /// Get a cursor that walks the map without borrowing it between steps.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let mut cursor = map.cursor();
    /// assert_eq!(cursor.next(&map), Some(Ok((&"a", &1))));
    /// map.insert("d", 4);
    /// assert_eq!(cursor.next(&map), Some(Err(Error::ConcurrentModification)));
    /// assert_eq!(cursor.next(&map), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.version)
    }

    /// Remove and return the entry at `position` in ascending key order.
    #[inline]
    pub fn pop_index(&mut self, position: usize) -> Option<(K, V)> {
        let item = self.seq.remove_at(position)?;
        self.bump_version();
        Some(item.into_pair())
    }

    /// Insert an item whose key is known to be absent, returning its position.
    pub(crate) fn push_item(&mut self, item: Item<K, V>) -> usize {
        let position = self.seq.insert(item);
        self.bump_version();
        position
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl<K, V, S> Default for OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    #[inline]
    fn default() -> Self {
        Self {
            seq: S::default(),
            version: 0,
            marker: PhantomData,
        }
    }
}

/// A structural copy: the clone owns its own sequence, and each value is
/// cloned with `V::clone`, so values behind `Rc` stay shared.
impl<K, V, S> Clone for OrderedMap<K, V, S>
where
    S: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            seq: self.seq.clone(),
            version: self.version,
            marker: PhantomData,
        }
    }
}

/// Renders as `OrderedMap({k1: v1, k2: v2})` in ascending key order.
impl<K, V, S> fmt::Debug for OrderedMap<K, V, S>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    S: SortedSequence<Item<K, V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderedMap(")?;
        f.debug_map().entries(self.iter()).finish()?;
        f.write_str(")")
    }
}

impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Ord,
    V: PartialEq,
    S: SortedSequence<Item<K, V>>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Ord,
    V: Eq,
    S: SortedSequence<Item<K, V>>,
{
}

impl<K, V, S, Q> Index<&Q> for OrderedMap<K, V, S>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    S: SortedSequence<Item<K, V>>,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.update(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.seq.into_sorted_vec())
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    #[inline]
    fn into_iter(self) -> Iter<'a, K, V, S> {
        self.iter()
    }
}
