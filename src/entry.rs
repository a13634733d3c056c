use std::fmt;

use crate::item::Item;
use crate::map::OrderedMap;
use crate::sequence::SortedSequence;

/// A view into a single entry in a map, which may either be vacant or occupied.
pub enum Entry<'a, K, V, S> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S>),
}

/// A view into an occupied entry in an `OrderedMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, S> {
    /// Reference to the map
    pub(crate) map_ref: &'a mut OrderedMap<K, V, S>,
    /// Position of the entry in ascending key order
    pub(crate) position: usize,
}

/// A view into a vacant entry in an `OrderedMap`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, S> {
    /// Mutable reference to the map
    pub(crate) map_ref: &'a mut OrderedMap<K, V, S>,
    /// The key of this entry
    pub(crate) key: K,
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(3);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// assert_eq!(map.get(&1), Ok(&3));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`Entry::or_insert`], computing the default only when the entry is vacant.
    #[inline]
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Like [`Entry::or_insert`], inserting `V::default()` when the entry is vacant.
    #[inline]
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Example
    /// ```rust
    /// use sorted_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// map.insert("k", 3);
    /// map.entry("k").and_modify(|v| *v += 1);
    /// assert_eq!(map.get("k"), Ok(&4));
    /// ```
    #[inline]
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Self::Occupied(entry)
            }
            Entry::Vacant(entry) => Self::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    fn item(&self) -> &Item<K, V> {
        self.map_ref
            .seq
            .get(self.position)
            .expect("occupied entry points at a stored item")
    }

    fn item_mut(&mut self) -> &mut Item<K, V> {
        self.map_ref
            .seq
            .get_mut(self.position)
            .expect("occupied entry points at a stored item")
    }

    /// Returns a reference to the stored key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.item().key
    }

    /// Returns a reference to the value.
    #[inline]
    pub fn get(&self) -> &V {
        &self.item().value
    }

    /// Returns a mutable reference to the value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.item_mut().value
    }

    /// Converts the entry into a mutable reference bound to the map's lifetime.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        let map_ref = self.map_ref;
        &mut map_ref
            .seq
            .get_mut(self.position)
            .expect("occupied entry points at a stored item")
            .value
    }

    /// Overwrites the value, returning the old one.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map, returning the stored key and value.
    #[inline]
    pub fn remove_entry(self) -> (K, V) {
        self.map_ref
            .pop_index(self.position)
            .expect("occupied entry points at a stored item")
    }
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    /// Returns a reference to the key that would be inserted.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes back ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value and returns a mutable reference to it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { map_ref, key } = self;
        let position = map_ref.push_item(Item::new(key, value));
        &mut map_ref
            .seq
            .get_mut(position)
            .expect("inserted item is stored at the returned position")
            .value
    }
}

impl<K, V, S> fmt::Debug for Entry<'_, K, V, S>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    S: SortedSequence<Item<K, V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Entry::Vacant(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

impl<K, V, S> fmt::Debug for OccupiedEntry<'_, K, V, S>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    S: SortedSequence<Item<K, V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

impl<K, V, S> fmt::Debug for VacantEntry<'_, K, V, S>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(&self.key).finish()
    }
}
