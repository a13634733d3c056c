//! The `Item` stored in a sorted sequence, ordered by its key only.
//!
//! Two items compare exactly as their keys do, so for `Item<&str, i32>`:
//! - ("a", 9) < ("b", 1), because "a" < "b"
//! - ("a", 9) == ("a", 1), because the values are never looked at

use std::cmp::Ordering;
use std::fmt;

/// Elements that a sorted sequence orders by a projected key.
pub trait Keyed {
    /// Type of the projected key
    type Key: Ord;

    /// Returns the key this element is ordered by.
    fn key(&self) -> &Self::Key;
}

/// A key-value pair stored in an `OrderedMap`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K, V> {
    /// Key, decides the position of the item
    pub key: K,
    /// Value, opaque to ordering
    pub value: V,
}

impl<K, V> Item<K, V> {
    /// Create a new `Item`
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Split the item into its key and value.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Borrow the key and value as a pair.
    #[inline]
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Borrow the key and mutably borrow the value.
    #[inline]
    pub fn as_pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }
}

impl<K: Ord, V> Keyed for Item<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Ord, V> PartialEq for Item<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for Item<K, V> {}

impl<K: Ord, V> PartialOrd for Item<K, V> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Item<K, V> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Renders the key only.
impl<K: fmt::Display, V> fmt::Display for Item<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn items_compare_by_key_only() {
        let a = Item::new("a", 9);
        let b = Item::new("b", 1);
        assert!(a < b);
        assert!(a <= b);
        assert!(b > a);
        assert!(b >= a);
        assert_ne!(a, b);
        assert_eq!(Item::new("a", 9), Item::new("a", 1));
        assert_eq!(Item::new("a", 9).cmp(&Item::new("a", 1)), Ordering::Equal);
    }

    #[test]
    fn item_display_shows_key() {
        assert_eq!(Item::new(42, "ignored").to_string(), "42");
    }
}
