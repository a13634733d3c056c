use std::borrow::Borrow;

use crate::item::Keyed;

/// A sequence kept in ascending order of its elements' keys.
///
/// `OrderedMap` only talks to its storage through this trait, so any
/// structure that can answer a lower-bound query and address elements by
/// position can back a map. `Clone` on the implementor is the structural
/// copy: an independent container holding clones of the same elements.
pub trait SortedSequence<T: Keyed>: Default {
    /// Number of elements in the sequence.
    fn len(&self) -> usize;

    /// Return `true` if the sequence holds no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leftmost position `i` in `[0, len]` whose element key is not less than `key`,
    /// or `len` if there is none.
    fn lower_bound<Q>(&self, key: &Q) -> usize
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Element at `position`.
    fn get(&self, position: usize) -> Option<&T>;

    /// Mutable element at `position`.
    ///
    /// Callers must not change the element's key.
    fn get_mut(&mut self, position: usize) -> Option<&mut T>;

    /// Insert an element at its order-preserving position and return that position.
    fn insert(&mut self, item: T) -> usize;

    /// Remove and return the element at `position`.
    fn remove_at(&mut self, position: usize) -> Option<T>;

    /// Remove all elements.
    fn clear(&mut self);

    /// Consume the sequence, returning its elements in ascending order.
    fn into_sorted_vec(self) -> Vec<T>;
}

/// A `SortedSequence` backed by a sorted `Vec`.
///
/// Lookups are binary searches; insertion and removal shift the tail, so
/// they cost O(n).
#[derive(Clone, Debug)]
pub struct SortedVec<T> {
    /// Elements in ascending key order
    items: Vec<T>,
}

impl<T> SortedVec<T> {
    /// Create an empty `SortedVec`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty `SortedVec` with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// View the elements as a sorted slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for SortedVec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> SortedSequence<T> for SortedVec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn lower_bound<Q>(&self, key: &Q) -> usize
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items
            .partition_point(|item| key.cmp(item.key().borrow()).is_gt())
    }

    #[inline]
    fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    #[inline]
    fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        self.items.get_mut(position)
    }

    #[inline]
    fn insert(&mut self, item: T) -> usize {
        let position = self.lower_bound(item.key());
        self.items.insert(position, item);
        position
    }

    #[inline]
    fn remove_at(&mut self, position: usize) -> Option<T> {
        (position < self.items.len()).then(|| self.items.remove(position))
    }

    #[inline]
    fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    fn into_sorted_vec(self) -> Vec<T> {
        self.items
    }
}
