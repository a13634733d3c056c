use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::item::Item;
use crate::map::OrderedMap;
use crate::sequence::SortedSequence;

/// An iterator over the entries of an `OrderedMap`, sorted by key.
///
/// Walks positions `0..len` of the underlying sequence.
#[derive(Debug)]
pub struct Iter<'a, K, V, S> {
    /// Reference to the sequence
    seq_ref: &'a S,
    /// Next position from the front
    front: usize,
    /// One past the next position from the back
    back: usize,
    marker: PhantomData<&'a Item<K, V>>,
}

impl<'a, K, V, S> Iter<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    pub(crate) fn new(seq_ref: &'a S) -> Self {
        Iter {
            seq_ref,
            front: 0,
            back: seq_ref.len(),
            marker: PhantomData,
        }
    }
}

impl<K, V, S> Clone for Iter<'_, K, V, S> {
    fn clone(&self) -> Self {
        Iter {
            seq_ref: self.seq_ref,
            front: self.front,
            back: self.back,
            marker: PhantomData,
        }
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let seq_ref: &'a S = self.seq_ref;
        let item = seq_ref.get(self.front)?;
        self.front += 1;
        Some(item.as_pair())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.saturating_sub(self.front);
        (len, Some(len))
    }
}

impl<'a, K, V, S> DoubleEndedIterator for Iter<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let seq_ref: &'a S = self.seq_ref;
        let item = seq_ref.get(self.back - 1)?;
        self.back -= 1;
        Some(item.as_pair())
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
}

/// An iterator over the keys of an `OrderedMap`.
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V, S> {
    pub(crate) inner: Iter<'a, K, V, S>,
}

impl<'a, K, V, S> Iterator for Keys<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Keys<'_, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, S> ExactSizeIterator for Keys<'_, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
}

/// An iterator over the values of an `OrderedMap`.
#[derive(Debug, Clone)]
pub struct Values<'a, K, V, S> {
    pub(crate) inner: Iter<'a, K, V, S>,
}

impl<'a, K, V, S> Iterator for Values<'a, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> DoubleEndedIterator for Values<'_, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, S> ExactSizeIterator for Values<'_, K, V, S>
where
    K: Ord,
    S: SortedSequence<Item<K, V>>,
{
}

/// An into iterator over the entries of an `OrderedMap`.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    items: std::vec::IntoIter<Item<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(items: Vec<Item<K, V>>) -> Self {
        IntoIter {
            items: items.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.items.next().map(Item::into_pair)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<(K, V)> {
        self.items.next_back().map(Item::into_pair)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// A detached position in an `OrderedMap`.
///
/// Unlike [`Iter`], a cursor does not borrow the map between steps, so the
/// map may be modified while a walk is in progress. Each step checks the
/// map's structural version against the one captured when the cursor was
/// created; after an insert of a new key, a removal or a `clear`, the next
/// step yields [`Error::ConcurrentModification`] and the cursor is
/// exhausted from then on. Overwriting the value of an existing key is not
/// a structural change.
///
/// A cursor must only be advanced with the map that created it.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Next position to yield
    position: usize,
    /// Map version the walk started at
    version: u64,
    /// Set once the walk ended or failed
    done: bool,
}

impl Cursor {
    pub(crate) fn new(version: u64) -> Self {
        Cursor {
            position: 0,
            version,
            done: false,
        }
    }

    /// Advance the cursor, returning the next entry in ascending key order.
    pub fn next<'m, K, V, S>(
        &mut self,
        map: &'m OrderedMap<K, V, S>,
    ) -> Option<Result<(&'m K, &'m V)>>
    where
        K: Ord,
        S: SortedSequence<Item<K, V>>,
    {
        if self.done {
            return None;
        }
        if map.version != self.version {
            log::debug!(
                "map changed during iteration at position {}: version {} -> {}",
                self.position,
                self.version,
                map.version
            );
            self.done = true;
            return Some(Err(Error::ConcurrentModification));
        }
        match map.get_index(self.position) {
            Some(pair) => {
                self.position += 1;
                Some(Ok(pair))
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    /// Number of entries this cursor has yielded.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}
