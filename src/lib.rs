//! `sorted_map` is an ordered map whose entries live in a pluggable sorted sequence.
//!
//! An [`OrderedMap`] stores each key-value pair as an [`Item`] ordered by its
//! key alone, inside any type implementing [`SortedSequence`]. Every lookup is
//! a lower-bound query on that sequence followed by a key comparison at the
//! found position, so the map's cost model is exactly the sequence's.
//!
//! Two sequences ship with the crate:
//! - [`OrderStatisticTree`], the default: a red-black tree kept in an array
//!   of nodes that point at each other by index, with every node carrying
//!   its subtree size. Lower bound, positional access, insertion and removal
//!   are all O(logN).
//! - [`SortedVec`]: a sorted `Vec`, with O(logN) searches and O(N) inserts.
//!
//! Walking a map with [`OrderedMap::iter`] borrows it, so it cannot change
//! underneath the iterator. A [`Cursor`] walks without holding a borrow and
//! reports [`Error::ConcurrentModification`] if keys were added or removed
//! in between two steps.
//!
//! # Example
//!
//! ```rust
//! use sorted_map::{Error, OrderedMap};
//!
//! let mut map = OrderedMap::from([("c", 1), ("a", 2), ("b", 3)]);
//! assert_eq!(map.get("a"), Ok(&2));
//! map.insert("a", 4);
//! assert_eq!(map.remove("z"), Err(Error::KeyNotFound));
//! assert_eq!(format!("{map:?}"), r#"OrderedMap({"a": 4, "b": 3, "c": 1})"#);
//! ```
//!

mod entry;
mod error;
mod index;
mod item;
mod iter;
mod map;
mod mapping;
mod node;
mod sequence;
#[cfg(feature = "serde")]
mod serde_impl;
mod tree;

#[cfg(test)]
mod tests;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::{Error, Result};
pub use index::{DefaultIx, IndexType};
pub use item::{Item, Keyed};
pub use iter::{Cursor, IntoIter, Iter, Keys, Values};
pub use map::{OrderedMap, VecOrderedMap};
pub use mapping::Mapping;
pub use sequence::{SortedSequence, SortedVec};
pub use tree::OrderStatisticTree;

/// Create an [`OrderedMap`] from `key => value` pairs, applied in the given order.
///
/// # Example
///
/// ```rust
/// use sorted_map::ordered_map;
///
/// let map = ordered_map! { "b" => 2, "a" => 1, "b" => 3 };
/// assert_eq!(map.get("b"), Ok(&3));
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! ordered_map {
    () => {
        $crate::OrderedMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::OrderedMap::new();
        $(
            let _ignore = map.insert($key, $value);
        )+
        map
    }};
}
