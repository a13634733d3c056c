use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;

type TreeMap<K, V> = OrderedMap<K, V>;

struct KeyGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl KeyGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 1000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut key = self.next();
        while self.unique.contains(&key) {
            key = self.next();
        }
        self.unique.insert(key);
        key
    }
}

fn with_map_and_generator<S>(test_fn: impl Fn(OrderedMap<i32, i32, S>, KeyGenerator))
where
    S: SortedSequence<Item<i32, i32>>,
{
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = KeyGenerator::new(seed);
        let map = OrderedMap::default();
        test_fn(map, gen);
    }
}

/// Runs a generic test body against both shipped backings.
macro_rules! for_each_backing {
    ($name:ident) => {
        $name::<OrderStatisticTree<Item<_, _>>>();
        $name::<SortedVec<Item<_, _>>>();
    };
}

fn assert_strictly_ascending<K: Ord + std::fmt::Debug, V, S>(map: &OrderedMap<K, V, S>)
where
    S: SortedSequence<Item<K, V>>,
{
    let keys: Vec<_> = map.keys().collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "{:?} is not below {:?}", pair[0], pair[1]);
    }
    assert_eq!(keys.len(), map.len());
}

#[test]
fn random_operations_match_btree_map() {
    fn run<S: SortedSequence<Item<i32, i32>>>() {
        with_map_and_generator(|mut map: OrderedMap<i32, i32, S>, mut gen| {
            let mut model = BTreeMap::new();
            for step in 0..3000 {
                let key = gen.next();
                match gen.rng.gen_range(0..4) {
                    0 | 1 => assert_eq!(map.insert(key, step), model.insert(key, step)),
                    2 => assert_eq!(map.remove(&key).ok(), model.remove(&key)),
                    _ => assert_eq!(map.get(&key).ok(), model.get(&key)),
                }
                assert_eq!(map.len(), model.len());
            }
            assert_strictly_ascending(&map);
            assert!(map.iter().eq(model.iter()));
        });
    }
    for_each_backing!(run);
}

#[test]
fn map_len_will_update() {
    fn run<S: SortedSequence<Item<i32, i32>>>() {
        with_map_and_generator(|mut map: OrderedMap<i32, i32, S>, mut gen| {
            let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
                .take(100)
                .collect();
            for k in keys.clone() {
                let _ignore = map.insert(k, k);
            }
            assert_eq!(map.len(), 100);
            assert_eq!(map.iter().count(), map.len());
            for k in keys {
                assert_eq!(map.remove(&k), Ok(k));
            }
            assert_eq!(map.len(), 0);
            assert!(map.is_empty());
        });
    }
    for_each_backing!(run);
}

#[test]
fn remove_non_exist_key_will_do_nothing() {
    fn run<S: SortedSequence<Item<i32, i32>>>() {
        with_map_and_generator(|mut map: OrderedMap<i32, i32, S>, mut gen| {
            let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
                .take(500)
                .collect();
            for k in keys {
                let _ignore = map.insert(k, k);
            }
            let to_remove: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
                .take(500)
                .collect();
            for k in to_remove {
                assert_eq!(map.remove(&k), Err(Error::KeyNotFound));
            }
            assert_eq!(map.len(), 500);
        });
    }
    for_each_backing!(run);
}

#[test]
fn iterate_through_map_is_sorted() {
    fn run<S: SortedSequence<Item<i32, i32>>>() {
        with_map_and_generator(|mut map: OrderedMap<i32, i32, S>, mut gen| {
            let mut pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
                .enumerate()
                .map(|(v, k)| (k, v as i32))
                .take(1000)
                .collect();
            for (k, v) in pairs.clone() {
                let _ignore = map.insert(k, v);
            }
            pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

            for ((mk, mv), (k, v)) in map.iter().zip(pairs.iter()) {
                assert_eq!(mk, k);
                assert_eq!(mv, v);
            }
            assert!(map.keys().copied().eq(pairs.iter().map(|p| p.0)));
            assert!(map.values().copied().eq(pairs.iter().map(|p| p.1)));
            assert!(map.iter().rev().map(|(k, _)| *k).eq(pairs.iter().rev().map(|p| p.0)));
            assert_eq!(map.into_iter().collect::<Vec<_>>(), pairs);
        });
    }
    for_each_backing!(run);
}

#[test]
fn set_then_get_returns_value() {
    fn run<S: SortedSequence<Item<i32, i32>>>() {
        with_map_and_generator(|mut map: OrderedMap<i32, i32, S>, mut gen| {
            for _ in 0..500 {
                let (k, v) = (gen.next(), gen.next());
                let _ignore = map.insert(k, v);
                assert_eq!(map.get(&k), Ok(&v));
                assert!(map.contains_key(&k));
            }
        });
    }
    for_each_backing!(run);
}

#[test]
fn overwrite_keeps_size() {
    fn run<S: SortedSequence<Item<&'static str, i32>>>() {
        let mut map: OrderedMap<&str, i32, S> = OrderedMap::default();
        assert_eq!(map.insert("k", 1), None);
        let len = map.len();
        assert_eq!(map.insert("k", 2), Some(1));
        assert_eq!(map.get("k"), Ok(&2));
        assert_eq!(map.len(), len);
    }
    for_each_backing!(run);
}

#[test]
fn empty_map_renders_braces() {
    fn run<S: SortedSequence<Item<&'static str, i32>>>() {
        let map: OrderedMap<&str, i32, S> = OrderedMap::default();
        assert_eq!(format!("{map:?}"), "OrderedMap({})");
        assert_eq!(map.len(), 0);
    }
    for_each_backing!(run);
    let map: TreeMap<i32, i32> = crate::ordered_map! {};
    assert!(map.is_empty());
}

#[test]
fn pairs_are_yielded_in_key_order() {
    fn run<S: SortedSequence<Item<&'static str, i32>>>() {
        let map: OrderedMap<&str, i32, S> = [("c", 1), ("a", 2), ("b", 3)].into_iter().collect();
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![(&"a", &2), (&"b", &3), (&"c", &1)]
        );
        assert_eq!(format!("{map:?}"), r#"OrderedMap({"a": 2, "b": 3, "c": 1})"#);
    }
    for_each_backing!(run);
}

#[test]
fn set_existing_key_updates_value() {
    let mut map = OrderedMap::from([("a", 1)]);
    let _ignore = map.insert("a", 3);
    assert_eq!(map.get("a"), Ok(&3));
    assert_eq!(map.len(), 1);
}

#[test]
fn delete_missing_key_fails() {
    fn run<S: SortedSequence<Item<&'static str, i32>>>() {
        let mut map: OrderedMap<&str, i32, S> = [("b", 1)].into_iter().collect();
        assert_eq!(map.remove("a"), Err(Error::KeyNotFound));
        assert_eq!(map.get("a"), Err(Error::KeyNotFound));
        assert_eq!(map.len(), 1);
    }
    for_each_backing!(run);
}

#[test]
fn cursor_fails_after_insert_of_new_key() {
    fn run<S: SortedSequence<Item<&'static str, i32>>>() {
        let mut map: OrderedMap<&str, i32, S> =
            [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let mut cursor = map.cursor();
        assert_eq!(cursor.next(&map), Some(Ok((&"a", &1))));
        let _ignore = map.insert("z", 26);
        assert_eq!(cursor.next(&map), Some(Err(Error::ConcurrentModification)));
        assert_eq!(cursor.next(&map), None);
        assert_eq!(cursor.position(), 1);
    }
    for_each_backing!(run);
}

#[test]
fn cursor_catches_same_size_replacement() {
    let mut map = OrderedMap::from([(1, "a"), (2, "b"), (3, "c")]);
    let mut cursor = map.cursor();
    assert_eq!(cursor.next(&map), Some(Ok((&1, &"a"))));
    assert_eq!(map.remove(&3), Ok("c"));
    let _ignore = map.insert(4, "d");
    assert_eq!(map.len(), 3);
    assert_eq!(cursor.next(&map), Some(Err(Error::ConcurrentModification)));
}

#[test]
fn cursor_tolerates_value_overwrite() {
    let mut map = OrderedMap::from([(1, 10), (2, 20)]);
    let mut cursor = map.cursor();
    assert_eq!(cursor.next(&map), Some(Ok((&1, &10))));
    let _ignore = map.insert(2, 200);
    assert_eq!(cursor.next(&map), Some(Ok((&2, &200))));
    assert_eq!(cursor.next(&map), None);
    assert_eq!(cursor.next(&map), None);
}

#[test]
fn cursor_walks_every_entry() {
    with_map_and_generator(|mut map: OrderedMap<i32, i32, SortedVec<_>>, mut gen| {
        for _ in 0..200 {
            let _ignore = map.insert(gen.next(), 0);
        }
        let mut cursor = map.cursor();
        let mut walked = Vec::new();
        while let Some(step) = cursor.next(&map) {
            walked.push(*step.map(|(k, _)| k).unwrap_or(&-1));
        }
        assert!(walked.iter().eq(map.keys()));
    });
}

#[test]
fn copy_is_structurally_independent() {
    fn run<S: SortedSequence<Item<&'static str, i32>> + Clone>() {
        let original: OrderedMap<&str, i32, S> = [("a", 1), ("b", 2)].into_iter().collect();
        let mut copy = original.clone();
        assert_eq!(copy.remove("a"), Ok(1));
        let _ignore = copy.insert("c", 3);
        assert!(original.contains_key("a"));
        assert!(!original.contains_key("c"));
        assert_eq!(original.len(), 2);
    }
    for_each_backing!(run);
}

#[test]
fn copy_shares_aliased_values() {
    let shared = Rc::new(RefCell::new(vec![1]));
    let original = OrderedMap::from([("k", Rc::clone(&shared))]);
    let copy = original.clone();
    if let Ok(value) = copy.get("k") {
        value.borrow_mut().push(2);
    }
    assert_eq!(original.get("k").map(|v| v.borrow().clone()), Ok(vec![1, 2]));
    assert_eq!(Rc::strong_count(&shared), 3);
}

#[test]
fn update_applies_sources_in_order() {
    let mut map: TreeMap<&str, i32> = OrderedMap::new();
    map.update_from(&BTreeMap::from([("a", 1), ("b", 2)]));
    map.update([("b", 20), ("c", 30), ("c", 31)]);
    map.update([("a", 100)]);
    assert_eq!(map, OrderedMap::from([("a", 100), ("b", 20), ("c", 31)]));
    let mut extended = OrderedMap::new();
    extended.extend([("x", 1)]);
    assert_eq!(extended.len(), 1);
}

#[test]
fn ordered_map_macro_applies_pairs_in_order() {
    let map = crate::ordered_map! { "one" => 1, "two" => 2, "one" => 11 };
    assert_eq!(map.get("one"), Ok(&11));
    assert_eq!(map.get("two"), Ok(&2));
    assert_eq!(map.len(), 2);
}

#[test]
fn convenience_methods_work() {
    fn run<S: SortedSequence<Item<i32, &'static str>>>() {
        let mut map: OrderedMap<i32, &str, S> =
            [(2, "b"), (1, "a"), (3, "c"), (4, "d")].into_iter().collect();
        assert_eq!(map.get_or(&9, &"none"), &"none");
        assert_eq!(map.get_or(&1, &"none"), &"a");
        assert_eq!(map.first_key_value(), Some((&1, &"a")));
        assert_eq!(map.last_key_value(), Some((&4, &"d")));
        assert_eq!(map.get_index(2), Some((&3, &"c")));
        assert_eq!(map.position(&3), Some(2));
        assert_eq!(map.position(&5), None);
        assert_eq!(map.pop(&2, "missing"), "b");
        assert_eq!(map.pop(&2, "missing"), "missing");
        assert_eq!(map.pop_last(), Some((4, "d")));
        assert_eq!(map.pop_first(), Some((1, "a")));
        assert_eq!(map.get_key_value(&3), Ok((&3, &"c")));
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.pop_last(), None);
        assert_eq!(map.first_key_value(), None);
    }
    for_each_backing!(run);
}

#[test]
fn entry_api_inserts_and_modifies() {
    let mut map: TreeMap<&str, i32> = OrderedMap::new();
    for word in ["b", "a", "b", "c", "b"] {
        *map.entry(word).or_insert(0) += 1;
    }
    assert_eq!(map, OrderedMap::from([("a", 1), ("b", 3), ("c", 1)]));

    map.entry("a").and_modify(|v| *v += 10).or_default();
    *map.entry("d").or_default() += 4;
    assert_eq!(map.get("a"), Ok(&11));
    assert_eq!(map.get("d"), Ok(&4));

    match map.entry("c") {
        Entry::Occupied(mut entry) => {
            assert_eq!(entry.key(), &"c");
            assert_eq!(entry.insert(7), 1);
            assert_eq!(entry.remove(), 7);
        }
        Entry::Vacant(_) => panic!("c should be occupied"),
    }
    assert!(!map.contains_key("c"));
    assert_eq!(map.entry("e").key(), &"e");
}

#[test]
fn entry_insert_bumps_version() {
    let mut map = OrderedMap::from([(1, 1)]);
    let mut cursor = map.cursor();
    let _ignore = map.entry(2).or_insert_with(|| 2);
    assert_eq!(cursor.next(&map), Some(Err(Error::ConcurrentModification)));
}

#[test]
fn borrowed_key_lookups() {
    let mut map = OrderedMap::new();
    let _ignore = map.insert(String::from("apple"), 1);
    let _ignore = map.insert(String::from("banana"), 2);
    assert_eq!(map.get("apple"), Ok(&1));
    assert_eq!(map["banana"], 2);
    assert_eq!(map.remove("apple"), Ok(1));
    assert!(!map.contains_key("apple"));
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_key_panics() {
    let map: TreeMap<i32, i32> = OrderedMap::new();
    let _value = map[&1];
}

#[test]
fn get_mut_changes_value() {
    let mut map = VecOrderedMap::default();
    let _ignore = map.insert(1, String::from("a"));
    if let Ok(value) = map.get_mut(&1) {
        value.push('b');
    }
    assert_eq!(map.get(&1).map(String::as_str), Ok("ab"));
    assert_eq!(map.get_mut(&2), Err(Error::KeyNotFound));
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_ordered_map() {
    use serde_json::{json, Value};

    let map = OrderedMap::from([("b".to_string(), 2), ("a".to_string(), 1)]);
    let serialized = serde_json::to_string(&map).unwrap();
    assert_eq!(serialized, r#"{"a":1,"b":2}"#);
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(actual, json!({"a": 1, "b": 2}));

    let deserialized: VecOrderedMap<String, i32> =
        serde_json::from_str(r#"{"z":26,"a":1,"z":27}"#).unwrap();
    assert_eq!(
        deserialized.into_iter().collect::<Vec<_>>(),
        vec![("a".to_string(), 1), ("z".to_string(), 27)]
    );
}
