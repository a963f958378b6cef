use sorted_concurrent_map::prelude::*;

use super::assert_sorted_unique;

fn string_int_one_through_four() -> SortedConcurrentMap<String, i32> {
    SortedConcurrentMap::from([
        ("one".to_string(), 1),
        ("two".to_string(), 2),
        ("three".to_string(), 3),
        ("four".to_string(), 4),
    ])
}

#[test]
fn found_item() {
    let map = string_int_one_through_four();

    for (key, val) in [("one", 1), ("two", 2), ("three", 3), ("four", 4)] {
        let key = key.to_string();
        let cursor = map.find(&key);
        assert_ne!(cursor, map.end());
        assert_eq!(map.entry_at(cursor), Some((key.clone(), val)));
        assert_eq!(map.get(&key), Some(val));
    }
}

#[test]
fn didnt_find_item() {
    let map = string_int_one_through_four();

    assert_eq!(map.find(&"five".to_string()), map.end());
    assert!(!map.contains_key(&"five".to_string()));
}

#[test]
fn erase() {
    let map = SortedConcurrentMap::from([(1, 1), (2, 2), (3, 3), (4, 4)]);

    assert_ne!(map.find(&3), map.end());
    map.erase(&3);
    assert_eq!(map.find(&3), map.end());
}

#[test]
fn overwrite_existing_value_during_insertion() {
    let map = SortedConcurrentMap::from([(1, 1), (2, 2), (3, 3), (4, 4)]);

    assert_eq!(map.get(&1), Some(1));
    map.insert(1, 22);
    assert_eq!(map.get(&1), Some(22));
    assert_eq!(map.len(), 4);
}

#[test]
fn insert_grows_by_one_only_for_new_keys() {
    let map = SortedConcurrentMap::new();

    for i in 0..100u32 {
        let before = map.len();
        map.insert(i % 37, i);
        let expected = if i < 37 { before + 1 } else { before };
        assert_eq!(map.len(), expected);
        assert_eq!(map.get(&(i % 37)), Some(i));
    }
}

#[test]
fn reverse_alphabet_comes_out_sorted() {
    let map = SortedConcurrentMap::with_capacity(26);
    for (i, c) in ('a'..='z').rev().enumerate() {
        map.insert(c.to_string(), 26 - i);
    }

    assert_eq!(map.len(), 26);
    assert!(map.capacity() >= 26);
    assert_eq!(map.entry_at(map.begin()), Some(("a".to_string(), 1)));
    assert_eq!(map.at(25), Ok(26));

    map.insert("a".to_string(), 111);
    assert_eq!(map.value_at(0), 111);
    assert_sorted_unique(&map);
}

#[test]
fn any_permutation_round_trips() {
    for n in [1usize, 2, 3, 10, 257] {
        let mut keys: Vec<usize> = (1..=n).collect();
        fastrand::shuffle(&mut keys);

        let map = SortedConcurrentMap::new();
        for k in keys {
            map.insert(k, k * 2);
        }

        let values: Vec<usize> = map.iter().map(|(_, v)| v).collect();
        let expected: Vec<usize> = (1..=n).map(|k| k * 2).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn random_operations_keep_order() {
    let map = SortedConcurrentMap::new();
    let mut model = std::collections::BTreeMap::new();

    for _ in 0..2_000 {
        let key = fastrand::i32(-50..50);
        if fastrand::bool() {
            let value = fastrand::u64(..);
            map.insert(key, value);
            model.insert(key, value);
        } else {
            let cursor = map.erase(&key);
            if model.remove(&key).is_none() {
                assert_eq!(cursor, Cursor::End);
            }
        }
        assert_sorted_unique(&map);
    }

    let expected: Vec<(i32, u64)> = model.into_iter().collect();
    assert_eq!(map.entries(), expected);
}

#[test]
fn walk_with_cursors() {
    let map = SortedConcurrentMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);

    let guard = map.lock();
    let mut cursor = guard.begin();
    let mut seen = String::new();
    while let Some((_, v)) = guard.entry_at(cursor) {
        seen.push(*v);
        cursor = cursor.next(guard.len());
    }
    assert_eq!(seen, "abc");

    let mut cursor = guard.end();
    let mut seen = String::new();
    while let Some(prev) = cursor.prev(guard.len()) {
        seen.push(*guard.entry_at(prev).unwrap().1);
        cursor = prev;
    }
    assert_eq!(seen, "cba");
}

#[test]
fn equality_ignores_capacity_and_name() {
    let a = SortedConcurrentMap::with_config(MapConfig::new("a").with_capacity(64));
    let b = SortedConcurrentMap::new();
    a.insert(1, "x");
    b.insert(1, "x");

    assert_eq!(a, b);
}
