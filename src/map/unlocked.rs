//! Operations over the raw entry vector.
//!
//! Everything here assumes the caller already has exclusive access to the
//! entries, either through the map's lock or through `&mut` ownership.

/// Returns the first index whose key is not less than `key`.
///
/// The result is in `0..=entries.len()`. Entries must be sorted by key.
pub fn lower_bound<K: Ord, V>(entries: &[(K, V)], key: &K) -> usize {
    let mut low = 0;
    let mut high = entries.len();

    while low < high {
        let mid = low + (high - low) / 2;
        if entries[mid].0 < *key {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    low
}

/// Index of the entry with `key`, if any.
pub fn find<K: Ord, V>(entries: &[(K, V)], key: &K) -> Option<usize> {
    let index = lower_bound(entries, key);
    match entries.get(index) {
        Some((k, _)) if k == key => Some(index),
        _ => None,
    }
}

/// Result of [`insert`].
#[derive(Debug, PartialEq, Eq)]
pub enum Inserted<V> {
    /// A new entry was placed at this index.
    New(usize),
    /// The key was present: key and value were overwritten in place.
    Replaced { index: usize, old: V },
}

/// Places `(key, value)` at its sorted position, overwriting an equal key.
pub fn insert<K: Ord, V>(entries: &mut Vec<(K, V)>, key: K, value: V) -> Inserted<V> {
    let index = lower_bound(entries, &key);

    if let Some(entry) = entries.get_mut(index) {
        if entry.0 == key {
            let (_, old) = std::mem::replace(entry, (key, value));
            return Inserted::Replaced { index, old };
        }
    }

    entries.insert(index, (key, value));
    Inserted::New(index)
}

/// Removes the entry with `key`, returning its former index and value.
pub fn remove<K: Ord, V>(entries: &mut Vec<(K, V)>, key: &K) -> Option<(usize, V)> {
    let index = find(entries, key)?;
    let (_, value) = entries.remove(index);
    Some((index, value))
}

/// Whether `entries` is strictly ascending by key.
#[cfg(test)]
pub fn is_sorted<K: Ord, V>(entries: &[(K, V)]) -> bool {
    entries.windows(2).all(|pair| pair[0].0 < pair[1].0)
}
