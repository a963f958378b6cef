mod cursor;
pub(crate) mod unlocked;

use std::fmt::{self, Debug};

use derive_more::{Display, Error};
use parking_lot::{Mutex, MutexGuard};

use crate::config::MapConfig;
use crate::lock::MapGuard;

pub use cursor::Cursor;

/// Sorted key-value map safe to share between threads.
///
/// Entries live in one contiguous vector sorted ascending by key, with at most
/// one entry per key. A single mutex guards the vector and every public method
/// holds it for its whole body, so each call is atomic with respect to other
/// calls on the same map. Separate calls are not atomic together: use
/// [`SortedConcurrentMap::lock`] to run several operations under one
/// acquisition.
///
/// Values are returned as owned copies. Positions are returned as [`Cursor`]s
/// which are only valid for the state the map had when they were produced.
pub struct SortedConcurrentMap<K, V> {
    entries: Mutex<Vec<(K, V)>>,
    name: String,
}

impl<K, V> Default for SortedConcurrentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SortedConcurrentMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            name: String::new(),
        }
    }

    /// Creates an empty map able to hold `capacity` entries without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(MapConfig::default().with_capacity(capacity))
    }

    pub fn with_config(config: MapConfig) -> Self {
        tracing::trace!(map = %config.name, capacity = config.capacity, "creating map");
        Self {
            entries: Mutex::new(Vec::with_capacity(config.capacity)),
            name: config.name,
        }
    }

    /// Name given through [`MapConfig`]; empty for anonymous maps.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquires the lock and returns a guard for a batch of operations.
    ///
    /// Blocks until the lock is available. Acquisition order between
    /// contending threads is unspecified.
    pub fn lock(&self) -> MapGuard<'_, K, V> {
        MapGuard::new(self.entries.lock(), &self.name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn reserve(&self, additional: usize) {
        self.lock().reserve(additional)
    }

    pub fn begin(&self) -> Cursor {
        self.lock().begin()
    }

    pub fn end(&self) -> Cursor {
        Cursor::End
    }

    /// Removes the entry at `index` and returns the cursor that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn erase_at(&self, index: usize) -> Cursor {
        self.lock().erase_at(index)
    }

    /// Copy of the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. See [`SortedConcurrentMap::at`]
    /// for the checked variant.
    pub fn value_at(&self, index: usize) -> V
    where
        V: Clone,
    {
        self.lock()[index].clone()
    }

    /// Copy of the value at `index`, or [`MapError::OutOfBounds`].
    pub fn at(&self, index: usize) -> Result<V, MapError>
    where
        V: Clone,
    {
        self.lock().at(index).cloned()
    }

    /// Copy of the entry under `cursor`.
    pub fn entry_at(&self, cursor: Cursor) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.lock()
            .entry_at(cursor)
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Snapshot of all entries in ascending key order.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.lock().clone()
    }

    /// Iterator over a snapshot of the entries. Call `.rev()` on it for
    /// descending order. Later changes to the map are not reflected.
    pub fn iter(&self) -> std::vec::IntoIter<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries().into_iter()
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.lock().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.lock().iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries.into_inner()
    }
}

impl<K: Ord, V> SortedConcurrentMap<K, V> {
    /// Builds a map from unordered entries.
    ///
    /// Entries are inserted one by one, so for duplicate keys the last entry
    /// in `entries` wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        let mut total = 0usize;
        let mut overwritten = 0usize;
        {
            let data = map.entries.get_mut();
            for (key, value) in entries {
                total += 1;
                if let unlocked::Inserted::Replaced { .. } = unlocked::insert(data, key, value) {
                    overwritten += 1;
                }
            }
        }
        tracing::trace!(total, overwritten, "built map from entries");
        map
    }

    /// Cursor of the entry with `key`, or [`Cursor::End`] if there is none.
    pub fn find(&self, key: &K) -> Cursor {
        self.lock().find(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    /// Copy of the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    /// Inserts `value` under `key`, overwriting the existing entry if the key
    /// is already present. Returns the cursor of the written entry.
    pub fn insert(&self, key: K, value: V) -> Cursor {
        self.lock().insert(key, value)
    }

    /// Removes the entry with `key` and returns the cursor that followed it,
    /// or [`Cursor::End`] without changes if the key is absent.
    pub fn erase(&self, key: &K) -> Cursor {
        self.lock().erase(key)
    }

    /// Applies `f` to the value under `key` while holding the lock.
    pub fn update<R, F>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R,
    {
        self.lock().get_mut(key).map(f)
    }
}

/// Locks both maps in address order so that two threads locking the same
/// pair in opposite directions cannot deadlock.
fn lock_pair<'a, T>(
    first: &'a Mutex<T>,
    second: &'a Mutex<T>,
) -> (MutexGuard<'a, T>, MutexGuard<'a, T>) {
    if (first as *const Mutex<T>) < (second as *const Mutex<T>) {
        let a = first.lock();
        let b = second.lock();
        (a, b)
    } else {
        let b = second.lock();
        let a = first.lock();
        (a, b)
    }
}

impl<K: Clone, V: Clone> Clone for SortedConcurrentMap<K, V> {
    /// Deep-copies the entries. The copy gets its own unlocked mutex.
    fn clone(&self) -> Self {
        Self {
            entries: Mutex::new(self.entries.lock().clone()),
            name: self.name.clone(),
        }
    }

    /// Replaces this map's entries with a copy of `source`'s. Both maps keep
    /// their own lock and name.
    fn clone_from(&mut self, source: &Self) {
        self.entries.get_mut().clone_from(&source.entries.lock());
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for SortedConcurrentMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let (a, b) = lock_pair(&self.entries, &other.entries);
        *a == *b
    }
}

impl<K: Eq, V: Eq> Eq for SortedConcurrentMap<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for SortedConcurrentMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_entries(iter)
    }
}

impl<K: Ord, V> From<Vec<(K, V)>> for SortedConcurrentMap<K, V> {
    fn from(entries: Vec<(K, V)>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for SortedConcurrentMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_entries(entries)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SortedConcurrentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock();
        if entries.is_empty() {
            return write!(f, "[ ]");
        }

        write!(f, "[ ")?;
        for (i, (k, v)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        write!(f, " ]")
    }
}

impl<K: Debug, V: Debug> Debug for SortedConcurrentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("SortedConcurrentMap")
            .field("name", &self.name)
            .field("entries", &DebugEntries(entries.as_slice()))
            .finish()
    }
}

struct DebugEntries<'a, K, V>(&'a [(K, V)]);

impl<K: Debug, V: Debug> Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    #[display("index {index} is out of bounds for map of length {len}")]
    OutOfBounds { index: usize, len: usize },
}
