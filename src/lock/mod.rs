use std::ops::{Index, IndexMut};

use parking_lot::MutexGuard;

use crate::map::unlocked::{self, Inserted};
use crate::map::{Cursor, MapError};

/// RAII guard that holds a [`SortedConcurrentMap`] lock for a batch of
/// operations.
///
/// The lock is released when the [`MapGuard`] is [`Drop`]ped, including on
/// unwind, or explicitly with [`MapGuard::unlock`]. Every operation done
/// through one guard sees the same state, so sequences such as
/// find-then-erase are atomic. Borrowed results cannot outlive the guard.
///
/// Calling any method of the same map while a guard is alive on the current
/// thread deadlocks.
///
/// [`SortedConcurrentMap`]: crate::SortedConcurrentMap
pub struct MapGuard<'a, K, V> {
    entries: MutexGuard<'a, Vec<(K, V)>>,
    name: &'a str,
}

impl<'a, K, V> MapGuard<'a, K, V> {
    pub(crate) fn new(entries: MutexGuard<'a, Vec<(K, V)>>, name: &'a str) -> Self {
        Self { entries, name }
    }

    /// Explicitly unlocks the map before the [`MapGuard`] is [`Drop`]ped.
    pub fn unlock(self) {
        drop(self.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        let before = self.entries.capacity();
        self.entries.reserve(additional);
        if self.entries.capacity() != before {
            tracing::trace!(
                map = self.name,
                from = before,
                to = self.entries.capacity(),
                "grew reserved capacity"
            );
        }
    }

    pub fn begin(&self) -> Cursor {
        Cursor::first(self.entries.len())
    }

    pub fn end(&self) -> Cursor {
        Cursor::End
    }

    /// Entry under `cursor`, or `None` for [`Cursor::End`] and stale
    /// positions.
    pub fn entry_at(&self, cursor: Cursor) -> Option<(&K, &V)> {
        let index = cursor.index()?;
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    /// Bounds-checked access to the value at `index`.
    pub fn at(&self, index: usize) -> Result<&V, MapError> {
        self.entries
            .get(index)
            .map(|(_, v)| v)
            .ok_or(MapError::OutOfBounds {
                index,
                len: self.entries.len(),
            })
    }

    /// Removes the entry at `index` and returns the cursor that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn erase_at(&mut self, index: usize) -> Cursor {
        self.entries.remove(index);
        Cursor::from_index(index, self.entries.len())
    }

    /// Live iterator over entries in ascending key order. Use `.rev()` for
    /// descending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K: Ord, V> MapGuard<'_, K, V> {
    pub fn find(&self, key: &K) -> Cursor {
        match unlocked::find(self.entries.as_slice(), key) {
            Some(index) => Cursor::At(index),
            None => Cursor::End,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        unlocked::find(self.entries.as_slice(), key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        unlocked::find(self.entries.as_slice(), key).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        unlocked::find(self.entries.as_slice(), key).map(|index| &mut self.entries[index].1)
    }

    /// Inserts `value` under `key`, overwriting the entry if the key is
    /// already present. Returns the cursor of the written entry.
    pub fn insert(&mut self, key: K, value: V) -> Cursor {
        match unlocked::insert(&mut *self.entries, key, value) {
            Inserted::New(index) => Cursor::At(index),
            Inserted::Replaced { index, .. } => {
                tracing::debug!(map = self.name, index, "overwrote existing key");
                Cursor::At(index)
            }
        }
    }

    /// Removes the entry with `key` and returns the cursor that followed it.
    /// Returns [`Cursor::End`] without changes when the key is absent.
    pub fn erase(&mut self, key: &K) -> Cursor {
        match unlocked::remove(&mut *self.entries, key) {
            Some((index, _)) => Cursor::from_index(index, self.entries.len()),
            None => Cursor::End,
        }
    }

    /// Removes the entry with `key` and returns its value.
    pub fn take(&mut self, key: &K) -> Option<V> {
        unlocked::remove(&mut *self.entries, key).map(|(_, value)| value)
    }
}

impl<K, V> Index<usize> for MapGuard<'_, K, V> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index].1
    }
}

impl<K, V> IndexMut<usize> for MapGuard<'_, K, V> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index].1
    }
}
