use crate::util::clamp;

/// Logical position inside a [`SortedConcurrentMap`].
///
/// A [`Cursor`] is a plain index, it does not borrow the map. It is only
/// meaningful for the state the map had when the cursor was produced: once the
/// lock is released, another thread may insert or erase entries and the same
/// cursor can point at a different entry or past the end. Callers that need a
/// cursor to stay valid across several operations must do all of them through
/// one [`MapGuard`].
///
/// [`SortedConcurrentMap`]: crate::SortedConcurrentMap
/// [`MapGuard`]: crate::lock::MapGuard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Entry at the given index.
    At(usize),
    /// One past the last entry. Also returned when a key is not found.
    End,
}

impl Cursor {
    /// Builds a cursor for `index` in a sequence of `len` entries.
    pub(crate) fn from_index(index: usize, len: usize) -> Self {
        if index < len {
            Cursor::At(index)
        } else {
            Cursor::End
        }
    }

    /// First position of a sequence of `len` entries.
    pub fn first(len: usize) -> Self {
        Self::from_index(0, len)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Cursor::End)
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Cursor::At(index) => Some(*index),
            Cursor::End => None,
        }
    }

    /// Steps one entry forward. Stepping past the last entry, or from a stale
    /// index beyond `len`, yields [`Cursor::End`].
    pub fn next(self, len: usize) -> Self {
        match self {
            Cursor::At(index) => Self::from_index(clamp(index.saturating_add(1), 0, len), len),
            Cursor::End => Cursor::End,
        }
    }

    /// Steps one entry backward. Returns `None` when there is no entry before
    /// this position.
    pub fn prev(self, len: usize) -> Option<Self> {
        let index = match self {
            Cursor::At(index) => clamp(index, 0, len),
            Cursor::End => len,
        };
        index.checked_sub(1).map(Cursor::At)
    }
}
