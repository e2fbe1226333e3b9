//! Table: concurrent layer wrapping the structural list in a mutex.

use crate::order_list::OrderList;
use core::hash::BuildHasher;
use slotmap::DefaultKey;
use std::collections::hash_map::RandomState;
use std::sync::Mutex;

/// An opaque handle to one table entry, used to step through enumeration
/// order. Backed by a generational id: once the entry is extracted, the
/// cursor resolves to `None` everywhere instead of aliasing a later entry.
///
/// A cursor is only meaningful on the table that produced it. Presenting it
/// to another table yields an unspecified `None` or unrelated entry, never
/// memory unsafety.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor(DefaultKey);

/// A thread-safe table mapping byte-string keys to values, enumerated in
/// insertion order.
///
/// Every operation acquires the table's single internal mutex for the
/// duration of one short critical section; operations on one table are
/// linearizable in lock-acquisition order. Duplicate keys are permitted;
/// `read` and `extract` resolve to the first match in enumeration order.
pub struct Table<V, S = RandomState> {
    inner: Mutex<OrderList<V, S>>,
}

impl<V> Table<V> {
    /// Create an empty table with the default hasher.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(OrderList::new()),
        }
    }
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> Table<V, S>
where
    S: BuildHasher,
{
    /// Create an empty table with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            inner: Mutex::new(OrderList::with_hasher(hasher)),
        }
    }

    // Single scoped acquisition for every operation. The structural layer
    // never runs user code (V::clone, caller closures) while its internals
    // are transiently inconsistent, so a lock poisoned by a panic in user
    // code still guards a sound structure and is safe to reclaim.
    fn with_list<R>(&self, f: impl FnOnce(&mut OrderList<V, S>) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    /// Number of entries currently stored, duplicates included.
    pub fn len(&self) -> usize {
        self.with_list(|l| l.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with_list(|l| l.is_empty())
    }

    /// Append an association at the end of enumeration order. The table takes
    /// ownership of its own key copy. A key already present is NOT rejected:
    /// the table then holds several entries for it, and `read`/`extract`
    /// resolve to the oldest.
    pub fn insert(&self, key: impl Into<Box<[u8]>>, value: V) {
        let key = key.into();
        self.with_list(|l| {
            l.push_back(key, value);
        })
    }

    /// Clone out the value of the first entry matching `key` in enumeration
    /// order, or `None` if no entry matches. Never mutates the table.
    pub fn read(&self, key: &[u8]) -> Option<V>
    where
        V: Clone,
    {
        self.with_list(|l| {
            let k = l.find_first(key)?;
            l.get(k).map(|(_, v)| v.clone())
        })
    }

    /// Borrow the value of the first entry matching `key` under the lock,
    /// without requiring `V: Clone`. `f` must not call back into this table.
    pub fn read_with<R>(&self, key: &[u8], f: impl FnOnce(&V) -> R) -> Option<R> {
        self.with_list(|l| {
            let k = l.find_first(key)?;
            l.get(k).map(|(_, v)| f(v))
        })
    }

    /// Remove the first entry matching `key` in enumeration order and return
    /// its value, passing ownership back to the caller; `None` if no entry
    /// matches. Later entries keep their relative order. If duplicates share
    /// the key, only the oldest is removed.
    pub fn extract(&self, key: &[u8]) -> Option<V> {
        self.with_list(|l| {
            let k = l.find_first(key)?;
            l.remove(k).map(|(_, v)| v)
        })
    }

    /// Cursor to the head of enumeration order, or `None` if the table is
    /// empty. Holds the lock only long enough to capture the cursor.
    pub fn first(&self) -> Option<Cursor> {
        self.with_list(|l| l.head().map(Cursor))
    }

    /// Cursor to the entry following `cursor` in enumeration order; `None`
    /// at the end of the order or if the cursor's entry has been extracted.
    /// Each step is its own lock acquisition, so a concurrent mutation may
    /// end the walk early; use [`Table::snapshot`] for a race-free view.
    pub fn next(&self, cursor: Cursor) -> Option<Cursor> {
        self.with_list(|l| l.next_after(cursor.0).map(Cursor))
    }

    /// Owned copy of the cursor's entry, or `None` if it has been extracted.
    pub fn get(&self, cursor: Cursor) -> Option<(Box<[u8]>, V)>
    where
        V: Clone,
    {
        self.with_list(|l| {
            l.get(cursor.0)
                .map(|(key, v)| (key.to_vec().into(), v.clone()))
        })
    }

    /// Borrow the cursor's key and value under the lock, or `None` if the
    /// entry has been extracted. `f` must not call back into this table.
    pub fn with_entry<R>(&self, cursor: Cursor, f: impl FnOnce(&[u8], &V) -> R) -> Option<R> {
        self.with_list(|l| l.get(cursor.0).map(|(key, v)| f(key, v)))
    }

    /// Copy the whole enumeration, in order, under one lock acquisition. The
    /// returned sequence is immutable and cannot race with later mutation;
    /// this is the recommended enumeration mode.
    pub fn snapshot(&self) -> Vec<(Box<[u8]>, V)>
    where
        V: Clone,
    {
        self.with_list(|l| {
            l.iter()
                .map(|(key, v)| (key.to_vec().into(), v.clone()))
                .collect()
        })
    }
}
