//! OrderList: structural layer with slotmap storage, insertion-order links,
//! and a byte-key index.

use core::hash::BuildHasher;
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

#[derive(Debug)]
struct Entry<V> {
    key: Box<[u8]>,
    value: V,
    hash: u64,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// One index slot per distinct key. `ids` holds the entries sharing the key
/// in enumeration order, so `ids[0]` is the first match and stays nonempty
/// for as long as the slot exists.
struct KeySlot {
    hash: u64,
    ids: Vec<DefaultKey>,
}

pub(crate) struct OrderList<V, S = RandomState> {
    hasher: S,
    index: HashTable<KeySlot>,
    slots: SlotMap<DefaultKey, Entry<V>>, // storage using generational keys
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<V> OrderList<V> {
    pub(crate) fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<V, S> OrderList<V, S>
where
    S: BuildHasher,
{
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    fn make_hash(&self, key: &[u8]) -> u64 {
        self.hasher.hash_one(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append at the tail of enumeration order. Duplicate keys are accepted;
    /// the new entry is indexed after the existing ones for that key.
    pub(crate) fn push_back(&mut self, key: Box<[u8]>, value: V) -> DefaultKey {
        let hash = self.make_hash(&key);
        let entry = Entry {
            key,
            value,
            hash,
            prev: self.tail,
            next: None,
        };
        let k = match self.index.entry(
            hash,
            |ks| {
                self.slots
                    .get(ks.ids[0])
                    .map(|e| e.key == entry.key)
                    .unwrap_or(false)
            },
            |ks| ks.hash,
        ) {
            hashbrown::hash_table::Entry::Occupied(mut occ) => {
                let k = self.slots.insert(entry);
                occ.get_mut().ids.push(k);
                k
            }
            hashbrown::hash_table::Entry::Vacant(v) => {
                let k = self.slots.insert(entry);
                v.insert(KeySlot { hash, ids: vec![k] });
                k
            }
        };
        match self.tail {
            Some(t) => self.slots[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        k
    }

    /// First entry matching `key` in enumeration order.
    pub(crate) fn find_first(&self, key: &[u8]) -> Option<DefaultKey> {
        let hash = self.make_hash(key);
        self.index
            .find(hash, |ks| {
                self.slots
                    .get(ks.ids[0])
                    .map(|e| &*e.key == key)
                    .unwrap_or(false)
            })
            .map(|ks| ks.ids[0])
    }

    /// Unlink and return an entry. A stale id (already removed) yields None
    /// thanks to the slotmap's generational keys.
    pub(crate) fn remove(&mut self, k: DefaultKey) -> Option<(Box<[u8]>, V)> {
        let entry = self.slots.remove(k)?;
        match entry.prev {
            Some(p) => self.slots[p].next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(n) => self.slots[n].prev = entry.prev,
            None => self.tail = entry.prev,
        }
        match self.index.find_entry(entry.hash, |ks| ks.ids.contains(&k)) {
            Ok(mut occ) => {
                occ.get_mut().ids.retain(|&id| id != k);
                if occ.get().ids.is_empty() {
                    occ.remove();
                }
            }
            Err(_) => unreachable!("key index out of sync with entry storage"),
        }
        Some((entry.key, entry.value))
    }

    pub(crate) fn head(&self) -> Option<DefaultKey> {
        self.head
    }

    pub(crate) fn next_after(&self, k: DefaultKey) -> Option<DefaultKey> {
        self.slots.get(k)?.next
    }

    pub(crate) fn get(&self, k: DefaultKey) -> Option<(&[u8], &V)> {
        self.slots.get(k).map(|e| (&*e.key, &e.value))
    }

    pub(crate) fn iter(&self) -> OrderIter<'_, V, S> {
        OrderIter {
            list: self,
            cur: self.head,
        }
    }
}

/// In-order iterator over the structural layer.
pub(crate) struct OrderIter<'a, V, S> {
    list: &'a OrderList<V, S>,
    cur: Option<DefaultKey>,
}

impl<'a, V, S> Iterator for OrderIter<'a, V, S> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = self.list.slots.get(k)?;
        self.cur = e.next;
        Some((&e.key, &e.value))
    }
}
