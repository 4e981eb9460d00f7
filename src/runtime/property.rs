//! Ordered property storage
//!
//! Objects, Maps and Sets all iterate in insertion order, so their storage
//! is a slot vector (insertion order) plus a hash index from key to slot.
//! Deleting leaves a hole that iteration skips; the slots are compacted
//! once holes outnumber live entries.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use crate::value::Value;

/// Insertion-ordered hash table
#[derive(Debug, Clone)]
pub struct OrderedTable<K, V> {
    /// Entries in insertion order (None = deleted)
    slots: Vec<Option<(K, V)>>,
    /// Key to slot index
    index: HashMap<K, usize>,
    /// Number of live entries
    live: usize,
}

/// Property table of a plain object
pub type PropertyTable = OrderedTable<Rc<str>, Value>;

impl<K: Hash + Eq + Clone, V> OrderedTable<K, V> {
    /// Minimum slot count before deleted holes are compacted
    const MIN_COMPACT_SIZE: usize = 8;

    /// Create a new empty table
    pub fn new() -> Self {
        OrderedTable {
            slots: Vec::new(),
            index: HashMap::new(),
            live: 0,
        }
    }

    /// Create a table with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedTable {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            live: 0,
        }
    }

    /// Get the number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if the table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Find the slot holding a key
    #[inline]
    pub fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Check if a key is present
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Get the value stored under a key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(key)?;
        self.slots[slot].as_ref().map(|(_, v)| v)
    }

    /// Get a mutable reference to the value stored under a key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(key)?;
        self.slots[slot].as_mut().map(|(_, v)| v)
    }

    /// Insert or update an entry
    ///
    /// An update keeps the entry's original position and returns the old
    /// value; a new key is appended.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.find(&key) {
            if let Some((_, v)) = self.slots[slot].as_mut() {
                return Some(std::mem::replace(v, value));
            }
        }

        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
        self.live += 1;
        None
    }

    /// Remove an entry, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        let (_, value) = self.slots[slot].take()?;
        self.live -= 1;

        if self.slots.len() >= Self::MIN_COMPACT_SIZE && self.live * 2 < self.slots.len() {
            self.compact();
        }

        Some(value)
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.live = 0;
    }

    /// Iterate over live entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Drop deleted slots and rebuild the index
    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some((k, _)) = slot {
                self.index.insert(k.clone(), i);
            }
        }
    }
}

impl<K: Hash + Eq + Clone, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = OrderedTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
