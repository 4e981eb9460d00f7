//! JavaScript Set implementation
//!
//! A Set keeps the first insertion of each distinct value (SameValueZero)
//! and iterates in that order.

use crate::runtime::map::ValueKey;
use crate::runtime::property::OrderedTable;
use crate::value::Value;

/// JavaScript Set
#[derive(Debug, Clone, Default)]
pub struct JSSet {
    table: OrderedTable<ValueKey, Value>,
}

impl JSSet {
    pub fn new() -> Self {
        JSSet {
            table: OrderedTable::new(),
        }
    }

    /// `set.size`
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Add a value; returns false if it was already present
    pub fn add(&mut self, value: Value) -> bool {
        let key = ValueKey::of(&value);
        if self.table.contains_key(&key) {
            return false;
        }
        self.table.insert(key, value);
        true
    }

    #[inline]
    pub fn has(&self, value: &Value) -> bool {
        self.table.contains_key(&ValueKey::of(value))
    }

    /// Remove a value; returns true if it was present
    pub fn delete(&mut self, value: &Value) -> bool {
        self.table.remove(&ValueKey::of(value)).is_some()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterate over members in first-insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.table.values()
    }

    /// `[...set]`
    pub fn to_vec(&self) -> Vec<Value> {
        self.values().cloned().collect()
    }
}

impl FromIterator<Value> for JSSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = JSSet::new();
        for v in iter {
            set.add(v);
        }
        set
    }
}
