//! JavaScript Map implementation
//!
//! Keys are unique under SameValueZero: primitives by value (NaN equals
//! NaN, +0 equals -0, 1 equals 1.0), everything else by identity.
//! Iteration follows insertion order.

use std::rc::Rc;

use malachite::Integer;

use crate::runtime::property::OrderedTable;
use crate::value::Value;

/// Hashable projection of a value under SameValueZero
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Undefined,
    Null,
    Bool(bool),
    /// f64 bits with NaN and -0 canonicalised
    Number(u64),
    BigInt(Rc<Integer>),
    String(Rc<str>),
    Symbol(u64),
    /// Allocation address of a reference value
    Ref(usize),
}

impl ValueKey {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Undefined => ValueKey::Undefined,
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Number(Self::number_bits(*i as f64)),
            Value::Float(f) => ValueKey::Number(Self::number_bits(*f)),
            Value::BigInt(n) => ValueKey::BigInt(n.clone()),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Symbol(s) => ValueKey::Symbol(s.id()),
            other => ValueKey::Ref(other.identity().unwrap_or_default()),
        }
    }

    fn number_bits(f: f64) -> u64 {
        if f.is_nan() {
            f64::NAN.to_bits()
        } else if f == 0.0 {
            0.0f64.to_bits()
        } else {
            f.to_bits()
        }
    }
}

/// JavaScript Map
///
/// The original key value is stored next to the mapped value so that
/// iteration can hand it back.
#[derive(Debug, Clone, Default)]
pub struct JSMap {
    table: OrderedTable<ValueKey, (Value, Value)>,
}

impl JSMap {
    pub fn new() -> Self {
        JSMap {
            table: OrderedTable::new(),
        }
    }

    /// `map.size`
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Insert or update an entry; an existing key keeps its position
    pub fn set(&mut self, key: Value, value: Value) {
        let hashed = ValueKey::of(&key);
        if let Some(entry) = self.table.get_mut(&hashed) {
            entry.1 = value;
        } else {
            self.table.insert(hashed, (key, value));
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.table.get(&ValueKey::of(key)).map(|(_, v)| v.clone())
    }

    #[inline]
    pub fn has(&self, key: &Value) -> bool {
        self.table.contains_key(&ValueKey::of(key))
    }

    /// Remove an entry; returns true if it existed
    pub fn delete(&mut self, key: &Value) -> bool {
        self.table.remove(&ValueKey::of(key)).is_some()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> + '_ {
        self.table.values().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(Value, Value)> for JSMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = JSMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::JSObject;

    #[test]
    fn test_set_get_has() {
        let mut map = JSMap::new();
        map.set(Value::string("key1"), Value::string("value1"));
        map.set(Value::string("key2"), Value::string("value2"));

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get(&Value::string("key1")).as_ref().and_then(Value::as_str),
            Some("value1")
        );
        assert!(!map.has(&Value::string("key3")));
        assert!(map.get(&Value::string("key3")).is_none());
    }

    #[test]
    fn test_object_keys_by_identity() {
        let person = Value::object(JSObject::new());
        let twin = Value::object(JSObject::new());

        let mut map = JSMap::new();
        map.set(person.clone(), Value::string("object as key"));

        assert!(map.has(&person));
        assert!(!map.has(&twin));
    }

    #[test]
    fn test_same_value_zero_keys() {
        let mut map = JSMap::new();
        map.set(Value::float(f64::NAN), Value::int(1));
        map.set(Value::float(-0.0), Value::int(2));
        map.set(Value::int(7), Value::int(3));

        assert_eq!(map.get(&Value::float(f64::NAN)).and_then(|v| v.to_i32()), Some(1));
        assert_eq!(map.get(&Value::int(0)).and_then(|v| v.to_i32()), Some(2));
        assert_eq!(map.get(&Value::float(7.0)).and_then(|v| v.to_i32()), Some(3));
        assert!(!map.has(&Value::string("7")));
    }

    #[test]
    fn test_insertion_order() {
        let mut map = JSMap::new();
        map.set(Value::string("a"), Value::int(1));
        map.set(Value::string("b"), Value::int(2));
        map.set(Value::string("a"), Value::int(3));

        let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        assert!(map.delete(&Value::string("a")));
        map.set(Value::string("a"), Value::int(4));
        let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_clear() {
        let mut map: JSMap = [(Value::int(1), Value::int(2))].into_iter().collect();
        assert_eq!(map.len(), 1);
        map.clear();
        assert!(map.is_empty());
    }
}
