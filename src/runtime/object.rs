//! JavaScript object representation
//!
//! A plain object is a named-field aggregate: an optional class name (for
//! instances such as `Person { ... }`) and an insertion-ordered property
//! table.

use std::rc::Rc;

use crate::runtime::property::PropertyTable;
use crate::value::Value;

/// JavaScript object
#[derive(Debug, Clone, Default)]
pub struct JSObject {
    /// Constructor name shown when inspecting (None for plain objects)
    class_name: Option<Rc<str>>,
    /// Own properties in insertion order
    props: PropertyTable,
}

impl JSObject {
    /// Create a new plain object
    pub fn new() -> Self {
        JSObject {
            class_name: None,
            props: PropertyTable::new(),
        }
    }

    /// Create an instance object of a named class
    pub fn with_class(name: &str) -> Self {
        JSObject {
            class_name: Some(Rc::from(name)),
            props: PropertyTable::new(),
        }
    }

    /// Create a plain object from `(key, value)` pairs
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<Rc<str>>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut obj = JSObject::new();
        for (k, v) in entries {
            obj.set(k, v);
        }
        obj
    }

    #[inline]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Get the number of own properties
    #[inline]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<Value> {
        self.props.get(key).cloned()
    }

    /// Set a property; returns true if the property is new
    pub fn set(&mut self, key: impl Into<Rc<str>>, value: Value) -> bool {
        self.props.insert(key.into(), value).is_none()
    }

    /// Delete a property; returns true if it existed
    pub fn delete(&mut self, key: &str) -> bool {
        self.props.remove(key).is_some()
    }

    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Iterate over own properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.props.iter().map(|(k, v)| (&**k, v))
    }

    /// `Object.keys`
    pub fn keys(&self) -> Vec<Value> {
        self.props.keys().map(|k| Value::String(k.clone())).collect()
    }

    /// `Object.values`
    pub fn values(&self) -> Vec<Value> {
        self.props.values().cloned().collect()
    }

    /// `Object.entries`: each entry is a `[key, value]` array
    pub fn entries(&self) -> Vec<Value> {
        self.props
            .iter()
            .map(|(k, v)| Value::array(vec![Value::String(k.clone()), v.clone()]))
            .collect()
    }

    /// Copy every own property of `other` onto this object (`{...other}`)
    ///
    /// Existing keys keep their position and take the new value.
    pub fn extend(&mut self, other: &JSObject) {
        for (k, v) in other.props.iter() {
            self.props.insert(k.clone(), v.clone());
        }
    }
}
