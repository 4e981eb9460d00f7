//! JavaScript Array implementation
//!
//! Arrays use "no-hole" semantics: every index from 0 to length-1 holds a
//! value (no sparse arrays). Growing past the end fills with undefined.

use crate::runtime::convert;
use crate::value::Value;

/// Maximum array length (2^30 - 1)
pub const MAX_ARRAY_LENGTH: u32 = (1 << 30) - 1;

/// JavaScript Array
///
/// Dense storage; the logical length is always `elements.len()`.
#[derive(Debug, Clone, Default)]
pub struct JSArray {
    elements: Vec<Value>,
}

impl JSArray {
    /// Create a new empty array
    pub fn new() -> Self {
        JSArray {
            elements: Vec::new(),
        }
    }

    /// Create an array with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        JSArray {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Create an array with specified length, filled with undefined
    pub fn with_length(length: u32) -> Self {
        let len = length.min(MAX_ARRAY_LENGTH);
        JSArray {
            elements: vec![Value::undefined(); len as usize],
        }
    }

    /// Create an array from a vector of values
    pub fn from_values(mut values: Vec<Value>) -> Self {
        values.truncate(MAX_ARRAY_LENGTH as usize);
        JSArray { elements: values }
    }

    /// Get the array length
    #[inline]
    pub fn len(&self) -> u32 {
        self.elements.len() as u32
    }

    /// Check if the array is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element at the specified index
    #[inline]
    pub fn get(&self, index: u32) -> Option<Value> {
        self.elements.get(index as usize).cloned()
    }

    /// Set an element at the specified index
    ///
    /// If index >= length, the array is extended with undefined values.
    pub fn set(&mut self, index: u32, value: Value) -> bool {
        if index >= MAX_ARRAY_LENGTH {
            return false;
        }

        let index = index as usize;
        if index >= self.elements.len() {
            self.elements.resize(index + 1, Value::undefined());
        }
        self.elements[index] = value;
        true
    }

    /// Push a value onto the end of the array
    ///
    /// Returns the new length, like `Array.prototype.push`.
    pub fn push(&mut self, value: Value) -> Option<u32> {
        if self.len() >= MAX_ARRAY_LENGTH {
            return None;
        }
        self.elements.push(value);
        Some(self.len())
    }

    /// Pop a value from the end of the array
    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        self.elements.pop()
    }

    /// Shift a value from the beginning of the array
    pub fn shift(&mut self) -> Option<Value> {
        if self.elements.is_empty() {
            return None;
        }
        Some(self.elements.remove(0))
    }

    /// Unshift values onto the beginning of the array
    ///
    /// Returns the new length.
    pub fn unshift(&mut self, values: &[Value]) -> Option<u32> {
        let new_len = self.elements.len() + values.len();
        if new_len > MAX_ARRAY_LENGTH as usize {
            return None;
        }

        self.elements.splice(0..0, values.iter().cloned());
        Some(self.len())
    }

    /// Set the length of the array
    ///
    /// If length is greater than current, extends with undefined.
    /// If length is less than current, truncates.
    pub fn set_length(&mut self, length: u32) {
        let length = length.min(MAX_ARRAY_LENGTH) as usize;
        self.elements.resize(length, Value::undefined());
    }

    /// Normalize a relative index (negative counts from the end)
    fn clamp_index(&self, index: i32) -> usize {
        let len = self.elements.len() as i64;
        let index = index as i64;
        let clamped = if index < 0 {
            (len + index).max(0)
        } else {
            index.min(len)
        };
        clamped as usize
    }

    /// Get a slice of the array
    pub fn slice(&self, start: i32, end: i32) -> JSArray {
        let start = self.clamp_index(start);
        let end = self.clamp_index(end);

        if start >= end {
            return JSArray::new();
        }

        JSArray::from_values(self.elements[start..end].to_vec())
    }

    /// Splice the array (remove and/or insert elements)
    ///
    /// Returns the removed elements.
    pub fn splice(&mut self, start: i32, delete_count: u32, items: &[Value]) -> JSArray {
        let start = self.clamp_index(start);
        let delete_count = (delete_count as usize).min(self.elements.len() - start);

        let new_len = self.elements.len() - delete_count + items.len();
        if new_len > MAX_ARRAY_LENGTH as usize {
            return JSArray::new();
        }

        let removed: Vec<Value> = self
            .elements
            .splice(start..start + delete_count, items.iter().cloned())
            .collect();
        JSArray::from_values(removed)
    }

    /// Reverse the array in place
    pub fn reverse(&mut self) {
        self.elements.reverse();
    }

    /// Concatenate with another array
    pub fn concat(&self, other: &JSArray) -> Option<JSArray> {
        let new_len = self.elements.len() + other.elements.len();
        if new_len > MAX_ARRAY_LENGTH as usize {
            return None;
        }

        let mut result = Vec::with_capacity(new_len);
        result.extend_from_slice(&self.elements);
        result.extend_from_slice(&other.elements);
        Some(JSArray::from_values(result))
    }

    /// Get an iterator over the elements
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.elements.iter()
    }

    /// Borrow the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    /// Get index of a value (using strict equality)
    pub fn index_of(&self, value: &Value, from_index: u32) -> Option<u32> {
        self.elements
            .iter()
            .enumerate()
            .skip(from_index as usize)
            .find(|(_, v)| v.strict_equals(value))
            .map(|(i, _)| i as u32)
    }

    /// Get last index of a value (using strict equality)
    pub fn last_index_of(&self, value: &Value, from_index: u32) -> Option<u32> {
        if self.elements.is_empty() {
            return None;
        }

        let start = (from_index as usize).min(self.elements.len() - 1);
        (0..=start)
            .rev()
            .find(|&i| self.elements[i].strict_equals(value))
            .map(|i| i as u32)
    }

    /// Check if array includes a value (SameValueZero, so NaN is found)
    pub fn includes(&self, value: &Value, from_index: u32) -> bool {
        self.elements
            .iter()
            .skip(from_index as usize)
            .any(|v| v.same_value_zero(value))
    }

    /// Join the elements' string forms with a separator
    ///
    /// null and undefined elements become empty strings.
    pub fn join(&self, separator: &str) -> String {
        convert::join_values(&self.elements, separator)
    }

    /// Keep elements for which the predicate holds
    pub fn filter(&self, mut predicate: impl FnMut(&Value) -> bool) -> JSArray {
        JSArray::from_values(self.elements.iter().filter(|v| predicate(v)).cloned().collect())
    }

    /// Map every element through a function
    pub fn map(&self, f: impl FnMut(&Value) -> Value) -> JSArray {
        JSArray::from_values(self.elements.iter().map(f).collect())
    }
}

impl FromIterator<Value> for JSArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        JSArray::from_values(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i32]) -> JSArray {
        values.iter().copied().map(Value::int).collect()
    }

    fn to_ints(arr: &JSArray) -> Vec<i32> {
        arr.iter().filter_map(Value::to_i32).collect()
    }

    #[test]
    fn test_new() {
        let arr = JSArray::new();
        assert!(arr.is_empty());
        assert_eq!(arr.len(), 0);
    }

    #[test]
    fn test_with_length() {
        let arr = JSArray::with_length(5);
        assert_eq!(arr.len(), 5);
        assert!(arr.get(0).unwrap().is_undefined());
    }

    #[test]
    fn test_push_pop() {
        let mut arr = ints(&[1, 2, 3, 4, 5]);

        assert_eq!(arr.push(Value::int(6)), Some(6));
        assert_eq!(arr.pop().and_then(|v| v.to_i32()), Some(6));
        assert_eq!(arr.len(), 5);
    }

    #[test]
    fn test_get_set() {
        let mut arr = JSArray::new();

        arr.set(0, Value::int(10));
        arr.set(2, Value::int(30));

        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(0).and_then(|v| v.to_i32()), Some(10));
        assert!(arr.get(1).unwrap().is_undefined());
        assert_eq!(arr.get(2).and_then(|v| v.to_i32()), Some(30));
        assert!(arr.get(3).is_none());
    }

    #[test]
    fn test_shift_unshift() {
        let mut arr = ints(&[1, 2, 3, 4, 5]);

        assert_eq!(arr.unshift(&[Value::int(0)]), Some(6));
        assert_eq!(to_ints(&arr), vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(arr.shift().and_then(|v| v.to_i32()), Some(0));
        assert_eq!(to_ints(&arr), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_slice() {
        let arr = ints(&[0, 1, 2, 3, 4]);

        assert_eq!(to_ints(&arr.slice(1, 3)), vec![1, 2]);
        assert_eq!(to_ints(&arr.slice(-2, -1)), vec![3]);
        assert!(arr.slice(3, 1).is_empty());
        assert_eq!(to_ints(&arr.slice(2, 100)), vec![2, 3, 4]);
    }

    #[test]
    fn test_splice() {
        let mut arr = ints(&[0, 1, 2, 3]);

        let removed = arr.splice(1, 2, &[Value::int(10), Value::int(20), Value::int(30)]);

        assert_eq!(to_ints(&removed), vec![1, 2]);
        assert_eq!(to_ints(&arr), vec![0, 10, 20, 30, 3]);
    }

    #[test]
    fn test_reverse() {
        let mut arr = ints(&[1, 2, 3]);
        arr.reverse();
        assert_eq!(to_ints(&arr), vec![3, 2, 1]);
    }

    #[test]
    fn test_concat() {
        let result = ints(&[1, 2, 3, 4, 5]).concat(&ints(&[6, 7, 8])).unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(result.join(","), "1,2,3,4,5,6,7,8");
    }

    #[test]
    fn test_index_of() {
        let arr = ints(&[1, 2, 3, 2]);

        assert_eq!(arr.index_of(&Value::int(2), 0), Some(1));
        assert_eq!(arr.index_of(&Value::int(2), 2), Some(3));
        assert_eq!(arr.index_of(&Value::int(5), 0), None);

        assert_eq!(arr.last_index_of(&Value::int(2), 3), Some(3));
        assert_eq!(arr.last_index_of(&Value::int(2), 2), Some(1));
    }

    #[test]
    fn test_includes_finds_nan() {
        let arr = JSArray::from_values(vec![Value::float(f64::NAN)]);
        assert!(arr.includes(&Value::float(f64::NAN), 0));
        assert_eq!(arr.index_of(&Value::float(f64::NAN), 0), None);
    }

    #[test]
    fn test_join() {
        let arr = JSArray::from_values(vec![
            Value::int(1),
            Value::null(),
            Value::string("x"),
            Value::undefined(),
        ]);
        assert_eq!(arr.join(","), "1,,x,");
        assert_eq!(JSArray::new().join(","), "");
    }

    #[test]
    fn test_filter_map_chain() {
        let names: JSArray = ["Alice", "Bob", "Charlie", "Dave"]
            .into_iter()
            .map(Value::string)
            .collect();

        let result = names
            .filter(|v| v.as_str().is_some_and(|s| s.len() > 3))
            .map(|v| Value::string(v.as_str().unwrap_or_default().to_uppercase()));

        assert_eq!(result.join(","), "ALICE,CHARLIE,DAVE");
    }

    #[test]
    fn test_set_length() {
        let mut arr = ints(&[1, 2, 3]);

        arr.set_length(5);
        assert_eq!(arr.len(), 5);
        assert!(arr.get(3).unwrap().is_undefined());

        arr.set_length(1);
        assert_eq!(to_ints(&arr), vec![1]);
    }
}
