//! JavaScript value representation
//!
//! `Value` is a tagged union over every kind of value the inspector knows
//! how to look at. Primitives are stored inline; aggregates are shared
//! through `Rc` so that two values can refer to the same array or object,
//! and so that an aggregate can contain itself.
//!
//! # Identity
//! Aggregates compare by identity (the `Rc` allocation), primitives by
//! value. `Value::identity` exposes the allocation address used for Map
//! keys and for cycle detection while rendering.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use malachite::Integer;

use crate::runtime::convert;
use crate::runtime::{
    ByteBuffer, Function, JSArray, JSDate, JSMap, JSObject, JSRegExp, JSSet, Promise, Symbol,
};

/// Largest integer a double represents exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Non-enumerable weak collections
///
/// Their contents cannot be listed, so the inspector only ever sees the
/// container itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakKind {
    WeakMap,
    WeakSet,
}

impl WeakKind {
    pub fn name(self) -> &'static str {
        match self {
            WeakKind::WeakMap => "WeakMap",
            WeakKind::WeakSet => "WeakSet",
        }
    }
}

/// High-level JavaScript value type
#[derive(Clone)]
pub enum Value {
    /// No value assigned
    Undefined,
    /// Explicit absence
    Null,
    Bool(bool),
    /// Integral number that fits in 32 bits
    Int(i32),
    /// Any other number, including NaN and the infinities
    Float(f64),
    /// Arbitrary-precision integer (`123n`)
    BigInt(Rc<Integer>),
    String(Rc<str>),
    Symbol(Symbol),
    Array(Rc<RefCell<JSArray>>),
    Object(Rc<RefCell<JSObject>>),
    Map(Rc<RefCell<JSMap>>),
    Set(Rc<RefCell<JSSet>>),
    Function(Rc<Function>),
    Date(Rc<JSDate>),
    RegExp(Rc<JSRegExp>),
    Buffer(Rc<RefCell<ByteBuffer>>),
    Promise(Rc<RefCell<Promise>>),
    Weak(Rc<WeakKind>),
}

impl Value {
    // Constructors for primitive values

    /// Create an undefined value
    #[inline]
    pub const fn undefined() -> Self {
        Value::Undefined
    }

    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create an integer value
    #[inline]
    pub const fn int(val: i32) -> Self {
        Value::Int(val)
    }

    /// Create a number value
    ///
    /// Integral doubles in i32 range are stored as `Int`; everything else
    /// (fractions, large magnitudes, -0, NaN, infinities) stays a `Float`.
    pub fn number(val: f64) -> Self {
        let fits = val.fract() == 0.0
            && val >= i32::MIN as f64
            && val <= i32::MAX as f64
            && !(val == 0.0 && val.is_sign_negative());
        if fits {
            Value::Int(val as i32)
        } else {
            Value::Float(val)
        }
    }

    /// Create a float value without integer normalisation
    #[inline]
    pub const fn float(val: f64) -> Self {
        Value::Float(val)
    }

    /// Create an arbitrary-precision integer
    pub fn bigint(val: impl Into<Integer>) -> Self {
        Value::BigInt(Rc::new(val.into()))
    }

    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a fresh unique symbol
    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    // Constructors for aggregates

    /// Create an array value from its elements
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(JSArray::from_values(values))))
    }

    pub fn from_array(array: JSArray) -> Self {
        Value::Array(Rc::new(RefCell::new(array)))
    }

    pub fn object(object: JSObject) -> Self {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    pub fn map(map: JSMap) -> Self {
        Value::Map(Rc::new(RefCell::new(map)))
    }

    pub fn set(set: JSSet) -> Self {
        Value::Set(Rc::new(RefCell::new(set)))
    }

    pub fn function(func: Function) -> Self {
        Value::Function(Rc::new(func))
    }

    pub fn date(date: JSDate) -> Self {
        Value::Date(Rc::new(date))
    }

    pub fn regexp(regexp: JSRegExp) -> Self {
        Value::RegExp(Rc::new(regexp))
    }

    pub fn buffer(buffer: ByteBuffer) -> Self {
        Value::Buffer(Rc::new(RefCell::new(buffer)))
    }

    pub fn promise(promise: Promise) -> Self {
        Value::Promise(Rc::new(RefCell::new(promise)))
    }

    pub fn weak(kind: WeakKind) -> Self {
        Value::Weak(Rc::new(kind))
    }

    // Type checking

    /// Check if this is undefined
    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if this is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is nullish (null or undefined)
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        self.is_null() || self.is_undefined()
    }

    #[inline]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a number (integer or float)
    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    #[inline]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    pub const fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Check if this is a primitive (not shared by reference)
    #[inline]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Bool(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::BigInt(_)
                | Value::String(_)
                | Value::Symbol(_)
        )
    }

    // Value extraction

    /// Get boolean value, returns None if not a boolean
    #[inline]
    pub const fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get integer value, returns None if not an `Int`
    #[inline]
    pub const fn to_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the numeric value, returns None if not a number
    #[inline]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow string contents, returns None if not a string
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bigint(&self) -> Option<&Integer> {
        match self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&Rc<RefCell<JSArray>>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&Rc<RefCell<JSObject>>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&Rc<Function>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Address of the shared allocation for reference values
    ///
    /// Primitives have no identity and return None.
    pub fn identity(&self) -> Option<usize> {
        fn addr<T: ?Sized>(rc: &Rc<T>) -> usize {
            Rc::as_ptr(rc) as *const () as usize
        }

        match self {
            Value::Array(a) => Some(addr(a)),
            Value::Object(o) => Some(addr(o)),
            Value::Map(m) => Some(addr(m)),
            Value::Set(s) => Some(addr(s)),
            Value::Function(f) => Some(addr(f)),
            Value::Date(d) => Some(addr(d)),
            Value::RegExp(r) => Some(addr(r)),
            Value::Buffer(b) => Some(addr(b)),
            Value::Promise(p) => Some(addr(p)),
            Value::Weak(w) => Some(addr(w)),
            _ => None,
        }
    }

    /// The JavaScript `typeof` answer
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
            // typeof null is "object"
            Value::Null
            | Value::Array(_)
            | Value::Object(_)
            | Value::Map(_)
            | Value::Set(_)
            | Value::Date(_)
            | Value::RegExp(_)
            | Value::Buffer(_)
            | Value::Promise(_)
            | Value::Weak(_) => "object",
        }
    }

    /// Strict equality (`===`)
    ///
    /// NaN is unequal to itself, +0 equals -0, aggregates compare by
    /// identity and symbols by their unique id.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (a, b) if a.is_number() && b.is_number() => a.to_f64() == b.to_f64(),
            (a, b) => match (a.identity(), b.identity()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    /// SameValueZero equality, used for Map keys and Set members
    ///
    /// Same as strict equality except that NaN equals NaN.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self.to_f64(), other.to_f64()) {
            (Some(a), Some(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::undefined()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::number(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::BigInt(Rc::new(n))
    }
}

impl fmt::Debug for Value {
    // Shallow on purpose: aggregates may be cyclic
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::BigInt(n) => write!(f, "BigInt({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Symbol(s) => write!(f, "Symbol({})", s.id()),
            Value::Array(a) => write!(f, "Array(len={})", a.borrow().len()),
            Value::Object(o) => write!(f, "Object(props={})", o.borrow().len()),
            Value::Map(m) => write!(f, "Map(size={})", m.borrow().len()),
            Value::Set(s) => write!(f, "Set(size={})", s.borrow().len()),
            Value::Function(func) => write!(f, "Function({:?})", func.name()),
            Value::Date(d) => write!(f, "Date({})", d.time()),
            Value::RegExp(r) => write!(f, "RegExp({})", r),
            Value::Buffer(b) => write!(f, "Buffer(len={})", b.borrow().len()),
            Value::Promise(_) => write!(f, "Promise"),
            Value::Weak(w) => write!(f, "{}", w.name()),
        }
    }
}

/// The JavaScript `String(value)` conversion
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&convert::to_js_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null() {
        let v = Value::null();
        assert!(v.is_null());
        assert!(!v.is_undefined());
        assert!(!v.is_bool());
        assert!(!v.is_int());
        assert!(v.is_nullish());
    }

    #[test]
    fn test_undefined() {
        let v = Value::undefined();
        assert!(!v.is_null());
        assert!(v.is_undefined());
        assert!(v.is_nullish());
        assert!(Value::default().is_undefined());
    }

    #[test]
    fn test_bool() {
        let t = Value::bool(true);
        let f = Value::bool(false);

        assert!(t.is_bool());
        assert_eq!(t.to_bool(), Some(true));
        assert_eq!(f.to_bool(), Some(false));
        assert_eq!(Value::int(1).to_bool(), None);
    }

    #[test]
    fn test_number_normalisation() {
        assert!(matches!(Value::number(42.0), Value::Int(42)));
        assert!(matches!(Value::number(3.14), Value::Float(_)));
        assert!(matches!(Value::number(-0.0), Value::Float(_)));
        assert!(matches!(Value::number(1e10), Value::Float(_)));
        assert!(matches!(Value::number(f64::NAN), Value::Float(_)));
        assert_eq!(Value::number(-7.0).to_i32(), Some(-7));
    }

    #[test]
    fn test_type_of() {
        assert_eq!(Value::undefined().type_of(), "undefined");
        assert_eq!(Value::null().type_of(), "object");
        assert_eq!(Value::int(42).type_of(), "number");
        assert_eq!(Value::float(f64::NAN).type_of(), "number");
        assert_eq!(Value::bigint(10).type_of(), "bigint");
        assert_eq!(Value::string("s").type_of(), "string");
        assert_eq!(Value::symbol(Some("d")).type_of(), "symbol");
        assert_eq!(Value::array(vec![]).type_of(), "object");
        assert_eq!(
            Value::function(Function::native("f", 0, |_| Value::undefined())).type_of(),
            "function"
        );
    }

    #[test]
    fn test_strict_equals() {
        assert!(Value::int(1).strict_equals(&Value::float(1.0)));
        assert!(!Value::float(f64::NAN).strict_equals(&Value::float(f64::NAN)));
        assert!(Value::float(0.0).strict_equals(&Value::float(-0.0)));
        assert!(Value::string("a").strict_equals(&Value::string("a")));
        assert!(!Value::int(1).strict_equals(&Value::string("1")));
        assert!(Value::bigint(5).strict_equals(&Value::bigint(5)));

        let a = Value::array(vec![Value::int(1)]);
        let b = Value::array(vec![Value::int(1)]);
        assert!(a.strict_equals(&a.clone()));
        assert!(!a.strict_equals(&b));
    }

    #[test]
    fn test_symbols_are_unique() {
        let s1 = Value::symbol(Some("desc"));
        let s2 = Value::symbol(Some("desc"));
        assert!(!s1.strict_equals(&s2));
        assert!(s1.strict_equals(&s1.clone()));
    }

    #[test]
    fn test_same_value_zero() {
        assert!(Value::float(f64::NAN).same_value_zero(&Value::float(f64::NAN)));
        assert!(Value::int(0).same_value_zero(&Value::float(-0.0)));
        assert!(!Value::int(1).same_value_zero(&Value::int(2)));
    }

    #[test]
    fn test_identity() {
        assert_eq!(Value::int(1).identity(), None);
        let obj = Value::object(JSObject::new());
        assert_eq!(obj.identity(), obj.clone().identity());
        assert_ne!(obj.identity(), Value::object(JSObject::new()).identity());
    }

    #[test]
    fn test_debug_is_shallow() {
        assert_eq!(format!("{:?}", Value::null()), "Null");
        assert_eq!(format!("{:?}", Value::int(42)), "Int(42)");
        assert_eq!(format!("{:?}", Value::array(vec![Value::int(1)])), "Array(len=1)");
    }
}
