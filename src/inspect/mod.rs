//! Value classification and description
//!
//! `ValueDescriber` answers two questions about any `Value`: which
//! `Category` it belongs to, and how it reads as text. Both are pure:
//! the describer holds only its options, never mutates the value and
//! gives the same answer for the same value every time.
//!
//! # Rendering
//! Aggregates are listed in insertion order with their elements rendered
//! recursively. Two truncation markers keep the output finite:
//! - `[Circular]` for an aggregate already on the path being rendered
//! - `[Array]`, `[Object]`, `[Map]`, `[Set]` past the depth limit

mod category;
mod options;

pub use category::Category;
pub use options::{InspectOptions, DEFAULT_DEPTH, DEFAULT_MAX_ITEMS, MIN_DEPTH};

use tracing::trace;

use crate::util::{is_identifier, number_to_string, quote_js_string};
use crate::value::{Value, MAX_SAFE_INTEGER};

/// Classifies and describes values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueDescriber {
    options: InspectOptions,
}

impl ValueDescriber {
    pub fn new(options: InspectOptions) -> Self {
        ValueDescriber { options }
    }

    #[inline]
    pub fn options(&self) -> InspectOptions {
        self.options
    }

    /// The category of a value
    ///
    /// Numbers that are integral and within the safe integer range are
    /// `Integer` whichever way they are stored.
    pub fn classify(&self, value: &Value) -> Category {
        match value {
            Value::Undefined => Category::Undefined,
            Value::Null => Category::Null,
            Value::Int(_) => Category::Integer,
            Value::Float(f) if f.is_nan() => Category::NaN,
            Value::Float(f) if f.is_infinite() => Category::Infinity,
            Value::Float(f) if is_safe_integer(*f) => Category::Integer,
            Value::Float(_) => Category::Float,
            Value::BigInt(_) => Category::LargeInteger,
            Value::Bool(_) => Category::Boolean,
            Value::String(_) => Category::Text,
            Value::Symbol(_) => Category::UniqueSymbol,
            Value::Array(_) => Category::Sequence,
            Value::Map(_) => Category::KeyedCollection,
            Value::Set(_) => Category::UniqueSet,
            Value::Function(_) => Category::Callable,
            Value::Date(_) => Category::Moment,
            Value::RegExp(_) => Category::Pattern,
            Value::Buffer(_) => Category::ByteBuffer,
            Value::Object(_) => Category::StructuredRecord,
            // Never awaited or enumerated
            Value::Promise(_) | Value::Weak(_) => Category::Unknown,
        }
    }

    /// `"<Category>: <rendering>"`
    pub fn describe(&self, value: &Value) -> String {
        format!("{}: {}", self.classify(value), self.render(value))
    }

    /// The rendering alone, without the category prefix
    ///
    /// Top-level text is returned as is; text nested inside an aggregate
    /// is quoted.
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.to_string(),
            _ => Renderer::new(self.options).render(value, 0),
        }
    }
}

/// `classify` with default options
pub fn classify(value: &Value) -> Category {
    ValueDescriber::default().classify(value)
}

/// `describe` with default options
pub fn describe(value: &Value) -> String {
    ValueDescriber::default().describe(value)
}

/// `render` with default options
pub fn render(value: &Value) -> String {
    ValueDescriber::default().render(value)
}

fn is_safe_integer(f: f64) -> bool {
    f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64
}

fn render_number(f: f64) -> String {
    if f == 0.0 && f.is_sign_negative() {
        "-0".to_string()
    } else {
        number_to_string(f)
    }
}

/// State of one `render` call
struct Renderer {
    depth: usize,
    max_items: usize,
    /// Identities of the aggregates currently being rendered
    path: Vec<usize>,
}

impl Renderer {
    fn new(options: InspectOptions) -> Self {
        Renderer {
            depth: options.effective_depth(),
            max_items: options.max_items,
            path: Vec::new(),
        }
    }

    fn render(&mut self, value: &Value, level: usize) -> String {
        match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => render_number(*f),
            Value::BigInt(n) => format!("{}n", n),
            Value::String(s) => quote_js_string(s),
            Value::Symbol(s) => s.to_string(),
            Value::Function(f) => {
                let mut out = match f.name() {
                    Some(name) => format!("[Function: {}]", name),
                    None => "[Function (anonymous)]".to_string(),
                };
                if let Some(arity) = f.arity() {
                    out.push_str(&format!(" (arity {})", arity));
                }
                out
            }
            Value::Date(d) => d
                .to_iso_string()
                .unwrap_or_else(|| "Invalid Date".to_string()),
            Value::RegExp(r) => r.to_string(),
            Value::Buffer(b) => {
                let b = b.borrow();
                format!(
                    "{}({}) <hex {}> <base64 {}>",
                    b.kind().name(),
                    b.len(),
                    b.to_hex(),
                    b.to_base64()
                )
            }
            Value::Promise(_) | Value::Weak(_) => "[unknown]".to_string(),
            Value::Array(_) | Value::Object(_) | Value::Map(_) | Value::Set(_) => {
                self.render_aggregate(value, level)
            }
        }
    }

    fn render_aggregate(&mut self, value: &Value, level: usize) -> String {
        let id = value.identity().unwrap_or_default();
        if self.path.contains(&id) {
            trace!(nesting = level, "cycle truncated");
            return "[Circular]".to_string();
        }
        if level > self.depth {
            trace!(nesting = level, depth = self.depth, "depth limit reached");
            return match value {
                Value::Array(_) => "[Array]",
                Value::Map(_) => "[Map]",
                Value::Set(_) => "[Set]",
                _ => "[Object]",
            }
            .to_string();
        }

        self.path.push(id);
        let out = match value {
            Value::Array(a) => {
                let a = a.borrow();
                let items = self.items(a.iter(), a.len() as usize, level);
                wrap("", "[", &items, "]")
            }
            Value::Map(m) => {
                let m = m.borrow();
                let mut items = Vec::new();
                for (k, v) in m.iter().take(self.max_items) {
                    let k = self.render(k, level + 1);
                    let v = self.render(v, level + 1);
                    items.push(format!("{} => {}", k, v));
                }
                self.push_remaining(&mut items, m.len());
                wrap(&format!("Map({}) ", m.len()), "{", &items, "}")
            }
            Value::Set(s) => {
                let s = s.borrow();
                let items = self.items(s.values(), s.len(), level);
                wrap(&format!("Set({}) ", s.len()), "{", &items, "}")
            }
            Value::Object(o) => {
                let o = o.borrow();
                let mut items = Vec::new();
                for (k, v) in o.iter().take(self.max_items) {
                    let key = if is_identifier(k) {
                        k.to_string()
                    } else {
                        quote_js_string(k)
                    };
                    items.push(format!("{}: {}", key, self.render(v, level + 1)));
                }
                self.push_remaining(&mut items, o.len());
                let prefix = o.class_name().map(|c| format!("{} ", c)).unwrap_or_default();
                wrap(&prefix, "{", &items, "}")
            }
            _ => String::new(),
        };
        self.path.pop();
        out
    }

    fn items<'a>(
        &mut self,
        values: impl Iterator<Item = &'a Value>,
        len: usize,
        level: usize,
    ) -> Vec<String> {
        let mut items: Vec<String> = values
            .take(self.max_items)
            .map(|v| self.render(v, level + 1))
            .collect();
        self.push_remaining(&mut items, len);
        items
    }

    fn push_remaining(&self, items: &mut Vec<String>, len: usize) {
        let rest = len.saturating_sub(self.max_items);
        match rest {
            0 => {}
            1 => items.push("... 1 more item".to_string()),
            n => items.push(format!("... {} more items", n)),
        }
    }
}

/// `prefix` + `open` + `" a, b "` + `close`, or `prefix` + `open` + `close`
/// when there are no items
fn wrap(prefix: &str, open: &str, items: &[String], close: &str) -> String {
    if items.is_empty() {
        format!("{}{}{}", prefix, open, close)
    } else {
        format!("{}{} {} {}", prefix, open, items.join(", "), close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{
        BufferKind, ByteBuffer, Function, FunctionKind, JSDate, JSMap, JSObject, JSRegExp,
        JSSet, Promise,
    };
    use crate::value::WeakKind;

    fn record(fields: &[(&str, Value)]) -> Value {
        Value::object(JSObject::from_entries(
            fields.iter().map(|(k, v)| (*k, v.clone())),
        ))
    }

    #[test]
    fn test_classify_primitives() {
        assert_eq!(classify(&Value::undefined()), Category::Undefined);
        assert_eq!(classify(&Value::null()), Category::Null);
        assert_eq!(classify(&Value::bool(true)), Category::Boolean);
        assert_eq!(classify(&Value::int(42)), Category::Integer);
        assert_eq!(classify(&Value::float(3.14)), Category::Float);
        assert_eq!(classify(&Value::float(f64::NAN)), Category::NaN);
        assert_eq!(classify(&Value::float(f64::INFINITY)), Category::Infinity);
        assert_eq!(classify(&Value::float(f64::NEG_INFINITY)), Category::Infinity);
        assert_eq!(classify(&Value::bigint(1)), Category::LargeInteger);
        assert_eq!(classify(&Value::string("")), Category::Text);
        assert_eq!(classify(&Value::symbol(None)), Category::UniqueSymbol);
    }

    #[test]
    fn test_classify_integral_floats() {
        assert_eq!(classify(&Value::float(1e10)), Category::Integer);
        assert_eq!(classify(&Value::float(9007199254740991.0)), Category::Integer);
        assert_eq!(classify(&Value::float(9007199254740992.0)), Category::Float);
        assert_eq!(classify(&Value::float(1e300)), Category::Float);
    }

    #[test]
    fn test_classify_aggregates() {
        assert_eq!(classify(&Value::array(vec![])), Category::Sequence);
        assert_eq!(classify(&Value::map(JSMap::new())), Category::KeyedCollection);
        assert_eq!(classify(&Value::set(JSSet::new())), Category::UniqueSet);
        assert_eq!(classify(&Value::object(JSObject::new())), Category::StructuredRecord);
        assert_eq!(
            classify(&Value::function(Function::new(None, None, FunctionKind::Arrow))),
            Category::Callable
        );
        assert_eq!(classify(&Value::date(JSDate::now())), Category::Moment);
        assert_eq!(
            classify(&Value::regexp(JSRegExp::new("a", "g").unwrap())),
            Category::Pattern
        );
        assert_eq!(
            classify(&Value::buffer(ByteBuffer::zeroed(BufferKind::ArrayBuffer, 4))),
            Category::ByteBuffer
        );
        assert_eq!(classify(&Value::promise(Promise::pending())), Category::Unknown);
        assert_eq!(classify(&Value::weak(WeakKind::WeakMap)), Category::Unknown);
    }

    #[test]
    fn test_describe_absence_markers() {
        let null = describe(&Value::null());
        let undefined = describe(&Value::undefined());
        assert_eq!(null, "Null: null");
        assert_eq!(undefined, "Undefined: undefined");
        assert_ne!(null, undefined);
    }

    #[test]
    fn test_describe_numbers() {
        assert_eq!(describe(&Value::int(42)), "Integer: 42");
        assert_eq!(describe(&Value::float(3.14)), "Float: 3.14");
        assert_eq!(describe(&Value::float(f64::NAN)), "NaN: NaN");
        assert_eq!(describe(&Value::float(f64::NEG_INFINITY)), "Infinity: -Infinity");
        assert_eq!(describe(&Value::float(-0.0)), "Integer: -0");
        assert_eq!(describe(&Value::float(1e21)), "Float: 1e+21");
    }

    #[test]
    fn test_describe_text() {
        assert_eq!(describe(&Value::string("Hello, 'JS'")), "Text: Hello, 'JS'");
        assert_eq!(
            render(&Value::array(vec![Value::string("it's")])),
            r"[ 'it\'s' ]"
        );
    }

    #[test]
    fn test_describe_sequence() {
        let arr = Value::array(vec![
            Value::int(1),
            Value::string("two"),
            Value::bool(true),
            Value::null(),
            record(&[("key", Value::string("value"))]),
        ]);
        assert_eq!(
            describe(&arr),
            "Sequence: [ 1, 'two', true, null, { key: 'value' } ]"
        );
        assert_eq!(render(&Value::array(vec![])), "[]");
    }

    #[test]
    fn test_describe_map() {
        let map: JSMap = [
            (Value::string("key1"), Value::string("value1")),
            (Value::int(2), Value::array(vec![Value::int(1)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            describe(&Value::map(map)),
            "KeyedCollection: Map(2) { 'key1' => 'value1', 2 => [ 1 ] }"
        );
        assert_eq!(render(&Value::map(JSMap::new())), "Map(0) {}");
    }

    #[test]
    fn test_describe_set_deduplicates() {
        let set: JSSet = [1, 2, 3, 3, 4, 5, 5].into_iter().map(Value::int).collect();
        assert_eq!(describe(&Value::set(set)), "UniqueSet: Set(5) { 1, 2, 3, 4, 5 }");
    }

    #[test]
    fn test_describe_record() {
        let person = record(&[
            ("name", Value::string("山田太郎")),
            ("age", Value::int(30)),
            ("first-name", Value::string("太郎")),
        ]);
        assert_eq!(
            describe(&person),
            "StructuredRecord: { name: '山田太郎', age: 30, 'first-name': '太郎' }"
        );

        let mut point = JSObject::with_class("Point");
        point.set("x", Value::int(1));
        assert_eq!(render(&Value::object(point)), "Point { x: 1 }");
        assert_eq!(render(&Value::object(JSObject::new())), "{}");
    }

    #[test]
    fn test_describe_callable() {
        let f = Function::new(Some("regularFunction"), Some(2), FunctionKind::Normal);
        assert_eq!(
            describe(&Value::function(f)),
            "Callable: [Function: regularFunction] (arity 2)"
        );
        let anon = Function::new(None, None, FunctionKind::Arrow);
        assert_eq!(render(&Value::function(anon)), "[Function (anonymous)]");
    }

    #[test]
    fn test_describe_moment_and_pattern() {
        let d = JSDate::from_components(2023.0, 11.0, 25.0, 10.0, 30.0, 0.0, 0.0);
        assert_eq!(describe(&Value::date(d)), "Moment: 2023-12-25T10:30:00.000Z");
        assert_eq!(render(&Value::date(JSDate::invalid())), "Invalid Date");

        let re = JSRegExp::new(r"\d+", "g").unwrap();
        assert_eq!(describe(&Value::regexp(re)), r"Pattern: /\d+/g");
    }

    #[test]
    fn test_describe_buffer() {
        let buf = Value::buffer(ByteBuffer::from_str("AB"));
        assert_eq!(describe(&buf), "ByteBuffer: Buffer(2) <hex 4142> <base64 QUI=>");
    }

    #[test]
    fn test_describe_large_integer() {
        let n: malachite::Integer = "1234567890123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            describe(&Value::bigint(n)),
            "LargeInteger: 1234567890123456789012345678901234567890n"
        );
    }

    #[test]
    fn test_describe_unknown() {
        assert_eq!(describe(&Value::promise(Promise::pending())), "Unknown: [unknown]");
        assert_eq!(describe(&Value::weak(WeakKind::WeakSet)), "Unknown: [unknown]");
    }

    #[test]
    fn test_self_reference_is_circular() {
        let obj = record(&[("name", Value::string("loop"))]);
        if let Value::Object(o) = &obj {
            o.borrow_mut().set("self", obj.clone());
        }
        assert_eq!(
            describe(&obj),
            "StructuredRecord: { name: 'loop', self: [Circular] }"
        );
    }

    #[test]
    fn test_self_containing_array() {
        let arr = Value::array(vec![Value::int(1)]);
        if let Value::Array(a) = &arr {
            a.borrow_mut().push(arr.clone());
        }
        assert_eq!(render(&arr), "[ 1, [Circular] ]");
    }

    #[test]
    fn test_shared_reference_is_not_circular() {
        let shared = Value::array(vec![Value::int(1)]);
        let pair = Value::array(vec![shared.clone(), shared]);
        assert_eq!(render(&pair), "[ [ 1 ], [ 1 ] ]");
    }

    #[test]
    fn test_depth_limit() {
        let inner = record(&[("d", Value::int(1))]);
        let c = record(&[("c", inner)]);
        let b = record(&[("b", c)]);
        let a = record(&[("a", b)]);
        assert_eq!(render(&a), "{ a: { b: { c: [Object] } } }");

        let deep = ValueDescriber::new(InspectOptions::new().with_depth(3));
        assert_eq!(deep.render(&a), "{ a: { b: { c: { d: 1 } } } }");

        // Depth below the minimum is raised to it
        let shallow = ValueDescriber::new(InspectOptions::new().with_depth(0));
        assert_eq!(shallow.render(&a), render(&a));
    }

    #[test]
    fn test_depth_markers_by_kind() {
        let nest = |v: Value| Value::array(vec![Value::array(vec![Value::array(vec![v])])]);
        assert_eq!(render(&nest(Value::array(vec![]))), "[ [ [ [Array] ] ] ]");
        assert_eq!(render(&nest(Value::map(JSMap::new()))), "[ [ [ [Map] ] ] ]");
        assert_eq!(render(&nest(Value::set(JSSet::new()))), "[ [ [ [Set] ] ] ]");
    }

    #[test]
    fn test_max_items() {
        let describer = ValueDescriber::new(InspectOptions::new().with_max_items(2));
        let arr = Value::array((1..=5).map(Value::int).collect());
        assert_eq!(describer.render(&arr), "[ 1, 2, ... 3 more items ]");

        let set: JSSet = (1..=3).map(Value::int).collect();
        assert_eq!(describer.render(&Value::set(set)), "Set(3) { 1, 2, ... 1 more item }");
    }

    #[test]
    fn test_idempotent() {
        let obj = record(&[
            ("list", Value::array(vec![Value::int(1), Value::float(0.5)])),
            ("when", Value::date(JSDate::from_time(0.0))),
        ]);
        assert_eq!(describe(&obj), describe(&obj));
        assert_eq!(classify(&obj), classify(&obj));
    }
}
