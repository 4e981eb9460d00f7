//! Demonstration tour
//!
//! Walks through the JavaScript built-in types one section at a time,
//! building example values with the runtime and printing each through a
//! `ValueDescriber`. Used by `jsinspect --tour`.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::inspect::ValueDescriber;
use crate::runtime::convert::{parse_float, parse_int, to_boolean, to_js_string, to_number};
use crate::runtime::{
    BufferKind, ByteBuffer, Function, FunctionKind, JSArray, JSDate, JSMap, JSObject, JSRegExp,
    JSSet, Promise, PromiseState, RegExpError,
};
use crate::value::{Value, WeakKind};

/// Write every section of the tour to `out`
pub fn run(out: &mut impl Write, describer: &ValueDescriber) -> io::Result<()> {
    let mut tour = Tour { out, describer };
    tour.primitives()?;
    tour.bigints()?;
    tour.strings()?;
    tour.booleans_and_nullish()?;
    tour.symbols()?;
    tour.objects()?;
    tour.arrays()?;
    tour.functions()?;
    tour.dates()?;
    tour.regexps()?;
    tour.maps_and_sets()?;
    tour.events()?;
    tour.async_values()?;
    tour.buffers()?;
    tour.conversions()?;
    Ok(())
}

struct Tour<'a, W: Write> {
    out: &'a mut W,
    describer: &'a ValueDescriber,
}

impl<W: Write> Tour<'_, W> {
    fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n===== {} =====", title)
    }

    /// `label: Category: rendering`
    fn show(&mut self, label: &str, value: &Value) -> io::Result<()> {
        writeln!(self.out, "{}: {}", label, self.describer.describe(value))
    }

    fn line(&mut self, label: &str, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{}: {}", label, text)
    }

    fn primitives(&mut self) -> io::Result<()> {
        self.section("Numbers")?;
        let integer = Value::int(42);
        self.show("integer", &integer)?;
        self.show("float", &Value::number(3.14))?;
        self.show("infinity", &Value::number(f64::INFINITY))?;
        self.show("not a number", &Value::number(f64::NAN))?;
        self.line("typeof integer", integer.type_of())
    }

    fn bigints(&mut self) -> io::Result<()> {
        self.section("BigInt")?;
        let big = Value::bigint(9_007_199_254_740_991_i64);
        self.show("bigint literal", &big)?;
        self.show("BigInt(\"9007199254740992\")", &Value::bigint(9_007_199_254_740_992_i64))?;
        self.line("typeof bigint", big.type_of())?;
        self.line("Number.MAX_SAFE_INTEGER", crate::value::MAX_SAFE_INTEGER)?;
        if let Some(n) = big.as_bigint() {
            let next = n.clone() + malachite::Integer::from(1);
            self.show("bigint + 1n", &Value::bigint(next))?;
        }
        Ok(())
    }

    fn strings(&mut self) -> io::Result<()> {
        self.section("Strings")?;
        self.show("single quoted", &Value::string("シングルクォート文字列"))?;
        self.show("template", &Value::string(format!("embedded {}", 42)))?;

        let text = "Hello, JavaScript!";
        self.show("string", &Value::string(text))?;
        self.line("length", crate::util::utf16_len(text))?;
        self.line("upper case", text.to_uppercase())?;
        self.line("substring(0, 5)", &text[..5])?;
        let parts: Vec<Value> = text.split(", ").map(Value::string).collect();
        self.show("split(', ')", &Value::array(parts))?;
        let index = text.find("Java").map_or(-1, |i| i as i64);
        self.line("indexOf('Java')", index)?;
        self.line("replace", text.replacen("JavaScript", "Node.js", 1))
    }

    fn booleans_and_nullish(&mut self) -> io::Result<()> {
        self.section("Booleans, undefined and null")?;
        self.show("true", &Value::bool(true))?;
        self.show("false", &Value::bool(false))?;
        let undefined = Value::undefined();
        let null = Value::null();
        self.show("undefined", &undefined)?;
        self.line("typeof undefined", undefined.type_of())?;
        self.show("null", &null)?;
        self.line("typeof null", null.type_of())
    }

    fn symbols(&mut self) -> io::Result<()> {
        self.section("Symbols")?;
        let first = Value::symbol(Some("description"));
        let second = Value::symbol(Some("description"));
        self.show("symbol", &first)?;
        self.line("typeof symbol", first.type_of())?;
        self.line("symbol1 === symbol2", first.strict_equals(&second))
    }

    fn objects(&mut self) -> io::Result<()> {
        self.section("Objects")?;
        let greeting = Function::new(Some("greeting"), Some(0), FunctionKind::Method);
        let person = JSObject::from_entries([
            ("name", Value::string("山田太郎")),
            ("age", Value::int(30)),
            ("greeting", Value::function(greeting)),
        ]);
        let person_value = Value::object(person.clone());
        self.show("person", &person_value)?;
        self.line("person.name", person.get("name").unwrap_or_default())?;
        self.line("typeof person", person_value.type_of())?;

        // const { name, age } = person
        let name = person.get("name").unwrap_or_default();
        let age = person.get("age").unwrap_or_default();
        self.line("destructured", format!("{}, {}", name, age))?;

        let mut updated = JSObject::new();
        updated.extend(&person);
        updated.set("job", Value::string("エンジニア"));
        self.show("{ ...person, job }", &Value::object(updated))?;

        self.show("Object.keys", &Value::array(person.keys()))?;
        self.show("Object.values", &Value::array(person.values()))?;
        self.show("Object.entries", &Value::array(person.entries()))?;

        let mut point = JSObject::with_class("Point");
        point.set("x", Value::int(1));
        point.set("y", Value::int(2));
        self.show("class instance", &Value::object(point))?;

        let cyclic = Value::object(JSObject::new());
        if let Value::Object(obj) = &cyclic {
            obj.borrow_mut().set("self", cyclic.clone());
        }
        self.show("self reference", &cyclic)?;
        // Break the cycle so the record is freed
        if let Value::Object(obj) = &cyclic {
            obj.borrow_mut().delete("self");
        }
        Ok(())
    }

    fn arrays(&mut self) -> io::Result<()> {
        self.section("Arrays")?;
        let mut array: JSArray = (1..=5).map(Value::int).collect();
        self.show("array", &Value::from_array(array.clone()))?;
        let mut inner = JSObject::new();
        inner.set("key", Value::string("value"));
        let mixed = Value::array(vec![
            Value::int(1),
            Value::string("string"),
            Value::bool(true),
            Value::object(inner),
            Value::array(vec![Value::int(6), Value::int(7)]),
        ]);
        self.show("mixed", &mixed)?;
        self.line("length", array.len())?;
        self.line("array[2]", array.get(2).unwrap_or_default())?;
        self.line("Array.isArray", mixed.is_array())?;

        let pushed = array.push(Value::int(6)).unwrap_or(array.len());
        self.line("push(6)", pushed)?;
        self.line("pop()", array.pop().unwrap_or_default())?;
        let unshifted = array.unshift(&[Value::int(0)]).unwrap_or(array.len());
        self.line("unshift(0)", unshifted)?;
        self.line("shift()", array.shift().unwrap_or_default())?;
        self.line("array", array.join(","))?;
        let tail: JSArray = (6..=8).map(Value::int).collect();
        if let Some(joined) = array.concat(&tail) {
            self.show("concat([6, 7, 8])", &Value::from_array(joined))?;
        }
        self.show("slice(1, 3)", &Value::from_array(array.slice(1, 3)))?;
        let index = array.index_of(&Value::int(3), 0).map_or(-1, i64::from);
        self.line("indexOf(3)", index)?;

        let names: JSArray = ["Alice", "Bob", "Charlie", "Dave"]
            .into_iter()
            .map(Value::string)
            .collect();
        let chained = names
            .filter(|name| name.as_str().is_some_and(|s| s.chars().count() > 3))
            .map(|name| Value::string(name.to_string().to_uppercase()));
        self.show("filter + map", &Value::from_array(chained))
    }

    fn functions(&mut self) -> io::Result<()> {
        self.section("Functions")?;
        let add = |args: &[Value]| {
            let a = args.first().map_or(f64::NAN, to_number);
            let b = args.get(1).map_or(f64::NAN, to_number);
            Value::number(a + b)
        };
        let regular = Function::native("regularFunction", 2, add);
        let arrow = Function::native("arrowFunction", 2, add).with_kind(FunctionKind::Arrow);
        let with_default = Function::native("functionWithDefaultParams", 1, |args: &[Value]| {
            let a = args.first().map_or(f64::NAN, to_number);
            let b = args.get(1).filter(|v| !v.is_undefined()).map_or(1.0, to_number);
            Value::number(a + b)
        })
        .with_kind(FunctionKind::Arrow);

        let two_three = [Value::int(2), Value::int(3)];
        self.show("regularFunction", &Value::function(regular.clone()))?;
        self.line("regularFunction(2, 3)", regular.call(&two_three))?;
        self.line("arrowFunction(2, 3)", arrow.call(&two_three))?;
        self.show("functionWithDefaultParams", &Value::function(with_default.clone()))?;
        self.line("functionWithDefaultParams(2)", with_default.call(&[Value::int(2)]))?;
        self.line("typeof regularFunction", Value::function(regular).type_of())?;

        let multiply = Function::native("", 2, |args: &[Value]| {
            let a = args.first().map_or(f64::NAN, to_number);
            let b = args.get(1).map_or(f64::NAN, to_number);
            Value::number(a * b)
        })
        .with_kind(FunctionKind::Arrow);
        self.show("anonymous arrow", &Value::function(multiply.clone()))?;
        self.line("operation(5, 3, multiply)", operation(Value::int(5), Value::int(3), &multiply))?;

        let counter = create_counter();
        self.show("counter", &Value::function(counter.clone()))?;
        self.line("counter()", counter.call(&[]))?;
        self.line("counter()", counter.call(&[]))?;

        let iife = Function::native("", 0, |_| Value::string("result from IIFE")).call(&[]);
        self.show("IIFE", &iife)
    }

    fn events(&mut self) -> io::Result<()> {
        self.section("Events")?;
        let on_event = Function::native("", 2, |args: &[Value]| {
            let a = args.first().cloned().unwrap_or_default();
            let b = args.get(1).cloned().unwrap_or_default();
            Value::string(format!("event fired: {}, {}", a, b))
        })
        .with_kind(FunctionKind::Arrow);

        let mut listeners = JSMap::new();
        listeners.set(Value::string("event"), Value::array(vec![Value::function(on_event)]));
        let args = [Value::string("arg1"), Value::string("arg2")];
        for reply in emit(&listeners, "event", &args) {
            self.line("emit('event')", reply)?;
        }
        self.line("emit('other')", emit(&listeners, "other", &args).len())?;
        self.show("listeners", &Value::map(listeners))
    }

    fn dates(&mut self) -> io::Result<()> {
        self.section("Dates")?;
        let now = JSDate::now();
        let custom = JSDate::from_components(2023.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        self.show("now", &Value::date(now))?;
        self.show("new Date(2023, 0, 1)", &Value::date(custom))?;
        self.line("String(date)", custom.to_js_string())?;
        if let (Some(year), Some(month), Some(day)) = (now.year(), now.month(), now.day()) {
            self.line("year", year)?;
            self.line("month", month + 1)?;
            self.line("day", day)?;
        }
        self.line("getTime", to_js_string(&Value::number(now.time())))?;
        self.show("invalid", &Value::date(JSDate::parse("not a date")))
    }

    fn regexps(&mut self) -> io::Result<()> {
        self.section("Regular expressions")?;
        let regex = match JSRegExp::new("[a-z]+", "g") {
            Ok(regex) => regex,
            Err(e) => return self.line("error", e),
        };
        let text = "Hello123World";
        self.show("/[a-z]+/g", &Value::regexp(regex.clone()))?;
        self.line("test", regex.test(text))?;
        let matches = regex.match_all(text).into_iter().map(Value::string).collect();
        self.show("match", &Value::array(matches))?;
        self.line("replace", regex.replace(text, "JS"))?;
        self.line("typeof regex", Value::regexp(regex).type_of())?;

        let invalid: Result<JSRegExp, RegExpError> = JSRegExp::new("[a-z", "");
        if let Err(e) = invalid {
            self.line("new RegExp('[a-z')", e)?;
        }
        Ok(())
    }

    fn maps_and_sets(&mut self) -> io::Result<()> {
        self.section("Map and Set")?;
        let person = Value::object(JSObject::from_entries([("name", Value::string("山田太郎"))]));
        let mut map = JSMap::new();
        map.set(Value::string("key1"), Value::string("value1"));
        map.set(Value::string("key2"), Value::string("value2"));
        map.set(person.clone(), Value::string("object as key"));
        self.line("size", map.len())?;
        self.line("get('key1')", map.get(&Value::string("key1")).unwrap_or_default())?;
        self.line("has('key3')", map.has(&Value::string("key3")))?;
        self.line("get(person)", map.get(&person).unwrap_or_default())?;
        self.show("map", &Value::map(map))?;

        let mut set: JSSet = [1, 2, 3, 3, 4, 5, 5].into_iter().map(Value::int).collect();
        self.line("size", set.len())?;
        self.line("has(3)", set.has(&Value::int(3)))?;
        self.line("has(6)", set.has(&Value::int(6)))?;
        set.add(Value::int(6));
        set.delete(&Value::int(1));
        self.show("set", &Value::set(set))?;

        self.show("WeakMap", &Value::weak(WeakKind::WeakMap))?;
        self.show("WeakSet", &Value::weak(WeakKind::WeakSet))
    }

    fn async_values(&mut self) -> io::Result<()> {
        self.section("Promises")?;
        let mut promise = Promise::pending();
        self.line("state", state_name(promise.state()))?;
        promise.resolve(Value::string("success"));
        self.line("state after resolve", state_name(promise.state()))?;
        let mut error = JSObject::with_class("Error");
        error.set("message", Value::string("failure"));
        self.line("reject after resolve", promise.reject(Value::object(error)))?;
        self.show("promise", &Value::promise(promise))
    }

    fn buffers(&mut self) -> io::Result<()> {
        self.section("Buffers and typed arrays")?;
        let buffer = ByteBuffer::from_str("Hello, Node.js!");
        self.line("hex", buffer.to_hex())?;
        self.line("base64", buffer.to_base64())?;
        self.line("toString", buffer.to_utf8_lossy())?;
        self.line("length", buffer.len())?;
        self.show("buffer", &Value::buffer(buffer))?;

        let int8 = ByteBuffer::from_bytes(BufferKind::Int8Array, vec![1, 2, 3]);
        let mut uint8 = ByteBuffer::zeroed(BufferKind::Uint8Array, 3);
        for (i, n) in [10, 20, 30].into_iter().enumerate() {
            uint8.set_u8(i, n);
        }
        self.line("Int8Array", to_js_string(&Value::buffer(int8.clone())))?;
        self.line("Uint8Array", to_js_string(&Value::buffer(uint8.clone())))?;
        self.line("Uint8Array[1]", uint8.element(1).unwrap_or_default())?;
        self.show("int8", &Value::buffer(int8))?;
        self.show("uint8", &Value::buffer(uint8))?;

        let mut view = ByteBuffer::zeroed(BufferKind::DataView, 16);
        view.set_i32(0, 42);
        view.set_f64(4, 3.14);
        self.line("getInt32(0)", view.get_i32(0).unwrap_or_default())?;
        self.line("getFloat64(4)", view.get_f64(4).unwrap_or(f64::NAN))?;
        self.show("view", &Value::buffer(view))
    }

    fn conversions(&mut self) -> io::Result<()> {
        self.section("Type conversion")?;
        let record = Value::object(JSObject::from_entries([("name", Value::string("John"))]));
        let list: Value = Value::array((1..=3).map(Value::int).collect());
        self.show("String(123)", &Value::string(to_js_string(&Value::int(123))))?;
        self.show("String(true)", &Value::string(to_js_string(&Value::bool(true))))?;
        self.show("String({ name: 'John' })", &Value::string(to_js_string(&record)))?;
        self.show("String([1, 2, 3])", &Value::string(to_js_string(&list)))?;

        self.show("Number('123')", &Value::number(to_number(&Value::string("123"))))?;
        self.show("Number(true)", &Value::number(to_number(&Value::bool(true))))?;
        self.show("Number('abc')", &Value::number(to_number(&Value::string("abc"))))?;

        self.show("parseInt('123')", &Value::number(parse_int("123", None)))?;
        self.show("parseInt('FF', 16)", &Value::number(parse_int("FF", Some(16))))?;
        self.show("parseInt('123.45')", &Value::number(parse_int("123.45", None)))?;
        self.show("parseFloat('3.14abc')", &Value::number(parse_float("3.14abc")))?;

        for (label, value) in [
            ("Boolean(1)", Value::int(1)),
            ("Boolean('')", Value::string("")),
            ("Boolean(null)", Value::null()),
            ("Boolean(undefined)", Value::undefined()),
            ("Boolean(NaN)", Value::number(f64::NAN)),
        ] {
            self.show(label, &Value::bool(to_boolean(&value)))?;
        }
        Ok(())
    }
}

/// Call `func` with two arguments
fn operation(a: Value, b: Value, func: &Function) -> Value {
    func.call(&[a, b])
}

/// Call every listener registered for `event`, returning their results
fn emit(listeners: &JSMap, event: &str, args: &[Value]) -> Vec<Value> {
    let Some(Value::Array(handlers)) = listeners.get(&Value::string(event)) else {
        return Vec::new();
    };
    let handlers = handlers.borrow();
    handlers
        .iter()
        .filter_map(Value::as_function)
        .map(|f| f.call(args))
        .collect()
}

/// A function that returns 1, 2, 3, ... on successive calls
fn create_counter() -> Function {
    let count = Rc::new(Cell::new(0));
    Function::native("", 0, move |_| {
        count.set(count.get() + 1);
        Value::int(count.get())
    })
}

fn state_name(state: &PromiseState) -> &'static str {
    match state {
        PromiseState::Pending => "pending",
        PromiseState::Fulfilled(_) => "fulfilled",
        PromiseState::Rejected(_) => "rejected",
    }
}
