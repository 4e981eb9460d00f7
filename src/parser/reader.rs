//! Literal reader
//!
//! Reads one JavaScript literal expression into a `Value`: primitives,
//! array and object literals, regular expressions, the common built-in
//! constructors (`new Map(...)`, `new Date(...)`, `Buffer.from(...)`, ...)
//! and function expressions. Function bodies are skipped; the result is an
//! opaque function carrying its name and declared parameter count.
//!
//! Identifiers other than the literal globals (`undefined`, `NaN`,
//! `Infinity`) are rejected: there are no variables to look them up in.

use malachite::Integer;
use thiserror::Error;
use tracing::debug;

use crate::parser::lexer::{Lexer, SourcePos, Token};
use crate::runtime::convert::to_number;
use crate::runtime::{
    declared_length, BufferKind, ByteBuffer, Function, FunctionKind, JSArray, JSDate, JSMap,
    JSObject, JSRegExp, JSSet, Promise, RegExpError,
};
use crate::util::{base64_decode, hex_decode, number_to_string};
use crate::value::{Value, WeakKind};

/// Largest length accepted for `new ArrayBuffer(n)` and friends
const MAX_BUFFER_LENGTH: usize = 1 << 24;

/// Largest length accepted for `new Array(n)`; every slot is allocated
const MAX_ARRAY_ARG_LENGTH: usize = 1 << 16;

/// Deepest nesting of arrays, objects, calls and parentheses
pub const MAX_NESTING: usize = 128;

/// Errors that can occur while reading a literal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{line}:{column}: unexpected {found}, expected {expected}")]
    Unexpected {
        found: String,
        expected: &'static str,
        line: usize,
        column: usize,
    },

    #[error("{line}:{column}: unknown identifier '{name}'")]
    UnknownIdentifier {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("{line}:{column}: {source}")]
    RegExp {
        source: RegExpError,
        line: usize,
        column: usize,
    },

    #[error("{line}:{column}: {message}")]
    Invalid {
        message: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Line and column where the error was found
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Unexpected { line, column, .. }
            | ParseError::UnknownIdentifier { line, column, .. }
            | ParseError::RegExp { line, column, .. }
            | ParseError::Invalid { line, column, .. } => (*line, *column),
        }
    }
}

/// Read a single literal expression
///
/// A trailing semicolon is allowed; anything else after the literal is an
/// error.
pub fn parse_value(source: &str) -> Result<Value, ParseError> {
    debug!(len = source.len(), "reading literal");
    let mut reader = Reader::new(source);
    let value = reader.value()?;
    reader.eat(&Token::Semicolon);
    if reader.current != Token::Eof {
        return Err(reader.unexpected("end of input"));
    }
    Ok(value)
}

/// Recursive-descent reader with one token of lookahead
#[derive(Clone)]
struct Reader<'a> {
    lexer: Lexer<'a>,
    current: Token,
    pos: SourcePos,
    /// Values currently being read, outermost first
    nesting: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let pos = lexer.token_position();
        Reader {
            lexer,
            current,
            pos,
            nesting: 0,
        }
    }

    /// Move to the next token, returning the one just passed
    fn bump(&mut self) -> Token {
        let next = self.lexer.next_token();
        self.pos = self.lexer.token_position();
        std::mem::replace(&mut self.current, next)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.current == *token {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn ident(&mut self, expected: &'static str) -> Result<String, ParseError> {
        match &self.current {
            Token::Ident(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        if let Token::Error(message) = &self.current {
            return self.invalid_at(self.pos, message.clone());
        }
        ParseError::Unexpected {
            found: self.current.to_string(),
            expected,
            line: self.pos.line,
            column: self.pos.column,
        }
    }

    fn invalid_at(&self, pos: SourcePos, message: impl Into<String>) -> ParseError {
        ParseError::Invalid {
            message: message.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(self.invalid_at(self.pos, "nesting too deep"));
        }
        self.nesting += 1;
        let value = self.value_inner();
        self.nesting -= 1;
        value
    }

    fn value_inner(&mut self) -> Result<Value, ParseError> {
        match self.current.clone() {
            Token::Number(n) => {
                self.bump();
                Ok(Value::number(n))
            }
            Token::BigInt(digits) => {
                let pos = self.pos;
                self.bump();
                bigint_from_literal(&digits)
                    .map(Value::bigint)
                    .ok_or_else(|| self.invalid_at(pos, format!("invalid bigint {}n", digits)))
            }
            Token::String(s) | Token::Template(s) => {
                self.bump();
                Ok(Value::string(s))
            }
            Token::True => {
                self.bump();
                Ok(Value::bool(true))
            }
            Token::False => {
                self.bump();
                Ok(Value::bool(false))
            }
            Token::Null => {
                self.bump();
                Ok(Value::null())
            }
            Token::Minus | Token::Plus => self.signed(),
            Token::LBracket => self.array(),
            Token::LBrace => self.object(),
            Token::Slash | Token::SlashEq => self.regexp(),
            Token::Function => self.function(),
            Token::New => self.construct(),
            Token::LParen => self.paren_or_arrow(),
            Token::Ident(name) => self.identifier(name),
            _ => Err(self.unexpected("a value")),
        }
    }

    /// `-5`, `+1.5`, `-Infinity`, `-10n`
    fn signed(&mut self) -> Result<Value, ParseError> {
        let pos = self.pos;
        let negative = self.bump() == Token::Minus;
        let sign = if negative { -1.0 } else { 1.0 };
        match self.value()? {
            Value::Int(i) => Ok(Value::number(sign * i as f64)),
            Value::Float(f) => Ok(Value::number(sign * f)),
            Value::BigInt(n) if negative => Ok(Value::bigint(-(*n).clone())),
            Value::BigInt(n) => Ok(Value::BigInt(n)),
            _ => Err(self.invalid_at(pos, "a sign must be followed by a number")),
        }
    }

    fn array(&mut self) -> Result<Value, ParseError> {
        self.bump(); // [
        let mut items = Vec::new();
        loop {
            match self.current {
                Token::RBracket => {
                    self.bump();
                    break;
                }
                // Hole
                Token::Comma => {
                    self.bump();
                    items.push(Value::undefined());
                    continue;
                }
                _ => {}
            }
            items.push(self.value()?);
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RBracket, "',' or ']'")?;
                break;
            }
        }
        Ok(Value::array(items))
    }

    fn object(&mut self) -> Result<Value, ParseError> {
        self.bump(); // {
        let mut obj = JSObject::new();
        loop {
            if self.eat(&Token::RBrace) {
                break;
            }
            let key = self.property_key()?;
            if self.current == Token::LParen {
                // Method shorthand
                let arity = self.params()?;
                self.skip_block()?;
                let method = Function::new(Some(&key), Some(arity), FunctionKind::Method);
                obj.set(key, Value::function(method));
            } else {
                self.expect(&Token::Colon, "':'")?;
                let value = self.value()?;
                obj.set(key, value);
            }
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RBrace, "',' or '}'")?;
                break;
            }
        }
        Ok(Value::object(obj))
    }

    fn property_key(&mut self) -> Result<String, ParseError> {
        let key = match &self.current {
            Token::Ident(name) | Token::String(name) => name.clone(),
            Token::Number(n) => number_to_string(*n),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Null => "null".to_string(),
            Token::Function => "function".to_string(),
            Token::New => "new".to_string(),
            _ => return Err(self.unexpected("a property name")),
        };
        self.bump();
        Ok(key)
    }

    fn regexp(&mut self) -> Result<Value, ParseError> {
        let pos = self.pos;
        let token = self.lexer.read_regexp();
        self.current = self.lexer.next_token();
        self.pos = self.lexer.token_position();
        match token {
            Token::RegExp { pattern, flags } => JSRegExp::new(&pattern, &flags)
                .map(Value::regexp)
                .map_err(|source| ParseError::RegExp {
                    source,
                    line: pos.line,
                    column: pos.column,
                }),
            Token::Error(message) => Err(self.invalid_at(pos, message)),
            other => Err(self.invalid_at(pos, format!("unexpected {}", other))),
        }
    }

    /// `function name(a, b = 1) { ... }`
    fn function(&mut self) -> Result<Value, ParseError> {
        self.bump(); // function
        self.eat(&Token::Star);
        let name = match &self.current {
            Token::Ident(_) => Some(self.ident("function name")?),
            _ => None,
        };
        let arity = self.params()?;
        self.skip_block()?;
        Ok(Value::function(Function::new(
            name.as_deref(),
            Some(arity),
            FunctionKind::Normal,
        )))
    }

    /// A parameter list; returns the declared length
    fn params(&mut self) -> Result<u32, ParseError> {
        self.expect(&Token::LParen, "'('")?;
        let mut special = Vec::new();
        loop {
            if self.eat(&Token::RParen) {
                break;
            }
            let rest = self.eat(&Token::Ellipsis);
            match self.current {
                Token::Ident(_) => {
                    self.bump();
                }
                Token::LBracket | Token::LBrace => self.skip_balanced()?,
                _ => return Err(self.unexpected("a parameter name")),
            }
            let default = self.eat(&Token::Eq);
            if default {
                self.skip_expression()?;
            }
            special.push(rest || default);
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen, "',' or ')'")?;
                break;
            }
        }
        Ok(declared_length(special))
    }

    /// `(a, b) => ...` or a parenthesised value
    fn paren_or_arrow(&mut self) -> Result<Value, ParseError> {
        let saved = self.clone();
        if let Ok(arity) = self.params() {
            if self.eat(&Token::Arrow) {
                return self.arrow(arity);
            }
        }
        *self = saved;

        self.bump(); // (
        let value = self.value()?;
        self.expect(&Token::RParen, "')'")?;
        Ok(value)
    }

    /// The body of an arrow function, after `=>`
    fn arrow(&mut self, arity: u32) -> Result<Value, ParseError> {
        if self.current == Token::LBrace {
            self.skip_balanced()?;
        } else if !self.skip_expression()? {
            return Err(self.unexpected("a function body"));
        }
        Ok(Value::function(Function::new(
            None,
            Some(arity),
            FunctionKind::Arrow,
        )))
    }

    fn identifier(&mut self, name: String) -> Result<Value, ParseError> {
        let pos = self.pos;
        self.bump();

        if self.eat(&Token::Arrow) {
            return self.arrow(1);
        }

        match name.as_str() {
            "undefined" => Ok(Value::undefined()),
            "NaN" => Ok(Value::float(f64::NAN)),
            "Infinity" => Ok(Value::float(f64::INFINITY)),
            "async" if matches!(self.current, Token::Function | Token::LParen | Token::Ident(_)) => {
                self.value()
            }
            "Symbol" => {
                let args = self.args()?;
                let description = match args.first() {
                    None | Some(Value::Undefined) => None,
                    Some(v) => Some(v.to_string()),
                };
                Ok(Value::symbol(description.as_deref()))
            }
            "BigInt" => {
                let args = self.args()?;
                args.first()
                    .and_then(bigint_from_value)
                    .map(Value::bigint)
                    .ok_or_else(|| self.invalid_at(pos, "cannot convert to a bigint"))
            }
            "Buffer" => {
                self.expect(&Token::Dot, "'.'")?;
                let method = self.ident("a Buffer method")?;
                let args = self.args()?;
                self.buffer_call(&method, &args, pos)
            }
            "Promise" => {
                self.expect(&Token::Dot, "'.'")?;
                let method = self.ident("a Promise method")?;
                let mut args = self.args()?;
                let value = if args.is_empty() {
                    Value::undefined()
                } else {
                    args.swap_remove(0)
                };
                match method.as_str() {
                    "resolve" => Ok(Value::promise(Promise::resolved(value))),
                    "reject" => Ok(Value::promise(Promise::rejected(value))),
                    _ => Err(self.invalid_at(pos, format!("unsupported Promise.{}", method))),
                }
            }
            _ => Err(ParseError::UnknownIdentifier {
                name,
                line: pos.line,
                column: pos.column,
            }),
        }
    }

    fn buffer_call(&self, method: &str, args: &[Value], pos: SourcePos) -> Result<Value, ParseError> {
        match (method, args.first()) {
            ("from", Some(Value::String(text))) => {
                let encoding = args.get(1).and_then(Value::as_str).unwrap_or("utf8");
                let bytes = match encoding {
                    "utf8" | "utf-8" => Some(text.as_bytes().to_vec()),
                    "hex" => hex_decode(text),
                    "base64" => base64_decode(text),
                    other => {
                        return Err(self.invalid_at(pos, format!("unknown encoding '{}'", other)));
                    }
                };
                bytes
                    .map(|b| Value::buffer(ByteBuffer::from_bytes(BufferKind::Buffer, b)))
                    .ok_or_else(|| self.invalid_at(pos, format!("invalid {} data", encoding)))
            }
            ("from", Some(Value::Array(items))) => {
                let bytes = items.borrow().iter().map(to_byte).collect();
                Ok(Value::buffer(ByteBuffer::from_bytes(BufferKind::Buffer, bytes)))
            }
            ("alloc", len) => {
                let len = self.length_arg(len, MAX_BUFFER_LENGTH, pos)?;
                Ok(Value::buffer(ByteBuffer::zeroed(BufferKind::Buffer, len)))
            }
            _ => Err(self.invalid_at(pos, format!("unsupported Buffer.{} call", method))),
        }
    }

    /// `new Name(args)`
    fn construct(&mut self) -> Result<Value, ParseError> {
        self.bump(); // new
        let pos = self.pos;
        let name = self.ident("a constructor name")?;
        let args = if self.current == Token::LParen {
            self.args()?
        } else {
            Vec::new()
        };
        let first = args.first();

        let value = match name.as_str() {
            "Map" => {
                let mut map = JSMap::new();
                if let Some(Value::Array(entries)) = first {
                    for entry in entries.borrow().iter() {
                        let Value::Array(pair) = entry else {
                            return Err(self.invalid_at(pos, "Map entries must be [key, value] arrays"));
                        };
                        let pair = pair.borrow();
                        map.set(
                            pair.get(0).unwrap_or_default(),
                            pair.get(1).unwrap_or_default(),
                        );
                    }
                } else if first.is_some_and(|v| !v.is_nullish()) {
                    return Err(self.invalid_at(pos, "Map expects an array of entries"));
                }
                Value::map(map)
            }
            "Set" => match first {
                None | Some(Value::Undefined | Value::Null) => Value::set(JSSet::new()),
                Some(Value::Array(items)) => Value::set(items.borrow().iter().cloned().collect()),
                Some(Value::String(s)) => {
                    Value::set(s.chars().map(|c| Value::string(c.to_string())).collect())
                }
                Some(_) => return Err(self.invalid_at(pos, "Set expects an array")),
            },
            "Date" => Value::date(date_from_args(&args)),
            "Array" => match args.as_slice() {
                [len @ (Value::Int(_) | Value::Float(_))] => {
                    let len = self.length_arg(Some(len), MAX_ARRAY_ARG_LENGTH, pos)?;
                    Value::from_array(JSArray::with_length(len as u32))
                }
                items => Value::array(items.to_vec()),
            },
            "Uint8Array" | "Int8Array" => {
                let kind = if name == "Uint8Array" {
                    BufferKind::Uint8Array
                } else {
                    BufferKind::Int8Array
                };
                let buffer = match first {
                    Some(Value::Array(items)) => {
                        ByteBuffer::from_bytes(kind, items.borrow().iter().map(to_byte).collect())
                    }
                    Some(Value::Buffer(source)) => {
                        ByteBuffer::from_bytes(kind, source.borrow().as_bytes().to_vec())
                    }
                    len => ByteBuffer::zeroed(kind, self.length_arg(len, MAX_BUFFER_LENGTH, pos)?),
                };
                Value::buffer(buffer)
            }
            "ArrayBuffer" => Value::buffer(ByteBuffer::zeroed(
                BufferKind::ArrayBuffer,
                self.length_arg(first, MAX_BUFFER_LENGTH, pos)?,
            )),
            "DataView" => match first {
                Some(Value::Buffer(source)) if source.borrow().kind() == BufferKind::ArrayBuffer => {
                    let bytes = source.borrow().as_bytes().to_vec();
                    Value::buffer(ByteBuffer::from_bytes(BufferKind::DataView, bytes))
                }
                _ => return Err(self.invalid_at(pos, "DataView expects an ArrayBuffer")),
            },
            "RegExp" => {
                let pattern = first.map(|v| v.to_string()).unwrap_or_default();
                let flags = args.get(1).map(|v| v.to_string()).unwrap_or_default();
                let regexp = JSRegExp::new(&pattern, &flags).map_err(|source| {
                    ParseError::RegExp {
                        source,
                        line: pos.line,
                        column: pos.column,
                    }
                })?;
                Value::regexp(regexp)
            }
            "WeakMap" => Value::weak(WeakKind::WeakMap),
            "WeakSet" => Value::weak(WeakKind::WeakSet),
            "Promise" => Value::promise(Promise::pending()),
            "Object" => Value::object(JSObject::new()),
            _ => {
                // Any other class: an empty instance, plus the message of an error
                let mut obj = JSObject::with_class(&name);
                if name.ends_with("Error") {
                    if let Some(message) = first.and_then(Value::as_str) {
                        obj.set("message", Value::string(message));
                    }
                }
                Value::object(obj)
            }
        };
        Ok(value)
    }

    /// `(a, b, ...)`
    fn args(&mut self) -> Result<Vec<Value>, ParseError> {
        self.expect(&Token::LParen, "'('")?;
        let mut args = Vec::new();
        loop {
            if self.eat(&Token::RParen) {
                break;
            }
            args.push(self.value()?);
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen, "',' or ')'")?;
                break;
            }
        }
        Ok(args)
    }

    fn length_arg(
        &self,
        value: Option<&Value>,
        max: usize,
        pos: SourcePos,
    ) -> Result<usize, ParseError> {
        let n = value.map_or(0.0, to_number);
        if n.fract() != 0.0 || !(0.0..=max as f64).contains(&n) {
            return Err(self.invalid_at(pos, "invalid length"));
        }
        Ok(n as usize)
    }

    fn skip_block(&mut self) -> Result<(), ParseError> {
        if self.current != Token::LBrace {
            return Err(self.unexpected("'{'"));
        }
        self.skip_balanced()
    }

    /// Skip from an opening bracket to its matching closer, inclusive
    fn skip_balanced(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.current {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return Ok(());
                    }
                }
                Token::Eof | Token::Error(_) => return Err(self.unexpected("a closing bracket")),
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip one expression inside a parameter default or arrow body
    ///
    /// Stops before a `,`, `;` or closing bracket at the outer level.
    /// Returns whether anything was skipped.
    fn skip_expression(&mut self) -> Result<bool, ParseError> {
        let mut skipped = false;
        loop {
            match self.current {
                Token::Comma
                | Token::Semicolon
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
                | Token::Eof => return Ok(skipped),
                Token::LParen | Token::LBracket | Token::LBrace => self.skip_balanced()?,
                Token::Error(_) => return Err(self.unexpected("an expression")),
                _ => {
                    self.bump();
                }
            }
            skipped = true;
        }
    }
}

/// Parse the digits of a BigInt literal, honouring a radix prefix
fn bigint_from_literal(text: &str) -> Option<Integer> {
    let (radix, digits) = match text.get(..2) {
        Some("0x" | "0X") => (16, &text[2..]),
        Some("0o" | "0O") => (8, &text[2..]),
        Some("0b" | "0B") => (2, &text[2..]),
        _ => return text.parse().ok(),
    };
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(Integer::from(0), |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * Integer::from(radix) + Integer::from(d))
    })
}

/// `BigInt(value)`
fn bigint_from_value(value: &Value) -> Option<Integer> {
    match value {
        Value::Int(i) => Some(Integer::from(*i)),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f).parse().ok(),
        Value::BigInt(n) => Some((**n).clone()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(Integer::from(0))
            } else {
                bigint_from_literal(s)
            }
        }
        Value::Bool(b) => Some(Integer::from(u32::from(*b))),
        _ => None,
    }
}

/// The byte stored for a number in a `Uint8Array` (modulo 256)
fn to_byte(value: &Value) -> u8 {
    let n = to_number(value);
    if n.is_finite() { n.trunc() as i64 as u8 } else { 0 }
}

/// `new Date(...)`; several fields are read like `Date.UTC`
fn date_from_args(args: &[Value]) -> JSDate {
    match args {
        [] => JSDate::now(),
        [Value::String(s)] => JSDate::parse(s),
        [Value::Date(d)] => **d,
        [v] => JSDate::from_time(to_number(v)),
        fields => {
            let field = |i: usize, default: f64| fields.get(i).map_or(default, to_number);
            let mut year = field(0, f64::NAN);
            // Two-digit years are in the 1900s
            if (0.0..=99.0).contains(&year.trunc()) {
                year = 1900.0 + year.trunc();
            }
            JSDate::from_components(
                year,
                field(1, 0.0),
                field(2, 1.0),
                field(3, 0.0),
                field(4, 0.0),
                field(5, 0.0),
                field(6, 0.0),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{classify, render, Category};

    fn read(source: &str) -> Value {
        parse_value(source).unwrap_or_else(|e| panic!("{}: {}", source, e))
    }

    #[test]
    fn test_primitives() {
        assert_eq!(read("42").to_i32(), Some(42));
        assert_eq!(read("-3.5").to_f64(), Some(-3.5));
        assert!(read("undefined").is_undefined());
        assert!(read("null").is_null());
        assert_eq!(read("true").to_bool(), Some(true));
        assert!(read("NaN").to_f64().is_some_and(f64::is_nan));
        assert_eq!(read("-Infinity").to_f64(), Some(f64::NEG_INFINITY));
        assert_eq!(read("'日本語'").as_str(), Some("日本語"));
        assert_eq!(read("`template ${x}`").as_str(), Some("template ${x}"));
        assert_eq!(read("0xff;").to_i32(), Some(255));
    }

    #[test]
    fn test_negative_zero() {
        assert!(matches!(read("-0"), Value::Float(f) if f == 0.0 && f.is_sign_negative()));
    }

    #[test]
    fn test_bigint() {
        assert_eq!(render(&read("1234567890123456789012345678901234567890n")), "1234567890123456789012345678901234567890n");
        assert_eq!(render(&read("-10n")), "-10n");
        assert_eq!(render(&read("0xffn")), "255n");
        assert_eq!(render(&read("BigInt(9007199254740991)")), "9007199254740991n");
        assert_eq!(render(&read("BigInt('123')")), "123n");
    }

    #[test]
    fn test_array_literal() {
        let v = read("[1, 'two', true, null, { key: 'value' }, [1, [2]],]");
        assert_eq!(render(&v), "[ 1, 'two', true, null, { key: 'value' }, [ 1, [ 2 ] ] ]");
        assert_eq!(render(&read("[1,,3]")), "[ 1, undefined, 3 ]");
    }

    #[test]
    fn test_object_literal() {
        let v = read(r#"{ name: "山田太郎", 'first-name': 'x', 1: 2, greet() { return 1 } }"#);
        assert_eq!(
            render(&v),
            "{ name: '山田太郎', 'first-name': 'x', '1': 2, greet: [Function: greet] (arity 0) }"
        );
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            render(&read("function regularFunction(a, b) { return a + b; }")),
            "[Function: regularFunction] (arity 2)"
        );
        assert_eq!(
            render(&read("(a, b = 1, ...rest) => { return a * b }")),
            "[Function (anonymous)] (arity 1)"
        );
        assert_eq!(render(&read("x => x * 2")), "[Function (anonymous)] (arity 1)");
        assert_eq!(render(&read("({ a }, [b]) => a + b")), "[Function (anonymous)] (arity 2)");
        assert_eq!(render(&read("async () => {}")), "[Function (anonymous)] (arity 0)");
        assert_eq!(render(&read("(1)")), "1");
    }

    #[test]
    fn test_regexp() {
        assert_eq!(render(&read(r"/^[^\s@]+@[^\s@]+\.[^\s@]+$/")), r"/^[^\s@]+@[^\s@]+\.[^\s@]+$/");
        assert_eq!(render(&read(r"/\d+/g")), r"/\d+/g");
        assert_eq!(render(&read("new RegExp('a+', 'i')")), "/a+/i");
        assert!(matches!(parse_value("/a/q"), Err(ParseError::RegExp { .. })));
    }

    #[test]
    fn test_collections() {
        assert_eq!(
            render(&read("new Map([['key1', 'value1'], [2, 'two']])")),
            "Map(2) { 'key1' => 'value1', 2 => 'two' }"
        );
        assert_eq!(
            render(&read("new Set([1, 2, 3, 3, 4, 5, 5])")),
            "Set(5) { 1, 2, 3, 4, 5 }"
        );
        assert_eq!(render(&read("new Set('aab')")), "Set(2) { 'a', 'b' }");
        assert_eq!(render(&read("new Map")), "Map(0) {}");
        assert!(parse_value("new Map([1])").is_err());
    }

    #[test]
    fn test_dates() {
        assert_eq!(render(&read("new Date('2023-12-25')")), "2023-12-25T00:00:00.000Z");
        assert_eq!(render(&read("new Date(0)")), "1970-01-01T00:00:00.000Z");
        assert_eq!(render(&read("new Date(2023, 0, 1)")), "2023-01-01T00:00:00.000Z");
        assert_eq!(render(&read("new Date(99, 0)")), "1999-01-01T00:00:00.000Z");
        assert_eq!(render(&read("new Date('invalid date')")), "Invalid Date");
        assert_eq!(classify(&read("new Date()")), Category::Moment);
    }

    #[test]
    fn test_buffers() {
        assert_eq!(render(&read("Buffer.from('AB')")), "Buffer(2) <hex 4142> <base64 QUI=>");
        assert_eq!(render(&read("Buffer.from('4142', 'hex')")), "Buffer(2) <hex 4142> <base64 QUI=>");
        assert_eq!(render(&read("Buffer.from('QUI=', 'base64')")), "Buffer(2) <hex 4142> <base64 QUI=>");
        assert_eq!(render(&read("Buffer.from([65, 66])")), "Buffer(2) <hex 4142> <base64 QUI=>");
        assert_eq!(render(&read("Buffer.alloc(1)")), "Buffer(1) <hex 00> <base64 AA==>");
        assert_eq!(render(&read("new Uint8Array([1, 2, 256])")), "Uint8Array(3) <hex 010200> <base64 AQIA>");
        assert_eq!(render(&read("new Int8Array([-1])")), "Int8Array(1) <hex ff> <base64 /w==>");
        assert_eq!(render(&read("new ArrayBuffer(2)")), "ArrayBuffer(2) <hex 0000> <base64 AAA=>");
        assert_eq!(
            render(&read("new DataView(new ArrayBuffer(1))")),
            "DataView(1) <hex 00> <base64 AA==>"
        );
        assert!(parse_value("new ArrayBuffer(-1)").is_err());
        assert!(parse_value("Buffer.from('zz', 'hex')").is_err());
    }

    #[test]
    fn test_other_builtins() {
        assert_eq!(classify(&read("Symbol('id')")), Category::UniqueSymbol);
        assert_eq!(render(&read("Symbol()")), "Symbol()");
        assert_eq!(classify(&read("Promise.resolve(1)")), Category::Unknown);
        assert_eq!(classify(&read("new Promise((resolve) => resolve())")), Category::Unknown);
        assert_eq!(classify(&read("new WeakMap()")), Category::Unknown);
        assert_eq!(render(&read("new Person('x')")), "Person {}");
        assert_eq!(render(&read("new Error('boom')")), "Error { message: 'boom' }");
    }

    #[test]
    fn test_errors() {
        let err = parse_value("[1, 2").unwrap_err();
        assert_eq!(err.to_string(), "1:6: unexpected end of input, expected ',' or ']'");

        let err = parse_value("foo").unwrap_err();
        assert!(matches!(err, ParseError::UnknownIdentifier { ref name, .. } if name == "foo"));

        let err = parse_value("{\n  a: @ }").unwrap_err();
        assert_eq!(err.position(), (2, 6));

        assert!(parse_value("1 2").is_err());
        assert!(parse_value("").is_err());
        assert!(parse_value("-'a'").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "[".repeat(10_000), "]".repeat(10_000));
        let err = parse_value(&deep).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { ref message, .. } if message == "nesting too deep"));

        let objects = format!("{}1{}", "{ a: ".repeat(10_000), " }".repeat(10_000));
        assert!(parse_value(&objects).is_err());
        let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(parse_value(&parens).is_err());
        let signs = format!("{}1", "- ".repeat(10_000));
        assert!(parse_value(&signs).is_err());

        let depth = MAX_NESTING - 1;
        let fits = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(classify(&read(&fits)), Category::Sequence);
    }

    #[test]
    fn test_length_limits() {
        assert!(parse_value("new Array(1073741823)").is_err());
        assert!(parse_value("new Array(65537)").is_err());
        assert_eq!(render(&read("new Array(2)")), "[ undefined, undefined ]");
        assert!(parse_value("new ArrayBuffer(1073741824)").is_err());
        assert!(parse_value("Buffer.alloc(16777217)").is_err());
        assert!(parse_value("new Uint8Array(2.5)").is_err());
    }
}
