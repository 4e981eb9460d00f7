//! JavaScript function types
//!
//! A function value carries what an inspector can see from outside: its
//! name, its declared parameter count and its kind. Functions built from
//! Rust closures also carry a body and can be called; functions read from
//! source text are opaque.

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Native function body
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Value>;

/// Function kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Regular function
    Normal,
    /// Arrow function (lexical this)
    Arrow,
    /// Method
    Method,
    /// Built-in implemented in Rust
    Native,
}

/// A callable value
#[derive(Clone)]
pub struct Function {
    /// Function name (None for anonymous functions)
    name: Option<Rc<str>>,
    /// Declared parameter count (`fn.length`), if known
    arity: Option<u32>,
    kind: FunctionKind,
    body: Option<NativeFn>,
}

impl Function {
    /// Create an opaque function with no callable body
    pub fn new(name: Option<&str>, arity: Option<u32>, kind: FunctionKind) -> Self {
        Function {
            name: name.filter(|n| !n.is_empty()).map(Rc::from),
            arity,
            kind,
            body: None,
        }
    }

    /// Create a callable function backed by a Rust closure
    pub fn native(name: &str, arity: u32, body: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Function {
            name: (!name.is_empty()).then(|| Rc::from(name)),
            arity: Some(arity),
            kind: FunctionKind::Native,
            body: Some(Rc::new(body)),
        }
    }

    /// Same function with a different kind
    pub fn with_kind(mut self, kind: FunctionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Same function under a different name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = (!name.is_empty()).then(|| Rc::from(name));
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn arity(&self) -> Option<u32> {
        self.arity
    }

    #[inline]
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Check if the function has a body that can run
    #[inline]
    pub fn is_callable(&self) -> bool {
        self.body.is_some()
    }

    /// Call the function
    ///
    /// Missing arguments are not padded; the body sees exactly `args`.
    /// Opaque functions return undefined.
    pub fn call(&self, args: &[Value]) -> Value {
        match &self.body {
            Some(body) => body(args),
            None => Value::undefined(),
        }
    }
}

/// The JavaScript `length` of a parameter list
///
/// Counts parameters up to the first one with a default value or a rest
/// parameter: `(a, b = 1) => a + b` has length 1.
pub fn declared_length(has_default_or_rest: impl IntoIterator<Item = bool>) -> u32 {
    has_default_or_rest
        .into_iter()
        .take_while(|&special| !special)
        .count() as u32
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("kind", &self.kind)
            .field("callable", &self.is_callable())
            .finish()
    }
}
