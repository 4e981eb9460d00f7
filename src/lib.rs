//! jsinspect - classify and describe JavaScript runtime values
//!
//! A host model of JavaScript values (primitives, arrays, records, maps,
//! sets, functions, dates, regular expressions, byte buffers, promises) and
//! a `ValueDescriber` that maps any of them to a `Category` and a
//! deterministic one-line description.
//!
//! # Features
//! - Total classification into 19 categories
//! - `util.inspect`-style rendering with depth limits and cycle detection
//! - Arbitrary-precision integers
//! - A literal reader for building values from JavaScript source text
//!
//! # Example
//! ```
//! use jsinspect::{describe, parse_value, Value};
//!
//! assert_eq!(describe(&Value::int(42)), "Integer: 42");
//!
//! let set = parse_value("new Set([1, 2, 3, 3])").unwrap();
//! assert_eq!(describe(&set), "UniqueSet: Set(3) { 1, 2, 3 }");
//! ```

// Core modules
pub mod value;

// Runtime support
pub mod runtime;

// Classification and rendering
pub mod inspect;

// Literal parser
pub mod parser;

// Demonstration tour
pub mod tour;

// Utilities
pub mod util;

// Re-export main types
pub use inspect::{classify, describe, Category, InspectOptions, ValueDescriber};
pub use parser::{parse_value, ParseError};
pub use value::Value;
