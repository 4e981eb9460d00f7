//! Runtime support
//!
//! This module contains the runtime types a value can be made of:
//! - Arrays, plain objects and their property tables
//! - Keyed and deduplicating collections (Map, Set)
//! - Functions, symbols, dates, regular expressions
//! - Binary buffers and promises
//! - Type conversions between them

pub mod array;
pub mod buffer;
pub mod convert;
pub mod date;
pub mod function;
pub mod map;
pub mod object;
pub mod promise;
pub mod property;
pub mod regexp;
pub mod set;
pub mod symbol;

pub use array::{JSArray, MAX_ARRAY_LENGTH};
pub use buffer::{BufferKind, ByteBuffer};
pub use date::JSDate;
pub use function::{declared_length, Function, FunctionKind, NativeFn};
pub use map::JSMap;
pub use object::JSObject;
pub use promise::{Promise, PromiseState};
pub use property::{OrderedTable, PropertyTable};
pub use regexp::{JSRegExp, RegExpError, RegExpFlags, RegExpMatch};
pub use set::JSSet;
pub use symbol::Symbol;
