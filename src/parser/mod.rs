//! JavaScript literal parser
//!
//! Tokenizes and reads literal expressions into runtime values.

pub mod lexer;
pub mod reader;

// Re-exports
pub use lexer::{Lexer, SourcePos, Token};
pub use reader::{parse_value, ParseError};
