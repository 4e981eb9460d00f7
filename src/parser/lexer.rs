//! JavaScript lexer/tokenizer
//!
//! Converts source text into a stream of tokens. The lexer knows the full
//! operator set so that function bodies can be skipped token by token,
//! but regular expression literals are only recognised when the reader
//! asks for one (a `/` is otherwise a division operator).

use std::fmt;

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64),
    /// BigInt literal without the `n` suffix, radix prefix kept (`0xff`)
    BigInt(String),
    String(String),
    /// Template literal contents, substitutions left as written
    Template(String),
    Ident(String),
    RegExp { pattern: String, flags: String },

    // Operators and punctuation
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,  // **
    PlusPlus,  // ++
    MinusMinus, // --

    Eq,        // =
    EqEq,      // ==
    EqEqEq,    // ===
    Bang,      // !
    BangEq,    // !=
    BangEqEq,  // !==
    Arrow,     // =>

    Lt,        // <
    LtEq,      // <=
    Gt,        // >
    GtEq,      // >=

    LtLt,      // <<
    GtGt,      // >>
    GtGtGt,    // >>>

    Amp,       // &
    AmpAmp,    // &&
    Pipe,      // |
    PipePipe,  // ||
    Caret,     // ^
    Tilde,     // ~

    Question,  // ?
    QuestionQuestion, // ??
    QuestionDot, // ?.
    Colon,     // :
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
    Ellipsis,  // ...

    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }

    // Compound assignment
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    StarStarEq,
    LtLtEq,
    GtGtEq,
    GtGtGtEq,
    AmpEq,
    PipeEq,
    CaretEq,

    // Keywords that start a literal
    False,
    Function,
    New,
    Null,
    True,

    // Special
    Eof,
    Error(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::BigInt(digits) => write!(f, "bigint {}n", digits),
            Token::String(s) => write!(f, "string {:?}", s),
            Token::Template(_) => write!(f, "template literal"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::RegExp { pattern, flags } => write!(f, "regular expression /{}/{}", pattern, flags),
            Token::False => write!(f, "'false'"),
            Token::Function => write!(f, "'function'"),
            Token::New => write!(f, "'new'"),
            Token::Null => write!(f, "'null'"),
            Token::True => write!(f, "'true'"),
            Token::Eof => write!(f, "end of input"),
            Token::Error(message) => write!(f, "{}", message),
            punct => write!(f, "'{}'", punct.punctuator()),
        }
    }
}

impl Token {
    /// Source text of an operator or punctuation token
    fn punctuator(&self) -> &'static str {
        match self {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::StarStar => "**",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::Eq => "=",
            Token::EqEq => "==",
            Token::EqEqEq => "===",
            Token::Bang => "!",
            Token::BangEq => "!=",
            Token::BangEqEq => "!==",
            Token::Arrow => "=>",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::LtLt => "<<",
            Token::GtGt => ">>",
            Token::GtGtGt => ">>>",
            Token::Amp => "&",
            Token::AmpAmp => "&&",
            Token::Pipe => "|",
            Token::PipePipe => "||",
            Token::Caret => "^",
            Token::Tilde => "~",
            Token::Question => "?",
            Token::QuestionQuestion => "??",
            Token::QuestionDot => "?.",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::Ellipsis => "...",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::PlusEq => "+=",
            Token::MinusEq => "-=",
            Token::StarEq => "*=",
            Token::SlashEq => "/=",
            Token::PercentEq => "%=",
            Token::StarStarEq => "**=",
            Token::LtLtEq => "<<=",
            Token::GtGtEq => ">>=",
            Token::GtGtGtEq => ">>>=",
            Token::AmpEq => "&=",
            Token::PipeEq => "|=",
            Token::CaretEq => "^=",
            _ => "?",
        }
    }
}

/// Source position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourcePos {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Lexer for JavaScript source code
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    /// Where the most recent token started
    token_start: SourcePos,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            token_start: SourcePos {
                offset: 0,
                line: 1,
                column: 1,
            },
        }
    }

    /// Get the current source position
    pub fn position(&self) -> SourcePos {
        SourcePos {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Position of the first character of the last token read
    #[inline]
    pub fn token_position(&self) -> SourcePos {
        self.token_start
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    /// Peek at the next character
    fn peek_next(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    /// Consume the current byte
    ///
    /// Columns count characters, so UTF-8 continuation bytes do not move
    /// the column.
    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if c & 0xC0 != 0x80 {
            self.column += 1;
        }
        Some(c)
    }

    fn text(&self, start: usize) -> &'a str {
        std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("")
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.advance();
                }
                // U+00A0 and U+FEFF
                Some(0xC2) if self.peek_next() == Some(0xA0) => {
                    self.advance();
                    self.advance();
                }
                Some(0xEF) if self.source.get(self.pos + 1..self.pos + 3) == Some(&[0xBB, 0xBF][..]) => {
                    for _ in 0..3 {
                        self.advance();
                    }
                }
                Some(b'/') if self.peek_next() == Some(b'/') => {
                    // Line comment
                    while let Some(c) = self.advance() {
                        if c == b'\n' {
                            break;
                        }
                    }
                }
                Some(b'/') if self.peek_next() == Some(b'*') => {
                    // Block comment
                    self.advance(); // /
                    self.advance(); // *
                    while let Some(c) = self.advance() {
                        if c == b'*' && self.peek() == Some(b'/') {
                            self.advance();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Read the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.position();

        let Some(c) = self.peek() else {
            return Token::Eof;
        };

        // Identifiers and keywords
        if c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80 {
            return self.read_identifier();
        }

        // Numbers
        if c.is_ascii_digit() || (c == b'.' && self.peek_next().is_some_and(|n| n.is_ascii_digit())) {
            return self.read_number();
        }

        // Strings
        if c == b'"' || c == b'\'' {
            return self.read_string();
        }
        if c == b'`' {
            return self.read_template();
        }

        // Operators and punctuation
        self.advance();
        match c {
            b'+' => match self.peek() {
                Some(b'+') => { self.advance(); Token::PlusPlus }
                Some(b'=') => { self.advance(); Token::PlusEq }
                _ => Token::Plus
            }
            b'-' => match self.peek() {
                Some(b'-') => { self.advance(); Token::MinusMinus }
                Some(b'=') => { self.advance(); Token::MinusEq }
                _ => Token::Minus
            }
            b'*' => match self.peek() {
                Some(b'*') => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        Token::StarStarEq
                    } else {
                        Token::StarStar
                    }
                }
                Some(b'=') => { self.advance(); Token::StarEq }
                _ => Token::Star
            }
            b'/' => match self.peek() {
                Some(b'=') => { self.advance(); Token::SlashEq }
                _ => Token::Slash
            }
            b'%' => match self.peek() {
                Some(b'=') => { self.advance(); Token::PercentEq }
                _ => Token::Percent
            }
            b'=' => match self.peek() {
                Some(b'=') => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        Token::EqEqEq
                    } else {
                        Token::EqEq
                    }
                }
                Some(b'>') => { self.advance(); Token::Arrow }
                _ => Token::Eq
            }
            b'!' => match self.peek() {
                Some(b'=') => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        Token::BangEqEq
                    } else {
                        Token::BangEq
                    }
                }
                _ => Token::Bang
            }
            b'<' => match self.peek() {
                Some(b'<') => {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        Token::LtLtEq
                    } else {
                        Token::LtLt
                    }
                }
                Some(b'=') => { self.advance(); Token::LtEq }
                _ => Token::Lt
            }
            b'>' => match self.peek() {
                Some(b'>') => {
                    self.advance();
                    match self.peek() {
                        Some(b'>') => {
                            self.advance();
                            if self.peek() == Some(b'=') {
                                self.advance();
                                Token::GtGtGtEq
                            } else {
                                Token::GtGtGt
                            }
                        }
                        Some(b'=') => { self.advance(); Token::GtGtEq }
                        _ => Token::GtGt
                    }
                }
                Some(b'=') => { self.advance(); Token::GtEq }
                _ => Token::Gt
            }
            b'&' => match self.peek() {
                Some(b'&') => { self.advance(); Token::AmpAmp }
                Some(b'=') => { self.advance(); Token::AmpEq }
                _ => Token::Amp
            }
            b'|' => match self.peek() {
                Some(b'|') => { self.advance(); Token::PipePipe }
                Some(b'=') => { self.advance(); Token::PipeEq }
                _ => Token::Pipe
            }
            b'^' => match self.peek() {
                Some(b'=') => { self.advance(); Token::CaretEq }
                _ => Token::Caret
            }
            b'?' => match self.peek() {
                Some(b'?') => { self.advance(); Token::QuestionQuestion }
                Some(b'.') => { self.advance(); Token::QuestionDot }
                _ => Token::Question
            }
            b'.' => {
                if self.peek() == Some(b'.') && self.peek_next() == Some(b'.') {
                    self.advance();
                    self.advance();
                    Token::Ellipsis
                } else {
                    Token::Dot
                }
            }
            b'~' => Token::Tilde,
            b':' => Token::Colon,
            b';' => Token::Semicolon,
            b',' => Token::Comma,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            _ => Token::Error(format!("Unexpected character: {}", c as char))
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80 {
                self.advance();
            } else {
                break;
            }
        }

        let ident = self.text(start);
        match ident {
            "false" => Token::False,
            "function" => Token::Function,
            "new" => Token::New,
            "null" => Token::Null,
            "true" => Token::True,
            "" => Token::Error("Invalid UTF-8 in identifier".to_string()),
            _ => Token::Ident(ident.to_string())
        }
    }

    /// Read a number literal, including `0x`/`0o`/`0b` forms and BigInts
    fn read_number(&mut self) -> Token {
        let start = self.pos;

        let radix = match (self.peek(), self.peek_next()) {
            (Some(b'0'), Some(b'x' | b'X')) => 16,
            (Some(b'0'), Some(b'o' | b'O')) => 8,
            (Some(b'0'), Some(b'b' | b'B')) => 2,
            _ => 10,
        };
        if radix != 10 {
            self.advance();
            self.advance();
            let digits_start = self.pos;
            while let Some(c) = self.peek() {
                if (c as char).is_digit(radix) || c == b'_' {
                    self.advance();
                } else {
                    break;
                }
            }
            let digits = self.text(digits_start).replace('_', "");
            if digits.is_empty() {
                return Token::Error(format!("Invalid number: {}", self.text(start)));
            }
            if self.peek() == Some(b'n') {
                self.advance();
                return Token::BigInt(self.text(start).trim_end_matches('n').replace('_', ""));
            }
            return match u64::from_str_radix(&digits, radix) {
                Ok(n) => Token::Number(n as f64),
                Err(_) => Token::Number(
                    digits
                        .chars()
                        .filter_map(|c| c.to_digit(radix))
                        .fold(0.0, |acc, d| acc * radix as f64 + d as f64),
                ),
            };
        }

        // Integer part
        self.skip_digits();

        // BigInt suffix on a plain integer
        if self.peek() == Some(b'n') {
            let digits = self.text(start).replace('_', "");
            self.advance();
            return Token::BigInt(digits);
        }

        // Decimal part
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // .
            self.skip_digits();
        } else if self.peek() == Some(b'.') && self.pos > start {
            // `1.` is a complete number
            self.advance();
        }

        // Exponent part
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.advance();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance();
            }
            self.skip_digits();
        }

        let num_str = self.text(start).replace('_', "");
        match num_str.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Error(format!("Invalid number: {}", num_str))
        }
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == b'_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read exactly `count` hex digits
    fn read_hex(&mut self, count: usize) -> Option<u32> {
        let mut value = 0;
        for _ in 0..count {
            let d = (self.peek()? as char).to_digit(16)?;
            self.advance();
            value = value * 16 + d;
        }
        Some(value)
    }

    /// Read the code unit or code point after `\u`
    fn read_unicode_escape(&mut self) -> Option<u32> {
        if self.peek() == Some(b'{') {
            self.advance();
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = self.peek().and_then(|c| (c as char).to_digit(16)) {
                self.advance();
                value = value.checked_mul(16)?.checked_add(d)?;
                digits += 1;
            }
            if digits == 0 || self.advance() != Some(b'}') || value > 0x10FFFF {
                return None;
            }
            Some(value)
        } else {
            self.read_hex(4)
        }
    }

    /// Read a string literal
    fn read_string(&mut self) -> Token {
        let Some(quote) = self.advance() else {
            return Token::Eof;
        };
        let mut bytes = Vec::new();

        loop {
            match self.peek() {
                None | Some(b'\n') => return Token::Error("Unterminated string".to_string()),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(b'\\') => {
                    self.advance();
                    if let Err(message) = self.read_escape(&mut bytes) {
                        return Token::Error(message);
                    }
                }
                Some(c) => {
                    self.advance();
                    bytes.push(c);
                }
            }
        }

        match String::from_utf8(bytes) {
            Ok(s) => Token::String(s),
            Err(_) => Token::Error("Invalid UTF-8 in string".to_string()),
        }
    }

    /// Decode one escape sequence (the backslash already consumed)
    fn read_escape(&mut self, out: &mut Vec<u8>) -> Result<(), String> {
        match self.advance() {
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'b') => out.push(0x08),
            Some(b'f') => out.push(0x0C),
            Some(b'v') => out.push(0x0B),
            Some(b'0') if !self.peek().is_some_and(|c| c.is_ascii_digit()) => out.push(0),
            // Line continuation
            Some(b'\n') => {}
            Some(b'x') => {
                let code = self.read_hex(2).ok_or("Invalid hexadecimal escape")?;
                push_char(out, code);
            }
            Some(b'u') => {
                let code = self.read_unicode_escape().ok_or("Invalid Unicode escape")?;
                let code = if (0xD800..0xDC00).contains(&code) && self.peek() == Some(b'\\') {
                    // Try to join a surrogate pair
                    let save = self.clone();
                    self.advance();
                    let low = if self.advance() == Some(b'u') {
                        self.read_unicode_escape()
                    } else {
                        None
                    };
                    match low {
                        Some(low @ 0xDC00..=0xDFFF) => {
                            0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
                        }
                        _ => {
                            *self = save;
                            code
                        }
                    }
                } else {
                    code
                };
                push_char(out, code);
            }
            Some(c) => out.push(c),
            None => return Err("Unterminated string".to_string()),
        }
        Ok(())
    }

    /// Read a template literal; `${...}` substitutions are kept verbatim
    fn read_template(&mut self) -> Token {
        self.advance(); // `
        let mut bytes = Vec::new();

        loop {
            match self.peek() {
                None => return Token::Error("Unterminated template literal".to_string()),
                Some(b'`') => {
                    self.advance();
                    break;
                }
                Some(b'\\') => {
                    self.advance();
                    if let Err(message) = self.read_escape(&mut bytes) {
                        return Token::Error(message);
                    }
                }
                Some(c) => {
                    self.advance();
                    bytes.push(c);
                }
            }
        }

        match String::from_utf8(bytes) {
            Ok(s) => Token::Template(s),
            Err(_) => Token::Error("Invalid UTF-8 in template literal".to_string()),
        }
    }

    /// Read a regular expression literal
    ///
    /// Called by the reader after it received `Slash` or `SlashEq` in a
    /// position where a value is expected. The pattern starts right after
    /// the slash, so a consumed `=` becomes part of it.
    pub fn read_regexp(&mut self) -> Token {
        let start = self.token_start.offset + 1;
        let mut in_class = false;

        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Token::Error("Unterminated regular expression".to_string());
                }
                Some(b'\\') => {
                    self.advance();
                    if self.advance().is_none() {
                        return Token::Error("Unterminated regular expression".to_string());
                    }
                }
                Some(b'[') => {
                    in_class = true;
                    self.advance();
                }
                Some(b']') => {
                    in_class = false;
                    self.advance();
                }
                Some(b'/') if !in_class => break,
                Some(_) => {
                    self.advance();
                }
            }
        }
        let pattern = self.text(start).to_string();
        self.advance(); // closing /

        let flags_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let flags = self.text(flags_start).to_string();
        Token::RegExp { pattern, flags }
    }
}

/// Append a code point as UTF-8; lone surrogates become U+FFFD
fn push_char(out: &mut Vec<u8>, code: u32) {
    let c = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut buf = [0; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
