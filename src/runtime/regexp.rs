//! JavaScript RegExp
//!
//! A regular expression keeps the source text and flags it was written
//! with, and a compiled `regex::Regex` used for matching. Sticky patterns
//! only match at the start of the input.

use std::fmt;

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

use crate::util::utf16_len;

/// Errors that can occur while building a regular expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegExpError {
    #[error("invalid regular expression flag '{0}'")]
    InvalidFlag(char),

    #[error("duplicate regular expression flag '{0}'")]
    DuplicateFlag(char),

    #[error("invalid regular expression /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// RegExp flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegExpFlags(u8);

impl RegExpFlags {
    pub const GLOBAL: u8 = 1 << 0;
    pub const IGNORE_CASE: u8 = 1 << 1;
    pub const MULTILINE: u8 = 1 << 2;
    pub const DOT_ALL: u8 = 1 << 3;
    pub const UNICODE: u8 = 1 << 4;
    pub const STICKY: u8 = 1 << 5;

    /// Flag letters in canonical order
    const LETTERS: [(char, u8); 6] = [
        ('g', Self::GLOBAL),
        ('i', Self::IGNORE_CASE),
        ('m', Self::MULTILINE),
        ('s', Self::DOT_ALL),
        ('u', Self::UNICODE),
        ('y', Self::STICKY),
    ];

    /// Parse a flag string such as `"gi"`
    pub fn parse(flags: &str) -> Result<Self, RegExpError> {
        let mut bits = 0u8;
        for c in flags.chars() {
            let bit = Self::LETTERS
                .iter()
                .find(|(letter, _)| *letter == c)
                .map(|(_, bit)| *bit)
                .ok_or(RegExpError::InvalidFlag(c))?;
            if bits & bit != 0 {
                return Err(RegExpError::DuplicateFlag(c));
            }
            bits |= bit;
        }
        Ok(RegExpFlags(bits))
    }

    #[inline]
    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    #[inline]
    pub fn is_global(self) -> bool {
        self.contains(Self::GLOBAL)
    }

    #[inline]
    pub fn is_sticky(self) -> bool {
        self.contains(Self::STICKY)
    }
}

impl fmt::Display for RegExpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, bit) in Self::LETTERS {
            if self.contains(bit) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// Result of a successful `exec`
#[derive(Debug, Clone, PartialEq)]
pub struct RegExpMatch {
    /// Start of the match in UTF-16 code units
    pub index: usize,
    /// Whole match followed by each capture group (None if it did not take part)
    pub captures: Vec<Option<String>>,
}

/// JavaScript regular expression
#[derive(Debug, Clone)]
pub struct JSRegExp {
    source: String,
    flags: RegExpFlags,
    regex: Regex,
}

impl JSRegExp {
    /// Compile `source` with the given flag string
    pub fn new(source: &str, flags: &str) -> Result<Self, RegExpError> {
        let flags = RegExpFlags::parse(flags)?;
        let pattern = if flags.is_sticky() {
            format!(r"\A(?:{})", source)
        } else {
            source.to_string()
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(flags.contains(RegExpFlags::IGNORE_CASE))
            .multi_line(flags.contains(RegExpFlags::MULTILINE))
            .dot_matches_new_line(flags.contains(RegExpFlags::DOT_ALL))
            .build()
            .map_err(|e| RegExpError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(JSRegExp {
            source: source.to_string(),
            flags,
            regex,
        })
    }

    /// `regexp.source`
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn flags(&self) -> RegExpFlags {
        self.flags
    }

    /// `regexp.test(text)`
    pub fn test(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// `regexp.exec(text)`: the first match and its capture groups
    pub fn exec(&self, text: &str) -> Option<RegExpMatch> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?;
        Some(RegExpMatch {
            index: utf16_len(&text[..whole.start()]),
            captures: caps
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()))
                .collect(),
        })
    }

    /// `text.match(regexp)`
    ///
    /// With the global flag every match is returned, otherwise only the
    /// first. An empty vector means no match.
    pub fn match_all(&self, text: &str) -> Vec<String> {
        if self.flags.is_global() {
            self.regex
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect()
        } else {
            self.regex
                .find(text)
                .map(|m| m.as_str().to_string())
                .into_iter()
                .collect()
        }
    }

    /// `text.replace(regexp, replacement)`
    ///
    /// Replaces every match with the global flag, otherwise the first.
    /// The replacement understands `$&`, `$1`..`$99` and `$$`.
    pub fn replace(&self, text: &str, replacement: &str) -> String {
        let expand = |caps: &Captures<'_>| expand_replacement(caps, replacement);
        if self.flags.is_global() {
            self.regex.replace_all(text, expand).into_owned()
        } else {
            self.regex.replace(text, expand).into_owned()
        }
    }
}

/// Expand a JavaScript replacement template against one match
fn expand_replacement(caps: &Captures<'_>, template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().map(|&(_, next)| next) {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('&') => {
                chars.next();
                out.push_str(caps.get(0).map_or("", |m| m.as_str()));
            }
            Some(d) if d.is_ascii_digit() => {
                let mut group = 0usize;
                let mut digits = 0;
                while let Some(&(_, d)) = chars.peek() {
                    let Some(v) = d.to_digit(10) else { break };
                    let next = group * 10 + v as usize;
                    // Prefer the longest reference that names an existing group
                    if digits == 2 || (digits == 1 && next >= caps.len()) {
                        break;
                    }
                    group = next;
                    digits += 1;
                    chars.next();
                }
                if group == 0 || group >= caps.len() {
                    out.push('$');
                    out.push_str(&group.to_string());
                } else {
                    out.push_str(caps.get(group).map_or("", |m| m.as_str()));
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

/// `String(regexp)`: `/source/flags`
impl fmt::Display for JSRegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        write!(f, "/{}/{}", source, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse_and_display() {
        let flags = RegExpFlags::parse("yig").unwrap();
        assert!(flags.is_global());
        assert!(flags.contains(RegExpFlags::IGNORE_CASE));
        assert_eq!(flags.to_string(), "giy");

        assert_eq!(RegExpFlags::parse("gg"), Err(RegExpError::DuplicateFlag('g')));
        assert_eq!(RegExpFlags::parse("x"), Err(RegExpError::InvalidFlag('x')));
    }

    #[test]
    fn test_email_pattern() {
        let re = JSRegExp::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", "").unwrap();
        assert!(re.test("test@example.com"));
        assert!(!re.test("invalid.email"));
    }

    #[test]
    fn test_match_global() {
        let re = JSRegExp::new(r"\d+", "g").unwrap();
        assert_eq!(re.match_all("abc123def456"), vec!["123", "456"]);

        let first = JSRegExp::new(r"\d+", "").unwrap();
        assert_eq!(first.match_all("abc123def456"), vec!["123"]);
        assert!(first.match_all("none").is_empty());
    }

    #[test]
    fn test_replace() {
        let re = JSRegExp::new("a", "g").unwrap();
        assert_eq!(re.replace("banana", "o"), "bonono");

        let re = JSRegExp::new("a", "").unwrap();
        assert_eq!(re.replace("banana", "o"), "bonana");

        let re = JSRegExp::new(r"(\w+)@(\w+)", "").unwrap();
        assert_eq!(re.replace("me@host", "$2 at $1 ($&) $$"), "host at me (me@host) $");
    }

    #[test]
    fn test_exec_reports_utf16_index() {
        let re = JSRegExp::new(r"(\d)(x)?", "").unwrap();
        let m = re.exec("日本7").unwrap();
        assert_eq!(m.index, 2);
        assert_eq!(m.captures, vec![Some("7".to_string()), Some("7".to_string()), None]);
        assert!(re.exec("none").is_none());
    }

    #[test]
    fn test_case_insensitive_and_sticky() {
        let re = JSRegExp::new("hello", "i").unwrap();
        assert!(re.test("HeLLo world"));

        let sticky = JSRegExp::new("b", "y").unwrap();
        assert!(!sticky.test("ab"));
        assert!(sticky.test("ba"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = JSRegExp::new("(", "").unwrap_err();
        assert!(matches!(err, RegExpError::InvalidPattern { .. }));
        assert!(err.to_string().starts_with("invalid regular expression /(/"));
    }

    #[test]
    fn test_display() {
        let re = JSRegExp::new(r"\d+", "gi").unwrap();
        assert_eq!(re.to_string(), r"/\d+/gi");
        assert_eq!(re.source(), r"\d+");
        assert_eq!(JSRegExp::new("", "").unwrap().to_string(), "/(?:)/");
    }
}
