//! Utility functions
//!
//! Text and number helpers shared by the runtime and the inspector.

pub mod dtoa;
pub mod encoding;

pub use dtoa::number_to_string;
pub use encoding::{base64_decode, base64_encode, hex_decode, hex_encode};

/// Length of a string in UTF-16 code units (the JavaScript `length`)
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Quote a string with single quotes, escaping the quote, backslash and
/// control characters
pub fn quote_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\x{:02X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Whether `name` can be written as a bare object key
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_len() {
        assert_eq!(utf16_len("Hello, JavaScript!"), 18);
        assert_eq!(utf16_len("中文"), 2);
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn test_quote_js_string() {
        assert_eq!(quote_js_string("value"), "'value'");
        assert_eq!(quote_js_string("it's"), "'it\\'s'");
        assert_eq!(quote_js_string("a\nb"), "'a\\nb'");
        assert_eq!(quote_js_string("\u{1}"), "'\\x01'");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private$"));
        assert!(is_identifier("名前"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier(""));
    }
}
