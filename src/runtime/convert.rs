//! Type conversions
//!
//! The abstract operations JavaScript applies implicitly: `Boolean(v)`,
//! `Number(v)`, `String(v)`, plus the global `parseInt` and `parseFloat`.

use malachite::Integer;

use crate::runtime::BufferKind;
use crate::util::number_to_string;
use crate::value::Value;

/// `Boolean(value)`
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => !(f.is_nan() || *f == 0.0),
        Value::BigInt(n) => **n != Integer::from(0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// `Number(value)`
///
/// Aggregates convert through their string form, so `[5]` is 5 and
/// `{}` is NaN. Symbols give NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::BigInt(n) => n.to_string().parse().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Symbol(_) => f64::NAN,
        Value::Date(d) => d.time(),
        Value::Array(_) => string_to_number(&to_js_string(value)),
        _ => f64::NAN,
    }
}

/// Convert string contents to a number
///
/// Surrounding whitespace is ignored and the empty string is 0. Accepts
/// decimal literals, `Infinity` and the `0x`/`0o`/`0b` prefixes.
pub fn string_to_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return 0.0;
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(digits) = s.strip_prefix(prefix) {
            return radix_digits(digits, radix).unwrap_or(f64::NAN);
        }
    }

    let (sign, unsigned) = split_sign(s);
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if decimal_prefix_len(unsigned) != unsigned.len() {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

/// `parseInt(text, radix)`
///
/// Parses the longest run of valid digits after optional whitespace and
/// sign. Radix None (or 0) means 10, or 16 when the text starts with
/// `0x`. Returns NaN when no digit is found or the radix is outside 2..=36.
pub fn parse_int(text: &str, radix: Option<u32>) -> f64 {
    let (sign, mut s) = split_sign(text.trim_start());

    let mut radix = radix.unwrap_or(0);
    let hex_prefix = s.starts_with("0x") || s.starts_with("0X");
    if radix == 0 {
        radix = if hex_prefix { 16 } else { 10 };
    }
    if !(2..=36).contains(&radix) {
        return f64::NAN;
    }
    if radix == 16 && hex_prefix {
        s = &s[2..];
    }

    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(s.len(), |(i, _)| i);
    radix_digits(&s[..end], radix).map_or(f64::NAN, |n| sign * n)
}

/// `parseFloat(text)`
pub fn parse_float(text: &str) -> f64 {
    let (sign, s) = split_sign(text.trim_start());
    if s.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }
    let len = decimal_prefix_len(s);
    s[..len].parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

/// Check if a string is a canonical array index (`"0"`, `"17"`, not `"01"`)
pub fn is_array_index(s: &str) -> Option<u32> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&n| n < u32::MAX)
}

fn split_sign(s: &str) -> (f64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest)
    } else {
        (1.0, s.strip_prefix('+').unwrap_or(s))
    }
}

/// Accumulate digits in `radix`; None if empty or a digit is invalid
fn radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// Length of the longest prefix of `s` that is an unsigned decimal literal
///
/// Returns 0 if there is no mantissa digit. An exponent is only taken when
/// at least one exponent digit follows.
fn decimal_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let int_end = digits_from(0);
    let mut end = int_end;
    let mut has_digits = int_end > 0;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut i = end + 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits_from(i);
        if exp_end > i {
            end = exp_end;
        }
    }
    end
}

/// `String(value)`
///
/// Arrays join their elements with `,`; an array reached again while it is
/// being joined contributes an empty string.
pub fn to_js_string(value: &Value) -> String {
    let mut joining = Vec::new();
    string_of(value, &mut joining)
}

/// Join values the way `Array.prototype.join` does
pub(crate) fn join_values(values: &[Value], separator: &str) -> String {
    let mut joining = Vec::new();
    join_with(values, separator, &mut joining)
}

fn join_with(values: &[Value], separator: &str, joining: &mut Vec<usize>) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| {
            if v.is_nullish() {
                String::new()
            } else {
                string_of(v, joining)
            }
        })
        .collect();
    parts.join(separator)
}

fn string_of(value: &Value, joining: &mut Vec<usize>) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => number_to_string(*f),
        Value::BigInt(n) => n.to_string(),
        Value::String(s) => s.to_string(),
        Value::Symbol(s) => s.to_string(),
        Value::Array(a) => {
            let id = value.identity().unwrap_or_default();
            if joining.contains(&id) {
                return String::new();
            }
            joining.push(id);
            let out = join_with(a.borrow().as_slice(), ",", joining);
            joining.pop();
            out
        }
        Value::Object(_) => "[object Object]".to_string(),
        Value::Map(_) => "[object Map]".to_string(),
        Value::Set(_) => "[object Set]".to_string(),
        Value::Function(f) => format!(
            "function {}() {{ [native code] }}",
            f.name().unwrap_or_default()
        ),
        Value::Date(d) => d.to_js_string(),
        Value::RegExp(r) => r.to_string(),
        Value::Buffer(b) => {
            let b = b.borrow();
            match b.kind() {
                BufferKind::Buffer => b.to_utf8_lossy(),
                BufferKind::Uint8Array | BufferKind::Int8Array => {
                    join_with(&b.elements(), ",", joining)
                }
                kind => format!("[object {}]", kind.name()),
            }
        }
        Value::Promise(_) => "[object Promise]".to_string(),
        Value::Weak(w) => format!("[object {}]", w.name()),
    }
}
