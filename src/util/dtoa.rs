//! Double to ASCII conversion
//!
//! Number-to-text conversion following the ECMAScript `Number::toString`
//! rules: shortest round-trip digits, plain notation for magnitudes in
//! `[1e-6, 1e21)`, exponent notation elsewhere.

/// Largest exponent (exclusive) still printed in plain notation
const PLAIN_MAX_EXP: i32 = 21;

/// Smallest exponent (exclusive) still printed in plain notation
const PLAIN_MIN_EXP: i32 = -6;

/// Convert a double to its JavaScript textual form
pub fn number_to_string(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }
    if val == 0.0 {
        // -0 prints as "0"
        return "0".to_string();
    }
    if val.is_infinite() {
        return if val > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if val < 0.0 {
        let mut s = String::from("-");
        s.push_str(&number_to_string(-val));
        return s;
    }

    let (digits, n) = shortest_digits(val);
    let k = digits.len() as i32;
    let mut out = String::with_capacity(digits.len() + 8);

    if k <= n && n <= PLAIN_MAX_EXP {
        // Integer with trailing zeros: 1e20 -> "100000000000000000000"
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (n - k) as usize));
    } else if 0 < n && n <= PLAIN_MAX_EXP {
        // Decimal point inside the digits: 3.14
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if PLAIN_MIN_EXP < n && n <= 0 {
        // Leading zeros after the point: 0.000123
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-n) as usize));
        out.push_str(&digits);
    } else {
        let e = n - 1;
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.unsigned_abs().to_string());
    }

    out
}

/// Split a positive finite double into its shortest decimal digits and the
/// decimal exponent `n` such that `val = 0.d1d2...dk * 10^n`.
fn shortest_digits(val: f64) -> (String, i32) {
    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e-7"
    let formatted = format!("{:e}", val);
    let (mantissa, exp) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exp + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_values() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
    }

    #[test]
    fn test_plain_notation() {
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(3.14), "3.14");
        assert_eq!(number_to_string(-2.5), "-2.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(0.000001), "0.000001");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
        assert_eq!(number_to_string(9007199254740991.0), "9007199254740991");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e300), "1.5e+300");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(-1.25e-10), "-1.25e-10");
        assert_eq!(number_to_string(5e-324), "5e-324");
    }
}
