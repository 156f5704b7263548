//! # Scalar Coercion
//!
//! Converts an arbitrary [`Value`] into a valid scalar of a fixed type. The
//! shared rule for the numeric coercions is that NaN is never a valid
//! output: whenever conversion yields NaN the caller's fallback is returned
//! instead. String coercion never stringifies; a non-string input yields
//! the fallback.
//!
//! None of these functions fail. Substituted fallbacks are reported as
//! `trace`-level events.

use std::borrow::Cow;

use tracing::trace;

use crate::value::{number_text, Value};

/// Numeric coercion: the value converted to a number, or `fallback` if the
/// conversion yields NaN.
///
/// Conversion rules:
///
/// | Input | Number |
/// |-------|--------|
/// | `Undefined` | NaN |
/// | `Null` | 0 |
/// | `Bool` | 0 or 1 |
/// | `Number` | itself |
/// | `String` | trimmed numeric literal (empty is 0), else NaN |
/// | `Array` | empty is 0, one element converts through its text form, else NaN |
/// | `Object`, `Record` | NaN |
/// | `Timestamp` | epoch milliseconds |
pub fn safe_num(value: &Value, fallback: f64) -> f64 {
    let n = to_number(value);
    if n.is_nan() {
        trace!(kind = value.kind(), fallback, "numeric coercion substituted fallback");
        fallback
    } else {
        n
    }
}

/// Integer coercion: the leading integer of the value's text form, or
/// `fallback` if no integer can be read.
///
/// `"42.9"` and `42.9` both give 42, `"12px"` gives 12, `"0x1f"` gives 31.
/// Results outside the `i64` range saturate.
pub fn safe_int(value: &Value, fallback: i64) -> i64 {
    match integer_text(value).as_deref().and_then(parse_leading_int) {
        Some(n) => n,
        None => {
            trace!(kind = value.kind(), fallback, "integer coercion substituted fallback");
            fallback
        }
    }
}

/// String coercion: the string itself when the value is a `String`,
/// otherwise `fallback`. Other kinds are never stringified.
pub fn safe_str<'a>(value: &'a Value, fallback: &'a str) -> &'a str {
    match value {
        Value::String(s) => s.as_str(),
        other => {
            trace!(kind = other.kind(), fallback, "string coercion substituted fallback");
            fallback
        }
    }
}

/// Result of [`num_or`]: a coerced number, or the caller's untouched fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumOr<T> {
    Number(f64),
    Fallback(T),
}

impl<T> NumOr<T> {
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Fallback(_) => None,
        }
    }

    pub fn fallback(&self) -> Option<&T> {
        match self {
            Self::Number(_) => None,
            Self::Fallback(f) => Some(f),
        }
    }

    pub fn into_fallback(self) -> Option<T> {
        match self {
            Self::Number(_) => None,
            Self::Fallback(f) => Some(f),
        }
    }

    /// Transform the fallback, leaving a coerced number untouched.
    pub fn map_fallback<U>(self, f: impl FnOnce(T) -> U) -> NumOr<U> {
        match self {
            Self::Number(n) => NumOr::Number(n),
            Self::Fallback(v) => NumOr::Fallback(f(v)),
        }
    }

    /// The number, or one computed from the fallback.
    pub fn unwrap_or_else(self, f: impl FnOnce(T) -> f64) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::Fallback(v) => f(v),
        }
    }
}

impl NumOr<f64> {
    /// Collapse to a plain number when the fallback is itself numeric.
    pub fn into_f64(self) -> f64 {
        match self {
            Self::Number(n) | Self::Fallback(n) => n,
        }
    }
}

/// Numeric-or-fallback: `fallback` for `Undefined`, `Null` and the empty
/// string; otherwise the numeric coercion of the value with a zero fallback.
///
/// Only absence is screened. A present but non-numeric value such as
/// `"abc"` coerces to 0, not to `fallback`.
pub fn num_or<T>(value: &Value, fallback: T) -> NumOr<T> {
    match value {
        Value::Undefined | Value::Null => NumOr::Fallback(fallback),
        Value::String(s) if s.is_empty() => NumOr::Fallback(fallback),
        _ => NumOr::Number(safe_num(value, 0.0)),
    }
}

/// True unless the value is a NaN number.
///
/// This screens out the one number that is not usable as a number; it does
/// not attempt a conversion, so non-numeric kinds report `true`.
pub fn is_number_like(value: &Value) -> bool {
    !matches!(value, Value::Number(n) if n.is_nan())
}

/// Zero-padded serial number: the number's text left-padded with `0` to at
/// least two characters (`3` → `"03"`, `42` → `"42"`).
pub fn serial_no(num: impl Into<f64>) -> String {
    format!("{:0>2}", number_text(num.into()))
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => parse_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => element_number(single),
            _ => f64::NAN,
        },
        Value::Object(_) | Value::Record(_) => f64::NAN,
        Value::Timestamp(ts) => ts.epoch_millis() as f64,
    }
}

/// Number of a lone array element, read through its text form.
fn element_number(value: &Value) -> f64 {
    match value {
        Value::Undefined | Value::Null => 0.0,
        Value::Number(n) => *n,
        Value::String(s) => parse_number(s),
        Value::Array(_) => to_number(value),
        Value::Bool(_) | Value::Object(_) | Value::Record(_) | Value::Timestamp(_) => f64::NAN,
    }
}

fn trim_space(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Parse a whole numeric literal. Empty (after trimming) is zero.
fn parse_number(s: &str) -> f64 {
    let s = trim_space(s);
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = parse_radix_literal(s) {
        return n;
    }
    if is_decimal_literal(s.as_bytes()) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Unsigned `0x`, `0o` and `0b` literals. `None` when there is no such
/// prefix; NaN when the prefix is followed by anything but digits.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut acc = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(acc)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(bytes: &[u8]) -> bool {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Text an integer is read from. Kinds whose text can never start with a
/// digit have none.
fn integer_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(number_text(*n))),
        Value::Array(items) => items.first().and_then(integer_text),
        _ => None,
    }
}

/// Leading integer of `s`: optional whitespace, sign and `0x` prefix, then
/// the longest run of digits. Saturates at the `i64` bounds.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut acc: i128 = 0;
    let mut seen = false;
    for d in s.chars().map_while(|c| c.to_digit(radix)) {
        seen = true;
        acc = acc
            .saturating_mul(i128::from(radix))
            .saturating_add(i128::from(d));
    }
    if !seen {
        return None;
    }
    let signed = if negative { -acc } else { acc };
    Some(signed.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::Timestamp;
    use crate::value::Map;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    // ---- safe_num ----

    #[test]
    fn test_safe_num_non_numeric_uses_fallback() {
        assert_eq!(safe_num(&v(json!("abc")), 0.0), 0.0);
        assert_eq!(safe_num(&v(json!("abc")), 5.0), 5.0);
        assert_eq!(safe_num(&Value::Undefined, 7.0), 7.0);
        assert_eq!(safe_num(&v(json!({"a": 1})), 3.0), 3.0);
    }

    #[test]
    fn test_safe_num_numeric_strings() {
        assert_eq!(safe_num(&v(json!("42")), 0.0), 42.0);
        assert_eq!(safe_num(&v(json!("  -3.5  ")), 0.0), -3.5);
        assert_eq!(safe_num(&v(json!(".5")), 0.0), 0.5);
        assert_eq!(safe_num(&v(json!("5.")), 0.0), 5.0);
        assert_eq!(safe_num(&v(json!("1e3")), 0.0), 1000.0);
        assert_eq!(safe_num(&v(json!("0x1F")), 0.0), 31.0);
        assert_eq!(safe_num(&v(json!("0b101")), 0.0), 5.0);
        assert_eq!(safe_num(&v(json!("0o17")), 0.0), 15.0);
        assert_eq!(safe_num(&v(json!("-Infinity")), 0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_safe_num_rejects_partial_literals() {
        for text in ["12px", "1e", ".", "+", "-0x10", "0x", "inf", "NaN", "1,000", "1 2"] {
            assert_eq!(safe_num(&Value::from(text), -1.0), -1.0, "input {text:?}");
        }
    }

    #[test]
    fn test_safe_num_empty_and_null_are_zero() {
        assert_eq!(safe_num(&v(json!("")), 9.0), 0.0);
        assert_eq!(safe_num(&v(json!("   ")), 9.0), 0.0);
        assert_eq!(safe_num(&Value::Null, 9.0), 0.0);
    }

    #[test]
    fn test_safe_num_bools_and_numbers() {
        assert_eq!(safe_num(&Value::Bool(true), 9.0), 1.0);
        assert_eq!(safe_num(&Value::Bool(false), 9.0), 0.0);
        assert_eq!(safe_num(&Value::Number(2.25), 9.0), 2.25);
        assert_eq!(safe_num(&Value::Number(f64::NAN), 9.0), 9.0);
        assert_eq!(safe_num(&Value::Number(f64::INFINITY), 9.0), f64::INFINITY);
    }

    #[test]
    fn test_safe_num_arrays() {
        assert_eq!(safe_num(&v(json!([])), 9.0), 0.0);
        assert_eq!(safe_num(&v(json!([7])), 9.0), 7.0);
        assert_eq!(safe_num(&v(json!(["8"])), 9.0), 8.0);
        assert_eq!(safe_num(&v(json!([[6]])), 9.0), 6.0);
        assert_eq!(safe_num(&v(json!([null])), 9.0), 0.0);
        assert_eq!(safe_num(&v(json!([true])), 9.0), 9.0);
        assert_eq!(safe_num(&v(json!([1, 2])), 9.0), 9.0);
    }

    #[test]
    fn test_safe_num_records_and_timestamps() {
        let record = Value::record("Point", [("x", 1)].into_iter().collect::<Map>());
        assert_eq!(safe_num(&record, 4.0), 4.0);

        let ts = Timestamp::from_epoch_millis(1_500).unwrap();
        assert_eq!(safe_num(&Value::from(ts), 0.0), 1_500.0);
    }

    // ---- safe_int ----

    #[test]
    fn test_safe_int_truncates() {
        assert_eq!(safe_int(&v(json!("42.9")), 0), 42);
        assert_eq!(safe_int(&v(json!(42.9)), 0), 42);
        assert_eq!(safe_int(&v(json!(-7.9)), 0), -7);
        assert_eq!(safe_int(&v(json!(-0.5)), 0), 0);
    }

    #[test]
    fn test_safe_int_leading_digits() {
        assert_eq!(safe_int(&v(json!("12px")), 0), 12);
        assert_eq!(safe_int(&v(json!("  +8 apples")), 0), 8);
        assert_eq!(safe_int(&v(json!("0x1f")), 0), 31);
        assert_eq!(safe_int(&v(json!("-0X10")), 0), -16);
        assert_eq!(safe_int(&v(json!("1e5")), 0), 1);
    }

    #[test]
    fn test_safe_int_fallbacks() {
        assert_eq!(safe_int(&v(json!("")), 3), 3);
        assert_eq!(safe_int(&v(json!("abc")), 3), 3);
        assert_eq!(safe_int(&v(json!("0x")), 3), 3);
        assert_eq!(safe_int(&Value::Null, 3), 3);
        assert_eq!(safe_int(&Value::Undefined, 3), 3);
        assert_eq!(safe_int(&Value::Bool(true), 3), 3);
        assert_eq!(safe_int(&Value::Number(f64::NAN), 3), 3);
        assert_eq!(safe_int(&Value::Number(f64::INFINITY), 3), 3);
        assert_eq!(safe_int(&v(json!({"a": 1})), 3), 3);
        assert_eq!(safe_int(&Value::from(Timestamp::now()), 3), 3);
    }

    #[test]
    fn test_safe_int_exponent_numbers_read_leading_digit() {
        assert_eq!(safe_int(&Value::Number(1e21), 0), 1);
        assert_eq!(safe_int(&Value::Number(1.5e-7), 0), 1);
        assert_eq!(safe_int(&Value::Number(-4e-7), 0), -4);
    }

    #[test]
    fn test_safe_int_arrays_read_first_element() {
        assert_eq!(safe_int(&v(json!(["5", 6])), 0), 5);
        assert_eq!(safe_int(&v(json!([2.7])), 0), 2);
        assert_eq!(safe_int(&v(json!([])), 9), 9);
        assert_eq!(safe_int(&v(json!([null, 1])), 9), 9);
    }

    #[test]
    fn test_safe_int_saturates() {
        assert_eq!(safe_int(&v(json!("99999999999999999999999")), 0), i64::MAX);
        assert_eq!(safe_int(&v(json!("-99999999999999999999999")), 0), i64::MIN);
    }

    // ---- safe_str ----

    #[test]
    fn test_safe_str() {
        assert_eq!(safe_str(&v(json!(42)), ""), "");
        assert_eq!(safe_str(&v(json!(42)), "N/A"), "N/A");
        assert_eq!(safe_str(&v(json!("hi")), ""), "hi");
        assert_eq!(safe_str(&v(json!("")), "N/A"), "");
        assert_eq!(safe_str(&Value::Null, "N/A"), "N/A");
        assert_eq!(safe_str(&v(json!(["a"])), "N/A"), "N/A");
    }

    // ---- num_or ----

    #[test]
    fn test_num_or_absent_values() {
        assert_eq!(num_or(&v(json!("")), "x"), NumOr::Fallback("x"));
        assert_eq!(num_or(&Value::Null, "x"), NumOr::Fallback("x"));
        assert_eq!(num_or(&Value::Undefined, "x"), NumOr::Fallback("x"));
    }

    #[test]
    fn test_num_or_present_values() {
        assert_eq!(num_or(&v(json!("3")), "x"), NumOr::Number(3.0));
        assert_eq!(num_or(&v(json!(0)), "x"), NumOr::Number(0.0));
        assert_eq!(num_or(&v(json!("abc")), "x"), NumOr::Number(0.0));
        assert_eq!(num_or(&v(json!(" ")), "x"), NumOr::Number(0.0));
    }

    #[test]
    fn test_num_or_accessors() {
        let n = num_or(&v(json!("2.5")), "x");
        assert!(n.is_number());
        assert_eq!(n.number(), Some(2.5));
        assert_eq!(n.fallback(), None);
        assert_eq!(n.unwrap_or_else(|_| -1.0), 2.5);

        let f = num_or(&Value::Null, String::from("none"));
        assert!(f.is_fallback());
        assert_eq!(f.fallback().map(String::as_str), Some("none"));
        assert_eq!(f.clone().map_fallback(|s| s.len()), NumOr::Fallback(4));
        assert_eq!(f.into_fallback(), Some("none".to_owned()));

        assert_eq!(num_or(&Value::Null, 1.5).into_f64(), 1.5);
    }

    // ---- is_number_like ----

    #[test]
    fn test_is_number_like() {
        assert!(is_number_like(&v(json!(1))));
        assert!(is_number_like(&Value::Number(f64::INFINITY)));
        assert!(!is_number_like(&Value::Number(f64::NAN)));
        assert!(is_number_like(&v(json!("abc"))));
        assert!(is_number_like(&Value::Undefined));
    }

    // ---- serial_no ----

    #[test]
    fn test_serial_no() {
        assert_eq!(serial_no(3), "03");
        assert_eq!(serial_no(0), "00");
        assert_eq!(serial_no(42), "42");
        assert_eq!(serial_no(123), "123");
        assert_eq!(serial_no(-1), "-1");
        assert_eq!(serial_no(0.5), "0.5");
    }
}
