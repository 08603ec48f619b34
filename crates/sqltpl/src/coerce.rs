//! Loose numeric coercion for `?d` / `?f` and number rendering.
//!
//! | source     | `?d`                                   | `?f`                     |
//! |------------|----------------------------------------|--------------------------|
//! | bool       | 0 / 1                                  | 0 / 1                    |
//! | int        | itself                                 | as float                 |
//! | float      | truncated toward zero, 0 if not finite or out of range | itself |
//! | string     | leading numeric prefix, saturating at the `i64` bounds, else 0 | leading numeric prefix, 0 if it overflows to infinity, else 0 |
//! | list / map | 0                                      | 0                        |
//! | opaque     | its numeric text as a string, else 0   | same                     |
//!
//! `NULL` and the skip marker never reach this module.

use crate::value::Value;
use std::fmt::Write;

/// A number recognized at the start of a string.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Int(i64),
    Float(f64),
}

pub(crate) fn to_int(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Int(i) => *i,
        Value::Float(f) => float_to_int(*f),
        Value::Str(s) => str_to_int(s),
        Value::Opaque(o) => o.numeric_text().map_or(0, |s| str_to_int(&s)),
        Value::Null | Value::List(_) | Value::Map(_) | Value::Skip(_) => 0,
    }
}

pub(crate) fn to_float(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::Str(s) => str_to_float(s),
        Value::Opaque(o) => o.numeric_text().map_or(0.0, |s| str_to_float(&s)),
        Value::Null | Value::List(_) | Value::Map(_) | Value::Skip(_) => 0.0,
    }
}

/// Truncate toward zero; NaN, infinities and values outside `i64` become 0.
pub(crate) fn float_to_int(f: f64) -> i64 {
    // 2^63 is exactly representable; anything at or above it does not fit.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() || f >= LIMIT || f < -LIMIT {
        return 0;
    }
    f.trunc() as i64
}

/// Truncate toward zero, clamping finite values to the `i64` range.
///
/// NaN and infinities become 0.
fn saturating_float_to_int(f: f64) -> i64 {
    if !f.is_finite() {
        return 0;
    }
    // `as` saturates for finite values.
    f.trunc() as i64
}

fn str_to_int(s: &str) -> i64 {
    match parse_numeric_prefix(s) {
        Some(Numeric::Int(i)) => i,
        Some(Numeric::Float(f)) => saturating_float_to_int(f),
        None => 0,
    }
}

fn str_to_float(s: &str) -> f64 {
    match parse_numeric_prefix(s) {
        Some(Numeric::Int(i)) => i as f64,
        Some(Numeric::Float(f)) if f.is_finite() => f,
        Some(Numeric::Float(_)) | None => 0.0,
    }
}

/// Recognize `[ws][sign]digits[.digits][(e|E)[sign]digits]` at the start of `s`.
///
/// At least one mantissa digit is required. An exponent marker not followed by
/// digits ends the number before the marker. Integer-looking prefixes that
/// overflow `i64` are returned as floats.
fn parse_numeric_prefix(s: &str) -> Option<Numeric> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c') {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    let mut is_float = false;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            is_float = true;
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits {
            is_float = true;
            i = j;
        }
    }

    // Only ASCII was consumed, so these are char boundaries.
    let text = &s[start..i];
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Numeric::Int(n));
        }
    }
    text.parse::<f64>().ok().map(Numeric::Float)
}

pub(crate) fn write_int(out: &mut String, value: i64) {
    let _ = write!(out, "{value}");
}

/// Render a finite float: shortest round-trip digits, integral values without a
/// fraction, exponent form for very large or very small magnitudes
/// (`1.0E+20`, `1.5E-5`).
pub(crate) fn write_float(out: &mut String, value: f64) {
    debug_assert!(value.is_finite());
    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e15).contains(&abs) {
        let formatted = format!("{value:e}");
        let (mantissa, exponent) = formatted
            .split_once('e')
            .unwrap_or((formatted.as_str(), "0"));
        out.push_str(mantissa);
        if !mantissa.contains('.') {
            out.push_str(".0");
        }
        out.push('E');
        if !exponent.starts_with('-') {
            out.push('+');
        }
        out.push_str(exponent);
        return;
    }
    let _ = write!(out, "{value}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: f64) -> String {
        let mut s = String::new();
        write_float(&mut s, f);
        s
    }

    #[test]
    fn strings_coerce_by_numeric_prefix() {
        assert_eq!(str_to_int("1"), 1);
        assert_eq!(str_to_int("  42abc"), 42);
        assert_eq!(str_to_int("-7"), -7);
        assert_eq!(str_to_int("1.9"), 1);
        assert_eq!(str_to_int("1e3"), 1000);
        assert_eq!(str_to_int("test"), 0);
        assert_eq!(str_to_int(""), 0);
        assert_eq!(str_to_int("."), 0);
    }

    #[test]
    fn overflowing_strings_saturate() {
        assert_eq!(str_to_int("99999999999999999999"), i64::MAX);
        assert_eq!(str_to_int("-99999999999999999999"), i64::MIN);
        assert_eq!(str_to_int("1e30"), i64::MAX);
        assert_eq!(str_to_int("1e999"), 0);
        assert_eq!(str_to_float("1e999"), 0.0);
        assert_eq!(str_to_float("-1e999"), 0.0);
        assert_eq!(str_to_float("1e300"), 1e300);
    }

    #[test]
    fn exponent_marker_without_digits_is_ignored() {
        assert_eq!(parse_numeric_prefix("12e"), Some(Numeric::Int(12)));
        assert_eq!(parse_numeric_prefix("12e+x"), Some(Numeric::Int(12)));
        assert_eq!(parse_numeric_prefix(".5"), Some(Numeric::Float(0.5)));
        assert_eq!(parse_numeric_prefix("5."), Some(Numeric::Float(5.0)));
        assert_eq!(parse_numeric_prefix("+-1"), None);
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(float_to_int(1.9), 1);
        assert_eq!(float_to_int(-1.9), -1);
        assert_eq!(float_to_int(f64::NAN), 0);
        assert_eq!(float_to_int(f64::INFINITY), 0);
        assert_eq!(float_to_int(1e30), 0);
    }

    #[test]
    fn composites_and_bools() {
        assert_eq!(to_int(&Value::List(vec![Value::Int(5)])), 0);
        assert_eq!(to_int(&Value::Map(vec![])), 0);
        assert_eq!(to_int(&Value::Bool(true)), 1);
        assert_eq!(to_float(&Value::Bool(false)), 0.0);
        assert_eq!(to_float(&Value::Str("1.1".into())), 1.1);
        assert_eq!(to_float(&Value::Int(3)), 3.0);
    }

    #[test]
    fn float_rendering() {
        assert_eq!(render(1.1), "1.1");
        assert_eq!(render(1.0), "1");
        assert_eq!(render(0.0), "0");
        assert_eq!(render(31337.31337), "31337.31337");
        assert_eq!(render(1e20), "1.0E+20");
        assert_eq!(render(-2.5e16), "-2.5E+16");
        assert_eq!(render(0.000015), "1.5E-5");
        assert_eq!(render(0.25), "0.25");
    }
}
