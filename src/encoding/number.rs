//! # Number Codec
//!
//! Locale-independent conversion between numbers and text, used by the value
//! coercion layer.
//!
//! ## Parsing
//!
//! Parsing reads the longest numeric prefix, the way C's `strtol` family does:
//!
//! | Input        | `parse_int` | `parse_double` |
//! |--------------|-------------|----------------|
//! | `"42"`       | 42          | 42.0           |
//! | `"  -7 apples"` | -7       | -7.0           |
//! | `"3.75e2x"`  | 3           | 375.0          |
//! | `"abc"`      | 0           | 0.0            |
//!
//! Integer parsing saturates on overflow. Text with no numeric prefix yields
//! zero; it is never an error.
//!
//! ## Formatting
//!
//! Integers use their plain decimal form. Floating point values use Rust's
//! shortest round-trip representation, never an exponent and never locale
//! separators.

/// Parses the signed integer prefix of `text`.
pub fn parse_int(text: &[u8]) -> i64 {
    let (negative, digits) = split_sign(text);
    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = (b - b'0') as i64;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Parses the unsigned integer prefix of `text`.
///
/// A leading minus negates in two's complement, as `strtoull` does.
pub fn parse_uint(text: &[u8]) -> u64 {
    let (negative, digits) = split_sign(text);
    let mut value: u64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add((b - b'0') as u64);
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Parses the floating point prefix of `text`.
pub fn parse_double(text: &[u8]) -> f64 {
    let trimmed = text.trim_ascii_start();
    let end = float_prefix_len(trimmed);
    if end == 0 {
        return 0.0;
    }
    std::str::from_utf8(&trimmed[..end])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn format_double(value: f64) -> String {
    value.to_string()
}

pub fn format_float(value: f32) -> String {
    value.to_string()
}

fn split_sign(text: &[u8]) -> (bool, &[u8]) {
    let trimmed = text.trim_ascii_start();
    match trimmed.first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    }
}

/// Length of the longest prefix shaped like `[+-]digits[.digits][e[+-]digits]`
/// holding at least one mantissa digit, or zero.
fn float_prefix_len(text: &[u8]) -> usize {
    let mut pos = 0;
    if matches!(text.first(), Some(b'+' | b'-')) {
        pos = 1;
    }
    let int_digits = count_digits(&text[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if text.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&text[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(text.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(text.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&text[exp.min(text.len())..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }
    pos
}

fn count_digits(text: &[u8]) -> usize {
    text.iter().take_while(|b| b.is_ascii_digit()).count()
}
